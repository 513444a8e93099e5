//! # Renewal Engine
//!
//! The orchestration layer that ties the pipeline together:
//!
//! ```text
//! RowSource ──> Dataset ──> AggregateBundle ──> RenderableDocument ──> DocumentSink
//!     ▲            │              │                     ▲
//! StatusStore ─────┘         (LRU cache)       NarrativeGenerator
//! ```
//!
//! [`ReportEngine`] loads the dataset once, serves concurrent report
//! generation from independent snapshots, applies status edits with a full
//! rewrite of the status file, and caches aggregate bundles per scope,
//! report date, and dataset generation.

mod cache;
mod engine;
mod error;
mod sink;
mod stats;

pub use cache::AggregateCache;
pub use engine::{ReportArtifact, ReportEngine, ReportOptions, ReportScope};
pub use error::{EngineError, Result};
pub use sink::{DocumentSink, FileSink, MemorySink};
pub use stats::{EngineStats, StatsSnapshot};
