//! # Renewal Narrative
//!
//! Client side of the narrative generation service: the wire contract
//! (camelCase JSON), the [`NarrativeGenerator`] seam the engine calls
//! through, and the classification of service responses into outcomes.
//!
//! Retry policy deliberately lives with the caller. A transport failure
//! here is an error; deciding to re-run the report without a narrative is
//! the engine's call, not this crate's.

mod client;
mod context;
mod error;
mod outcome;

pub use client::{HttpNarrativeClient, NarrativeGenerator, StaticGenerator};
pub use context::{
    ArchitectureLine, HardwareLine, NarrativeContext, SoftwareLine, SummaryLine, TimelineLine,
    ITEM_LIMIT,
};
pub use error::{NarrativeError, Result};
pub use outcome::{NarrativeOutcome, NarrativeResponse, TokenUsage};
