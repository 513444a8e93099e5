//! # Renewal Ingest
//!
//! Everything between the source workbook and a normalized [`Dataset`]:
//!
//! ```text
//! xlsx bytes ──> Workbook ──> RawRow ──> normalize ──> Dataset
//!                                  ▲                      ▲
//!                         RowSource trait         StatusStore trait
//! ```
//!
//! Decoding is tolerant by contract: missing cells, malformed numbers, and
//! unknown status labels all degrade to defaults, so a load only fails when
//! the workbook itself is unreadable or a configured worksheet is missing.

mod error;
mod loader;
mod normalize;
mod source;
mod status;
mod workbook;

pub use error::{IngestError, Result};
pub use loader::{Dataset, DatasetLoader};
pub use normalize::{normalize_hardware, normalize_software};
pub use source::{RowSource, SheetRows, StaticRowSource, XlsxRowSource};
pub use status::{JsonStatusStore, MemoryStatusStore, StatusMap, StatusStore};
pub use workbook::{rows_from_range, Workbook};
