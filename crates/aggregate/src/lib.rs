//! # Renewal Aggregate
//!
//! Pure aggregations over normalized renewal records: per-customer rollups,
//! architecture breakdowns, and the expiration timeline, plus the
//! [`AggregateBundle`] that carries all of them for one report.
//!
//! Nothing here does IO or touches shared state. Every function is a total
//! function of its inputs, which is what makes the report path cacheable and
//! trivially parallel.

mod architecture;
mod bundle;
mod customer;
mod date;
mod summary;
mod timeline;

pub use architecture::{architecture_breakdown, ArchitectureSlice, UNKNOWN_ARCHITECTURE};
pub use bundle::AggregateBundle;
pub use customer::{customer_rollup, CustomerSummary};
pub use date::parse_renewal_date;
pub use summary::KindSummary;
pub use timeline::{expiration_timeline, BucketLabel, TimelineBucket};
