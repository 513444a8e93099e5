//! # Renewal Records
//!
//! Shared record model for renewal-opportunity data: the untyped row shape
//! produced by workbook decoding, the typed hardware/software line items
//! produced by normalization, and the user-assignable item status that
//! survives reloads.
//!
//! Everything downstream (aggregation, narrative context, report assembly)
//! speaks these types; nothing here touches files or the network.

pub mod columns;

mod item;
mod row;
mod status;

pub use item::{customer_key, HardwareRenewal, RecordKind, RenewalRecord, SoftwareRenewal};
pub use row::{CellValue, RawRow};
pub use status::ItemStatus;
