use serde::{Deserialize, Serialize};

use crate::ItemStatus;

/// Which sheet a record came from. Row indices are scoped per kind, so a
/// status edit always names the kind alongside the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Hardware,
    Software,
}

impl RecordKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hardware => "Hardware",
            Self::Software => "Software",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized hardware renewal line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardwareRenewal {
    /// 0-based data-row index in the hardware sheet; the stable identity
    /// used for status persistence.
    pub row: usize,
    pub customer: String,
    pub country: String,
    pub product_id: String,
    pub description: String,
    pub architecture: String,
    pub sub_architecture: String,
    pub quantity: u64,
    /// Renewal opportunity value in the workbook's currency.
    pub opportunity: f64,
    /// Last-date-of-support text exactly as the workbook carries it; parsed
    /// lazily by date-sensitive aggregations.
    pub ldos: String,
    pub status: ItemStatus,
}

/// A normalized software renewal line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoftwareRenewal {
    /// 0-based data-row index in the software sheet.
    pub row: usize,
    pub customer: String,
    pub country: String,
    pub offer_id: String,
    pub description: String,
    pub architecture: String,
    pub sub_architecture: String,
    pub quantity: u64,
    pub opportunity: f64,
    /// Full-term list price; 0 when the column is absent or non-numeric.
    pub list_price: f64,
    /// Contract end date text exactly as the workbook carries it.
    pub end_date: String,
    pub status: ItemStatus,
}

/// The aggregation-facing view shared by both record kinds. Aggregations are
/// written once against this trait and run unchanged over either sheet or a
/// mixed population.
pub trait RenewalRecord {
    fn customer(&self) -> &str;
    fn architecture(&self) -> &str;
    fn quantity(&self) -> u64;
    fn opportunity(&self) -> f64;
    /// Full-term list price; 0 for kinds that have none.
    fn list_price(&self) -> f64;
    /// Raw renewal-relevant date text (LDOS or contract end).
    fn renewal_date(&self) -> &str;
    fn status(&self) -> ItemStatus;
}

impl RenewalRecord for HardwareRenewal {
    fn customer(&self) -> &str {
        &self.customer
    }

    fn architecture(&self) -> &str {
        &self.architecture
    }

    fn quantity(&self) -> u64 {
        self.quantity
    }

    fn opportunity(&self) -> f64 {
        self.opportunity
    }

    fn list_price(&self) -> f64 {
        0.0
    }

    fn renewal_date(&self) -> &str {
        &self.ldos
    }

    fn status(&self) -> ItemStatus {
        self.status
    }
}

impl RenewalRecord for SoftwareRenewal {
    fn customer(&self) -> &str {
        &self.customer
    }

    fn architecture(&self) -> &str {
        &self.architecture
    }

    fn quantity(&self) -> u64 {
        self.quantity
    }

    fn opportunity(&self) -> f64 {
        self.opportunity
    }

    fn list_price(&self) -> f64 {
        self.list_price
    }

    fn renewal_date(&self) -> &str {
        &self.end_date
    }

    fn status(&self) -> ItemStatus {
        self.status
    }
}

/// Canonical customer grouping key: the upper-cased, trimmed name.
///
/// An empty key means the record has no usable customer and is excluded from
/// customer-level aggregation entirely.
#[must_use]
pub fn customer_key(name: &str) -> String {
    name.trim().to_uppercase()
}
