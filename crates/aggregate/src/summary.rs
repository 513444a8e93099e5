use std::collections::BTreeSet;

use renewal_records::RenewalRecord;
use serde::{Deserialize, Serialize};

/// Totals for one record kind across a snapshot: the hardware or software
/// half of a report's headline figures.
///
/// Unlike [`CustomerSummary`](crate::CustomerSummary) this has no grouping
/// key; it describes whatever slice the caller handed in, which for a
/// customer-scoped report is that customer's records of one kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KindSummary {
    pub item_count: usize,
    pub total_quantity: u64,
    pub total_opportunity: f64,
    /// Full-term list price total; stays 0 for hardware.
    pub total_list_price: f64,
    /// Distinct non-empty architecture values seen.
    pub architectures: BTreeSet<String>,
}

impl KindSummary {
    /// Total up a record slice. Empty input gives the zero summary.
    pub fn collect<'a>(records: impl IntoIterator<Item = &'a dyn RenewalRecord>) -> Self {
        let mut summary = Self::default();
        for record in records {
            summary.item_count += 1;
            summary.total_quantity += record.quantity();
            summary.total_opportunity += record.opportunity();
            summary.total_list_price += record.list_price();
            let architecture = record.architecture().trim();
            if !architecture.is_empty() {
                summary.architectures.insert(architecture.to_string());
            }
        }
        summary
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }
}
