use std::collections::{BTreeSet, HashMap};

use renewal_records::{customer_key, RenewalRecord};
use serde::{Deserialize, Serialize};

/// Per-customer totals across every record kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSummary {
    /// Display name: the trimmed spelling from the first record seen for
    /// this customer, not the upper-cased grouping key.
    pub name: String,
    pub item_count: usize,
    pub total_quantity: u64,
    pub total_opportunity: f64,
    /// Full-term list price total; software records contribute, hardware
    /// records add 0.
    pub total_list_price: f64,
    /// Distinct architectures this customer's records touch. Records with
    /// no architecture value add nothing here.
    pub architectures: BTreeSet<String>,
}

impl CustomerSummary {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            item_count: 0,
            total_quantity: 0,
            total_opportunity: 0.0,
            total_list_price: 0.0,
            architectures: BTreeSet::new(),
        }
    }

    fn absorb(&mut self, record: &dyn RenewalRecord) {
        self.item_count += 1;
        self.total_quantity += record.quantity();
        self.total_opportunity += record.opportunity();
        self.total_list_price += record.list_price();
        let architecture = record.architecture().trim();
        if !architecture.is_empty() {
            self.architectures.insert(architecture.to_string());
        }
    }
}

/// Group records by customer and total them, largest opportunity first.
///
/// Grouping is case-insensitive (upper-cased trimmed name); records with an
/// empty customer are excluded entirely. The sort is stable, so customers
/// with equal totals keep their first-appearance order.
pub fn customer_rollup<'a>(
    records: impl IntoIterator<Item = &'a dyn RenewalRecord>,
) -> Vec<CustomerSummary> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut summaries: Vec<CustomerSummary> = Vec::new();

    for record in records {
        let key = customer_key(record.customer());
        if key.is_empty() {
            continue;
        }
        let slot = *slots.entry(key).or_insert_with(|| {
            summaries.push(CustomerSummary::new(record.customer().trim()));
            summaries.len() - 1
        });
        summaries[slot].absorb(record);
    }

    summaries.sort_by(|a, b| {
        b.total_opportunity
            .partial_cmp(&a.total_opportunity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    summaries
}
