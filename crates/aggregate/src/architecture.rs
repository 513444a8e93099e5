use std::collections::HashMap;

use renewal_records::RenewalRecord;
use serde::{Deserialize, Serialize};

/// Label substituted for records with no architecture value.
pub const UNKNOWN_ARCHITECTURE: &str = "Unknown";

/// Opportunity totals for one architecture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchitectureSlice {
    pub name: String,
    pub total_opportunity: f64,
    pub item_count: usize,
}

/// Group records by architecture, largest opportunity first.
///
/// Unlike customers, records with an empty architecture stay in the result
/// under [`UNKNOWN_ARCHITECTURE`], and grouping is on the exact trimmed
/// value. Equal totals keep first-appearance order.
pub fn architecture_breakdown<'a>(
    records: impl IntoIterator<Item = &'a dyn RenewalRecord>,
) -> Vec<ArchitectureSlice> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut slices: Vec<ArchitectureSlice> = Vec::new();

    for record in records {
        let trimmed = record.architecture().trim();
        let name = if trimmed.is_empty() {
            UNKNOWN_ARCHITECTURE
        } else {
            trimmed
        };
        let slot = *slots.entry(name.to_string()).or_insert_with(|| {
            slices.push(ArchitectureSlice {
                name: name.to_string(),
                total_opportunity: 0.0,
                item_count: 0,
            });
            slices.len() - 1
        });
        let slice = &mut slices[slot];
        slice.total_opportunity += record.opportunity();
        slice.item_count += 1;
    }

    slices.sort_by(|a, b| {
        b.total_opportunity
            .partial_cmp(&a.total_opportunity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    slices
}
