use chrono::NaiveDate;
use renewal_records::{HardwareRenewal, RenewalRecord, SoftwareRenewal};
use serde::{Deserialize, Serialize};

use crate::architecture::{architecture_breakdown, ArchitectureSlice};
use crate::customer::{customer_rollup, CustomerSummary};
use crate::summary::KindSummary;
use crate::timeline::{expiration_timeline, TimelineBucket};

/// Every aggregation a report consumes, computed from one snapshot so the
/// sections can never disagree with each other.
///
/// The customer rollup spans both kinds; breakdowns and timelines stay
/// per-kind because hardware expires on LDOS dates and software on contract
/// end dates, and the report presents them as separate tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateBundle {
    pub report_date: NaiveDate,
    pub hardware: KindSummary,
    pub software: KindSummary,
    /// Distinct customers after case-insensitive grouping; excludes records
    /// with no customer name.
    pub customer_count: usize,
    pub customers: Vec<CustomerSummary>,
    pub hardware_breakdown: Vec<ArchitectureSlice>,
    pub software_breakdown: Vec<ArchitectureSlice>,
    pub hardware_timeline: Vec<TimelineBucket>,
    pub software_timeline: Vec<TimelineBucket>,
}

impl AggregateBundle {
    pub fn compute(
        hardware: &[HardwareRenewal],
        software: &[SoftwareRenewal],
        report_date: NaiveDate,
    ) -> Self {
        let hw = || hardware.iter().map(|h| h as &dyn RenewalRecord);
        let sw = || software.iter().map(|s| s as &dyn RenewalRecord);

        let customers = customer_rollup(hw().chain(sw()));
        let bundle = Self {
            report_date,
            hardware: KindSummary::collect(hw()),
            software: KindSummary::collect(sw()),
            customer_count: customers.len(),
            customers,
            hardware_breakdown: architecture_breakdown(hw()),
            software_breakdown: architecture_breakdown(sw()),
            hardware_timeline: expiration_timeline(hw(), report_date),
            software_timeline: expiration_timeline(sw(), report_date),
        };
        log::debug!(
            "Aggregated {} records into {} customers, {}+{} architecture slices, {}+{} timeline buckets",
            bundle.record_count(),
            bundle.customer_count,
            bundle.hardware_breakdown.len(),
            bundle.software_breakdown.len(),
            bundle.hardware_timeline.len(),
            bundle.software_timeline.len()
        );
        bundle
    }

    #[must_use]
    pub fn record_count(&self) -> usize {
        self.hardware.item_count + self.software.item_count
    }

    #[must_use]
    pub fn total_opportunity(&self) -> f64 {
        self.hardware.total_opportunity + self.software.total_opportunity
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }
}
