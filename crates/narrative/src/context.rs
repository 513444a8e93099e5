use chrono::NaiveDate;
use renewal_aggregate::{AggregateBundle, KindSummary};
use renewal_records::{HardwareRenewal, SoftwareRenewal};
use serde::{Deserialize, Serialize};

/// Cap on the per-kind item lists in the request. The aggregates carry the
/// full picture; the items are examples for the service to quote from.
pub const ITEM_LIMIT: usize = 50;

/// The per-customer snapshot sent to the narrative service.
///
/// This is a wire type: field names are camelCase on the JSON side and the
/// shape is part of the service contract, so it stays decoupled from the
/// internal record and aggregate types it is built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeContext {
    /// Customer the narrative should be written about, or a portfolio
    /// label when the report spans everyone.
    pub customer: String,
    pub report_date: NaiveDate,
    pub hardware_items: Vec<HardwareLine>,
    pub software_items: Vec<SoftwareLine>,
    pub hardware_summary: SummaryLine,
    pub software_summary: SummaryLine,
    pub hardware_breakdown: Vec<ArchitectureLine>,
    pub software_breakdown: Vec<ArchitectureLine>,
    pub hardware_timeline: Vec<TimelineLine>,
    pub software_timeline: Vec<TimelineLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardwareLine {
    pub product_id: String,
    pub description: String,
    pub architecture: String,
    pub quantity: u64,
    pub opportunity: f64,
    /// Raw end-of-support text as the workbook carries it.
    pub ldos: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftwareLine {
    pub offer_id: String,
    pub description: String,
    pub architecture: String,
    pub quantity: u64,
    pub opportunity: f64,
    pub list_price: f64,
    pub end_date: String,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryLine {
    pub item_count: usize,
    pub total_quantity: u64,
    pub total_opportunity: f64,
    pub total_list_price: f64,
    pub architectures: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchitectureLine {
    pub name: String,
    pub item_count: usize,
    pub total_opportunity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineLine {
    pub label: String,
    pub item_count: usize,
    pub total_opportunity: f64,
}

impl NarrativeContext {
    /// Build the request from one filtered snapshot and its aggregates.
    /// Item lists cap at [`ITEM_LIMIT`] per kind; everything else is
    /// carried whole.
    #[must_use]
    pub fn from_snapshot(
        customer: &str,
        hardware: &[HardwareRenewal],
        software: &[SoftwareRenewal],
        bundle: &AggregateBundle,
    ) -> Self {
        Self {
            customer: customer.to_string(),
            report_date: bundle.report_date,
            hardware_items: hardware
                .iter()
                .take(ITEM_LIMIT)
                .map(|item| HardwareLine {
                    product_id: item.product_id.clone(),
                    description: item.description.clone(),
                    architecture: item.architecture.clone(),
                    quantity: item.quantity,
                    opportunity: item.opportunity,
                    ldos: item.ldos.clone(),
                    status: item.status.to_string(),
                })
                .collect(),
            software_items: software
                .iter()
                .take(ITEM_LIMIT)
                .map(|item| SoftwareLine {
                    offer_id: item.offer_id.clone(),
                    description: item.description.clone(),
                    architecture: item.architecture.clone(),
                    quantity: item.quantity,
                    opportunity: item.opportunity,
                    list_price: item.list_price,
                    end_date: item.end_date.clone(),
                    status: item.status.to_string(),
                })
                .collect(),
            hardware_summary: summary_line(&bundle.hardware),
            software_summary: summary_line(&bundle.software),
            hardware_breakdown: architecture_lines(&bundle.hardware_breakdown),
            software_breakdown: architecture_lines(&bundle.software_breakdown),
            hardware_timeline: timeline_lines(&bundle.hardware_timeline),
            software_timeline: timeline_lines(&bundle.software_timeline),
        }
    }
}

fn summary_line(summary: &KindSummary) -> SummaryLine {
    SummaryLine {
        item_count: summary.item_count,
        total_quantity: summary.total_quantity,
        total_opportunity: summary.total_opportunity,
        total_list_price: summary.total_list_price,
        architectures: summary.architectures.iter().cloned().collect(),
    }
}

fn architecture_lines(slices: &[renewal_aggregate::ArchitectureSlice]) -> Vec<ArchitectureLine> {
    slices
        .iter()
        .map(|slice| ArchitectureLine {
            name: slice.name.clone(),
            item_count: slice.item_count,
            total_opportunity: slice.total_opportunity,
        })
        .collect()
}

fn timeline_lines(buckets: &[renewal_aggregate::TimelineBucket]) -> Vec<TimelineLine> {
    buckets
        .iter()
        .map(|bucket| TimelineLine {
            label: bucket.label.as_str().to_string(),
            item_count: bucket.item_count,
            total_opportunity: bucket.total_opportunity,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use renewal_records::ItemStatus;

    fn hw(row: usize, opportunity: f64) -> HardwareRenewal {
        HardwareRenewal {
            row,
            customer: "Acme".into(),
            country: "US".into(),
            product_id: format!("HW-{row}"),
            description: "Edge router".into(),
            architecture: "Routing".into(),
            sub_architecture: String::new(),
            quantity: 1,
            opportunity,
            ldos: "2026-06-01".into(),
            status: ItemStatus::Quoted,
        }
    }

    fn sw(row: usize, opportunity: f64) -> SoftwareRenewal {
        SoftwareRenewal {
            row,
            customer: "Acme".into(),
            country: "US".into(),
            offer_id: format!("SW-{row}"),
            description: "Support".into(),
            architecture: "Security".into(),
            sub_architecture: String::new(),
            quantity: 2,
            opportunity,
            list_price: 99.0,
            end_date: "2026-09-30".into(),
            status: ItemStatus::Unset,
        }
    }

    fn context_for(hardware: &[HardwareRenewal], software: &[SoftwareRenewal]) -> NarrativeContext {
        let bundle = AggregateBundle::compute(
            hardware,
            software,
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        );
        NarrativeContext::from_snapshot("Acme", hardware, software, &bundle)
    }

    #[test]
    fn carries_items_and_per_kind_aggregates() {
        let context = context_for(&[hw(0, 100.0)], &[sw(0, 50.0)]);
        assert_eq!(context.customer, "Acme");
        assert_eq!(context.hardware_items.len(), 1);
        assert_eq!(context.hardware_items[0].product_id, "HW-0");
        assert_eq!(context.hardware_items[0].status, "Quoted");
        assert_eq!(context.software_items[0].list_price, 99.0);
        assert_eq!(context.hardware_summary.total_opportunity, 100.0);
        assert_eq!(context.software_summary.total_opportunity, 50.0);
        assert_eq!(context.software_summary.total_list_price, 99.0);
        assert_eq!(context.hardware_breakdown[0].name, "Routing");
        assert_eq!(context.software_breakdown[0].name, "Security");
        assert_eq!(context.hardware_timeline[0].label, "Within 6 months");
    }

    #[test]
    fn item_lists_cap_but_summaries_do_not() {
        let hardware: Vec<_> = (0..ITEM_LIMIT + 20).map(|i| hw(i, 1.0)).collect();
        let context = context_for(&hardware, &[]);
        assert_eq!(context.hardware_items.len(), ITEM_LIMIT);
        assert_eq!(context.hardware_summary.item_count, ITEM_LIMIT + 20);
        assert!(context.software_items.is_empty());
        assert_eq!(context.software_summary, SummaryLine::default());
    }

    #[test]
    fn wire_fields_are_camel_case() {
        let json = serde_json::to_value(context_for(&[hw(0, 10.0)], &[])).unwrap();
        assert!(json.get("reportDate").is_some());
        assert!(json.get("hardwareItems").is_some());
        assert!(json.get("softwareSummary").is_some());
        assert!(json.get("hardwareTimeline").is_some());
        let first = &json["hardwareItems"][0];
        assert!(first.get("productId").is_some());
        assert!(first.get("ldos").is_some());
        let summary = &json["hardwareSummary"];
        assert!(summary.get("totalListPrice").is_some());
    }

    #[test]
    fn timeline_labels_use_display_text() {
        let context = context_for(&[hw(0, 10.0)], &[]);
        assert_eq!(context.hardware_timeline[0].label, "Within 6 months");
        assert!(context.software_timeline.is_empty());
    }
}
