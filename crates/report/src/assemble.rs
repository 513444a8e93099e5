//! Report assembly: one aggregate snapshot in, one renderable document out.
//!
//! Block order is fixed: cover, page break, table of contents, then one
//! titled section per non-empty aggregation result, the narrative, and a
//! closing marker. A section with nothing to show is skipped entirely
//! rather than rendered empty, so a sparse dataset produces a short
//! report, not a hollow one.

use chrono::{DateTime, Utc};
use renewal_aggregate::{AggregateBundle, ArchitectureSlice, TimelineBucket};
use renewal_records::{HardwareRenewal, SoftwareRenewal};
use serde::{Deserialize, Serialize};

use crate::document::{DocBlock, RenderableDocument, TableBlock};
use crate::inline::StyledRun;
use crate::markdown::markdown_to_blocks;

/// Final paragraph of every report.
pub const CLOSING_MARKER: &str = "End of report.";

/// What kind of report this is; the filename prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportKind {
    /// Whole-portfolio report.
    Summary,
    /// Report filtered to a single customer.
    Customer,
}

impl ReportKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Summary => "Summary",
            Self::Customer => "Customer",
        }
    }
}

/// Narrative content as the assembler sees it, already stripped of
/// transport concerns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NarrativeSection {
    /// Markdown text to parse into blocks.
    Text(String),
    /// A short note shown instead of narrative text.
    Note(String),
    /// No narrative section at all.
    Omitted,
}

impl NarrativeSection {
    /// Note used when the service reported success but produced no text.
    #[must_use]
    pub fn exhausted(finish_reason: &str) -> Self {
        Self::Note(format!(
            "Narrative unavailable: generation stopped early (finish reason: {finish_reason})."
        ))
    }

    /// Note used when the service declined to generate at all.
    #[must_use]
    pub fn declined(finish_reason: Option<&str>) -> Self {
        match finish_reason {
            Some(reason) => Self::Note(format!(
                "Narrative unavailable: the service did not generate text ({reason})."
            )),
            None => Self::Note(
                "Narrative unavailable: the service did not generate text.".to_string(),
            ),
        }
    }
}

/// Per-item rows for the detail section of customer-scoped reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailRows {
    pub hardware: Vec<HardwareRenewal>,
    pub software: Vec<SoftwareRenewal>,
}

impl DetailRows {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hardware.is_empty() && self.software.is_empty()
    }
}

/// Everything assembly needs. The bundle is the single source of numbers;
/// assembly never recomputes aggregates.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportInput {
    pub kind: ReportKind,
    /// Cover subject: a customer name or a portfolio label.
    pub subject: String,
    /// Origin of the underlying data, shown on the cover.
    pub source: String,
    pub generated_at: DateTime<Utc>,
    /// Model that produced the narrative, shown on the cover when known.
    pub model: Option<String>,
    pub bundle: AggregateBundle,
    pub narrative: NarrativeSection,
    pub detail: Option<DetailRows>,
}

/// Build the full document. Empty aggregation results drop their sections;
/// nothing here ever fails.
#[must_use]
pub fn assemble_report(input: &ReportInput) -> RenderableDocument {
    let mut doc = RenderableDocument::new(format!("Renewal Opportunity Report: {}", input.subject));
    doc.push(cover(input));
    doc.push(DocBlock::PageBreak);
    doc.push(DocBlock::Toc);

    let bundle = &input.bundle;
    let mut sections: Vec<Vec<DocBlock>> = Vec::new();
    if let Some(section) = customer_section(bundle) {
        sections.push(section);
    }
    if let Some(section) = breakdown_section("Hardware by Architecture", &bundle.hardware_breakdown)
    {
        sections.push(section);
    }
    if let Some(section) = breakdown_section("Software by Architecture", &bundle.software_breakdown)
    {
        sections.push(section);
    }
    if let Some(section) =
        timeline_section("Hardware Expiration Timeline", &bundle.hardware_timeline)
    {
        sections.push(section);
    }
    if let Some(section) =
        timeline_section("Software Expiration Timeline", &bundle.software_timeline)
    {
        sections.push(section);
    }
    if let Some(section) = detail_section(input.detail.as_ref()) {
        sections.push(section);
    }

    if sections.is_empty() {
        doc.push(DocBlock::Paragraph {
            runs: vec![StyledRun::plain("No renewal records in this snapshot.")],
        });
    } else {
        for section in sections {
            doc.blocks.extend(section);
        }
    }
    if let Some(section) = narrative_section(&input.narrative) {
        doc.blocks.extend(section);
    }
    doc.push(DocBlock::Paragraph {
        runs: vec![StyledRun::plain(CLOSING_MARKER)],
    });

    log::debug!(
        "Assembled {} report for '{}' with {} blocks",
        input.kind.as_str(),
        input.subject,
        doc.blocks.len()
    );
    doc
}

fn cover(input: &ReportInput) -> DocBlock {
    let bundle = &input.bundle;
    let mut lines = vec![format!(
        "Report date: {}",
        bundle.report_date.format("%Y-%m-%d")
    )];
    if !input.source.is_empty() {
        lines.push(format!("Source: {}", input.source));
    }
    lines.push(format!(
        "Generated: {}",
        input.generated_at.format("%Y-%m-%d %H:%M UTC")
    ));
    lines.push(format!(
        "Hardware opportunity: {} across {} items",
        format_amount(bundle.hardware.total_opportunity),
        bundle.hardware.item_count
    ));
    lines.push(format!(
        "Software opportunity: {} across {} items",
        format_amount(bundle.software.total_opportunity),
        bundle.software.item_count
    ));
    if let Some(model) = &input.model {
        lines.push(format!("Narrative model: {model}"));
    }
    DocBlock::Cover {
        title: "Renewal Opportunity Report".to_string(),
        subtitle: input.subject.clone(),
        lines,
    }
}

fn customer_section(bundle: &AggregateBundle) -> Option<Vec<DocBlock>> {
    if bundle.customers.is_empty() {
        return None;
    }
    let mut table = TableBlock::new(&[
        "Customer",
        "Items",
        "Quantity",
        "Architectures",
        "Opportunity",
    ]);
    for customer in &bundle.customers {
        let architectures: Vec<&str> = customer.architectures.iter().map(String::as_str).collect();
        table.push_row(vec![
            customer.name.clone(),
            customer.item_count.to_string(),
            customer.total_quantity.to_string(),
            architectures.join(", "),
            format_amount(customer.total_opportunity),
        ]);
    }
    Some(section("Top Customers", vec![DocBlock::Table(table)]))
}

fn breakdown_section(title: &str, slices: &[ArchitectureSlice]) -> Option<Vec<DocBlock>> {
    if slices.is_empty() {
        return None;
    }
    let mut table = TableBlock::new(&["Architecture", "Items", "Opportunity"]);
    for slice in slices {
        table.push_row(vec![
            slice.name.clone(),
            slice.item_count.to_string(),
            format_amount(slice.total_opportunity),
        ]);
    }
    Some(section(title, vec![DocBlock::Table(table)]))
}

fn timeline_section(title: &str, buckets: &[TimelineBucket]) -> Option<Vec<DocBlock>> {
    if buckets.is_empty() {
        return None;
    }
    let mut table = TableBlock::new(&["Expiration Window", "Items", "Opportunity"]);
    for bucket in buckets {
        table.push_row(vec![
            bucket.label.as_str().to_string(),
            bucket.item_count.to_string(),
            format_amount(bucket.total_opportunity),
        ]);
    }
    Some(section(title, vec![DocBlock::Table(table)]))
}

fn detail_section(detail: Option<&DetailRows>) -> Option<Vec<DocBlock>> {
    let detail = detail?;
    if detail.is_empty() {
        return None;
    }
    let mut body = Vec::new();
    if !detail.hardware.is_empty() {
        body.push(subheading("Hardware"));
        let mut table = TableBlock::new(&[
            "Product ID",
            "Description",
            "Architecture",
            "Qty",
            "LDOS",
            "Status",
            "Opportunity",
        ]);
        for item in &detail.hardware {
            table.push_row(vec![
                item.product_id.clone(),
                item.description.clone(),
                item.architecture.clone(),
                item.quantity.to_string(),
                item.ldos.clone(),
                item.status.as_str().to_string(),
                format_amount(item.opportunity),
            ]);
        }
        body.push(DocBlock::Table(table));
    }
    if !detail.software.is_empty() {
        body.push(subheading("Software"));
        let mut table = TableBlock::new(&[
            "Offer ID",
            "Description",
            "Architecture",
            "Qty",
            "Contract End",
            "Status",
            "List Price",
            "Opportunity",
        ]);
        for item in &detail.software {
            table.push_row(vec![
                item.offer_id.clone(),
                item.description.clone(),
                item.architecture.clone(),
                item.quantity.to_string(),
                item.end_date.clone(),
                item.status.as_str().to_string(),
                format_amount(item.list_price),
                format_amount(item.opportunity),
            ]);
        }
        body.push(DocBlock::Table(table));
    }
    Some(section("Line Item Detail", body))
}

fn narrative_section(narrative: &NarrativeSection) -> Option<Vec<DocBlock>> {
    let body = match narrative {
        NarrativeSection::Text(text) => {
            let blocks = markdown_to_blocks(text);
            if blocks.is_empty() {
                return None;
            }
            blocks
        }
        NarrativeSection::Note(note) => vec![DocBlock::Paragraph {
            runs: vec![StyledRun::plain(note.clone())],
        }],
        NarrativeSection::Omitted => return None,
    };
    Some(section("Analysis", body))
}

fn section(title: &str, body: Vec<DocBlock>) -> Vec<DocBlock> {
    let mut blocks = vec![DocBlock::Heading {
        level: 1,
        runs: vec![StyledRun::plain(title)],
    }];
    blocks.extend(body);
    blocks
}

fn subheading(title: &str) -> DocBlock {
    DocBlock::Heading {
        level: 2,
        runs: vec![StyledRun::plain(title)],
    }
}

/// Thousands-grouped, two-decimal amount rendering: `1250.5` becomes
/// `"1,250.50"`. Non-finite input renders as zero.
#[must_use]
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return "0.00".to_string();
    }
    let cents = (value.abs() * 100.0).round() as u128;
    let whole = (cents / 100).to_string();
    let frac = (cents % 100) as u32;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{grouped}.{frac:02}")
}
