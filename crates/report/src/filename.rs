use chrono::NaiveDate;

use crate::assemble::ReportKind;

/// Extension of the serialized report artifact.
pub const REPORT_EXTENSION: &str = "html";

/// Filesystem-safe component: every non-ASCII-alphanumeric character maps
/// 1:1 to an underscore, so the length never changes and two distinct
/// subjects stay distinct unless they differ only by punctuation.
#[must_use]
pub fn sanitize_component(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// `<kind>_<sanitized subject>_<ISO date>.<ext>`.
#[must_use]
pub fn report_filename(kind: ReportKind, subject: &str, date: NaiveDate) -> String {
    format!(
        "{}_{}_{}.{}",
        kind.as_str(),
        sanitize_component(subject),
        date.format("%Y-%m-%d"),
        REPORT_EXTENSION
    )
}
