use chrono::NaiveDate;

/// Date formats seen in vendor renewal exports, tried in order.
const FORMATS: [&str; 4] = ["%Y-%m-%d", "%d-%b-%Y", "%m/%d/%Y", "%d %b %Y"];

/// Parse a renewal-relevant date out of raw cell text.
///
/// Returns `None` for anything unparsable; the caller buckets those under
/// "No date" rather than failing. Datetime text degrades to its date part.
#[must_use]
pub fn parse_renewal_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Some(date) = FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
    {
        return Some(date);
    }
    // ISO datetime text ("2026-03-01T00:00:00") keeps its date prefix.
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}
