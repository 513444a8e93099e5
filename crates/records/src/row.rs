use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single spreadsheet cell, lifted out of the vendor file format.
///
/// Decoding keeps native types where the workbook has them (numbers, dates)
/// and leaves everything else as text; normalization decides how each column
/// coerces via the [`RawRow`] accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Native date cell, already resolved to a calendar date.
    Date(NaiveDate),
}

impl CellValue {
    /// Text rendering of the cell. Missing cells render as `""`, numeric
    /// cells drop a trailing `.0`, date cells render as ISO `YYYY-MM-DD`.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(s) => s.clone(),
            Self::Number(n) => format_number(*n),
            Self::Bool(b) => b.to_string(),
            Self::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }

    /// Numeric value of the cell; non-numeric and missing cells coerce
    /// to 0, as do non-finite values (`f64::from_str` accepts "NaN" and
    /// "inf", which no monetary or quantity column may produce).
    #[must_use]
    pub fn as_number(&self) -> f64 {
        let n = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        };
        if n.is_finite() {
            n
        } else {
            0.0
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

/// Integer-valued floats print without a decimal point so identifiers that
/// arrive as numeric cells ("8821.0") round-trip as "8821".
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// One untyped data row: its 0-based position within the sheet (header row
/// excluded) plus header-keyed cells.
///
/// Header keys are matched case-insensitively on trimmed names, so
/// `" Customer Name "` in the workbook still resolves
/// [`columns::CUSTOMER_NAME`](crate::columns::CUSTOMER_NAME).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    index: usize,
    cells: HashMap<String, CellValue>,
}

impl RawRow {
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self {
            index,
            cells: HashMap::new(),
        }
    }

    /// 0-based data-row index within the originating sheet.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    pub fn insert(&mut self, header: &str, value: CellValue) {
        self.cells.insert(canonical_key(header), value);
    }

    /// Builder-style insert, mostly for tests and fixtures.
    #[must_use]
    pub fn with_cell(mut self, header: &str, value: CellValue) -> Self {
        self.insert(header, value);
        self
    }

    #[must_use]
    pub fn cell(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(&canonical_key(column))
    }

    /// Text for `column`; `""` when the column is absent or empty.
    #[must_use]
    pub fn text(&self, column: &str) -> String {
        self.cell(column).map(CellValue::as_text).unwrap_or_default()
    }

    /// Number for `column`; 0 when absent or non-numeric.
    #[must_use]
    pub fn number(&self, column: &str) -> f64 {
        self.cell(column).map_or(0.0, CellValue::as_number)
    }

    /// Non-negative integer for `column`; fractional values truncate and
    /// negatives clamp to 0.
    #[must_use]
    pub fn quantity(&self, column: &str) -> u64 {
        let n = self.number(column);
        if n.is_sign_negative() || !n.is_finite() {
            0
        } else {
            n as u64
        }
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.cells.values().all(CellValue::is_empty)
    }
}

fn canonical_key(header: &str) -> String {
    header.trim().to_lowercase()
}
