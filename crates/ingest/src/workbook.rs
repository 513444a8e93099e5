//! Workbook decoding: xlsx bytes in, header-keyed [`RawRow`]s out.
//!
//! The calamine types stop at this module boundary. Everything above works
//! with [`RawRow`], so the decode path can be tested by building cell ranges
//! directly instead of shipping binary fixtures.

use std::io::Cursor;

use calamine::{Data, Range, Reader, Xlsx};
use renewal_records::{CellValue, RawRow};

use crate::error::{IngestError, Result};

/// An opened xlsx workbook held fully in memory.
pub struct Workbook {
    inner: Xlsx<Cursor<Vec<u8>>>,
}

impl Workbook {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let inner = Xlsx::new(Cursor::new(bytes))
            .map_err(|e| IngestError::workbook(format!("not a readable xlsx file: {e}")))?;
        Ok(Self { inner })
    }

    #[must_use]
    pub fn sheet_names(&self) -> Vec<String> {
        self.inner.sheet_names()
    }

    /// Decode one worksheet into rows. The first used row is the header row;
    /// rows whose cells are all empty are dropped but still consume an index,
    /// so row identity stays aligned with the sheet.
    pub fn rows(&mut self, sheet: &str) -> Result<Vec<RawRow>> {
        let names = self.inner.sheet_names();
        if !names.iter().any(|n| n == sheet) {
            return Err(IngestError::missing_sheet(sheet, &names));
        }
        let range = self
            .inner
            .worksheet_range(sheet)
            .map_err(|e| IngestError::workbook(format!("worksheet '{sheet}': {e}")))?;
        Ok(rows_from_range(&range))
    }
}

/// Pure decode of a cell range: header row first, then one [`RawRow`] per
/// non-blank data row, indexed 0-based from the row after the header.
#[must_use]
pub fn rows_from_range(range: &Range<Data>) -> Vec<RawRow> {
    let mut rows = range.rows();
    let Some(header_cells) = rows.next() else {
        return Vec::new();
    };
    let headers: Vec<String> = header_cells
        .iter()
        .map(|c| cell_value(c).as_text().trim().to_string())
        .collect();

    let mut out = Vec::new();
    for (index, cells) in rows.enumerate() {
        let mut row = RawRow::new(index);
        for (header, cell) in headers.iter().zip(cells) {
            if header.is_empty() {
                continue;
            }
            row.insert(header, cell_value(cell));
        }
        if !row.is_blank() {
            out.push(row);
        }
    }
    out
}

fn cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) => CellValue::Date(ndt.date()),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sheet(cells: &[(u32, u32, Data)]) -> Range<Data> {
        let max_row = cells.iter().map(|(r, _, _)| *r).max().unwrap_or(0);
        let max_col = cells.iter().map(|(_, c, _)| *c).max().unwrap_or(0);
        let mut range = Range::new((0, 0), (max_row, max_col));
        for (r, c, v) in cells {
            range.set_value((*r, *c), v.clone());
        }
        range
    }

    #[test]
    fn first_row_becomes_headers() {
        let range = sheet(&[
            (0, 0, Data::String("Customer Name".into())),
            (0, 1, Data::String("Quantity".into())),
            (1, 0, Data::String("Acme".into())),
            (1, 1, Data::Float(3.0)),
        ]);
        let rows = rows_from_range(&range);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].index(), 0);
        assert_eq!(rows[0].text("Customer Name"), "Acme");
        assert_eq!(rows[0].quantity("Quantity"), 3);
    }

    #[test]
    fn blank_rows_are_dropped_but_keep_indices_aligned() {
        let range = sheet(&[
            (0, 0, Data::String("Customer Name".into())),
            (1, 0, Data::String("Acme".into())),
            (2, 0, Data::Empty),
            (3, 0, Data::String("Beta".into())),
        ]);
        let rows = rows_from_range(&range);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].index(), 0);
        assert_eq!(rows[1].index(), 2);
    }

    #[test]
    fn header_whitespace_is_trimmed() {
        let range = sheet(&[
            (0, 0, Data::String("  Renewal Opportunity ".into())),
            (1, 0, Data::Float(1200.0)),
        ]);
        let rows = rows_from_range(&range);
        assert_eq!(rows[0].number("Renewal Opportunity"), 1200.0);
    }

    #[test]
    fn unlabeled_columns_are_ignored() {
        let range = sheet(&[
            (0, 0, Data::String("Customer Name".into())),
            (0, 1, Data::Empty),
            (1, 0, Data::String("Acme".into())),
            (1, 1, Data::String("stray".into())),
        ]);
        let rows = rows_from_range(&range);
        assert_eq!(rows[0].text("Customer Name"), "Acme");
        // The stray value had no header to key it under.
        assert_eq!(rows[0].text(""), "");
    }

    #[test]
    fn error_cells_read_as_empty() {
        let range = sheet(&[
            (0, 0, Data::String("Quantity".into())),
            (1, 0, Data::Error(calamine::CellErrorType::Div0)),
        ]);
        let rows = rows_from_range(&range);
        assert!(rows.is_empty());
    }

    #[test]
    fn empty_range_yields_no_rows() {
        let range: Range<Data> = Range::new((0, 0), (0, 0));
        assert!(rows_from_range(&range).is_empty());
    }

    #[test]
    fn garbage_bytes_are_a_workbook_error() {
        let err = Workbook::from_bytes(b"not an xlsx".to_vec()).err();
        assert!(matches!(err, Some(IngestError::Workbook(_))));
    }
}
