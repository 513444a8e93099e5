//! Row normalization: untyped [`RawRow`]s become typed renewal records.
//!
//! Pure functions. Every data row yields exactly one record; missing or
//! malformed values fall back to zero-defaults (`""`, `0`, `0.0`) instead of
//! failing, because a partially filled export is the normal case, not the
//! exceptional one.

use renewal_records::columns;
use renewal_records::{HardwareRenewal, RawRow, RecordKind, SoftwareRenewal};

use crate::status::StatusMap;

pub fn normalize_hardware(rows: &[RawRow], statuses: &StatusMap) -> Vec<HardwareRenewal> {
    rows.iter()
        .map(|row| HardwareRenewal {
            row: row.index(),
            customer: trimmed(row, columns::CUSTOMER_NAME),
            country: trimmed(row, columns::COUNTRY),
            product_id: trimmed(row, columns::hardware::PRODUCT_ID),
            description: trimmed(row, columns::hardware::PRODUCT_DESCRIPTION),
            architecture: trimmed(row, columns::ARCHITECTURE),
            sub_architecture: trimmed(row, columns::SUB_ARCHITECTURE),
            quantity: row.quantity(columns::QUANTITY),
            opportunity: row.number(columns::OPPORTUNITY),
            ldos: trimmed(row, columns::hardware::LDOS_DATE),
            status: statuses.get(RecordKind::Hardware, row.index()),
        })
        .collect()
}

pub fn normalize_software(rows: &[RawRow], statuses: &StatusMap) -> Vec<SoftwareRenewal> {
    rows.iter()
        .map(|row| SoftwareRenewal {
            row: row.index(),
            customer: trimmed(row, columns::CUSTOMER_NAME),
            country: trimmed(row, columns::COUNTRY),
            offer_id: trimmed(row, columns::software::OFFER_ID),
            description: trimmed(row, columns::software::OFFER_DESCRIPTION),
            architecture: trimmed(row, columns::ARCHITECTURE),
            sub_architecture: trimmed(row, columns::SUB_ARCHITECTURE),
            quantity: row.quantity(columns::QUANTITY),
            opportunity: row.number(columns::OPPORTUNITY),
            list_price: row.number(columns::software::LIST_PRICE),
            end_date: trimmed(row, columns::software::END_DATE),
            status: statuses.get(RecordKind::Software, row.index()),
        })
        .collect()
}

fn trimmed(row: &RawRow, column: &str) -> String {
    row.text(column).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use renewal_records::{CellValue, ItemStatus};

    fn hardware_row(index: usize) -> RawRow {
        RawRow::new(index)
            .with_cell(columns::CUSTOMER_NAME, CellValue::Text("  Acme \n".into()))
            .with_cell(columns::COUNTRY, CellValue::Text("US".into()))
            .with_cell(columns::hardware::PRODUCT_ID, CellValue::Text("RTR-8821".into()))
            .with_cell(
                columns::hardware::PRODUCT_DESCRIPTION,
                CellValue::Text("Edge router".into()),
            )
            .with_cell(columns::ARCHITECTURE, CellValue::Text("Routing".into()))
            .with_cell(columns::QUANTITY, CellValue::Number(4.0))
            .with_cell(columns::OPPORTUNITY, CellValue::Number(1250.5))
            .with_cell(
                columns::hardware::LDOS_DATE,
                CellValue::Text("2026-03-01".into()),
            )
    }

    #[test]
    fn every_row_yields_one_record_with_trimmed_text() {
        let rows = vec![hardware_row(0), hardware_row(1)];
        let out = normalize_hardware(&rows, &StatusMap::default());
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].customer, "Acme");
        assert_eq!(out[0].quantity, 4);
        assert_eq!(out[0].opportunity, 1250.5);
        assert_eq!(out[1].row, 1);
    }

    #[test]
    fn missing_columns_fall_back_to_zero_defaults() {
        let rows = vec![RawRow::new(0).with_cell(columns::CUSTOMER_NAME, CellValue::Text("Solo".into()))];
        let out = normalize_hardware(&rows, &StatusMap::default());
        let item = &out[0];
        assert_eq!(item.country, "");
        assert_eq!(item.architecture, "");
        assert_eq!(item.quantity, 0);
        assert_eq!(item.opportunity, 0.0);
        assert_eq!(item.ldos, "");
        assert_eq!(item.status, ItemStatus::Unset);
    }

    #[test]
    fn statuses_are_recovered_by_row_index_and_kind() {
        let mut statuses = StatusMap::default();
        statuses.set(RecordKind::Hardware, 1, ItemStatus::Won);
        statuses.set(RecordKind::Software, 0, ItemStatus::Lost);

        let hw = normalize_hardware(&[hardware_row(0), hardware_row(1)], &statuses);
        assert_eq!(hw[0].status, ItemStatus::Unset);
        assert_eq!(hw[1].status, ItemStatus::Won);

        let sw_rows = vec![RawRow::new(0)
            .with_cell(columns::CUSTOMER_NAME, CellValue::Text("Beta".into()))
            .with_cell(columns::software::OFFER_ID, CellValue::Text("SW-1".into()))];
        let sw = normalize_software(&sw_rows, &statuses);
        assert_eq!(sw[0].status, ItemStatus::Lost);
    }

    #[test]
    fn software_list_price_coerces_like_other_numbers() {
        let rows = vec![
            RawRow::new(0).with_cell(columns::software::LIST_PRICE, CellValue::Text("n/a".into())),
            RawRow::new(1).with_cell(columns::software::LIST_PRICE, CellValue::Number(899.99)),
        ];
        let out = normalize_software(&rows, &StatusMap::default());
        assert_eq!(out[0].list_price, 0.0);
        assert_eq!(out[1].list_price, 899.99);
    }

    #[test]
    fn non_finite_money_text_coerces_to_zero() {
        let rows = vec![
            RawRow::new(0)
                .with_cell(columns::OPPORTUNITY, CellValue::Text("NaN".into()))
                .with_cell(columns::software::LIST_PRICE, CellValue::Text("inf".into())),
            RawRow::new(1).with_cell(columns::OPPORTUNITY, CellValue::Number(100.0)),
        ];
        let out = normalize_software(&rows, &StatusMap::default());
        assert_eq!(out[0].opportunity, 0.0);
        assert_eq!(out[0].list_price, 0.0);
        let total: f64 = out.iter().map(|s| s.opportunity).sum();
        assert_eq!(total, 100.0);
    }

    #[test]
    fn date_cells_arrive_as_iso_text() {
        let d = chrono::NaiveDate::from_ymd_opt(2027, 6, 30).unwrap();
        let rows = vec![RawRow::new(0).with_cell(columns::hardware::LDOS_DATE, CellValue::Date(d))];
        let out = normalize_hardware(&rows, &StatusMap::default());
        assert_eq!(out[0].ldos, "2027-06-30");
    }
}
