use std::path::PathBuf;

use async_trait::async_trait;
use renewal_records::{columns, RawRow};

use crate::error::Result;
use crate::workbook::Workbook;

/// Raw rows for both sheets, fetched together so they come from one
/// consistent read of the source.
#[derive(Debug, Clone, Default)]
pub struct SheetRows {
    pub hardware: Vec<RawRow>,
    pub software: Vec<RawRow>,
}

/// Where raw rows come from. The engine only ever sees this trait, so tests
/// and alternative backends slot in without touching the load path.
#[async_trait]
pub trait RowSource: Send + Sync {
    /// Human-readable origin, used in logs and report metadata.
    fn describe(&self) -> String;

    async fn fetch(&self) -> Result<SheetRows>;
}

/// Reads both sheets from an xlsx workbook on disk.
pub struct XlsxRowSource {
    path: PathBuf,
    hardware_sheet: String,
    software_sheet: String,
}

impl XlsxRowSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            hardware_sheet: columns::SHEET_HARDWARE.to_string(),
            software_sheet: columns::SHEET_SOFTWARE.to_string(),
        }
    }

    /// Override the default worksheet names.
    #[must_use]
    pub fn with_sheets(mut self, hardware: impl Into<String>, software: impl Into<String>) -> Self {
        self.hardware_sheet = hardware.into();
        self.software_sheet = software.into();
        self
    }
}

#[async_trait]
impl RowSource for XlsxRowSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<SheetRows> {
        let bytes = tokio::fs::read(&self.path).await?;
        log::debug!("Read {} bytes from {}", bytes.len(), self.path.display());
        let mut workbook = Workbook::from_bytes(bytes)?;
        let hardware = workbook.rows(&self.hardware_sheet)?;
        let software = workbook.rows(&self.software_sheet)?;
        Ok(SheetRows { hardware, software })
    }
}

/// Fixed in-memory rows, for tests and demos.
#[derive(Debug, Clone, Default)]
pub struct StaticRowSource {
    pub rows: SheetRows,
    pub name: String,
}

impl StaticRowSource {
    #[must_use]
    pub fn new(rows: SheetRows) -> Self {
        Self {
            rows,
            name: "static".to_string(),
        }
    }
}

#[async_trait]
impl RowSource for StaticRowSource {
    fn describe(&self) -> String {
        self.name.clone()
    }

    async fn fetch(&self) -> Result<SheetRows> {
        Ok(self.rows.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_workbook_surfaces_io_error() {
        let source = XlsxRowSource::new("/definitely/not/here.xlsx");
        let err = source.fetch().await.err();
        assert!(matches!(err, Some(crate::IngestError::Io(_))));
    }

    #[tokio::test]
    async fn static_source_returns_its_rows() {
        let rows = SheetRows {
            hardware: vec![RawRow::new(0)],
            software: Vec::new(),
        };
        let source = StaticRowSource::new(rows);
        let fetched = source.fetch().await.unwrap();
        assert_eq!(fetched.hardware.len(), 1);
        assert!(fetched.software.is_empty());
    }
}
