use std::sync::Arc;

use chrono::{DateTime, Utc};
use renewal_records::{HardwareRenewal, SoftwareRenewal};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::normalize::{normalize_hardware, normalize_software};
use crate::source::RowSource;
use crate::status::StatusStore;

/// A fully normalized snapshot of both sheets with statuses applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub hardware: Vec<HardwareRenewal>,
    pub software: Vec<SoftwareRenewal>,
    /// Origin description from the row source.
    pub source: String,
    pub loaded_at: DateTime<Utc>,
}

impl Dataset {
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.hardware.len() + self.software.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hardware.is_empty() && self.software.is_empty()
    }
}

/// Combines a row source and a status store into one load operation.
pub struct DatasetLoader {
    source: Arc<dyn RowSource>,
    statuses: Arc<dyn StatusStore>,
}

impl DatasetLoader {
    pub fn new(source: Arc<dyn RowSource>, statuses: Arc<dyn StatusStore>) -> Self {
        Self { source, statuses }
    }

    /// Fetch raw rows, load persisted statuses, and normalize both sheets.
    pub async fn load(&self) -> Result<Dataset> {
        let rows = self.source.fetch().await?;
        let statuses = self.statuses.load().await?;
        let hardware = normalize_hardware(&rows.hardware, &statuses);
        let software = normalize_software(&rows.software, &statuses);
        log::info!(
            "Loaded {} hardware and {} software renewal records from {}",
            hardware.len(),
            software.len(),
            self.source.describe()
        );
        Ok(Dataset {
            hardware,
            software,
            source: self.source.describe(),
            loaded_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{SheetRows, StaticRowSource};
    use crate::status::{MemoryStatusStore, StatusMap};
    use pretty_assertions::assert_eq;
    use renewal_records::{columns, CellValue, ItemStatus, RawRow, RecordKind};

    #[tokio::test]
    async fn load_normalizes_and_applies_statuses() {
        let rows = SheetRows {
            hardware: vec![RawRow::new(0)
                .with_cell(columns::CUSTOMER_NAME, CellValue::Text("Acme".into()))
                .with_cell(columns::OPPORTUNITY, CellValue::Number(100.0))],
            software: vec![RawRow::new(0)
                .with_cell(columns::CUSTOMER_NAME, CellValue::Text("Beta".into()))],
        };
        let mut statuses = StatusMap::default();
        statuses.set(RecordKind::Hardware, 0, ItemStatus::Quoted);

        let loader = DatasetLoader::new(
            Arc::new(StaticRowSource::new(rows)),
            Arc::new(MemoryStatusStore::with_map(statuses)),
        );
        let dataset = loader.load().await.unwrap();

        assert_eq!(dataset.record_count(), 2);
        assert_eq!(dataset.hardware[0].status, ItemStatus::Quoted);
        assert_eq!(dataset.software[0].status, ItemStatus::Unset);
        assert_eq!(dataset.source, "static");
    }

    #[tokio::test]
    async fn empty_source_loads_as_empty_dataset() {
        let loader = DatasetLoader::new(
            Arc::new(StaticRowSource::new(SheetRows::default())),
            Arc::new(MemoryStatusStore::new()),
        );
        let dataset = loader.load().await.unwrap();
        assert!(dataset.is_empty());
    }
}
