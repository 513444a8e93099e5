//! Item-status persistence.
//!
//! Statuses are the one user-edited field, so they live outside the source
//! workbook in a small schema-versioned JSON file keyed by record kind and
//! row index. Saves replace the whole file atomically (temp write + rename)
//! so a crash mid-save never leaves a torn file behind.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use renewal_records::{ItemStatus, RecordKind};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::Result;

const SCHEMA_VERSION: u32 = 1;

/// Statuses for every row that has one, split by record kind because the two
/// sheets have independent row-index spaces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusMap {
    #[serde(default)]
    pub hardware: BTreeMap<usize, ItemStatus>,
    #[serde(default)]
    pub software: BTreeMap<usize, ItemStatus>,
}

impl StatusMap {
    #[must_use]
    pub fn get(&self, kind: RecordKind, row: usize) -> ItemStatus {
        self.side(kind).get(&row).copied().unwrap_or_default()
    }

    /// Assign a status. Setting [`ItemStatus::Unset`] removes the entry so
    /// the file only carries rows that were actually touched.
    pub fn set(&mut self, kind: RecordKind, row: usize, status: ItemStatus) {
        let side = self.side_mut(kind);
        if status.is_set() {
            side.insert(row, status);
        } else {
            side.remove(&row);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hardware.is_empty() && self.software.is_empty()
    }

    const fn side(&self, kind: RecordKind) -> &BTreeMap<usize, ItemStatus> {
        match kind {
            RecordKind::Hardware => &self.hardware,
            RecordKind::Software => &self.software,
        }
    }

    fn side_mut(&mut self, kind: RecordKind) -> &mut BTreeMap<usize, ItemStatus> {
        match kind {
            RecordKind::Hardware => &mut self.hardware,
            RecordKind::Software => &mut self.software,
        }
    }
}

/// Where statuses are loaded from and saved to.
#[async_trait]
pub trait StatusStore: Send + Sync {
    /// Load the full map. A store with nothing saved yet returns an empty
    /// map, not an error.
    async fn load(&self) -> Result<StatusMap>;
    async fn save(&self, map: &StatusMap) -> Result<()>;
}

#[derive(Serialize, Deserialize)]
struct StatusFile {
    schema_version: u32,
    statuses: StatusMap,
}

/// JSON-file-backed store.
pub struct JsonStatusStore {
    path: PathBuf,
}

impl JsonStatusStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl StatusStore for JsonStatusStore {
    async fn load(&self) -> Result<StatusMap> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(StatusMap::default());
            }
            Err(e) => return Err(e.into()),
        };
        let file: StatusFile = serde_json::from_slice(&raw)?;
        if file.schema_version != SCHEMA_VERSION {
            log::warn!(
                "Status file {} has schema version {} (expected {}), starting fresh",
                self.path.display(),
                file.schema_version,
                SCHEMA_VERSION
            );
            return Ok(StatusMap::default());
        }
        Ok(file.statuses)
    }

    async fn save(&self, map: &StatusMap) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let file = StatusFile {
            schema_version: SCHEMA_VERSION,
            statuses: map.clone(),
        };
        let json = serde_json::to_vec_pretty(&file)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        log::debug!(
            "Saved {} hardware and {} software statuses to {}",
            map.hardware.len(),
            map.software.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStatusStore {
    inner: RwLock<StatusMap>,
}

impl MemoryStatusStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_map(map: StatusMap) -> Self {
        Self {
            inner: RwLock::new(map),
        }
    }
}

#[async_trait]
impl StatusStore for MemoryStatusStore {
    async fn load(&self) -> Result<StatusMap> {
        Ok(self.inner.read().await.clone())
    }

    async fn save(&self, map: &StatusMap) -> Result<()> {
        *self.inner.write().await = map.clone();
        Ok(())
    }
}
