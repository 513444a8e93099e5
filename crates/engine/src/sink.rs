use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::RwLock;

/// Where rendered report artifacts go. Returns a human-readable location
/// (a path, a URL) for logs and the returned artifact record.
#[async_trait]
pub trait DocumentSink: Send + Sync {
    async fn write(&self, filename: &str, contents: &[u8]) -> std::io::Result<String>;
}

/// Writes artifacts into a directory, creating it on first use. Writes go
/// through a temp file and a rename so a crash mid-write never leaves a
/// torn report behind.
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl DocumentSink for FileSink {
    async fn write(&self, filename: &str, contents: &[u8]) -> std::io::Result<String> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(filename);
        let tmp = self.dir.join(format!("{filename}.tmp"));
        tokio::fs::write(&tmp, contents).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(path.display().to_string())
    }
}

/// Collects artifacts in memory; the sink used by tests.
#[derive(Default)]
pub struct MemorySink {
    inner: RwLock<Vec<(String, Vec<u8>)>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn documents(&self) -> Vec<(String, Vec<u8>)> {
        self.inner.read().await.clone()
    }

    pub async fn find(&self, filename: &str) -> Option<Vec<u8>> {
        self.inner
            .read()
            .await
            .iter()
            .find(|(name, _)| name == filename)
            .map(|(_, contents)| contents.clone())
    }
}

#[async_trait]
impl DocumentSink for MemorySink {
    async fn write(&self, filename: &str, contents: &[u8]) -> std::io::Result<String> {
        let mut docs = self.inner.write().await;
        docs.push((filename.to_string(), contents.to_vec()));
        Ok(format!("memory:{filename}"))
    }
}
