//! Local filesystem storage implementation.
//!
//! Documents are pretty-printed JSON written atomically: the bytes go to a
//! sibling `.tmp` file which is then renamed over the target, so readers
//! never observe a half-written document.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{CURATED_FILE, CuratedSnapshot, Region, RegionSnapshot};
use crate::storage::SnapshotStorage;

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("json.tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(path)
    }

    /// Write JSON data.
    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<PathBuf> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes).await
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Read JSON data.
    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_bytes(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl SnapshotStorage for LocalStorage {
    async fn write_curated(&self, snapshot: &CuratedSnapshot) -> Result<()> {
        let path = self.write_json(CURATED_FILE, snapshot).await?;
        log::info!(
            "Wrote {} stations to {}",
            snapshot.total_stations,
            path.display()
        );
        Ok(())
    }

    async fn write_region(&self, snapshot: &RegionSnapshot) -> Result<()> {
        let path = self
            .write_json(&snapshot.region.file_name(), snapshot)
            .await?;
        log::info!(
            "Wrote {} {} stations to {}",
            snapshot.total_stations,
            snapshot.region,
            path.display()
        );
        Ok(())
    }

    async fn read_curated(&self) -> Result<Option<CuratedSnapshot>> {
        self.read_json(CURATED_FILE).await
    }

    async fn read_region(&self, region: Region) -> Result<Option<RegionSnapshot>> {
        self.read_json(&region.file_name()).await
    }

    fn location(&self) -> String {
        self.root_dir.display().to_string()
    }
}
