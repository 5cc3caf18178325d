//! File-backed record store
//!
//! One JSON file per record key under the namespace directory.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::RecordStore;

/// Record store persisting each key as a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Ensure the namespace directory exists
    async fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)
                .await
                .context("Failed to create record store directory")?;
        }
        Ok(())
    }

    /// Resolve the file path for a record key.
    ///
    /// Keys are reduced to bare file names so a key can never escape the
    /// namespace directory.
    fn record_path(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
            .collect();
        self.dir.join(format!("{}.json", name))
    }

    /// Directory holding the records
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.record_path(key);

        match fs::read_to_string(&path).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read record {:?}", path)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_dir().await?;

        let path = self.record_path(key);
        let mut file = fs::File::create(&path)
            .await
            .with_context(|| format!("Failed to create record file {:?}", path))?;

        file.write_all(value.as_bytes())
            .await
            .context("Failed to write record")?;
        file.flush().await?;

        debug!("Saved record {} ({} bytes)", key, value.len());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.record_path(key);

        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Removed record {}", key);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove record {:?}", path)),
        }
    }
}
