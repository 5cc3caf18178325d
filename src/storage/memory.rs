//! In-memory record store for tests and ephemeral sessions

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use super::RecordStore;

/// Record store backed by a shared in-memory map.
///
/// Clones share the same records, so a test can hold one handle while the
/// code under test owns another. The fail switches force subsequent reads or
/// writes to error, for exercising persistence-failure paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    records: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `get` fail
    pub fn fail_reads(&self, fail: bool) {
        self.inner.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `set`/`remove` fail
    pub fn fail_writes(&self, fail: bool) {
        self.inner.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Snapshot a record without going through the trait
    pub fn raw_get(&self, key: &str) -> Option<String> {
        self.inner
            .records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        if self.inner.fail_reads.load(Ordering::SeqCst) {
            bail!("simulated read failure");
        }
        Ok(self.raw_get(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.inner.fail_writes.load(Ordering::SeqCst) {
            bail!("simulated write failure");
        }
        self.inner
            .records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        if self.inner.fail_writes.load(Ordering::SeqCst) {
            bail!("simulated write failure");
        }
        self.inner
            .records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clones_share_records() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.set("downloadHistory", "[]").await.unwrap();
        assert_eq!(other.raw_get("downloadHistory").as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_fail_switches() {
        let store = MemoryStore::new();

        store.fail_writes(true);
        assert!(store.set("k", "v").await.is_err());
        assert!(store.remove("k").await.is_err());

        store.fail_writes(false);
        store.set("k", "v").await.unwrap();

        store.fail_reads(true);
        assert!(store.get("k").await.is_err());
    }
}
