//! Bounded download history with write-through persistence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::models::Quality;
use crate::storage::{RecordStore, HISTORY_KEY};
use crate::utils::error::ClipfetchError;

/// Maximum number of entries kept in the history log
pub const HISTORY_CAPACITY: usize = 20;

/// One attempted/completed download record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Source page URL as submitted by the user
    pub url: String,
    pub title: Option<String>,
    /// Server-assigned output file name
    pub filename: Option<String>,
    /// Whole seconds
    pub duration: Option<u64>,
    pub quality: Quality,
    pub thumbnail: Option<String>,
    /// Stamped at insertion time, never caller-supplied
    pub downloaded_at: DateTime<Utc>,
}

/// A history entry before insertion; the manager supplies the timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryDraft {
    pub url: String,
    pub title: Option<String>,
    pub filename: Option<String>,
    pub duration: Option<u64>,
    pub quality: Quality,
    pub thumbnail: Option<String>,
}

/// Ordered download records, newest first
pub type HistoryLog = Vec<HistoryEntry>;

/// Owner of the bounded history log.
///
/// The persisted record is a best-effort cache, not a source of truth: read
/// failures yield an empty log, delete failures are swallowed. Appends are
/// the exception — a failed write-through reverts the in-memory log and is
/// reported, so the caller never presents unsaved state as saved.
pub struct HistoryManager<S> {
    store: S,
    log: HistoryLog,
}

impl<S: RecordStore> HistoryManager<S> {
    /// Create a manager with an empty log; call [`load`](Self::load) to pick
    /// up the persisted record.
    pub fn new(store: S) -> Self {
        Self {
            store,
            log: Vec::new(),
        }
    }

    /// Read the persisted record, replacing the in-memory log.
    ///
    /// Returns an empty log if no record exists or the read fails.
    pub async fn load(&mut self) -> &HistoryLog {
        self.log = match self.store.get(HISTORY_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<HistoryLog>(&raw) {
                Ok(mut log) => {
                    if log.len() > HISTORY_CAPACITY {
                        warn!(
                            "Persisted history has {} entries, truncating to {}",
                            log.len(),
                            HISTORY_CAPACITY
                        );
                        log.truncate(HISTORY_CAPACITY);
                    }
                    log
                }
                Err(e) => {
                    warn!("Discarding unreadable history record: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read history record: {:#}", e);
                Vec::new()
            }
        };

        debug!("Loaded {} history entries", self.log.len());
        &self.log
    }

    /// Stamp, prepend, trim to capacity, and persist a new entry.
    ///
    /// Exactly one store write per call. On persistence failure the log
    /// keeps its previous contents and the error is returned.
    pub async fn append(&mut self, draft: HistoryDraft) -> Result<&HistoryLog, ClipfetchError> {
        let entry = HistoryEntry {
            url: draft.url,
            title: draft.title,
            filename: draft.filename,
            duration: draft.duration,
            quality: draft.quality,
            thumbnail: draft.thumbnail,
            downloaded_at: Utc::now(),
        };

        // Build the next log first; the in-memory copy only advances once
        // the write-through succeeds.
        let mut next = self.log.clone();
        next.insert(0, entry);
        next.truncate(HISTORY_CAPACITY);

        let raw = serde_json::to_string(&next)?;
        self.store
            .set(HISTORY_KEY, &raw)
            .await
            .map_err(|e| ClipfetchError::StorageError(format!("{:#}", e)))?;

        self.log = next;
        debug!("History now has {} entries", self.log.len());
        Ok(&self.log)
    }

    /// Empty the log and remove the persisted record.
    ///
    /// A failing delete is logged and swallowed; the in-memory log is
    /// emptied regardless.
    pub async fn clear(&mut self) {
        self.log.clear();

        if let Err(e) = self.store.remove(HISTORY_KEY).await {
            warn!("Failed to remove persisted history: {:#}", e);
        }
    }

    /// Current log, newest first
    pub fn entries(&self) -> &HistoryLog {
        &self.log
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn draft(url: &str) -> HistoryDraft {
        HistoryDraft {
            url: url.to_string(),
            title: None,
            filename: None,
            duration: None,
            quality: Quality::Best,
            thumbnail: None,
        }
    }

    #[tokio::test]
    async fn test_append_prepends_and_stamps() {
        let mut manager = HistoryManager::new(MemoryStore::new());

        manager.append(draft("https://example.com/a")).await.unwrap();
        manager.append(draft("https://example.com/b")).await.unwrap();

        let log = manager.entries();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].url, "https://example.com/b");
        assert!(log[0].downloaded_at >= log[1].downloaded_at);
    }

    #[tokio::test]
    async fn test_load_truncates_oversized_record() {
        let store = MemoryStore::new();
        let mut manager = HistoryManager::new(store.clone());
        for i in 0..HISTORY_CAPACITY {
            manager
                .append(draft(&format!("https://example.com/{}", i)))
                .await
                .unwrap();
        }

        // Grow the persisted record past capacity behind the manager's back
        let mut log: HistoryLog =
            serde_json::from_str(&store.raw_get(HISTORY_KEY).unwrap()).unwrap();
        let mut extra = log[0].clone();
        extra.url = "https://example.com/extra".to_string();
        log.push(extra);
        store
            .set(HISTORY_KEY, &serde_json::to_string(&log).unwrap())
            .await
            .unwrap();

        let mut fresh = HistoryManager::new(store);
        assert_eq!(fresh.load().await.len(), HISTORY_CAPACITY);
    }

    #[tokio::test]
    async fn test_load_survives_corrupt_record() {
        let store = MemoryStore::new();
        store.set(HISTORY_KEY, "{ not json").await.unwrap();

        let mut manager = HistoryManager::new(store);
        assert!(manager.load().await.is_empty());
    }
}
