//! Local key-value persistence behind a narrow, swappable interface

pub mod json_store;
pub mod memory;

// Re-export for convenience
pub use json_store::JsonFileStore;
pub use memory::MemoryStore;

use anyhow::Result;
use async_trait::async_trait;

/// Key under which the download history record is stored
pub const HISTORY_KEY: &str = "downloadHistory";

/// Narrow contract for storing one named record.
///
/// This isolates the history logic from the storage technology so stores can
/// be swapped (and mocked in tests) without touching the callers.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Read a record, `None` if it was never written
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a record, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a record; deleting a missing record is not an error
    async fn remove(&self, key: &str) -> Result<()>;
}
