//! Clipfetch library

pub mod api;
pub mod history;
pub mod network;
pub mod session;
pub mod storage;
pub mod utils;

// Re-export main types for easier use
pub use api::{ApiClient, DownloadOutcome, Quality, ServiceHealth, VideoInfo, VideoService};
pub use history::{HistoryDraft, HistoryEntry, HistoryLog, HistoryManager, HISTORY_CAPACITY};
pub use network::NetworkMonitor;
pub use session::{AppState, SessionActor, SessionCommand, SessionEvent};
pub use storage::{JsonFileStore, MemoryStore, RecordStore, HISTORY_KEY};
pub use utils::{ClientSettings, ClipfetchError, Failure, FailureKind};
