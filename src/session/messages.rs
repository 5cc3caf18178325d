use crate::api::models::{DownloadOutcome, Quality, VideoInfo};
use crate::history::HistoryLog;
use crate::utils::error::Failure;

/// Commands sent from the host shell to the session actor
#[derive(Debug, Clone)]
pub enum SessionCommand {
    /// The URL input changed; (re)arms the debounced preview fetch
    UrlChanged(String),
    QualitySelected(Quality),
    /// The user confirmed the download of the current URL
    SubmitDownload,
    ClearHistory,
    /// Connectivity transition reported by the platform
    NetworkChanged(bool),
    Shutdown,
}

/// Events sent from the session actor back to the host
#[derive(Debug, Clone)]
pub enum SessionEvent {
    // Preview life-cycle
    PreviewStarted,
    PreviewLoaded(VideoInfo),
    PreviewFailed(Failure),

    // Download life-cycle
    DownloadStarted,
    DownloadCompleted {
        outcome: DownloadOutcome,
        history: HistoryLog,
    },
    DownloadFailed(Failure),

    // History
    HistoryLoaded(HistoryLog),
    HistoryCleared,
    /// The download succeeded but recording it locally did not; non-fatal
    HistorySaveFailed(Failure),
}
