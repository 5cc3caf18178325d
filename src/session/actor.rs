//! Session actor: orchestrates preview, download, and history
//!
//! One task owns all mutable state, so history mutations are strictly
//! sequential and no locking is needed. Preview fetches are debounced and
//! tagged with a sequence number; a completion is applied only if no newer
//! fetch has been issued since (stale-result suppression). In-flight
//! requests are never cancelled, only ignored when stale.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::api::client::VideoService;
use crate::api::models::{DownloadOutcome, Quality, VideoInfo};
use crate::history::{HistoryDraft, HistoryManager};
use crate::network::NetworkMonitor;
use crate::session::messages::{SessionCommand, SessionEvent};
use crate::session::state::AppState;
use crate::storage::RecordStore;
use crate::utils::error::Failure;

/// A preview fetch armed by typing, waiting for the inactivity window
struct PendingPreview {
    deadline: Instant,
    url: String,
}

/// Completion of a spawned preview fetch
struct FetchOutcome {
    seq: u64,
    result: Result<VideoInfo, Failure>,
}

pub struct SessionActor<V, S> {
    receiver: mpsc::Receiver<SessionCommand>,
    sender: mpsc::Sender<SessionEvent>,

    // Components
    service: Arc<V>,
    network: NetworkMonitor,
    history: HistoryManager<S>,

    state: AppState,
    debounce: Duration,

    // Debounce + stale-result suppression
    pending_preview: Option<PendingPreview>,
    latest_fetch: u64,
    fetch_tx: mpsc::Sender<FetchOutcome>,
    fetch_rx: mpsc::Receiver<FetchOutcome>,
}

impl<V, S> SessionActor<V, S>
where
    V: VideoService + 'static,
    S: RecordStore,
{
    pub fn new(
        service: Arc<V>,
        network: NetworkMonitor,
        history: HistoryManager<S>,
        debounce: Duration,
        receiver: mpsc::Receiver<SessionCommand>,
        sender: mpsc::Sender<SessionEvent>,
    ) -> Self {
        let (fetch_tx, fetch_rx) = mpsc::channel(16);

        Self {
            receiver,
            sender,
            service,
            network,
            history,
            state: AppState::default(),
            debounce,
            pending_preview: None,
            latest_fetch: 0,
            fetch_tx,
            fetch_rx,
        }
    }

    pub async fn run(mut self) {
        info!("Session actor started");

        self.history.load().await;
        self.state.history_loaded(self.history.entries().clone());
        self.emit(SessionEvent::HistoryLoaded(self.state.history.clone()))
            .await;

        loop {
            let deadline = self.pending_preview.as_ref().map(|p| p.deadline);

            tokio::select! {
                cmd = self.receiver.recv() => {
                    match cmd {
                        None | Some(SessionCommand::Shutdown) => break,
                        Some(cmd) => self.handle_command(cmd).await,
                    }
                }
                Some(outcome) = self.fetch_rx.recv() => {
                    self.apply_fetch_outcome(outcome).await;
                }
                _ = wait_until(deadline), if deadline.is_some() => {
                    self.fire_preview().await;
                }
            }
        }

        info!("Session actor stopped");
    }

    async fn handle_command(&mut self, cmd: SessionCommand) {
        match cmd {
            SessionCommand::UrlChanged(input) => {
                self.state.url_changed(input);

                // Pure debounce: every keystroke re-arms the single window.
                // Only inputs that look like absolute URLs ever fire.
                let trimmed = self.state.url_input.trim();
                if !trimmed.is_empty() && trimmed.contains("://") {
                    self.pending_preview = Some(PendingPreview {
                        deadline: Instant::now() + self.debounce,
                        url: trimmed.to_string(),
                    });
                } else {
                    self.pending_preview = None;
                }
            }
            SessionCommand::QualitySelected(quality) => {
                self.state.quality_selected(quality);
            }
            SessionCommand::SubmitDownload => {
                self.handle_submit().await;
            }
            SessionCommand::ClearHistory => {
                self.history.clear().await;
                self.state.history_cleared();
                self.emit(SessionEvent::HistoryCleared).await;
            }
            SessionCommand::NetworkChanged(online) => {
                self.network.set_online(online);
            }
            // Terminates the run loop before reaching this point
            SessionCommand::Shutdown => {}
        }
    }

    /// The inactivity window elapsed; issue the fetch for the armed URL
    async fn fire_preview(&mut self) {
        let Some(pending) = self.pending_preview.take() else {
            return;
        };

        self.latest_fetch += 1;
        let seq = self.latest_fetch;
        debug!("Preview fetch #{} for {}", seq, pending.url);

        self.state.preview_started();
        self.emit(SessionEvent::PreviewStarted).await;

        let service = self.service.clone();
        let results = self.fetch_tx.clone();
        tokio::spawn(async move {
            let result = service.fetch_video_info(&pending.url).await;
            let _ = results.send(FetchOutcome { seq, result }).await;
        });
    }

    async fn apply_fetch_outcome(&mut self, outcome: FetchOutcome) {
        if outcome.seq != self.latest_fetch {
            debug!(
                "Discarding stale preview result #{} (latest is #{})",
                outcome.seq, self.latest_fetch
            );
            return;
        }

        match outcome.result {
            Ok(info) => {
                self.state.preview_loaded(info.clone());
                self.emit(SessionEvent::PreviewLoaded(info)).await;
            }
            Err(failure) => {
                self.state.preview_failed(failure.clone());
                self.emit(SessionEvent::PreviewFailed(failure)).await;
            }
        }
    }

    async fn handle_submit(&mut self) {
        self.state.download_started();
        self.emit(SessionEvent::DownloadStarted).await;

        let url = self.state.url_input.trim().to_string();
        let quality = self.state.quality;

        match self.service.request_download(&url, quality).await {
            Ok(outcome) => self.record_download(url, quality, outcome).await,
            Err(failure) => {
                self.state.download_failed(failure.clone());
                self.emit(SessionEvent::DownloadFailed(failure)).await;
            }
        }
    }

    /// Record a finished download in the history.
    ///
    /// History is best-effort: a failed write is reported as a separate
    /// non-fatal event and the download still counts as completed.
    async fn record_download(&mut self, url: String, quality: Quality, outcome: DownloadOutcome) {
        let draft = draft_from(url, quality, &outcome, self.state.preview.as_ref());

        match self.history.append(draft).await {
            Ok(log) => {
                let log = log.clone();
                self.state.download_recorded(log.clone());
                self.emit(SessionEvent::DownloadCompleted {
                    outcome,
                    history: log,
                })
                .await;
            }
            Err(e) => {
                warn!("Download succeeded but history write failed: {}", e);
                self.emit(SessionEvent::HistorySaveFailed(Failure::storage(
                    e.to_string(),
                )))
                .await;
                let log = self.history.entries().clone();
                self.state.download_recorded(log.clone());
                self.emit(SessionEvent::DownloadCompleted {
                    outcome,
                    history: log,
                })
                .await;
            }
        }
    }

    async fn emit(&self, event: SessionEvent) {
        if self.sender.send(event).await.is_err() {
            debug!("Event dropped, host side closed");
        }
    }
}

/// Merge the server's answer with the previewed metadata into a draft entry
fn draft_from(
    url: String,
    quality: Quality,
    outcome: &DownloadOutcome,
    preview: Option<&VideoInfo>,
) -> HistoryDraft {
    HistoryDraft {
        url,
        title: outcome
            .title
            .clone()
            .or_else(|| preview.and_then(|p| p.title.clone())),
        filename: outcome.filename.clone(),
        duration: outcome
            .duration
            .or_else(|| preview.and_then(|p| p.duration))
            .map(whole_seconds),
        quality,
        thumbnail: preview.and_then(|p| p.thumbnail.clone()),
    }
}

fn whole_seconds(raw: f64) -> u64 {
    if raw.is_finite() && raw > 0.0 {
        raw.round() as u64
    } else {
        0
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
