//! Explicit application state with discrete transitions
//!
//! Every field the host renders lives in one struct, and every mutation goes
//! through a named transition method. Which operation updates which field is
//! therefore checkable in isolation, without a UI attached.

use crate::api::models::{Quality, VideoInfo};
use crate::history::HistoryLog;
use crate::utils::error::Failure;

/// View state owned by the session actor
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Current contents of the URL input field
    pub url_input: String,
    /// Metadata of the most recently previewed URL
    pub preview: Option<VideoInfo>,
    /// A preview fetch is in flight
    pub fetching: bool,
    /// Selected quality tier
    pub quality: Quality,
    /// A download request is in flight
    pub downloading: bool,
    /// Most recent failure, cleared on the next action
    pub last_failure: Option<Failure>,
    /// Local download history, newest first
    pub history: HistoryLog,
}

impl AppState {
    /// The URL input changed; any previous preview or failure is stale
    pub fn url_changed(&mut self, input: String) {
        self.url_input = input;
        self.preview = None;
        self.last_failure = None;
    }

    pub fn quality_selected(&mut self, quality: Quality) {
        self.quality = quality;
    }

    pub fn preview_started(&mut self) {
        self.fetching = true;
        self.last_failure = None;
    }

    pub fn preview_loaded(&mut self, info: VideoInfo) {
        self.fetching = false;
        self.preview = Some(info);
    }

    pub fn preview_failed(&mut self, failure: Failure) {
        self.fetching = false;
        self.preview = None;
        self.last_failure = Some(failure);
    }

    pub fn download_started(&mut self) {
        self.downloading = true;
        self.last_failure = None;
    }

    /// Download finished and the (possibly unchanged) log snapshot applies
    pub fn download_recorded(&mut self, history: HistoryLog) {
        self.downloading = false;
        self.history = history;
    }

    pub fn download_failed(&mut self, failure: Failure) {
        self.downloading = false;
        self.last_failure = Some(failure);
    }

    pub fn history_loaded(&mut self, history: HistoryLog) {
        self.history = history;
    }

    pub fn history_cleared(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(title: &str) -> VideoInfo {
        VideoInfo {
            title: Some(title.to_string()),
            thumbnail: None,
            duration: None,
            uploader: None,
            extractor: None,
            view_count: None,
            description: None,
            webpage_url: None,
            formats_available: false,
        }
    }

    #[test]
    fn test_url_change_invalidates_preview_and_failure() {
        let mut state = AppState::default();
        state.preview_loaded(info("old"));
        state.download_failed(Failure::api("boom"));

        state.url_changed("https://example.com/v2".to_string());

        assert_eq!(state.url_input, "https://example.com/v2");
        assert!(state.preview.is_none());
        assert!(state.last_failure.is_none());
    }

    #[test]
    fn test_preview_cycle_toggles_fetching_only() {
        let mut state = AppState::default();
        state.quality_selected(Quality::High);

        state.preview_started();
        assert!(state.fetching);

        state.preview_loaded(info("x"));
        assert!(!state.fetching);
        assert_eq!(state.quality, Quality::High, "quality is not preview state");
        assert!(!state.downloading, "preview never touches download state");
    }

    #[test]
    fn test_preview_failure_clears_preview() {
        let mut state = AppState::default();
        state.preview_loaded(info("x"));

        state.preview_failed(Failure::api("gone"));
        assert!(state.preview.is_none());
        assert_eq!(state.last_failure.as_ref().unwrap().text, "gone");
    }

    #[test]
    fn test_download_cycle() {
        let mut state = AppState::default();

        state.download_started();
        assert!(state.downloading);
        assert!(state.last_failure.is_none());

        state.download_recorded(Vec::new());
        assert!(!state.downloading);
    }
}
