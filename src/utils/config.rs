//! Application configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable overriding the API base URL
pub const API_BASE_ENV: &str = "CLIPFETCH_API_BASE";

/// Default base URL of the download service (local development endpoint)
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Base URL of the remote download service
    pub api_base_url: String,

    /// Directory holding persisted records (download history)
    pub data_dir: PathBuf,

    /// Input inactivity window before a metadata preview fires
    pub preview_debounce_ms: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE.to_string(),
            data_dir: super::paths::get_data_dir(),
            preview_debounce_ms: 500,
        }
    }
}

impl ClientSettings {
    /// Build settings from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Ok(base) = std::env::var(API_BASE_ENV) {
            let base = base.trim();
            if !base.is_empty() {
                settings.api_base_url = base.trim_end_matches('/').to_string();
            }
        }
        settings
    }
}
