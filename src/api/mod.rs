//! Remote API client for the download service

pub mod client;
pub mod models;

// Re-export for convenience
pub use client::{ApiClient, VideoService, EMPTY_URL_MESSAGE, OFFLINE_MESSAGE};
pub use models::{DownloadOutcome, Quality, ServiceHealth, VideoInfo};
