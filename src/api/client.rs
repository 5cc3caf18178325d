//! HTTP client for the remote download service
//!
//! Two user-initiated, single-shot operations plus a health check. No retry
//! logic, no request queue, no in-flight cancellation; superseded responses
//! are discarded by the session layer, not aborted here.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::api::models::{
    ApiRequest, DownloadEnvelope, DownloadOutcome, InfoEnvelope, Quality, ServiceHealth, VideoInfo,
};
use crate::network::NetworkMonitor;
use crate::utils::error::Failure;

/// Shown when the URL field is empty at submit time
pub const EMPTY_URL_MESSAGE: &str = "Please enter a video URL";
/// Shown when a download is requested while offline
pub const OFFLINE_MESSAGE: &str = "You are offline. Downloads need a network connection.";

const INFO_API_FALLBACK: &str = "Failed to get video information";
const INFO_TRANSPORT_FALLBACK: &str = "Failed to connect to server";
const DOWNLOAD_API_FALLBACK: &str = "Download failed";
const DOWNLOAD_TRANSPORT_FALLBACK: &str = "Failed to download video";
const HEALTH_FALLBACK: &str = "Service is not responding";

/// Operations the session layer needs from the download service.
///
/// This is the seam between orchestration and transport: the production
/// implementation is [`ApiClient`], tests substitute fakes.
#[async_trait]
pub trait VideoService: Send + Sync {
    /// Fetch preview metadata for a video page URL
    async fn fetch_video_info(&self, url: &str) -> Result<VideoInfo, Failure>;

    /// Ask the server to download the video at the given quality tier
    async fn request_download(&self, url: &str, quality: Quality)
        -> Result<DownloadOutcome, Failure>;

    /// Check that the service is up
    async fn health_check(&self) -> Result<ServiceHealth, Failure>;
}

/// reqwest-backed client for the download service API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    network: NetworkMonitor,
}

impl ApiClient {
    /// Create a client against the given base URL.
    ///
    /// The network monitor feeds the client-side admission check for
    /// download requests.
    pub fn new(base_url: &str, network: NetworkMonitor) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            network,
        }
    }

    /// Absolute URL for retrieving a finished file.
    ///
    /// The server hands back a server-relative `download_url`; the file is
    /// fetched by opening `{base}{download_url}` externally, never streamed
    /// through this client.
    pub fn file_url(&self, download_url: &str) -> String {
        if download_url.starts_with('/') {
            format!("{}{}", self.base_url, download_url)
        } else {
            format!("{}/{}", self.base_url, download_url)
        }
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_api(
        &self,
        endpoint: &str,
        body: &ApiRequest<'_>,
        transport_fallback: &str,
    ) -> Result<(StatusCode, String), Failure> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| transport_failure(&e, transport_fallback))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| transport_failure(&e, transport_fallback))?;

        Ok((status, text))
    }
}

#[async_trait]
impl VideoService for ApiClient {
    async fn fetch_video_info(&self, url: &str) -> Result<VideoInfo, Failure> {
        let url = url.trim();
        if url.is_empty() {
            return Err(Failure::validation(EMPTY_URL_MESSAGE));
        }

        let request = ApiRequest { url, quality: None };
        let (status, body) = self
            .post_api("/api/video-info", &request, INFO_TRANSPORT_FALLBACK)
            .await?;

        parse_info_response(status, &body)
    }

    async fn request_download(
        &self,
        url: &str,
        quality: Quality,
    ) -> Result<DownloadOutcome, Failure> {
        // Admission check: decided here, not delegated to the transport.
        // Applies before URL validation so offline wins regardless of input.
        if !self.network.is_online() {
            warn!("Download request rejected while offline");
            return Err(Failure::admission(OFFLINE_MESSAGE));
        }

        let url = url.trim();
        if url.is_empty() {
            return Err(Failure::validation(EMPTY_URL_MESSAGE));
        }

        let request = ApiRequest {
            url,
            quality: Some(quality),
        };
        let (status, body) = self
            .post_api("/api/download", &request, DOWNLOAD_TRANSPORT_FALLBACK)
            .await?;

        parse_download_response(status, &body)
    }

    async fn health_check(&self) -> Result<ServiceHealth, Failure> {
        let url = format!("{}/", self.base_url);
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_failure(&e, HEALTH_FALLBACK))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_failure(&e, HEALTH_FALLBACK))?;

        if status.is_success() {
            if let Ok(health) = serde_json::from_str::<ServiceHealth>(&body) {
                return Ok(health);
            }
        }

        Err(Failure::api(
            extract_error_text(&body).unwrap_or_else(|| HEALTH_FALLBACK.to_string()),
        ))
    }
}

/// Interpret a `POST /api/video-info` response
pub(crate) fn parse_info_response(status: StatusCode, body: &str) -> Result<VideoInfo, Failure> {
    if status.is_success() {
        match serde_json::from_str::<InfoEnvelope>(body) {
            Ok(envelope) => {
                if envelope.success {
                    if let Some(info) = envelope.data {
                        return Ok(info);
                    }
                }
                return Err(Failure::api(
                    envelope
                        .error
                        .filter(|e| !e.is_empty())
                        .unwrap_or_else(|| INFO_API_FALLBACK.to_string()),
                ));
            }
            Err(e) => {
                warn!("Unparseable video-info response: {}", e);
                return Err(Failure::api(INFO_API_FALLBACK));
            }
        }
    }

    Err(Failure::api(
        extract_error_text(body).unwrap_or_else(|| INFO_API_FALLBACK.to_string()),
    ))
}

/// Interpret a `POST /api/download` response
pub(crate) fn parse_download_response(
    status: StatusCode,
    body: &str,
) -> Result<DownloadOutcome, Failure> {
    if status.is_success() {
        match serde_json::from_str::<DownloadEnvelope>(body) {
            Ok(envelope) => {
                if envelope.success {
                    if let Some(download_url) = envelope.download_url {
                        return Ok(DownloadOutcome {
                            download_url,
                            title: envelope.title,
                            filename: envelope.filename,
                            duration: envelope.duration,
                            filesize: envelope.filesize,
                        });
                    }
                }
                return Err(Failure::api(
                    envelope
                        .error
                        .filter(|e| !e.is_empty())
                        .unwrap_or_else(|| DOWNLOAD_API_FALLBACK.to_string()),
                ));
            }
            Err(e) => {
                warn!("Unparseable download response: {}", e);
                return Err(Failure::api(DOWNLOAD_API_FALLBACK));
            }
        }
    }

    Err(Failure::api(
        extract_error_text(body).unwrap_or_else(|| DOWNLOAD_API_FALLBACK.to_string()),
    ))
}

/// Pull the server-provided message out of an error body.
///
/// Application failures carry `error`; framework-level rejections (non-2xx)
/// carry `detail`. `error` wins when both are present.
fn extract_error_text(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;

    for field in ["error", "detail"] {
        if let Some(text) = value.get(field).and_then(|v| v.as_str()) {
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }
    }

    None
}

fn transport_failure(error: &reqwest::Error, fallback: &str) -> Failure {
    warn!("Transport failure: {}", error);

    let text = error.to_string();
    if text.is_empty() {
        Failure::transport(fallback)
    } else {
        Failure::transport(text)
    }
}
