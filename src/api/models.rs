//! Data structures for the download service wire contract

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Quality tiers understood by the download endpoint.
///
/// The wire values are fixed by the server's format mapping; the server
/// falls back to `best` when the field is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    #[default]
    Best,
    High,
    Medium,
    Low,
}

impl Quality {
    pub const ALL: [Quality; 4] = [Quality::Best, Quality::High, Quality::Medium, Quality::Low];

    /// Wire value sent to the server
    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Best => "best",
            Quality::High => "high",
            Quality::Medium => "medium",
            Quality::Low => "low",
        }
    }

    /// Human-readable label for selection lists
    pub fn label(&self) -> &'static str {
        match self {
            Quality::Best => "Best available",
            Quality::High => "High (1080p)",
            Quality::Medium => "Medium (720p)",
            Quality::Low => "Low (360p)",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "best" => Ok(Quality::Best),
            "high" => Ok(Quality::High),
            "medium" => Ok(Quality::Medium),
            "low" => Ok(Quality::Low),
            other => Err(format!(
                "unknown quality '{}', expected one of: best, high, medium, low",
                other
            )),
        }
    }
}

/// Metadata snapshot of a previewed URL.
///
/// Transient: shown to the user before a download is confirmed, copied into
/// the history entry at that point, never persisted on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    pub title: Option<String>,
    pub thumbnail: Option<String>,
    pub duration: Option<f64>,
    pub uploader: Option<String>,
    pub extractor: Option<String>,
    pub view_count: Option<u64>,
    pub description: Option<String>,
    pub webpage_url: Option<String>,
    #[serde(default)]
    pub formats_available: bool,
}

/// Successful result of a download request
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadOutcome {
    /// Server-relative path where the finished file can be fetched
    pub download_url: String,
    pub title: Option<String>,
    pub filename: Option<String>,
    pub duration: Option<f64>,
    pub filesize: Option<u64>,
}

/// Body of the service health check (`GET /`)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceHealth {
    pub status: String,
    pub message: String,
}

/// Request body shared by both POST endpoints
#[derive(Debug, Serialize)]
pub(crate) struct ApiRequest<'a> {
    pub url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<Quality>,
}

/// Response envelope of `POST /api/video-info`
#[derive(Debug, Deserialize)]
pub(crate) struct InfoEnvelope {
    pub success: bool,
    pub data: Option<VideoInfo>,
    pub error: Option<String>,
}

/// Response envelope of `POST /api/download`
#[derive(Debug, Deserialize)]
pub(crate) struct DownloadEnvelope {
    pub success: bool,
    pub download_url: Option<String>,
    pub title: Option<String>,
    pub filename: Option<String>,
    pub duration: Option<f64>,
    pub filesize: Option<u64>,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_wire_values() {
        assert_eq!(serde_json::to_string(&Quality::Best).unwrap(), "\"best\"");
        assert_eq!(serde_json::to_string(&Quality::High).unwrap(), "\"high\"");
        assert_eq!(
            serde_json::to_string(&Quality::Medium).unwrap(),
            "\"medium\""
        );
        assert_eq!(serde_json::to_string(&Quality::Low).unwrap(), "\"low\"");
    }

    #[test]
    fn test_quality_round_trips() {
        for quality in Quality::ALL {
            let wire = serde_json::to_string(&quality).unwrap();
            let back: Quality = serde_json::from_str(&wire).unwrap();
            assert_eq!(back, quality);
        }
    }

    #[test]
    fn test_quality_from_str() {
        assert_eq!("HIGH".parse::<Quality>().unwrap(), Quality::High);
        assert!("4k".parse::<Quality>().is_err());
    }

    #[test]
    fn test_video_info_parses_server_shape() {
        let json = r#"{
            "title": "Cat video",
            "thumbnail": "https://example.com/thumb.jpg",
            "duration": 212.5,
            "uploader": "cats",
            "view_count": 1234,
            "description": "a cat",
            "webpage_url": "https://example.com/v1",
            "extractor": "youtube",
            "formats_available": true
        }"#;

        let info: VideoInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.title.as_deref(), Some("Cat video"));
        assert_eq!(info.duration, Some(212.5));
        assert!(info.formats_available);
    }

    #[test]
    fn test_video_info_tolerates_missing_fields() {
        let info: VideoInfo = serde_json::from_str(r#"{"title": "x"}"#).unwrap();
        assert_eq!(info.title.as_deref(), Some("x"));
        assert!(info.thumbnail.is_none());
        assert!(!info.formats_available);
    }

    #[test]
    fn test_request_body_omits_absent_quality() {
        let body = serde_json::to_string(&ApiRequest {
            url: "https://example.com/v1",
            quality: None,
        })
        .unwrap();
        assert_eq!(body, r#"{"url":"https://example.com/v1"}"#);

        let body = serde_json::to_string(&ApiRequest {
            url: "https://example.com/v1",
            quality: Some(Quality::High),
        })
        .unwrap();
        assert_eq!(body, r#"{"url":"https://example.com/v1","quality":"high"}"#);
    }
}
