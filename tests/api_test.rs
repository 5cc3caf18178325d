//! Admission and validation checks of the API client.
//!
//! These paths must short-circuit before any request is issued, so they are
//! exercised against a base URL nothing listens on: a failure kind other
//! than Transport proves no connection was attempted.

use clipfetch::api::{ApiClient, Quality, VideoService, EMPTY_URL_MESSAGE, OFFLINE_MESSAGE};
use clipfetch::network::NetworkMonitor;
use clipfetch::utils::FailureKind;

const DEAD_BASE: &str = "http://127.0.0.1:9";

#[tokio::test]
async fn test_empty_url_is_rejected_without_a_request() {
    let client = ApiClient::new(DEAD_BASE, NetworkMonitor::new(true));

    let failure = client.fetch_video_info("").await.unwrap_err();
    assert_eq!(failure.kind, FailureKind::Validation);
    assert_eq!(failure.text, EMPTY_URL_MESSAGE);
}

#[tokio::test]
async fn test_whitespace_url_is_rejected_without_a_request() {
    let client = ApiClient::new(DEAD_BASE, NetworkMonitor::new(true));

    let failure = client.fetch_video_info("   ").await.unwrap_err();
    assert_eq!(failure.kind, FailureKind::Validation);
}

#[tokio::test]
async fn test_download_with_empty_url_is_rejected_without_a_request() {
    let client = ApiClient::new(DEAD_BASE, NetworkMonitor::new(true));

    let failure = client.request_download("  ", Quality::Best).await.unwrap_err();
    assert_eq!(failure.kind, FailureKind::Validation);
}

#[tokio::test]
async fn test_offline_download_is_rejected_without_a_request() {
    let client = ApiClient::new(DEAD_BASE, NetworkMonitor::new(false));

    let failure = client
        .request_download("https://example.com/v1", Quality::High)
        .await
        .unwrap_err();
    assert_eq!(failure.kind, FailureKind::Admission);
    assert_eq!(failure.text, OFFLINE_MESSAGE);
}

#[tokio::test]
async fn test_offline_wins_over_url_validation() {
    let client = ApiClient::new(DEAD_BASE, NetworkMonitor::new(false));

    let failure = client.request_download("", Quality::Low).await.unwrap_err();
    assert_eq!(failure.kind, FailureKind::Admission);
}

#[tokio::test]
async fn test_offline_transition_gates_downloads() {
    let network = NetworkMonitor::new(true);
    let client = ApiClient::new(DEAD_BASE, network.clone());

    network.set_online(false);
    let failure = client
        .request_download("https://example.com/v1", Quality::Best)
        .await
        .unwrap_err();
    assert_eq!(failure.kind, FailureKind::Admission);
}

#[tokio::test]
async fn test_unreachable_server_surfaces_transport_failure() {
    let client = ApiClient::new(DEAD_BASE, NetworkMonitor::new(true));

    let failure = client
        .fetch_video_info("https://example.com/v1")
        .await
        .unwrap_err();
    assert_eq!(failure.kind, FailureKind::Transport);
    assert!(!failure.text.is_empty());
}
