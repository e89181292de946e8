//! Integration tests for the bulk upload and its error classification

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

use backlift_api::BackliftClient;
use backlift_core::ports::IAppHost;
use backlift_core::BackliftError;

use crate::common;

/// Matches requests whose content type is a multipart form, boundary
/// and all.
struct MultipartContentType;

impl wiremock::Match for MultipartContentType {
    fn matches(&self, request: &wiremock::Request) -> bool {
        request
            .headers
            .get("content-type")
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("multipart/form-data"))
    }
}

// ============================================================================
// Success path
// ============================================================================

#[tokio::test]
async fn test_upload_returns_receipt() {
    let (server, client) = common::setup().await;
    common::mount_upload(&server, "abc123", 2).await;

    let receipt = client
        .upload_files(
            &common::app_id("abc123"),
            common::payload(&[("index.html", "<html/>"), ("css/site.css", "body{}")]),
        )
        .await
        .expect("upload failed");

    assert_eq!(receipt.count, 2);
    assert_eq!(receipt.admin_url, "http://backlift.com/admin/abc123");
    assert_eq!(receipt.app_url, "http://abc123.backlift.com");
}

#[tokio::test]
async fn test_upload_sends_basic_auth_and_multipart() {
    let (server, client) = common::setup().await;

    Mock::given(method("PUT"))
        .and(path("/app-admin/abc123"))
        .and(header("authorization", common::TEST_AUTH_HEADER))
        .and(MultipartContentType)
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "count": 1,
            "admin_url": "http://backlift.com/admin/abc123",
            "app_url": "http://abc123.backlift.com",
        })))
        .expect(1)
        .mount(&server)
        .await;

    client
        .upload_files(
            &common::app_id("abc123"),
            common::payload(&[("index.html", "<html/>")]),
        )
        .await
        .expect("authenticated multipart upload failed");
}

#[tokio::test]
async fn test_upload_empty_file_set() {
    let (server, client) = common::setup().await;
    common::mount_upload(&server, "empty-app", 0).await;

    let receipt = client
        .upload_files(&common::app_id("empty-app"), Vec::new())
        .await
        .expect("empty upload failed");

    assert_eq!(receipt.count, 0);
}

// ============================================================================
// Status classification
// ============================================================================

#[tokio::test]
async fn test_upload_403_is_forbidden() {
    let (server, client) = common::setup().await;
    common::mount_upload_error(&server, "abc123", 403).await;

    let err = client
        .upload_files(
            &common::app_id("abc123"),
            common::payload(&[("index.html", "<html/>")]),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, BackliftError::Forbidden));
}

#[tokio::test]
async fn test_upload_404_carries_url() {
    let (server, client) = common::setup().await;
    common::mount_upload_error(&server, "ghost", 404).await;

    let err = client
        .upload_files(
            &common::app_id("ghost"),
            common::payload(&[("index.html", "<html/>")]),
        )
        .await
        .unwrap_err();

    match err {
        BackliftError::NotFound { url } => assert!(url.contains("/app-admin/ghost")),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_upload_500_is_server_error() {
    let (server, client) = common::setup().await;
    common::mount_upload_error(&server, "abc123", 500).await;

    let err = client
        .upload_files(
            &common::app_id("abc123"),
            common::payload(&[("index.html", "<html/>")]),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, BackliftError::ServerError));
}

#[tokio::test]
async fn test_upload_503_is_server_error() {
    let (server, client) = common::setup().await;
    common::mount_upload_error(&server, "abc123", 503).await;

    let err = client
        .upload_files(
            &common::app_id("abc123"),
            common::payload(&[("index.html", "<html/>")]),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, BackliftError::ServerError));
}

#[tokio::test]
async fn test_upload_other_status_is_bad_response() {
    let (server, client) = common::setup().await;
    common::mount_upload_error(&server, "abc123", 418).await;

    let err = client
        .upload_files(
            &common::app_id("abc123"),
            common::payload(&[("index.html", "<html/>")]),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, BackliftError::BadResponse));
}

#[tokio::test]
async fn test_upload_malformed_success_body_is_bad_response() {
    let (server, client) = common::setup().await;

    Mock::given(method("PUT"))
        .and(path("/app-admin/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client
        .upload_files(
            &common::app_id("abc123"),
            common::payload(&[("index.html", "<html/>")]),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, BackliftError::BadResponse));
}

// ============================================================================
// Transport failure
// ============================================================================

#[tokio::test]
async fn test_upload_unreachable_server() {
    // Nothing listens on the discard port.
    let client = BackliftClient::new("http://127.0.0.1:9", common::TEST_API_KEY);

    let err = client
        .upload_files(
            &common::app_id("abc123"),
            common::payload(&[("index.html", "<html/>")]),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, BackliftError::ServerUnreachable));
}
