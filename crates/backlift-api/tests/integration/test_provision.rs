//! Integration tests for app creation and template download

use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use backlift_core::BackliftError;

use crate::common;

// ============================================================================
// create_app
// ============================================================================

#[tokio::test]
async fn test_create_app_returns_id() {
    let (server, client) = common::setup().await;

    Mock::given(method("POST"))
        .and(path("/app-admin"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"_id": "new-app-7"})),
        )
        .mount(&server)
        .await;

    let app_id = client.create_app().await.expect("create failed");
    assert_eq!(app_id.as_str(), "new-app-7");
}

#[tokio::test]
async fn test_create_app_without_id_in_body() {
    let (server, client) = common::setup().await;

    Mock::given(method("POST"))
        .and(path("/app-admin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let err = client.create_app().await.unwrap_err();
    assert!(matches!(err, BackliftError::BadAppId));
}

#[tokio::test]
async fn test_create_app_with_empty_id() {
    let (server, client) = common::setup().await;

    Mock::given(method("POST"))
        .and(path("/app-admin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"_id": ""})))
        .mount(&server)
        .await;

    let err = client.create_app().await.unwrap_err();
    assert!(matches!(err, BackliftError::BadAppId));
}

#[tokio::test]
async fn test_create_app_forbidden_without_key() {
    let (server, client) = common::setup().await;

    Mock::given(method("POST"))
        .and(path("/app-admin"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = client.create_app().await.unwrap_err();
    assert!(matches!(err, BackliftError::Forbidden));
}

// ============================================================================
// download_template
// ============================================================================

#[tokio::test]
async fn test_download_template_writes_manifest_files() {
    let (server, client) = common::setup().await;
    let dest = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/app-templates/basic"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "files": ["index.html", "css/site.css"]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/app-templates/basic/index.html"))
        .and(query_param("app_id", "new-app-7"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>starter</html>"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/app-templates/basic/css/site.css"))
        .and(query_param("app_id", "new-app-7"))
        .respond_with(ResponseTemplate::new(200).set_body_string("body {}"))
        .mount(&server)
        .await;

    client
        .download_template(dest.path(), "basic", &common::app_id("new-app-7"))
        .await
        .expect("template download failed");

    let index = std::fs::read_to_string(dest.path().join("index.html")).unwrap();
    assert_eq!(index, "<html>starter</html>");
    let css = std::fs::read_to_string(dest.path().join("css/site.css")).unwrap();
    assert_eq!(css, "body {}");
}

#[tokio::test]
async fn test_download_template_empty_manifest() {
    let (server, client) = common::setup().await;
    let dest = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/app-templates/blank"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"files": []})))
        .mount(&server)
        .await;

    client
        .download_template(dest.path(), "blank", &common::app_id("new-app-7"))
        .await
        .expect("empty template should succeed");

    assert_eq!(std::fs::read_dir(dest.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_download_template_unknown_template_404() {
    let (server, client) = common::setup().await;
    let dest = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/app-templates/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client
        .download_template(dest.path(), "missing", &common::app_id("new-app-7"))
        .await
        .unwrap_err();

    assert!(matches!(err, BackliftError::NotFound { .. }));
}
