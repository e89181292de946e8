//! Shared test helpers for Backlift service integration tests
//!
//! Provides wiremock-based mock server setup. Each helper mounts the
//! endpoints a test needs and returns a `BackliftClient` pointing at
//! the mock server.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use backlift_api::BackliftClient;
use backlift_core::domain::newtypes::{AppId, FileKey};
use backlift_core::ports::UploadFile;

/// API key every test client authenticates with.
pub const TEST_API_KEY: &str = "test-api-key";

/// `Authorization` header value reqwest produces for the test key
/// (`Basic` + base64 of `api:test-api-key`).
pub const TEST_AUTH_HEADER: &str = "Basic YXBpOnRlc3QtYXBpLWtleQ==";

/// Starts a mock server and returns it with a client pointed at it.
pub async fn setup() -> (MockServer, BackliftClient) {
    let server = MockServer::start().await;
    let client = BackliftClient::new(server.uri(), TEST_API_KEY);
    (server, client)
}

/// Mounts the bulk upload endpoint for `app_id`, answering with a
/// standard success body.
pub async fn mount_upload(server: &MockServer, app_id: &str, count: u64) {
    Mock::given(method("PUT"))
        .and(path(format!("/app-admin/{app_id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "count": count,
            "admin_url": format!("http://backlift.com/admin/{app_id}"),
            "app_url": format!("http://{app_id}.backlift.com"),
        })))
        .mount(server)
        .await;
}

/// Mounts the upload endpoint answering with a fixed error status.
pub async fn mount_upload_error(server: &MockServer, app_id: &str, status: u16) {
    Mock::given(method("PUT"))
        .and(path(format!("/app-admin/{app_id}")))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Builds an upload payload from `(key, content)` pairs.
pub fn payload(files: &[(&str, &str)]) -> Vec<UploadFile> {
    files
        .iter()
        .map(|(key, content)| UploadFile {
            key: FileKey::new(*key).unwrap(),
            bytes: content.as_bytes().to_vec(),
        })
        .collect()
}

/// Convenience constructor for app ids in tests.
pub fn app_id(id: &str) -> AppId {
    AppId::new(id).unwrap()
}
