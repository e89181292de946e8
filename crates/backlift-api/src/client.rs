//! Backlift service HTTP client
//!
//! Wraps `reqwest::Client` with base-URL construction and HTTP Basic
//! authentication (user `api`, password = the stored API key), and
//! provides the single response-classification point every call goes
//! through.

use reqwest::{Client, Method, RequestBuilder, Response};
use tracing::{debug, warn};

use backlift_core::BackliftError;

/// Production base URL of the Backlift service.
pub const DEFAULT_BASE_URL: &str = "http://backlift.com";

/// HTTP client for Backlift service calls.
///
/// Cheap to construct; one instance lives for the duration of a command
/// invocation. The API key is captured at construction - it is read
/// from disk once per invocation and never refreshed mid-run.
pub struct BackliftClient {
    /// The underlying HTTP client.
    client: Client,
    /// Base URL without a trailing slash.
    base_url: String,
    /// Stored API key; empty when the user never ran `setup`.
    api_key: String,
}

impl BackliftClient {
    /// Creates a client for the given base URL and API key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: Client::new(),
            base_url,
            api_key: api_key.into(),
        }
    }

    /// Returns the base URL this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds an authenticated request for `path` relative to the base URL.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path);
        debug!(%method, %url, "building request");
        self.client
            .request(method, url)
            .basic_auth("api", Some(&self.api_key))
    }

    /// Sends a request and classifies the outcome.
    ///
    /// # Errors
    /// [`BackliftError::ServerUnreachable`] when the request never got an
    /// HTTP answer, or the status-classified variants from
    /// [`check_response`] for non-2xx answers.
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response, BackliftError> {
        let response = request.send().await.map_err(|err| {
            warn!(%err, "transport failure");
            BackliftError::ServerUnreachable
        })?;
        check_response(response)
    }
}

/// Classifies a non-2xx response into the error the user sees.
///
/// - 5xx: the service is degraded (`ServerError`)
/// - 404: the resource is gone; the message names the URL (`NotFound`)
/// - 403: missing or invalid API key (`Forbidden`)
/// - anything else non-2xx: client/service contract violation
///   (`BadResponse`)
pub(crate) fn check_response(response: Response) -> Result<Response, BackliftError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    warn!(status = %status, url = %response.url(), "request failed");

    if status.is_server_error() {
        Err(BackliftError::ServerError)
    } else if status == reqwest::StatusCode::NOT_FOUND {
        Err(BackliftError::NotFound {
            url: response.url().to_string(),
        })
    } else if status == reqwest::StatusCode::FORBIDDEN {
        Err(BackliftError::Forbidden)
    } else {
        Err(BackliftError::BadResponse)
    }
}
