//! Bulk-replace upload
//!
//! Implements the [`IAppHost`] port over HTTP: the complete current
//! file set goes up in one multipart PUT to `app-admin/{app_id}`, and
//! the service replaces the app's remote files wholesale. The payload
//! bytes are owned by the request and dropped when the call returns,
//! whatever the outcome.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::Deserialize;
use tracing::{debug, instrument};

use backlift_core::domain::newtypes::AppId;
use backlift_core::ports::{IAppHost, UploadFile, UploadReceipt};
use backlift_core::BackliftError;

use crate::client::BackliftClient;

/// Success body of the bulk upload endpoint.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    /// Number of files the service accepted.
    count: u64,
    /// Admin console URL for the app.
    admin_url: String,
    /// Public URL the app is hosted at.
    app_url: String,
}

#[async_trait]
impl IAppHost for BackliftClient {
    #[instrument(skip(self, files), fields(app_id = %app_id, files = files.len()))]
    async fn upload_files(
        &self,
        app_id: &AppId,
        files: Vec<UploadFile>,
    ) -> Result<UploadReceipt, BackliftError> {
        let mut form = Form::new();
        for file in files {
            let name = file.key.as_str().to_string();
            form = form.part(name.clone(), Part::bytes(file.bytes).file_name(name));
        }

        let request = self
            .request(Method::PUT, &format!("app-admin/{}", app_id))
            .multipart(form);

        let response = self.send(request).await?;

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|_| BackliftError::BadResponse)?;

        debug!(count = body.count, "upload accepted");

        Ok(UploadReceipt {
            count: body.count,
            admin_url: body.admin_url,
            app_url: body.app_url,
        })
    }
}
