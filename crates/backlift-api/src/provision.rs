//! App provisioning
//!
//! One-time flows that set a directory up as a Backlift app:
//! creating the app server-side and downloading a starter template
//! into the working folder. The template includes the `.backlift`
//! config file with the new app id already substituted in, so the
//! client never writes that file itself.

use std::path::Path;

use reqwest::Method;
use serde::Deserialize;
use tracing::{info, instrument};

use backlift_core::domain::newtypes::AppId;
use backlift_core::BackliftError;

use crate::client::BackliftClient;

/// Body of the create-app endpoint.
#[derive(Debug, Deserialize)]
struct CreateAppResponse {
    /// The id assigned to the new app.
    #[serde(rename = "_id")]
    id: Option<String>,
}

/// Template manifest: the list of files a template ships with.
#[derive(Debug, Deserialize)]
struct TemplateManifest {
    files: Vec<String>,
}

impl BackliftClient {
    /// Creates a new app on the service and returns its id.
    ///
    /// # Errors
    /// [`BackliftError::BadAppId`] when the service answers 2xx but the
    /// body carries no usable id, plus the usual transport and status
    /// classifications.
    #[instrument(skip(self))]
    pub async fn create_app(&self) -> Result<AppId, BackliftError> {
        let response = self.send(self.request(Method::POST, "app-admin")).await?;

        let body: CreateAppResponse = response
            .json()
            .await
            .map_err(|_| BackliftError::BadResponse)?;

        let id = body.id.ok_or(BackliftError::BadAppId)?;
        let app_id = AppId::new(id).map_err(|_| BackliftError::BadAppId)?;

        info!(app_id = %app_id, "app created");
        Ok(app_id)
    }

    /// Downloads every file of `template` into `dest`, tagging each
    /// request with the new app id so the service can substitute it
    /// into the generated config file.
    ///
    /// # Errors
    /// [`BackliftError::WriteFailure`] when a downloaded file cannot be
    /// written locally, plus transport and status classifications.
    #[instrument(skip(self), fields(template, dest = %dest.display()))]
    pub async fn download_template(
        &self,
        dest: &Path,
        template: &str,
        app_id: &AppId,
    ) -> Result<(), BackliftError> {
        let manifest_path = format!("app-templates/{template}");
        let response = self.send(self.request(Method::GET, &manifest_path)).await?;

        let manifest: TemplateManifest = response
            .json()
            .await
            .map_err(|_| BackliftError::BadResponse)?;

        for file in &manifest.files {
            let file_path = format!("app-templates/{template}/{file}");
            let request = self
                .request(Method::GET, &file_path)
                .query(&[("app_id", app_id.as_str())]);
            let response = self.send(request).await?;

            let content = response
                .bytes()
                .await
                .map_err(|_| BackliftError::BadResponse)?;

            let target = dest.join(file);
            write_created(&target, &content)?;
            println!("creating {}", target.display());
        }

        Ok(())
    }
}

/// Writes `content` to `path`, creating parent directories as needed.
fn write_created(path: &Path, content: &[u8]) -> Result<(), BackliftError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|_| BackliftError::WriteFailure {
            path: parent.to_path_buf(),
        })?;
    }
    std::fs::write(path, content).map_err(|_| BackliftError::WriteFailure {
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_created_makes_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("a/b/c.txt");

        write_created(&target, b"hello").unwrap();
        assert_eq!(std::fs::read(&target).unwrap(), b"hello");
    }

    #[test]
    fn test_write_created_reports_write_failure() {
        let dir = TempDir::new().unwrap();
        // A file where a directory is needed forces the failure.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();

        let err = write_created(&blocker.join("nested.txt"), b"x").unwrap_err();
        assert!(matches!(err, BackliftError::WriteFailure { .. }));
    }
}
