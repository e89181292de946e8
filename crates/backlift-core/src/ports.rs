//! Port definitions
//!
//! The sync engine talks to the hosting service through the
//! [`IAppHost`] trait. The HTTP implementation lives in
//! `backlift-api`; tests substitute their own implementations to
//! exercise push and watch behavior without a server.

use async_trait::async_trait;

use crate::domain::newtypes::{AppId, FileKey};
use crate::domain::BackliftError;

/// One file of an upload payload: its path key and full content.
///
/// The bytes are read inside the collection pass and dropped when the
/// upload call returns, succeed or fail, so file handles never outlive
/// a single push.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// Path key relative to the scan root.
    pub key: FileKey,
    /// Complete file content.
    pub bytes: Vec<u8>,
}

/// What the service reports after accepting a bulk upload.
#[derive(Debug, Clone)]
pub struct UploadReceipt {
    /// Number of files the service accepted.
    pub count: u64,
    /// URL of the app's admin console.
    pub admin_url: String,
    /// URL the app is hosted at.
    pub app_url: String,
}

/// Operations the hosting service offers to the sync engine.
#[async_trait]
pub trait IAppHost {
    /// Submits the complete current file set as a single bulk-replace
    /// upload for the given app.
    ///
    /// Every push re-sends everything the scanner currently sees; the
    /// endpoint replaces the remote file set wholesale rather than
    /// patching it.
    ///
    /// # Errors
    /// `ServerUnreachable` for transport failures, or one of the
    /// status-classified variants (`ServerError`, `NotFound`,
    /// `Forbidden`, `BadResponse`) for non-2xx answers.
    async fn upload_files(
        &self,
        app_id: &AppId,
        files: Vec<UploadFile>,
    ) -> Result<UploadReceipt, BackliftError>;
}
