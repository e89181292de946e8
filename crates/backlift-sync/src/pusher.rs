//! Push orchestration
//!
//! Gathers the complete current file set under the scan root and
//! submits it through an [`IAppHost`] as one bulk-replace upload. Both
//! the `push` command and every watch cycle funnel through here, so the
//! console reporting is identical in both paths.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use backlift_core::config;
use backlift_core::domain::newtypes::AppId;
use backlift_core::ports::{IAppHost, UploadFile, UploadReceipt};
use backlift_core::Result;

use crate::scanner;

/// Scans `root` and reads every file into an upload payload.
///
/// Prints the scan banner and one `Adding` line per file, matching the
/// push command's console contract. File contents are read here, scoped
/// to the returned payload; nothing stays open afterwards.
#[instrument(skip_all, fields(root = %root.display()))]
pub async fn collect(
    root: &Path,
    skip_hidden: bool,
) -> Result<(Vec<UploadFile>, Option<PathBuf>)> {
    println!("Scanning {}", root.display());

    let (entries, config_path) = scanner::scan(root, skip_hidden).await?;

    let mut files = Vec::with_capacity(entries.len());
    for entry in entries {
        let bytes = tokio::fs::read(&entry.path).await?;
        println!("Adding {}", entry.key);
        files.push(UploadFile {
            key: entry.key,
            bytes,
        });
    }

    Ok((files, config_path))
}

/// Full push: collect the tree, resolve the app id from the root's
/// `.backlift` file, and upload.
///
/// # Errors
/// [`BackliftError::MissingAppId`] when the root has no usable config,
/// plus anything [`collect`] or the upload can fail with.
///
/// [`BackliftError::MissingAppId`]: backlift_core::BackliftError::MissingAppId
pub async fn push(
    root: &Path,
    skip_hidden: bool,
    host: &dyn IAppHost,
) -> Result<(AppId, UploadReceipt)> {
    let (files, config_path) = collect(root, skip_hidden).await?;
    let app_id = config::load_app_id(config_path.as_deref())?;
    let receipt = upload_and_report(&app_id, files, host).await?;
    Ok((app_id, receipt))
}

/// Push using an already-known app id.
///
/// Watch cycles reuse the id obtained by the seeding push instead of
/// re-reading the config file on every upload.
pub async fn push_with_id(
    root: &Path,
    skip_hidden: bool,
    app_id: &AppId,
    host: &dyn IAppHost,
) -> Result<UploadReceipt> {
    let (files, _config_path) = collect(root, skip_hidden).await?;
    upload_and_report(app_id, files, host).await
}

/// Uploads the payload and prints the success summary.
async fn upload_and_report(
    app_id: &AppId,
    files: Vec<UploadFile>,
    host: &dyn IAppHost,
) -> Result<UploadReceipt> {
    info!(app_id = %app_id, files = files.len(), "uploading file set");
    let receipt = host.upload_files(app_id, files).await?;

    println!("{} files uploaded to the backlift sandbox\n", receipt.count);
    println!("Admin url -->> \n{}\n", receipt.admin_url);
    println!("Your app is hosted at -->> \n{}\n", receipt.app_url);

    Ok(receipt)
}

// ============================================================================
// Unit tests
// ============================================================================
