//! App configuration and credential storage
//!
//! Two small pieces of persistent state live here:
//!
//! - The `.backlift` file at the scan root, a YAML document whose
//!   `_app_id` field names the hosted app this directory belongs to.
//!   It is written by the provisioning flow (server-side templates
//!   include it) and only ever read by push/watch, once per
//!   invocation.
//! - The API key, a plain-text credential under
//!   `$BACKLIFT_HOME/.backlift/api_key` (falling back to the user's
//!   home directory when the override is unset).

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::domain::newtypes::AppId;
use crate::domain::BackliftError;

/// Name of the per-app config file at the scan root.
pub const CONFIG_FILENAME: &str = ".backlift";

/// Name of the per-user data directory holding the API key.
const BACKLIFT_DIR: &str = ".backlift";

/// Environment variable overriding the home directory lookup.
const HOME_OVERRIDE: &str = "BACKLIFT_HOME";

// ============================================================================
// App config (.backlift at the scan root)
// ============================================================================

/// The parsed `.backlift` config file.
///
/// Extra fields in the document are ignored; only the app id matters to
/// the client.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Opaque app identifier assigned by the service at creation time.
    #[serde(rename = "_app_id")]
    app_id: String,
}

impl AppConfig {
    /// Loads and validates the config file at `path`.
    ///
    /// # Errors
    /// Any failure (missing file, unreadable content, malformed YAML,
    /// absent or empty `_app_id`) collapses to
    /// [`BackliftError::MissingAppId`]: from the user's point of view
    /// the directory simply has no usable app id.
    pub fn load(path: &Path) -> Result<Self, BackliftError> {
        let content = std::fs::read_to_string(path).map_err(|err| {
            debug!(path = %path.display(), %err, "config file unreadable");
            BackliftError::MissingAppId
        })?;
        let config: AppConfig = serde_yaml::from_str(&content).map_err(|err| {
            debug!(path = %path.display(), %err, "config file malformed");
            BackliftError::MissingAppId
        })?;
        Ok(config)
    }

    /// Returns the validated app id.
    pub fn app_id(&self) -> Result<AppId, BackliftError> {
        AppId::new(self.app_id.clone())
    }
}

/// Resolves the app id from an optional config path, as produced by the
/// scanner. `None` means the scan saw no config file at the root.
pub fn load_app_id(config_path: Option<&Path>) -> Result<AppId, BackliftError> {
    let path = config_path.ok_or(BackliftError::MissingAppId)?;
    AppConfig::load(path)?.app_id()
}

// ============================================================================
// API key storage
// ============================================================================

/// Path of the API key file: `{home}/.backlift/api_key`, where `{home}`
/// is `$BACKLIFT_HOME` when set and the user's home directory otherwise.
#[must_use]
pub fn api_key_file() -> PathBuf {
    let home = std::env::var_os(HOME_OVERRIDE)
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    home.join(BACKLIFT_DIR).join("api_key")
}

/// Reads the stored API key.
///
/// A missing or unreadable key file reads as the empty string; the
/// server rejects unauthenticated requests with 403, which surfaces as
/// [`BackliftError::Forbidden`] with a pointer at the setup command.
#[must_use]
pub fn read_api_key() -> String {
    let path = api_key_file();
    match std::fs::read_to_string(&path) {
        Ok(key) => key.trim().to_string(),
        Err(err) => {
            debug!(path = %path.display(), %err, "no stored api key");
            String::new()
        }
    }
}

/// Persists the API key, creating the data directory if needed.
///
/// # Errors
/// Returns [`BackliftError::WriteFailure`] naming the directory that
/// could not be written.
pub fn save_api_key(api_key: &str) -> Result<PathBuf, BackliftError> {
    let path = api_key_file();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|_| BackliftError::WriteFailure {
            path: parent.to_path_buf(),
        })?;
    }
    std::fs::write(&path, api_key).map_err(|_| BackliftError::WriteFailure { path: path.clone() })?;
    Ok(path)
}

// ============================================================================
// Unit tests
// ============================================================================
