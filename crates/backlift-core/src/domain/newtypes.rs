//! Domain newtypes with validation
//!
//! Strongly-typed wrappers for the two identifiers that cross crate
//! boundaries: the relative path key of a scanned file and the opaque
//! application id assigned by the Backlift service.

use std::fmt::{self, Display, Formatter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::BackliftError;

// ============================================================================
// FileKey
// ============================================================================

/// A file's path relative to the scan root.
///
/// Keys use forward-slash separators regardless of platform and carry no
/// leading or trailing separator, so `index.html` and `css/site.css` are
/// valid keys while `/index.html` is not. Within one scan, keys are
/// unique because they are derived from distinct filesystem paths under
/// a single root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileKey(String);

impl FileKey {
    /// Builds a key from an absolute file path and the scan root it
    /// lives under.
    ///
    /// # Errors
    /// Returns [`BackliftError::InvalidPath`] if `path` is not inside
    /// `root`.
    pub fn from_root(root: &Path, path: &Path) -> Result<Self, BackliftError> {
        let relative = path
            .strip_prefix(root)
            .map_err(|_| BackliftError::InvalidPath(path.display().to_string()))?;

        let mut key = String::new();
        for component in relative.components() {
            if !key.is_empty() {
                key.push('/');
            }
            key.push_str(&component.as_os_str().to_string_lossy());
        }

        if key.is_empty() {
            return Err(BackliftError::InvalidPath(path.display().to_string()));
        }

        Ok(Self(key))
    }

    /// Wraps an already-normalized relative key.
    ///
    /// # Errors
    /// Returns [`BackliftError::InvalidPath`] for empty keys or keys
    /// with leading/trailing separators.
    pub fn new(key: impl Into<String>) -> Result<Self, BackliftError> {
        let key = key.into();
        if key.is_empty() || key.starts_with('/') || key.ends_with('/') {
            return Err(BackliftError::InvalidPath(key));
        }
        Ok(Self(key))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if any path segment of the key begins with a dot.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.0.split('/').any(|segment| segment.starts_with('.'))
    }
}

impl Display for FileKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// AppId
// ============================================================================

/// Opaque application identifier assigned by the Backlift service when
/// an app is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(String);

impl AppId {
    /// Wraps a non-empty identifier string.
    ///
    /// # Errors
    /// Returns [`BackliftError::MissingAppId`] for an empty id, which is
    /// what a blank `_app_id` field in the config file degrades to.
    pub fn new(id: impl Into<String>) -> Result<Self, BackliftError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(BackliftError::MissingAppId);
        }
        Ok(Self(id))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AppId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Unit tests
// ============================================================================
