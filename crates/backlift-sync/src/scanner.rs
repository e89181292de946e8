//! Directory scanner
//!
//! Walks a scan root and produces the flat list of files a push would
//! upload, plus the path of the reserved `.backlift` config file when
//! one sits at the root.
//!
//! Hidden entries (any path segment below the root starting with `.`)
//! are pruned when `skip_hidden` is set: hidden directories are never
//! descended into and hidden files are dropped. The config file is
//! exempt from that rule - it conventionally starts with a dot - and is
//! separated out of the upload list entirely.
//!
//! Before returning, the scanner enforces a file-count ceiling derived
//! from the process's `RLIMIT_NOFILE` soft limit. The check runs before
//! any payload is assembled, so an oversized tree fails without a
//! partial scan.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use backlift_core::config::CONFIG_FILENAME;
use backlift_core::domain::newtypes::FileKey;
use backlift_core::{BackliftError, Result};

/// Descriptors held back from the ceiling for stdio, sockets, and the
/// config file itself.
const FD_SAFETY_MARGIN: usize = 6;

/// Ceiling used when the platform limit cannot be queried.
const FALLBACK_MAX_FILES: usize = 1024 - FD_SAFETY_MARGIN;

/// One file found by the scanner.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Absolute path on disk.
    pub path: PathBuf,
    /// Path key relative to the scan root, forward-slash separated.
    pub key: FileKey,
}

/// Walks `root` and returns its file entries plus the config file path,
/// if `.backlift` exists directly at the root.
///
/// `root` must be an absolute, normalized path; the CLI canonicalizes
/// it before calling in.
///
/// # Errors
/// - [`BackliftError::TooManyFiles`] when the tree holds more files
///   than the descriptor-derived ceiling.
/// - [`BackliftError::Io`] for unreadable directories.
#[instrument(skip_all, fields(root = %root.display(), skip_hidden))]
pub async fn scan(root: &Path, skip_hidden: bool) -> Result<(Vec<FileEntry>, Option<PathBuf>)> {
    let mut entries = Vec::new();
    let mut config_path = None;

    walk(root, root, skip_hidden, &mut entries, &mut config_path).await?;

    let max = max_open_files();
    check_file_budget(entries.len(), max)?;

    debug!(files = entries.len(), config = config_path.is_some(), "scan complete");
    Ok((entries, config_path))
}

/// Recursively walks one directory level.
fn walk<'a>(
    dir: &'a Path,
    root: &'a Path,
    skip_hidden: bool,
    entries: &'a mut Vec<FileEntry>,
    config_path: &'a mut Option<PathBuf>,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<()>> + Send + 'a>> {
    Box::pin(async move {
        let mut dir_entries = tokio::fs::read_dir(dir).await?;

        while let Some(entry) = dir_entries.next_entry().await? {
            let path = entry.path();
            let name = entry.file_name();
            let name = name.to_string_lossy();
            let file_type = entry.file_type().await?;

            if file_type.is_dir() {
                // Hidden subtrees are pruned wholesale; nothing below
                // them is ever visited.
                if skip_hidden && name.starts_with('.') {
                    debug!(path = %path.display(), "pruning hidden directory");
                    continue;
                }
                walk(&path, root, skip_hidden, entries, config_path).await?;
            } else if file_type.is_file() {
                if dir == root && name == CONFIG_FILENAME {
                    *config_path = Some(path);
                    continue;
                }
                if skip_hidden && name.starts_with('.') {
                    continue;
                }
                let key = FileKey::from_root(root, &path)?;
                entries.push(FileEntry { path, key });
            }
            // Symlinks and other special entries are ignored.
        }

        Ok(())
    })
}

/// Fails with [`BackliftError::TooManyFiles`] when `count` exceeds `max`.
pub(crate) fn check_file_budget(count: usize, max: usize) -> Result<()> {
    if count > max {
        return Err(BackliftError::TooManyFiles { count, max });
    }
    Ok(())
}

/// The file-count ceiling: the soft `RLIMIT_NOFILE` limit minus a small
/// margin for stdio and sockets.
#[cfg(unix)]
#[must_use]
pub fn max_open_files() -> usize {
    let mut limit = libc::rlimit {
        rlim_cur: 0,
        rlim_max: 0,
    };
    // SAFETY: getrlimit only writes into the struct we hand it.
    let rc = unsafe { libc::getrlimit(libc::RLIMIT_NOFILE, &mut limit) };
    if rc == 0 {
        (limit.rlim_cur as usize).saturating_sub(FD_SAFETY_MARGIN)
    } else {
        FALLBACK_MAX_FILES
    }
}

/// Fallback ceiling for platforms without `getrlimit`.
#[cfg(not(unix))]
#[must_use]
pub fn max_open_files() -> usize {
    FALLBACK_MAX_FILES
}

// ============================================================================
// Unit tests
// ============================================================================
