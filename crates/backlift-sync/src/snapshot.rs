//! Modification-time snapshots and change detection
//!
//! A [`Snapshot`] is a point-in-time mapping from path key to
//! last-modified timestamp. Snapshots are built fresh on every scan and
//! never mutated; the watch loop replaces its baseline wholesale after
//! each cycle. [`diff`] compares two snapshots into the three disjoint
//! change sets the loop reports.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use tracing::instrument;

use backlift_core::domain::newtypes::FileKey;
use backlift_core::Result;

use crate::scanner;

// ============================================================================
// Snapshot
// ============================================================================

/// Point-in-time mapping from path key to mtime (epoch seconds, with
/// sub-second precision where the filesystem provides it).
///
/// Backed by a `BTreeMap` so enumeration - and therefore the change-set
/// display order - is stable across runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    entries: BTreeMap<FileKey, f64>,
}

impl Snapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the mtime for a key.
    pub fn insert(&mut self, key: FileKey, mtime: f64) {
        self.entries.insert(key, mtime);
    }

    /// Returns the recorded mtime for a key, if present.
    #[must_use]
    pub fn get(&self, key: &FileKey) -> Option<f64> {
        self.entries.get(key).copied()
    }

    /// Number of files in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the snapshot holds no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates keys in stable (sorted) order.
    pub fn keys(&self) -> impl Iterator<Item = &FileKey> {
        self.entries.keys()
    }
}

/// Takes a fresh snapshot of `root`.
///
/// Runs the scanner and stats each entry; [`BackliftError::TooManyFiles`]
/// from the scan propagates unchanged.
///
/// [`BackliftError::TooManyFiles`]: backlift_core::BackliftError::TooManyFiles
#[instrument(skip_all, fields(root = %root.display()))]
pub async fn take(root: &Path, skip_hidden: bool) -> Result<(Snapshot, Option<PathBuf>)> {
    let (entries, config_path) = scanner::scan(root, skip_hidden).await?;

    let mut snapshot = Snapshot::new();
    for entry in entries {
        let metadata = tokio::fs::metadata(&entry.path).await?;
        snapshot.insert(entry.key, mtime_secs(&metadata));
    }

    Ok((snapshot, config_path))
}

/// Extracts the mtime as fractional epoch seconds.
///
/// Files dated before the epoch (clock skew, archive extraction) map to
/// negative seconds rather than failing.
fn mtime_secs(metadata: &std::fs::Metadata) -> f64 {
    match metadata.modified() {
        Ok(time) => match time.duration_since(UNIX_EPOCH) {
            Ok(duration) => duration.as_secs_f64(),
            Err(err) => -err.duration().as_secs_f64(),
        },
        Err(_) => 0.0,
    }
}

// ============================================================================
// Change detection
// ============================================================================

/// The three disjoint change sets between two snapshots.
///
/// A key appears in at most one set: `added` and `removed` partition the
/// symmetric difference of the key sets, and `modified` only holds keys
/// present in both snapshots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    /// Keys present in the new snapshot but not the old.
    pub added: Vec<FileKey>,
    /// Keys present in the old snapshot but not the new.
    pub removed: Vec<FileKey>,
    /// Keys present in both with differing timestamps.
    pub modified: Vec<FileKey>,
}

impl ChangeSet {
    /// True when nothing changed between the snapshots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }
}

/// Diffs two snapshots.
///
/// Timestamp comparison is exact inequality: any change, including
/// sub-second rewrites or clock skew, counts as modified.
#[must_use]
pub fn diff(old: &Snapshot, new: &Snapshot) -> ChangeSet {
    let mut changes = ChangeSet::default();

    for (key, mtime) in &new.entries {
        match old.get(key) {
            None => changes.added.push(key.clone()),
            Some(old_mtime) if old_mtime != *mtime => changes.modified.push(key.clone()),
            Some(_) => {}
        }
    }

    for key in old.entries.keys() {
        if !new.entries.contains_key(key) {
            changes.removed.push(key.clone());
        }
    }

    changes
}

// ============================================================================
// Unit tests
// ============================================================================
