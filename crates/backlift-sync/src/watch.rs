//! The watch loop
//!
//! `backlift watch` runs the scan/diff/upload cycle on a fixed interval
//! until interrupted. The loop is a single task with strictly
//! sequential awaits: each cycle fully completes (or fails fatally)
//! before the next begins, and the half-second pause is the only
//! suspension point. Ctrl-C is raced against that pause alone, so an
//! in-flight upload always runs to completion.
//!
//! ## Cycle
//!
//! 1. **Seeding**: one unconditional push establishes the remote
//!    baseline and yields the app id; an initial snapshot becomes the
//!    `before` baseline.
//! 2. **Idle**: sleep for the poll interval.
//! 3. **Diffing**: take a fresh snapshot, diff against `before`.
//! 4. Empty change set: rebaseline silently and go back to idle.
//! 5. Non-empty: print the grouped path keys, re-scan and push the
//!    full current file set, rebaseline.
//!
//! Any push failure ends the loop; there is no skip-and-continue.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument};

use backlift_core::domain::newtypes::{AppId, FileKey};
use backlift_core::ports::IAppHost;
use backlift_core::Result;

use crate::pusher;
use crate::snapshot::{self, Snapshot};

/// Pause between poll cycles.
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// The fixed-interval scan/diff/upload loop.
///
/// Owns the `before` snapshot exclusively across iterations; nothing
/// else reads or replaces it.
pub struct WatchLoop {
    root: PathBuf,
    skip_hidden: bool,
    interval: Duration,
    host: Arc<dyn IAppHost + Send + Sync>,
}

impl WatchLoop {
    /// Creates a watch loop over `root` with the default poll interval.
    pub fn new(root: PathBuf, skip_hidden: bool, host: Arc<dyn IAppHost + Send + Sync>) -> Self {
        Self {
            root,
            skip_hidden,
            interval: POLL_INTERVAL,
            host,
        }
    }

    /// Overrides the poll interval.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Runs the loop until Ctrl-C.
    ///
    /// # Errors
    /// Any scan or upload failure is fatal to the whole loop and
    /// propagates to the caller; the loop never retries a failed cycle.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub async fn run(&self) -> Result<()> {
        // Seed: full push plus the baseline snapshot.
        let (app_id, _receipt) = pusher::push(&self.root, self.skip_hidden, &*self.host).await?;
        let (mut before, _config) = snapshot::take(&self.root, self.skip_hidden).await?;

        info!(app_id = %app_id, files = before.len(), "watching for changes");

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("interrupted, stopping watch");
                    break;
                }
                _ = tokio::time::sleep(self.interval) => {}
            }

            before = self.poll_once(&app_id, before).await?;
        }

        Ok(())
    }

    /// One diff cycle: snapshot, compare against `before`, push the
    /// full tree if anything changed. Returns the new baseline.
    pub async fn poll_once(&self, app_id: &AppId, before: Snapshot) -> Result<Snapshot> {
        let (after, _config) = snapshot::take(&self.root, self.skip_hidden).await?;
        let changes = snapshot::diff(&before, &after);

        if changes.is_empty() {
            debug!("no changes this cycle");
            return Ok(after);
        }

        if !changes.added.is_empty() {
            println!("Added: {}", join_keys(&changes.added));
        }
        if !changes.removed.is_empty() {
            println!("Removed: {}", join_keys(&changes.removed));
        }
        if !changes.modified.is_empty() {
            println!("Modified: {}", join_keys(&changes.modified));
        }

        pusher::push_with_id(&self.root, self.skip_hidden, app_id, &*self.host).await?;

        Ok(after)
    }
}

/// Comma-joins keys for the grouped change report.
fn join_keys(keys: &[FileKey]) -> String {
    keys.iter()
        .map(FileKey::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Unit tests
// ============================================================================
