//! Backlift Sync - scan, snapshot, and watch engine
//!
//! Provides:
//! - Directory enumeration with hidden-file pruning and a
//!   descriptor-derived file-count ceiling
//! - Modification-time snapshots and snapshot diffing
//! - The push orchestration shared by `backlift push` and the watch loop
//! - The fixed-interval watch loop itself
//!
//! ## Modules
//!
//! - [`scanner`] - Directory walker producing file entries and the config path
//! - [`snapshot`] - Point-in-time mtime snapshots and change detection
//! - [`pusher`] - Collect-and-upload orchestration over an [`IAppHost`](backlift_core::ports::IAppHost)
//! - [`watch`] - The scan/diff/upload polling loop

pub mod pusher;
pub mod scanner;
pub mod snapshot;
pub mod watch;
