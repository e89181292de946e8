//! Domain types for the Backlift CLI
//!
//! - Newtypes for validated identifiers (`FileKey`, `AppId`)
//! - The classified error enum that every command resolves to

pub mod errors;
pub mod newtypes;

pub use errors::BackliftError;
pub use newtypes::{AppId, FileKey};
