//! Backlift Core - Domain logic and business rules
//!
//! This crate contains the shared core of the Backlift CLI:
//! - **Domain types** - `FileKey`, `AppId`, and the classified
//!   [`BackliftError`](domain::errors::BackliftError) enum
//! - **Configuration** - the `.backlift` app config file and the
//!   API-key credential store
//! - **Port definitions** - the [`IAppHost`](ports::IAppHost) trait that
//!   adapter crates implement
//!
//! # Architecture
//!
//! The domain module contains pure types with no I/O. Ports define trait
//! interfaces whose implementations live in adapter crates
//! (`backlift-api` for the HTTP transport). Every error that can reach
//! the user is a variant of `BackliftError`; commands propagate it up to
//! a single handler in the CLI that prints the message and sets the
//! exit code.

pub mod config;
pub mod domain;
pub mod ports;

pub use domain::errors::BackliftError;

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, BackliftError>;
