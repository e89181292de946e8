//! Backlift API - HTTP client for the hosting service
//!
//! Provides the async client for:
//! - Bulk multipart file uploads (the `IAppHost` port implementation)
//! - App provisioning (create app, download template files)
//! - Uniform classification of HTTP failures into `BackliftError`
//!
//! ## Modules
//!
//! - [`client`] - The authenticated HTTP client and response classification
//! - [`upload`] - Bulk-replace upload implementing [`IAppHost`](backlift_core::ports::IAppHost)
//! - [`provision`] - Create-app and template-download flows

pub mod client;
pub mod provision;
pub mod upload;

pub use client::{BackliftClient, DEFAULT_BASE_URL};
