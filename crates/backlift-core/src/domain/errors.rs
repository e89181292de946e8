//! Classified error types
//!
//! Every failure a command can surface to the user is a variant here.
//! The `Display` strings are the exact user-facing messages; the CLI's
//! top-level handler prints them verbatim to stderr and exits 1, so no
//! other layer should print error text of its own.

use std::path::PathBuf;

use thiserror::Error;

/// Support contact included in several user-facing messages.
pub const SUPPORT_EMAIL: &str = "support@backlift.com";

/// Errors that terminate the current command invocation.
///
/// None of these are retried automatically and none are swallowed: the
/// watch loop treats any of them as loop-terminating, the same as a
/// one-shot command would.
#[derive(Debug, Error)]
pub enum BackliftError {
    /// No usable application id at push/watch time.
    #[error(
        "Ooops! Something's wrong. I couldn't obtain an app id. To\n\
         use the push or watch commands, you need an existing\n\
         backlift app created with either the create or init commands."
    )]
    MissingAppId,

    /// The server's create-app response did not contain an app id.
    #[error(
        "Ooops! Something's wrong. I couldn't obtain an app id from\n\
         the server. Please send an angry email to {SUPPORT_EMAIL}."
    )]
    BadAppId,

    /// The scan found more files than the descriptor-derived ceiling.
    #[error("Too many files. Total: {count},  max: {max}")]
    TooManyFiles {
        /// Number of files the scan found.
        count: usize,
        /// The ceiling derived from `RLIMIT_NOFILE`.
        max: usize,
    },

    /// Transport-level failure: the service could not be reached at all.
    #[error(
        "Ooops! Our server is not responding. Hopefully this is\n\
         temporary. If this problem persists, please send an angry\n\
         email to {SUPPORT_EMAIL}."
    )]
    ServerUnreachable,

    /// The service answered with a 5xx status.
    #[error(
        "Ooops! Our server is having trouble. We're looking into\n\
         it! While we're at it, please check to make sure you're\n\
         running the latest version of the backlift command line\n\
         interface at www.backlift.com. You're currently running\n\
         backlift cli {}.",
        env!("CARGO_PKG_VERSION")
    )]
    ServerError,

    /// The service answered 404 for the given URL.
    #[error("Ooops! We couldn't find the resource at {url}.")]
    NotFound {
        /// The URL the request was sent to.
        url: String,
    },

    /// The service answered 403: the API key is missing or invalid.
    #[error(
        "Ooops! This action is forbidden. Either you haven't\n\
         set up your api key, or you used an invalid key. Please\n\
         use the backlift setup command. See backlift --help."
    )]
    Forbidden,

    /// Any other non-2xx status, or a success body that failed to parse.
    #[error(
        "Oops! Something is wrong with the server. Please send an\n\
         angry email to {SUPPORT_EMAIL}."
    )]
    BadResponse,

    /// A local file or directory could not be created.
    #[error(
        "Ooops! We couldn't create a file. Please check to ensure\n\
         you have permission to write to {}.",
        path.display()
    )]
    WriteFailure {
        /// The path (or its parent directory) that could not be written.
        path: PathBuf,
    },

    /// `create` was run in a directory that already holds a config file.
    #[error("This app has already been initialized.")]
    AlreadyInitialized,

    /// A path could not be expressed as a key relative to the scan root.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Incidental filesystem failure (scan reads, payload reads).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
