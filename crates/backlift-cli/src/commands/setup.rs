//! Setup command - store the account API key
//!
//! Writes the key to the per-user data directory where every other
//! command picks it up for Basic auth against the server.

use clap::Args;
use tracing::info;

use backlift_core::config;
use backlift_core::Result;

use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Args)]
pub struct SetupCommand {
    /// The API key from your backlift.com account page
    pub api_key: String,
}

impl SetupCommand {
    pub async fn execute(&self, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(matches!(format, OutputFormat::Json));

        let path = config::save_api_key(self.api_key.trim())?;
        info!(path = %path.display(), "api key stored");

        formatter.success(&format!("API key saved to {}", path.display()));
        Ok(())
    }
}
