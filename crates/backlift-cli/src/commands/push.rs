//! Push command - upload the working folder to the sandbox

use clap::Args;
use tracing::debug;

use backlift_api::BackliftClient;
use backlift_core::config;
use backlift_core::Result;

use crate::output::OutputFormat;
use crate::Globals;

#[derive(Debug, Args)]
pub struct PushCommand {}

impl PushCommand {
    pub async fn execute(&self, globals: &Globals, _format: OutputFormat) -> Result<()> {
        let root = tokio::fs::canonicalize(&globals.path).await?;
        debug!(root = %root.display(), "pushing");

        let client = BackliftClient::new(&globals.url, config::read_api_key());
        backlift_sync::pusher::push(&root, globals.skip_hidden, &client).await?;
        Ok(())
    }
}
