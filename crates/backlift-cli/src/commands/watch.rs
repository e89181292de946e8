//! Watch command - re-push the working folder whenever it changes

use std::sync::Arc;

use clap::Args;
use tracing::debug;

use backlift_api::BackliftClient;
use backlift_core::config;
use backlift_core::Result;
use backlift_sync::watch::WatchLoop;

use crate::output::OutputFormat;
use crate::Globals;

#[derive(Debug, Args)]
pub struct WatchCommand {}

impl WatchCommand {
    pub async fn execute(&self, globals: &Globals, _format: OutputFormat) -> Result<()> {
        let root = tokio::fs::canonicalize(&globals.path).await?;
        debug!(root = %root.display(), "watching");

        let client = BackliftClient::new(&globals.url, config::read_api_key());
        WatchLoop::new(root, globals.skip_hidden, Arc::new(client))
            .run()
            .await
    }
}
