//! Create and init commands - app provisioning
//!
//! Both commands ask the server for a fresh app id and unpack a
//! server-side template. `create` targets a new subfolder named after
//! the app; `init` provisions the working folder itself.

use std::path::Path;

use clap::Args;
use tracing::{info, instrument};

use backlift_api::BackliftClient;
use backlift_core::config;
use backlift_core::domain::newtypes::AppId;
use backlift_core::{BackliftError, Result};

use crate::output::{get_formatter, OutputFormat};
use crate::Globals;

#[derive(Debug, Args)]
pub struct CreateCommand {
    /// Name of the folder to create the app in
    pub name: String,

    /// Template to build the app from
    #[arg(short, long, default_value = "basic")]
    pub template: String,
}

impl CreateCommand {
    pub async fn execute(&self, globals: &Globals, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(matches!(format, OutputFormat::Json));

        let app_root = globals.path.join(&self.name);
        let app_id = provision(&globals.url, &app_root, &self.template).await?;

        formatter.success(&format!(
            "A new app has been created in the {} folder.",
            self.name
        ));
        formatter.success(&format!("This app will be called {}.", app_id));
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct InitCommand {
    /// Template to build the app from
    #[arg(short, long, default_value = "basic")]
    pub template: String,
}

impl InitCommand {
    pub async fn execute(&self, globals: &Globals, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(matches!(format, OutputFormat::Json));

        let app_id = provision(&globals.url, &globals.path, &self.template).await?;

        formatter.success("A new app has been created in the current folder.");
        formatter.success(&format!("This app will be called {}.", app_id));
        Ok(())
    }
}

/// Creates a fresh app on the server and unpacks `template` into
/// `app_root`.
///
/// # Errors
/// [`BackliftError::AlreadyInitialized`] when `app_root` already holds a
/// config file, plus anything app creation or the template download can
/// fail with.
#[instrument(skip_all, fields(root = %app_root.display(), template))]
async fn provision(url: &str, app_root: &Path, template: &str) -> Result<AppId> {
    let cfg_path = app_root.join(config::CONFIG_FILENAME);
    if cfg_path.exists() {
        return Err(BackliftError::AlreadyInitialized);
    }

    let client = BackliftClient::new(url, config::read_api_key());

    let app_id = client.create_app().await?;
    info!(app_id = %app_id, "app created");

    client.download_template(app_root, template, &app_id).await?;

    Ok(app_id)
}
