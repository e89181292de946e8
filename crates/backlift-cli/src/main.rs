//! Backlift CLI - Command-line client for the Backlift hosting service
//!
//! Provides commands for:
//! - Storing the account API key
//! - Creating apps from server-side templates
//! - Initializing an existing folder as an app
//! - Pushing the working folder to the sandbox
//! - Watching the folder and re-pushing on changes

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{
    create::{CreateCommand, InitCommand},
    push::PushCommand,
    setup::SetupCommand,
    watch::WatchCommand,
};
use output::{get_formatter, OutputFormat};

#[derive(Debug, Parser)]
#[command(name = "backlift", version, about = "Command-line client for backlift.com")]
pub struct Cli {
    /// The path to the working folder
    #[arg(short, long, default_value = ".", global = true)]
    path: PathBuf,

    /// The URL to backlift's server
    #[arg(short, long, default_value = backlift_api::DEFAULT_BASE_URL, global = true)]
    url: String,

    /// Toggle uploading of hidden files (files that start with a ".")
    #[arg(
        short = 'H',
        long = "skip-hidden",
        action = clap::ArgAction::SetFalse,
        global = true
    )]
    skip_hidden: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Authorize this computer with your API key
    Setup(SetupCommand),
    /// Create a new backlift app in a new folder
    Create(CreateCommand),
    /// Initialize backlift for an existing app
    Init(InitCommand),
    /// Push files up to backlift
    Push(PushCommand),
    /// Observe the path and push files to backlift whenever they change
    Watch(WatchCommand),
}

/// Options shared by every command.
#[derive(Debug, Clone)]
pub struct Globals {
    pub path: PathBuf,
    pub url: String,
    pub skip_hidden: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Setup tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    let globals = Globals {
        path: cli.path,
        url: cli.url,
        skip_hidden: cli.skip_hidden,
    };

    let result = match cli.command {
        Commands::Setup(cmd) => cmd.execute(format).await,
        Commands::Create(cmd) => cmd.execute(&globals, format).await,
        Commands::Init(cmd) => cmd.execute(&globals, format).await,
        Commands::Push(cmd) => cmd.execute(&globals, format).await,
        Commands::Watch(cmd) => cmd.execute(&globals, format).await,
    };

    if let Err(err) = result {
        let formatter = get_formatter(cli.json);
        formatter.error(&err.to_string());
        std::process::exit(1);
    }
}
