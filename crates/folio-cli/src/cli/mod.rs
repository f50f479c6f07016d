//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use folio_core::{config, logging};

mod commands;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Terminal portfolio viewer")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Portfolio file to show (default: configured or built-in portfolio)
    #[arg(long, value_name = "PATH", env = "FOLIO_CONTENT", global = true)]
    content: Option<PathBuf>,

    /// Show the About text immediately instead of typing it out
    #[arg(long = "no-typing")]
    no_typing: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Print the portfolio's projects
    Projects {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Load and validate a portfolio file
    Validate {
        /// File to validate (default: --content or the configured portfolio)
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = config::Config::load().context("load config")?;
    let _log_guard = logging::init(&config.logging, &config::paths::log_dir())
        .context("initialize logging")?;

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli, config).await })
}

async fn dispatch(cli: Cli, config: config::Config) -> Result<()> {
    let Cli {
        command,
        content,
        no_typing,
    } = cli;
    let content = content.or_else(|| config.content.clone());

    // default to the viewer
    let Some(command) = command else {
        return commands::view::run(content.as_deref(), no_typing, &config).await;
    };

    match command {
        Commands::Projects { json } => commands::projects::list(content.as_deref(), json),
        Commands::Validate { path } => commands::projects::validate(path.or(content).as_deref()),
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
