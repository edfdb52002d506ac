use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cli_subcommands::{ChannelCommands, CommandCommands};

#[derive(Parser)]
#[command(name = "botdash")]
#[command(about = "Operator console for the bot management API", long_about = None)]
pub(crate) struct Cli {
    /// Directory holding `.botdash` (defaults to the nearest one above the cwd)
    #[arg(long, global = true, value_name = "DIR")]
    pub(crate) state_dir: Option<PathBuf>,

    /// Log debug events to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Create `.botdash/config.json`
    Init {
        /// Management API base URL
        #[arg(long)]
        api_url: String,
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Log in through Discord OAuth
    Login {
        /// The `code` query parameter from the OAuth redirect
        #[arg(long)]
        code: Option<String>,
    },

    /// End the current session
    Logout,

    /// Show the logged-in user
    Whoami {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Bot and guild statistics
    Stats {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Browse and toggle bot commands
    #[command(name = "commands")]
    BotCommands {
        #[command(subcommand)]
        command: CommandCommands,
    },

    /// Inspect and edit per-channel command allow-lists
    Channels {
        #[command(subcommand)]
        command: ChannelCommands,
    },

    /// Interactive channel editor
    Tui,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();

    if !matches!(cli.command, Commands::Tui) {
        init_logging(cli.verbose);
    }

    let rt = tokio::runtime::Runtime::new().context("start tokio runtime")?;
    crate::cli_exec::handle_command(&rt, cli.state_dir, cli.command)
}

fn init_logging(verbose: bool) {
    let default = if verbose { "botdash=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}
