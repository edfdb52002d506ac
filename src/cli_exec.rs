use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::runtime::Runtime;

use botdash::remote::BotApiClient;
use botdash::session::Session;
use botdash::store::{DashConfig, StateStore};

use crate::cli_runtime::Commands;

mod auth;
mod catalog;
mod channels;
mod stats;

/// Resolved `.botdash` state plus its config.
pub(super) struct Ctx {
    pub(super) store: StateStore,
    pub(super) config: DashConfig,
}

impl Ctx {
    fn open(state_dir: Option<PathBuf>) -> Result<Self> {
        let store = match state_dir {
            Some(dir) => StateStore::open(&dir)?,
            None => StateStore::discover(&std::env::current_dir().context("get current dir")?)?,
        };
        let config = store.read_config()?;
        Ok(Self { store, config })
    }

    pub(super) fn anonymous_client(&self) -> Result<BotApiClient> {
        BotApiClient::new(&self.config.api_url, None, self.config.request_timeout())
    }

    pub(super) fn session(&self) -> Result<Session> {
        self.store.session_store().require()
    }

    pub(super) fn client(&self) -> Result<(BotApiClient, Session)> {
        let session = self.session()?;
        let client = BotApiClient::new(
            &self.config.api_url,
            Some(session.token.clone()),
            self.config.request_timeout(),
        )?;
        Ok((client, session))
    }
}

pub(crate) fn handle_command(
    rt: &Runtime,
    state_dir: Option<PathBuf>,
    command: Commands,
) -> Result<()> {
    if let Commands::Init { api_url, force } = &command {
        let base = match &state_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().context("get current dir")?,
        };
        let store = StateStore::init(&base, api_url, *force)?;
        println!("Initialized botdash state at {}", store.root().display());
        return Ok(());
    }

    let ctx = Ctx::open(state_dir)?;
    match command {
        Commands::Init { .. } => Ok(()),
        Commands::Login { code } => rt.block_on(auth::login(&ctx, code)),
        Commands::Logout => rt.block_on(auth::logout(&ctx)),
        Commands::Whoami { json } => rt.block_on(auth::whoami(&ctx, json)),
        Commands::Stats { json } => rt.block_on(stats::show(&ctx, json)),
        Commands::BotCommands { command } => rt.block_on(catalog::handle(&ctx, command)),
        Commands::Channels { command } => rt.block_on(channels::handle(&ctx, command)),
        Commands::Tui => {
            let (api, session) = ctx.client()?;
            botdash::tui::run(
                rt,
                botdash::tui::TuiRunOptions {
                    api,
                    commit_timeout: ctx.config.commit_timeout(),
                    operator: session.user.display_name().to_string(),
                },
            )
        }
    }
}
