#![allow(clippy::result_large_err)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router, extract::Path};
use clap::Parser;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use botdash::model::{Channel, Command, CommandUsage, GuildInfo, User};

#[path = "botdash_devserver/http_error.rs"]
mod http_error;
use self::http_error::*;
#[path = "botdash_devserver/tokens.rs"]
mod tokens;
use self::tokens::*;
#[path = "botdash_devserver/seed.rs"]
mod seed;
use self::seed::*;
#[path = "botdash_devserver/handlers_auth.rs"]
mod handlers_auth;
use self::handlers_auth::*;
#[path = "botdash_devserver/handlers_commands.rs"]
mod handlers_commands;
use self::handlers_commands::*;
#[path = "botdash_devserver/handlers_channels.rs"]
mod handlers_channels;
use self::handlers_channels::*;
#[path = "botdash_devserver/handlers_stats.rs"]
mod handlers_stats;
use self::handlers_stats::*;
#[path = "botdash_devserver/routes.rs"]
mod routes;
use self::routes::*;

/// Caller identity attached by `require_bearer`.
#[derive(Clone, Debug)]
struct Subject {
    user_id: String,
    token_hash: String,
}

#[derive(Clone)]
struct AppState {
    operator: User,
    guild: GuildInfo,

    commands: Arc<RwLock<Vec<Command>>>,
    channels: Arc<RwLock<Vec<Channel>>>,
    usage: Arc<RwLock<Vec<CommandUsage>>>,
    commands_24h: u64,

    // token hash -> user id
    tokens: Arc<RwLock<HashMap<String, String>>>,

    // Channel mutations for this command answer 500.
    fail_command: Option<String>,
}

#[derive(Parser)]
#[command(name = "botdash-devserver")]
#[command(about = "In-memory bot management API (development)", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8080")]
    addr: SocketAddr,

    /// Write bound address to this file (dev/test convenience)
    #[arg(long)]
    addr_file: Option<PathBuf>,

    /// Bearer token accepted without going through OAuth
    #[arg(long, default_value = "dev")]
    dev_token: String,

    /// JSON file with the initial guild, commands and channels
    #[arg(long)]
    seed: Option<PathBuf>,

    /// Make channel edits of this command fail with 500
    #[arg(long, value_name = "NAME")]
    fail_command: Option<String>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let seed = match &args.seed {
        Some(path) => Seed::load(path)?,
        None => Seed::default(),
    };

    let mut tokens = HashMap::new();
    tokens.insert(hash_token(&args.dev_token), seed.operator.id.clone());

    let state = Arc::new(AppState {
        operator: seed.operator,
        guild: seed.guild,
        commands: Arc::new(RwLock::new(seed.commands)),
        channels: Arc::new(RwLock::new(
            seed.channels.into_iter().map(Channel::normalize).collect(),
        )),
        usage: Arc::new(RwLock::new(seed.usage)),
        commands_24h: seed.commands_24h,
        tokens: Arc::new(RwLock::new(tokens)),
        fail_command: args.fail_command,
    });
    if let Some(cmd) = &state.fail_command {
        warn!(command = %cmd, "channel edits for this command will fail");
    }

    let authed = authed_router(state.clone());

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/api/auth/login", get(login_url))
        .route("/api/auth/callback", get(oauth_callback))
        .merge(authed)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("bind {}", args.addr))?;

    let local_addr = listener.local_addr().context("read listener local addr")?;
    eprintln!("botdash-devserver listening on {}", local_addr);
    info!(addr = %local_addr, "serving");

    if let Some(addr_file) = &args.addr_file {
        std::fs::write(addr_file, local_addr.to_string())
            .with_context(|| format!("write addr file {}", addr_file.display()))?;
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

async fn require_bearer(
    State(state): State<Arc<AppState>>,
    req: axum::extract::Request,
    next: Next,
) -> Response {
    let Some(value) = req.headers().get(header::AUTHORIZATION) else {
        return unauthorized();
    };

    let Ok(value) = value.to_str() else {
        return unauthorized();
    };

    let Some(token) = value.strip_prefix("Bearer ") else {
        return unauthorized();
    };

    let token_hash = hash_token(token);
    let user_id = {
        let tokens = state.tokens.read().await;
        tokens.get(&token_hash).cloned()
    };
    let Some(user_id) = user_id else {
        debug!("rejected unknown bearer token");
        return unauthorized();
    };

    let mut req = req;
    req.extensions_mut().insert(Subject {
        user_id,
        token_hash,
    });
    next.run(req).await
}

async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}
