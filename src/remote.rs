//! Client for the bot management API.

use std::time::Duration;

use anyhow::{Context, Result};

use crate::model::{
    ActivityPoint, Channel, Command, CommandUsage, PendingChange, StatsOverview, User,
};

mod http_client;

mod types;
pub use self::types::*;
mod auth;
mod channels;
mod commands;
mod stats;

#[derive(Clone)]
pub struct BotApiClient {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl BotApiClient {
    pub fn new(base_url: &str, token: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent("botdash");
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("build reqwest client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client,
        })
    }

    /// Same client, authenticated with `token`.
    pub fn with_token(&self, token: &str) -> Self {
        Self {
            base_url: self.base_url.clone(),
            token: Some(token.to_string()),
            client: self.client.clone(),
        }
    }
}
