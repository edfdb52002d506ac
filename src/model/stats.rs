use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GuildInfo {
    #[serde(default, alias = "guild_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default, alias = "member_count")]
    pub members: Option<u64>,
    #[serde(default)]
    pub region: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatsOverview {
    #[serde(default)]
    pub guild: GuildInfo,
    #[serde(default)]
    pub total_commands: u64,
    #[serde(default)]
    pub commands_24h: u64,
    pub bot_status: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CommandUsage {
    pub command: String,
    pub usage_count: u64,
    #[serde(default)]
    pub last_used: Option<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActivityPoint {
    pub date: String,
    pub commands: u64,
}
