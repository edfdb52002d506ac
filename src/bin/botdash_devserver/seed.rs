//! Initial in-memory state, optionally read from `--seed FILE`.

use super::*;

use botdash::model::CommandMode;

#[derive(Debug, serde::Deserialize)]
pub(super) struct Seed {
    #[serde(default = "default_operator")]
    pub(super) operator: User,

    #[serde(default = "default_guild")]
    pub(super) guild: GuildInfo,

    #[serde(default)]
    pub(super) commands: Vec<Command>,

    #[serde(default)]
    pub(super) channels: Vec<Channel>,

    #[serde(default)]
    pub(super) usage: Vec<CommandUsage>,

    #[serde(default)]
    pub(super) commands_24h: u64,
}

impl Seed {
    pub(super) fn load(path: &std::path::Path) -> Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read seed {}", path.display()))?;
        let seed: Seed = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse seed {}", path.display()))?;
        info!(
            commands = seed.commands.len(),
            channels = seed.channels.len(),
            "seed loaded"
        );
        Ok(seed)
    }
}

impl Default for Seed {
    fn default() -> Self {
        let command = |name: &str, cog: &str, description: &str| Command {
            name: name.to_string(),
            category: cog.to_string(),
            description: description.to_string(),
            aliases: Vec::new(),
            hidden: false,
            enabled: true,
        };
        Self {
            operator: default_operator(),
            guild: default_guild(),
            commands: vec![
                command("help", "General", "Show help"),
                command("ping", "General", "Latency check"),
                Command {
                    aliases: vec!["b".to_string()],
                    ..command("ban", "Moderation", "Ban a member")
                },
                command("kick", "Moderation", "Kick a member"),
                command("play", "Music", "Queue a track"),
            ],
            channels: vec![
                Channel {
                    id: "1".to_string(),
                    name: "general".to_string(),
                    command_mode: CommandMode::Restricted,
                    allowed_commands: vec!["ping".to_string()],
                },
                Channel {
                    id: "2".to_string(),
                    name: "memes".to_string(),
                    command_mode: CommandMode::All,
                    allowed_commands: Vec::new(),
                },
            ],
            usage: Vec::new(),
            commands_24h: 0,
        }
    }
}

fn default_operator() -> User {
    User {
        id: "100".to_string(),
        username: "operator".to_string(),
        avatar: None,
        global_name: None,
    }
}

fn default_guild() -> GuildInfo {
    GuildInfo {
        id: Some("1".to_string()),
        name: Some("dev guild".to_string()),
        members: Some(1),
        ..GuildInfo::default()
    }
}
