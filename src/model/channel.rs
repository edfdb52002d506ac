use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandMode {
    /// Every command is allowed; the allow-list is ignored and not editable.
    #[default]
    All,
    /// Only commands in the allow-list are allowed.
    #[serde(alias = "only")]
    Restricted,
    /// Commands in the list are blocked; the list is not editable here.
    #[serde(rename = "exclude")]
    Exclude,
}

impl CommandMode {
    pub fn label(self) -> &'static str {
        match self {
            CommandMode::All => "all",
            CommandMode::Restricted => "restricted",
            CommandMode::Exclude => "exclude",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,

    #[serde(default, alias = "cmd_mode")]
    pub command_mode: CommandMode,

    #[serde(default)]
    pub allowed_commands: Vec<String>,
}

impl Channel {
    pub fn is_editable(&self) -> bool {
        self.command_mode == CommandMode::Restricted
    }

    pub fn allows(&self, command: &str) -> bool {
        match self.command_mode {
            CommandMode::All => true,
            CommandMode::Restricted => self.allowed_commands.iter().any(|c| c == command),
            CommandMode::Exclude => !self.allowed_commands.iter().any(|c| c == command),
        }
    }

    /// Drops repeated allow-list entries, keeping the first occurrence.
    pub fn normalize(mut self) -> Self {
        let mut seen = std::collections::HashSet::new();
        self.allowed_commands.retain(|c| seen.insert(c.clone()));
        self
    }
}
