use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    Add,
    Remove,
}

impl ChangeAction {
    pub fn label(self) -> &'static str {
        match self {
            ChangeAction::Add => "add",
            ChangeAction::Remove => "remove",
        }
    }

    pub fn toggle_for(present: bool) -> Self {
        if present {
            ChangeAction::Remove
        } else {
            ChangeAction::Add
        }
    }
}

/// One entry of the pending-change journal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingChange {
    pub channel_id: String,
    pub command: String,
    pub action: ChangeAction,
}

impl PendingChange {
    pub fn new(channel_id: &str, command: &str, action: ChangeAction) -> Self {
        Self {
            channel_id: channel_id.to_string(),
            command: command.to_string(),
            action,
        }
    }
}

impl std::fmt::Display for PendingChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = match self.action {
            ChangeAction::Add => '+',
            ChangeAction::Remove => '-',
        };
        write!(f, "{}{} @{}", sign, self.command, self.channel_id)
    }
}
