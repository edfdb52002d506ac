//! DTOs and payload types for management API requests/responses.

use serde::{Deserialize, Serialize};

use crate::model::{ActivityPoint, ChangeAction, Channel, Command, CommandUsage, User};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginUrl {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginGrant {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Me {
    pub user_id: String,
    pub username: String,

    #[serde(default)]
    pub avatar: Option<String>,
}

impl From<Me> for User {
    fn from(me: Me) -> Self {
        User {
            id: me.user_id,
            username: me.username,
            avatar: me.avatar,
            global_name: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommandList {
    pub commands: Vec<Command>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SetCommandEnabled {
    pub enabled: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommandToggled {
    pub command: String,
    pub enabled: bool,
}

/// The API has answered both `{"channels": [...]}` and a bare array.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChannelList {
    Wrapped { channels: Vec<Channel> },
    Bare(Vec<Channel>),
}

impl ChannelList {
    pub fn into_channels(self) -> Vec<Channel> {
        match self {
            ChannelList::Wrapped { channels } | ChannelList::Bare(channels) => channels,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChannelCommandPatch {
    pub command: String,
    pub action: ChangeAction,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommandUsageList {
    pub commands: Vec<CommandUsage>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Activity {
    pub activity: Vec<ActivityPoint>,
}
