use serde::{Deserialize, Serialize};

fn default_category() -> String {
    "Unknown".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub name: String,

    #[serde(rename = "cog", default = "default_category")]
    pub category: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub aliases: Vec<String>,

    #[serde(default)]
    pub hidden: bool,

    #[serde(rename = "enable", alias = "enabled", default = "default_true")]
    pub enabled: bool,
}

impl Command {
    pub fn answers_to(&self, name: &str) -> bool {
        self.name == name || self.aliases.iter().any(|a| a == name)
    }
}
