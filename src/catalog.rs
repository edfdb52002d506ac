//! The bot's command catalog as listed by the management API.

use anyhow::{Context, Result};

use crate::model::Command;
use crate::source::CommandSource;

/// Category filter that matches every command.
pub const ALL_CATEGORIES: &str = "all";

#[derive(Clone, Debug, Default)]
pub struct CommandCatalog {
    commands: Vec<Command>,
}

impl CommandCatalog {
    pub fn new(commands: Vec<Command>) -> Self {
        Self { commands }
    }

    pub async fn fetch<S: CommandSource>(source: &S) -> Result<Self> {
        let commands = source
            .list_commands()
            .await
            .context("fetch command catalog")?;
        Ok(Self::new(commands))
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// `"all"` followed by each category once, in catalog order.
    pub fn categories(&self) -> Vec<&str> {
        let mut out = vec![ALL_CATEGORIES];
        for cmd in &self.commands {
            if !out.contains(&cmd.category.as_str()) {
                out.push(&cmd.category);
            }
        }
        out
    }

    pub fn filter(&self, category: &str) -> Vec<&Command> {
        self.commands
            .iter()
            .filter(|c| category == ALL_CATEGORIES || c.category == category)
            .collect()
    }

    /// Commands whose name or one of whose aliases matches the glob, ignoring case.
    pub fn matching(&self, pattern: &str) -> Result<Vec<&Command>> {
        let matcher = globset::GlobBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .with_context(|| format!("invalid glob: {}", pattern))?
            .compile_matcher();

        Ok(self
            .commands
            .iter()
            .filter(|c| {
                matcher.is_match(&c.name) || c.aliases.iter().any(|a| matcher.is_match(a))
            })
            .collect())
    }

    pub fn find(&self, name_or_alias: &str) -> Option<&Command> {
        self.commands
            .iter()
            .find(|c| c.name == name_or_alias)
            .or_else(|| self.commands.iter().find(|c| c.answers_to(name_or_alias)))
    }

    /// Mirrors a toggle the API already accepted.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> bool {
        match self.commands.iter_mut().find(|c| c.name == name) {
            Some(cmd) => {
                cmd.enabled = enabled;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
