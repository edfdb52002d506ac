use super::*;
use crate::source::CommandSource;

impl BotApiClient {
    pub async fn list_commands(&self) -> Result<Vec<Command>> {
        let resp = self
            .get("/api/commands")
            .send()
            .await
            .context("list commands")?;
        let list: CommandList = self
            .ensure_ok(resp, "list commands")
            .await?
            .json()
            .await
            .context("parse commands")?;
        Ok(list.commands)
    }

    pub async fn set_command_enabled(&self, name: &str, enabled: bool) -> Result<bool> {
        let resp = self
            .patch(&format!("/api/commands/{}", name))
            .json(&SetCommandEnabled { enabled })
            .send()
            .await
            .context("toggle command")?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            anyhow::bail!("unknown command {}", name);
        }

        let out: CommandToggled = self
            .ensure_ok(resp, "toggle command")
            .await?
            .json()
            .await
            .context("parse toggle response")?;
        Ok(out.enabled)
    }
}

impl CommandSource for BotApiClient {
    async fn list_commands(&self) -> Result<Vec<Command>> {
        BotApiClient::list_commands(self).await
    }
}
