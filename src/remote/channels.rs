use super::*;
use crate::pending::ApplyChange;
use crate::source::ChannelSource;

impl BotApiClient {
    pub async fn list_channels(&self) -> Result<Vec<Channel>> {
        let resp = self
            .get("/api/channel/list")
            .send()
            .await
            .context("list channels")?;
        let list: ChannelList = self
            .ensure_ok(resp, "list channels")
            .await?
            .json()
            .await
            .context("parse channels")?;
        Ok(list
            .into_channels()
            .into_iter()
            .map(Channel::normalize)
            .collect())
    }

    /// Adds or removes one command on a channel's allow-list. Idempotent.
    pub async fn apply_channel_command(&self, change: &PendingChange) -> Result<Channel> {
        let resp = self
            .patch(&format!("/api/channel/{}/commands", change.channel_id))
            .json(&ChannelCommandPatch {
                command: change.command.clone(),
                action: change.action,
            })
            .send()
            .await
            .with_context(|| format!("apply {}", change))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            anyhow::bail!("channel {} not found", change.channel_id);
        }

        let channel: Channel = self
            .ensure_ok(resp, "apply channel command")
            .await?
            .json()
            .await
            .context("parse channel")?;
        Ok(channel)
    }
}

impl ChannelSource for BotApiClient {
    async fn list_channels(&self) -> Result<Vec<Channel>> {
        BotApiClient::list_channels(self).await
    }
}

impl ApplyChange for BotApiClient {
    async fn apply(&self, change: &PendingChange) -> Result<()> {
        self.apply_channel_command(change).await.map(|_| ())
    }
}
