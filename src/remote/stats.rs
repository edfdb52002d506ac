use super::*;

impl BotApiClient {
    pub async fn stats_overview(&self) -> Result<StatsOverview> {
        let resp = self
            .get("/api/stats/overview")
            .send()
            .await
            .context("stats overview")?;
        let stats: StatsOverview = self
            .ensure_ok(resp, "stats overview")
            .await?
            .json()
            .await
            .context("parse stats overview")?;
        Ok(stats)
    }

    /// Most used commands, busiest first.
    pub async fn command_stats(&self) -> Result<Vec<CommandUsage>> {
        let resp = self
            .get("/api/stats/commands")
            .send()
            .await
            .context("command stats")?;
        let list: CommandUsageList = self
            .ensure_ok(resp, "command stats")
            .await?
            .json()
            .await
            .context("parse command stats")?;
        Ok(list.commands)
    }

    /// Commands per day over the last week.
    pub async fn activity(&self) -> Result<Vec<ActivityPoint>> {
        let resp = self
            .get("/api/stats/activity")
            .send()
            .await
            .context("activity")?;
        let body: Activity = self
            .ensure_ok(resp, "activity")
            .await?
            .json()
            .await
            .context("parse activity")?;
        Ok(body.activity)
    }
}
