use super::*;

use botdash::model::{ActivityPoint, StatsOverview};
use botdash::remote::{Activity, CommandUsageList};

pub(super) async fn stats_overview(State(state): State<Arc<AppState>>) -> Json<StatsOverview> {
    let usage = state.usage.read().await;
    Json(StatsOverview {
        guild: state.guild.clone(),
        total_commands: usage.iter().map(|u| u.usage_count).sum(),
        commands_24h: state.commands_24h,
        bot_status: "online".to_string(),
    })
}

pub(super) async fn command_stats(State(state): State<Arc<AppState>>) -> Json<CommandUsageList> {
    let mut commands = state.usage.read().await.clone();
    commands.sort_by(|a, b| b.usage_count.cmp(&a.usage_count));
    Json(CommandUsageList { commands })
}

/// Seven days ending today; the dev server has no history so every day is 0
/// except today, which carries the 24h count.
pub(super) async fn activity(State(state): State<Arc<AppState>>) -> Json<Activity> {
    let today = time::OffsetDateTime::now_utc().date();
    let activity = (0..7i64)
        .rev()
        .map(|back| ActivityPoint {
            date: (today - time::Duration::days(back)).to_string(),
            commands: if back == 0 { state.commands_24h } else { 0 },
        })
        .collect();
    Json(Activity { activity })
}
