use anyhow::{Context, Result};

use super::Ctx;

pub(super) async fn show(ctx: &Ctx, json: bool) -> Result<()> {
    let (client, _) = ctx.client()?;
    let (overview, top, activity) = tokio::try_join!(
        client.stats_overview(),
        client.command_stats(),
        client.activity(),
    )?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "overview": overview,
                "commands": top,
                "activity": activity,
            }))
            .context("serialize stats json")?
        );
        return Ok(());
    }

    let guild = &overview.guild;
    println!(
        "guild: {}",
        guild.name.as_deref().unwrap_or("(unknown)")
    );
    if let Some(members) = guild.members {
        println!("members: {}", members);
    }
    println!("bot: {}", overview.bot_status);
    println!(
        "commands run: {} total, {} in the last 24h",
        overview.total_commands, overview.commands_24h
    );

    if !top.is_empty() {
        println!();
        println!("top commands:");
        for u in top.iter().take(10) {
            println!("  {:<20} {}", u.command, u.usage_count);
        }
    }

    if !activity.is_empty() {
        println!();
        println!("last 7 days:");
        let peak = activity.iter().map(|a| a.commands).max().unwrap_or(0).max(1);
        for a in &activity {
            let width = (a.commands * 30 / peak) as usize;
            println!("  {} {:>5} {}", a.date, a.commands, "#".repeat(width));
        }
    }
    Ok(())
}
