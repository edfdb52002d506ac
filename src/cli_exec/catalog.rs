use anyhow::{Context, Result};

use botdash::catalog::{ALL_CATEGORIES, CommandCatalog};
use botdash::model::Command;

use super::Ctx;
use crate::cli_subcommands::CommandCommands;

pub(super) async fn handle(ctx: &Ctx, command: CommandCommands) -> Result<()> {
    match command {
        CommandCommands::List {
            category,
            pattern,
            hidden,
            json,
        } => {
            let (client, _) = ctx.client()?;
            let catalog = CommandCatalog::fetch(&client).await?;

            let by_category = catalog.filter(category.as_deref().unwrap_or(ALL_CATEGORIES));
            let by_pattern: Option<Vec<&Command>> = match &pattern {
                Some(p) => Some(catalog.matching(p)?),
                None => None,
            };
            let shown: Vec<&Command> = by_category
                .into_iter()
                .filter(|c| hidden || !c.hidden)
                .filter(|c| {
                    by_pattern
                        .as_ref()
                        .is_none_or(|m| m.iter().any(|x| x.name == c.name))
                })
                .collect();

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&shown).context("serialize commands json")?
                );
                return Ok(());
            }

            if shown.is_empty() {
                println!("No commands found");
                return Ok(());
            }
            for c in shown {
                let state = if c.enabled { "" } else { " (disabled)" };
                let aliases = if c.aliases.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", c.aliases.join(", "))
                };
                println!("{:<20} {:<14}{}{}", c.name, c.category, aliases, state);
                if !c.description.is_empty() {
                    println!("    {}", c.description);
                }
            }
        }
        CommandCommands::Enable { name } => toggle(ctx, &name, true).await?,
        CommandCommands::Disable { name } => toggle(ctx, &name, false).await?,
    }
    Ok(())
}

async fn toggle(ctx: &Ctx, name: &str, enabled: bool) -> Result<()> {
    let (client, _) = ctx.client()?;
    let catalog = CommandCatalog::fetch(&client).await?;
    let Some(cmd) = catalog.find(name) else {
        anyhow::bail!("unknown command {}", name);
    };

    let now = client.set_command_enabled(&cmd.name, enabled).await?;
    println!(
        "{} {}",
        cmd.name,
        if now { "enabled" } else { "disabled" }
    );
    Ok(())
}
