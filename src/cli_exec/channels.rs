use std::sync::Arc;

use anyhow::{Context, Result};

use botdash::manager::{ChannelManager, SaveOutcome};
use botdash::model::{ChangeAction, Channel, CommandMode};

use super::Ctx;
use crate::cli_subcommands::ChannelCommands;

pub(super) async fn handle(ctx: &Ctx, command: ChannelCommands) -> Result<()> {
    let (client, _) = ctx.client()?;
    let mut manager = ChannelManager::new(Arc::new(client), ctx.config.commit_timeout());
    manager.load().await?;

    match command {
        ChannelCommands::List { json } => {
            let channels = manager.channels();
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&channels).context("serialize channels json")?
                );
                return Ok(());
            }
            if channels.is_empty() {
                println!("No channels configured");
                return Ok(());
            }
            for ch in &channels {
                print_channel(ch);
            }
        }

        ChannelCommands::Show { id, json } => {
            let Some(ch) = manager.changes().channel(&id) else {
                anyhow::bail!("unknown channel {}", id);
            };
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&ch).context("serialize channel json")?
                );
            } else {
                print_channel(&ch);
            }
        }

        ChannelCommands::Edit {
            id,
            add,
            remove,
            dry_run,
        } => {
            if add.is_empty() && remove.is_empty() {
                anyhow::bail!("nothing to edit (pass --add and/or --remove)");
            }

            let before = manager
                .changes()
                .effective_allow_list(&id)
                .with_context(|| format!("unknown channel {}", id))?;

            let edits = add
                .iter()
                .map(|c| (c, ChangeAction::Add))
                .chain(remove.iter().map(|c| (c, ChangeAction::Remove)));
            for (command, action) in edits {
                manager
                    .changes_mut()
                    .record_change(&id, command, action)
                    .with_context(|| format!("{} {}", action.label(), command))?;
            }

            let after = manager.changes().effective_allow_list(&id).unwrap_or_default();
            println!("before: {}", fmt_list(&before));
            println!("after:  {}", fmt_list(&after));

            if dry_run {
                println!("{} change(s) not committed (dry run)", manager.changes().pending_count());
                return Ok(());
            }

            match manager.save().await? {
                SaveOutcome::NothingPending => println!("Nothing to commit"),
                SaveOutcome::Committed { applied } => println!("Committed {} change(s)", applied),
                SaveOutcome::Resynced { error } => {
                    let now = manager.changes().effective_allow_list(&id).unwrap_or_default();
                    println!("server state: {}", fmt_list(&now));
                    anyhow::bail!("commit failed; reloaded channel state from server: {}", error);
                }
            }
        }
    }
    Ok(())
}

fn print_channel(ch: &Channel) {
    match ch.command_mode {
        CommandMode::All => println!("{:<20} #{:<20} all commands", ch.id, ch.name),
        CommandMode::Restricted => println!(
            "{:<20} #{:<20} {}",
            ch.id,
            ch.name,
            fmt_list(&ch.allowed_commands)
        ),
        CommandMode::Exclude => println!(
            "{:<20} #{:<20} all except {}",
            ch.id,
            ch.name,
            fmt_list(&ch.allowed_commands)
        ),
    }
}

fn fmt_list(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}
