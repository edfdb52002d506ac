use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::*;
use crate::model::{ChangeAction, CommandMode, PendingChange};

struct StaticApi {
    channels: Vec<Channel>,
}

impl ChannelSource for StaticApi {
    async fn list_channels(&self) -> anyhow::Result<Vec<Channel>> {
        Ok(self.channels.clone())
    }
}

impl ApplyChange for StaticApi {
    async fn apply(&self, _change: &PendingChange) -> anyhow::Result<()> {
        Ok(())
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn command(name: &str, category: &str) -> Command {
    Command {
        name: name.to_string(),
        category: category.to_string(),
        description: String::new(),
        aliases: Vec::new(),
        hidden: false,
        enabled: true,
    }
}

async fn loaded_app() -> App<StaticApi> {
    let api = Arc::new(StaticApi {
        channels: vec![
            Channel {
                id: "1".to_string(),
                name: "general".to_string(),
                command_mode: CommandMode::Restricted,
                allowed_commands: vec!["ping".to_string()],
            },
            Channel {
                id: "2".to_string(),
                name: "memes".to_string(),
                command_mode: CommandMode::All,
                allowed_commands: Vec::new(),
            },
        ],
    });
    let mut manager = ChannelManager::new(api, None);
    manager.load().await.unwrap();
    let mut app = App::new(manager, "operator".to_string());
    app.set_catalog(CommandCatalog::new(vec![
        command("ping", "Utility"),
        command("help", "Utility"),
        command("ban", "Moderation"),
    ]));
    app
}

#[tokio::test]
async fn first_channel_is_selected_after_load() {
    let app = loaded_app().await;
    assert_eq!(app.manager.changes().selected_id(), Some("1"));
}

#[tokio::test]
async fn space_toggles_selected_command_on_restricted_channel() {
    let mut app = loaded_app().await;
    assert_eq!(app.handle_key(key(KeyCode::Tab)), Action::None);
    assert_eq!(app.focus, Focus::Commands);

    // "ping" is allowed: toggling removes it.
    app.handle_key(key(KeyCode::Char(' ')));
    app.handle_key(key(KeyCode::Down));
    app.handle_key(key(KeyCode::Char(' ')));

    assert_eq!(
        app.manager.changes().pending(),
        &[
            PendingChange::new("1", "ping", ChangeAction::Remove),
            PendingChange::new("1", "help", ChangeAction::Add),
        ]
    );
    assert_eq!(app.handle_key(key(KeyCode::Char('s'))), Action::Save);
}

#[tokio::test]
async fn unrestricted_channel_is_not_editable() {
    let mut app = loaded_app().await;
    app.handle_key(key(KeyCode::Down));
    assert_eq!(app.manager.changes().selected_id(), Some("2"));

    app.handle_key(key(KeyCode::Tab));
    app.handle_key(key(KeyCode::Char(' ')));
    assert_eq!(app.manager.changes().pending_count(), 0);
    assert!(app.status.as_deref().unwrap().contains("not editable"));
}

#[tokio::test]
async fn quit_with_pending_changes_needs_confirmation() {
    let mut app = loaded_app().await;
    app.handle_key(key(KeyCode::Tab));
    app.handle_key(key(KeyCode::Char(' ')));

    app.handle_key(key(KeyCode::Char('q')));
    assert!(!app.quit);
    app.handle_key(key(KeyCode::Char('q')));
    assert!(app.quit);
}

#[tokio::test]
async fn category_cycle_filters_commands() {
    let mut app = loaded_app().await;
    assert_eq!(app.category_name(), "all");
    app.handle_key(key(KeyCode::Char('c')));
    assert_eq!(app.category_name(), "Utility");
    app.handle_key(key(KeyCode::Char('c')));
    assert_eq!(app.category_name(), "Moderation");
    assert_eq!(app.visible_commands().len(), 1);
    app.handle_key(key(KeyCode::Char('c')));
    assert_eq!(app.category_name(), "all");
}

#[tokio::test]
async fn reload_is_refused_while_dirty() {
    let mut app = loaded_app().await;
    assert_eq!(app.handle_key(key(KeyCode::Char('r'))), Action::Reload);

    app.handle_key(key(KeyCode::Tab));
    app.handle_key(key(KeyCode::Char(' ')));
    assert_eq!(app.handle_key(key(KeyCode::Char('r'))), Action::None);
    assert_eq!(app.handle_key(key(KeyCode::Char('d'))), Action::Discard);
}

#[tokio::test]
async fn committed_event_updates_status() {
    let mut app = loaded_app().await;
    app.handle_key(key(KeyCode::Tab));
    app.handle_key(key(KeyCode::Char(' ')));

    let res = app.manager.save().await;
    app.after_save(res);
    app.drain_events();
    assert_eq!(app.status.as_deref(), Some("saved 1 change(s)"));
    assert!(!app.manager.changes().is_dirty());
}

#[tokio::test]
async fn rejected_toggle_on_stale_snapshot_is_reported() {
    let mut app = loaded_app().await;
    // Journal dropped without the follow-up reload, as after a failed one.
    app.manager.changes_mut().discard();

    app.handle_key(key(KeyCode::Tab));
    app.handle_key(key(KeyCode::Char(' ')));
    assert_eq!(app.manager.changes().pending_count(), 0);
    assert_eq!(
        app.status.as_deref(),
        Some("edit ignored: reload channels (r) first")
    );
}
