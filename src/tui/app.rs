use std::sync::mpsc::{Receiver, channel};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::catalog::{ALL_CATEGORIES, CommandCatalog};
use crate::manager::{ChannelManager, SaveOutcome};
use crate::model::{Channel, Command};
use crate::pending::{ApplyChange, ChangeEvent};
use crate::source::ChannelSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Focus {
    Channels,
    Commands,
}

/// Work the run loop has to do on the async side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Action {
    None,
    Save,
    Discard,
    Reload,
}

pub(super) struct App<A> {
    pub(super) manager: ChannelManager<A>,
    pub(super) catalog: CommandCatalog,
    pub(super) operator: String,

    pub(super) focus: Focus,
    pub(super) category: usize,
    pub(super) channel_idx: usize,
    pub(super) command_idx: usize,

    pub(super) status: Option<String>,
    pub(super) saving: bool,
    pub(super) quit: bool,

    // Set by a first `q` while edits are pending.
    quit_armed: bool,
    events: Receiver<ChangeEvent>,
}

impl<A> App<A>
where
    A: ChannelSource + ApplyChange,
{
    pub(super) fn new(mut manager: ChannelManager<A>, operator: String) -> Self {
        let (tx, events) = channel();
        manager.changes_mut().subscribe(move |ev| {
            let _ = tx.send(ev.clone());
        });

        let mut app = Self {
            manager,
            catalog: CommandCatalog::default(),
            operator,
            focus: Focus::Channels,
            category: 0,
            channel_idx: 0,
            command_idx: 0,
            status: None,
            saving: false,
            quit: false,
            quit_armed: false,
            events,
        };
        app.sync_selection();
        app
    }

    pub(super) fn set_catalog(&mut self, catalog: CommandCatalog) {
        self.catalog = catalog;
        self.category = 0;
        self.command_idx = 0;
    }

    pub(super) fn set_status(&mut self, msg: String) {
        self.status = Some(msg);
    }

    /// Folds change notifications into the status line.
    pub(super) fn drain_events(&mut self) {
        while let Ok(ev) = self.events.try_recv() {
            match ev {
                ChangeEvent::Committed { applied } => {
                    self.status = Some(format!("saved {} change(s)", applied));
                }
                ChangeEvent::CommitFailed { reason } => {
                    self.status = Some(format!("save failed: {}", reason));
                }
                ChangeEvent::SnapshotReplaced { .. } => self.sync_selection(),
                _ => {}
            }
        }
    }

    pub(super) fn channels(&self) -> Vec<Channel> {
        self.manager.channels()
    }

    pub(super) fn category_name(&self) -> &str {
        self.catalog
            .categories()
            .get(self.category)
            .copied()
            .unwrap_or(ALL_CATEGORIES)
    }

    pub(super) fn visible_commands(&self) -> Vec<&Command> {
        self.catalog.filter(self.category_name())
    }

    pub(super) fn handle_key(&mut self, key: KeyEvent) -> Action {
        if self.saving {
            return Action::None;
        }
        if key.code != KeyCode::Char('q') {
            self.quit_armed = false;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit = true;
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                if self.manager.changes().is_dirty() && !self.quit_armed {
                    self.quit_armed = true;
                    self.status =
                        Some("unsaved changes: press q again to quit without saving".to_string());
                } else {
                    self.quit = true;
                }
            }
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Channels => Focus::Commands,
                    Focus::Commands => Focus::Channels,
                };
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_by(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_by(1),
            KeyCode::Char('c') => {
                let n = self.catalog.categories().len();
                self.category = (self.category + 1) % n.max(1);
                self.command_idx = 0;
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if self.focus == Focus::Commands {
                    self.toggle_selected_command();
                } else {
                    self.focus = Focus::Commands;
                }
            }
            KeyCode::Char('s') => {
                if self.manager.changes().is_dirty() {
                    return Action::Save;
                }
                self.status = Some("nothing to save".to_string());
            }
            KeyCode::Char('d') => {
                if self.manager.changes().is_dirty() {
                    return Action::Discard;
                }
            }
            KeyCode::Char('r') => {
                if self.manager.changes().is_dirty() {
                    self.status = Some("save or discard pending changes first".to_string());
                } else {
                    return Action::Reload;
                }
            }
            _ => {}
        }
        Action::None
    }

    pub(super) fn after_save(&mut self, res: anyhow::Result<SaveOutcome>) {
        match res {
            Ok(SaveOutcome::NothingPending) => {
                self.status = Some("nothing to save".to_string());
            }
            Ok(SaveOutcome::Committed { .. }) => {}
            Ok(SaveOutcome::Resynced { error }) => {
                self.status = Some(format!("save failed, reloaded from server: {}", error));
            }
            Err(err) => self.status = Some(format!("{:#}", err)),
        }
    }

    pub(super) fn after_reload(&mut self, done: &str, res: anyhow::Result<()>) {
        match res {
            Ok(()) => self.status = Some(done.to_string()),
            Err(err) => self.status = Some(format!("{:#}", err)),
        }
    }

    fn move_by(&mut self, delta: isize) {
        match self.focus {
            Focus::Channels => {
                let len = self.channels().len();
                self.channel_idx = step(self.channel_idx, delta, len);
                self.sync_selection();
            }
            Focus::Commands => {
                let len = self.visible_commands().len();
                self.command_idx = step(self.command_idx, delta, len);
            }
        }
    }

    fn toggle_selected_command(&mut self) {
        let Some(channel) = self.manager.changes().selected() else {
            return;
        };
        if !channel.is_editable() {
            self.status = Some(format!(
                "#{} is in {} mode; its command list is not editable",
                channel.name,
                channel.command_mode.label()
            ));
            return;
        }
        let Some(command) = self
            .visible_commands()
            .get(self.command_idx)
            .map(|c| c.name.clone())
        else {
            return;
        };
        if !self.manager.toggle(&channel.id, &command) {
            self.status = Some("edit ignored: reload channels (r) first".to_string());
        }
    }

    fn sync_selection(&mut self) {
        let channels = self.channels();
        if channels.is_empty() {
            self.channel_idx = 0;
            let _ = self.manager.changes_mut().select(None);
            return;
        }
        self.channel_idx = self.channel_idx.min(channels.len() - 1);
        let id = channels[self.channel_idx].id.clone();
        let _ = self.manager.changes_mut().select(Some(id.as_str()));
    }
}

fn step(idx: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    idx.saturating_add_signed(delta).min(len - 1)
}

#[cfg(test)]
#[path = "../tests/tui/app_tests.rs"]
mod tests;
