//! Channel allow-list editing against the live API.
//!
//! [`ChannelManager`] owns the [`PendingChangeSet`] for one operator session
//! and applies the recovery policy: a failed or timed-out commit, and every
//! discard, is followed by a full reload of the channel snapshot.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::model::{ChangeAction, Channel};
use crate::pending::{ApplyChange, ChangeError, PendingChangeSet};
use crate::source::ChannelSource;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    NotLoaded,
    Loaded,
    /// Last fetch failed; the message is meant for display.
    Failed(String),
}

#[derive(Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    NothingPending,
    Committed { applied: usize },
    /// The commit failed and the snapshot was fetched again.
    Resynced { error: ChangeError },
}

pub struct ChannelManager<A> {
    api: Arc<A>,
    changes: PendingChangeSet,
    load_state: LoadState,
    commit_timeout: Option<Duration>,
}

impl<A> ChannelManager<A>
where
    A: ChannelSource + ApplyChange,
{
    pub fn new(api: Arc<A>, commit_timeout: Option<Duration>) -> Self {
        Self {
            api,
            changes: PendingChangeSet::default(),
            load_state: LoadState::NotLoaded,
            commit_timeout,
        }
    }

    pub fn changes(&self) -> &PendingChangeSet {
        &self.changes
    }

    pub fn changes_mut(&mut self) -> &mut PendingChangeSet {
        &mut self.changes
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn channels(&self) -> Vec<Channel> {
        self.changes.channels()
    }

    /// Fetches the authoritative snapshot. Failures are kept for display and
    /// not retried.
    pub async fn load(&mut self) -> Result<()> {
        match self.api.list_channels().await {
            Ok(channels) => {
                info!(channels = channels.len(), "channel snapshot loaded");
                self.changes.replace_snapshot(channels);
                self.load_state = LoadState::Loaded;
                Ok(())
            }
            Err(err) => {
                warn!(error = %format!("{:#}", err), "channel snapshot fetch failed");
                self.load_state = LoadState::Failed(format!("{:#}", err));
                Err(err.context("load channels"))
            }
        }
    }

    /// Records an edit from the UI. Invalid edits are logged and dropped.
    pub fn record(&mut self, channel_id: &str, command: &str, action: ChangeAction) -> bool {
        match self.changes.record_change(channel_id, command, action) {
            Ok(()) => true,
            Err(err) => {
                warn!(channel = channel_id, command, error = %err, "edit ignored");
                false
            }
        }
    }

    /// Flips `command` on the channel's effective allow-list.
    pub fn toggle(&mut self, channel_id: &str, command: &str) -> bool {
        let Some(allowed) = self.changes.effective_allow_list(channel_id) else {
            warn!(channel = channel_id, "toggle on unknown channel ignored");
            return false;
        };
        let present = allowed.iter().any(|c| c == command);
        self.record(channel_id, command, ChangeAction::toggle_for(present))
    }

    /// Commits pending edits; on remote failure reloads the snapshot instead
    /// of retrying.
    pub async fn save(&mut self) -> Result<SaveOutcome> {
        if !self.changes.is_dirty() {
            return Ok(SaveOutcome::NothingPending);
        }

        match self
            .changes
            .commit(Arc::clone(&self.api), self.commit_timeout)
            .await
        {
            Ok(report) => Ok(SaveOutcome::Committed {
                applied: report.applied,
            }),
            Err(err) if err.requires_resync() => {
                warn!(error = %err, "commit failed; reloading channels");
                self.load().await.context("reload channels after failed commit")?;
                Ok(SaveOutcome::Resynced { error: err })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Drops pending edits and reloads the snapshot.
    pub async fn discard(&mut self) -> Result<()> {
        self.changes.discard();
        self.load().await
    }
}

#[cfg(test)]
#[path = "tests/manager_tests.rs"]
mod tests;
