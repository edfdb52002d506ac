//! Optimistic staging of channel allow-list edits.
//!
//! A [`PendingChangeSet`] keeps the last known-good channel snapshot and a
//! journal of add/remove edits recorded against it. Readers always see the
//! snapshot with the journal replayed on top; nothing touches the remote side
//! until [`PendingChangeSet::commit`] replays the journal through an
//! [`ApplyChange`] implementation.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::model::{ChangeAction, Channel, PendingChange};

mod commit;
mod error;
mod observe;
mod replay;

pub use self::commit::{ApplyChange, CommitBatch, CommitReport, FnApplier, apply_batch};
pub use self::error::{ChangeError, Result};
pub use self::observe::{ChangeEvent, SubscriptionId};
pub use self::replay::replay;

#[derive(Default)]
pub struct PendingChangeSet {
    snapshot: Vec<Channel>,
    log: Vec<PendingChange>,
    selected: Option<String>,

    // Id of the batch handed out by `begin_commit`, while it is outstanding.
    inflight: Option<u64>,
    next_batch: u64,

    // Set by `discard` and failed commits until `replace_snapshot`.
    invalidated: bool,

    observers: observe::Observers,
}

impl std::fmt::Debug for PendingChangeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingChangeSet")
            .field("channels", &self.snapshot.len())
            .field("pending", &self.log.len())
            .field("selected", &self.selected)
            .field("busy", &self.inflight.is_some())
            .field("invalidated", &self.invalidated)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl PendingChangeSet {
    pub fn new(snapshot: Vec<Channel>) -> Self {
        Self {
            snapshot: snapshot.into_iter().map(Channel::normalize).collect(),
            ..Self::default()
        }
    }

    /// Installs a freshly fetched snapshot and drops any journal entries.
    ///
    /// The selection survives when the selected channel is still present.
    pub fn replace_snapshot(&mut self, channels: Vec<Channel>) {
        let dropped = self.log.len();
        if dropped > 0 {
            warn!(dropped, "pending changes dropped by snapshot reload");
        }
        self.snapshot = channels.into_iter().map(Channel::normalize).collect();
        self.log.clear();
        self.invalidated = false;

        let channels = self.snapshot.len();
        self.emit(ChangeEvent::SnapshotReplaced { channels });

        if let Some(sel) = self.selected.clone()
            && self.find(&sel).is_none()
        {
            self.selected = None;
            self.emit(ChangeEvent::SelectionChanged(None));
        }
    }

    /// Appends an edit to the journal.
    ///
    /// Unknown channels, channels in `all` mode, an outstanding commit and an
    /// invalidated snapshot are all rejected without touching any state.
    pub fn record_change(
        &mut self,
        channel_id: &str,
        command: &str,
        action: ChangeAction,
    ) -> Result<()> {
        if self.inflight.is_some() {
            return Err(ChangeError::CommitInProgress);
        }
        if self.invalidated {
            return Err(ChangeError::SnapshotInvalidated);
        }
        let channel = self
            .find(channel_id)
            .ok_or_else(|| ChangeError::UnknownChannel(channel_id.to_string()))?;
        if !channel.is_editable() {
            return Err(ChangeError::UnrestrictedChannel(channel_id.to_string()));
        }

        let change = PendingChange::new(channel_id, command, action);
        debug!(change = %change, "change recorded");
        self.log.push(change.clone());
        self.emit(ChangeEvent::Recorded(change));
        Ok(())
    }

    pub fn pending_count(&self) -> usize {
        self.log.len()
    }

    pub fn is_dirty(&self) -> bool {
        !self.log.is_empty()
    }

    pub fn is_busy(&self) -> bool {
        self.inflight.is_some()
    }

    pub fn is_invalidated(&self) -> bool {
        self.invalidated
    }

    pub fn pending(&self) -> &[PendingChange] {
        &self.log
    }

    pub fn pending_for<'a>(
        &'a self,
        channel_id: &'a str,
    ) -> impl Iterator<Item = &'a PendingChange> + 'a {
        self.log.iter().filter(move |c| c.channel_id == channel_id)
    }

    /// Snapshot allow-list of `channel_id` with its journal entries replayed.
    pub fn effective_allow_list(&self, channel_id: &str) -> Option<Vec<String>> {
        let channel = self.find(channel_id)?;
        Some(replay(&channel.allowed_commands, self.pending_for(channel_id)))
    }

    /// The channel as the UI should render it.
    pub fn channel(&self, channel_id: &str) -> Option<Channel> {
        let channel = self.find(channel_id)?;
        Some(self.effective(channel))
    }

    pub fn channels(&self) -> Vec<Channel> {
        self.snapshot.iter().map(|c| self.effective(c)).collect()
    }

    /// The last known-good snapshot, without pending edits.
    pub fn committed(&self) -> &[Channel] {
        &self.snapshot
    }

    pub fn select(&mut self, channel_id: Option<&str>) -> Result<()> {
        if let Some(id) = channel_id
            && self.find(id).is_none()
        {
            return Err(ChangeError::UnknownChannel(id.to_string()));
        }
        let next = channel_id.map(str::to_string);
        if next != self.selected {
            self.selected = next.clone();
            self.emit(ChangeEvent::SelectionChanged(next));
        }
        Ok(())
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected(&self) -> Option<Channel> {
        self.channel(self.selected.as_deref()?)
    }

    pub fn selected_allow_list(&self) -> Option<Vec<String>> {
        self.effective_allow_list(self.selected.as_deref()?)
    }

    /// Replays the journal through `applier`; see [`apply_batch`].
    ///
    /// On success the previewed state becomes the committed snapshot. On
    /// failure the journal is dropped and the snapshot invalidated: the caller
    /// must re-fetch it rather than guess which entries landed.
    pub async fn commit<A: ApplyChange>(
        &mut self,
        applier: Arc<A>,
        timeout: Option<Duration>,
    ) -> Result<CommitReport> {
        let batch = self.begin_commit()?;
        let outcome = apply_batch(&batch, applier, timeout).await;
        self.finish_commit(batch, outcome)
    }

    /// Freezes the journal for a commit and marks the set busy.
    ///
    /// An empty journal yields an empty batch and leaves the set idle.
    pub fn begin_commit(&mut self) -> Result<CommitBatch> {
        if self.inflight.is_some() {
            return Err(ChangeError::CommitInProgress);
        }
        self.next_batch += 1;
        let batch = CommitBatch {
            id: self.next_batch,
            changes: self.log.clone(),
        };
        if !batch.is_empty() {
            self.inflight = Some(batch.id);
            self.emit(ChangeEvent::CommitStarted {
                pending: batch.changes.len(),
            });
        }
        Ok(batch)
    }

    /// Settles the state after `batch` was applied and passes `outcome` through.
    ///
    /// A batch that is no longer outstanding (discarded meanwhile) is ignored.
    pub fn finish_commit(
        &mut self,
        batch: CommitBatch,
        outcome: Result<CommitReport>,
    ) -> Result<CommitReport> {
        if batch.is_empty() || self.inflight != Some(batch.id) {
            return outcome;
        }
        self.inflight = None;

        match &outcome {
            Ok(report) => {
                self.snapshot = self.channels();
                self.log.clear();
                info!(applied = report.applied, "changes committed");
                self.emit(ChangeEvent::Committed {
                    applied: report.applied,
                });
            }
            Err(err) => {
                self.log.clear();
                self.invalidated = true;
                warn!(error = %err, "commit failed; snapshot needs reload");
                self.emit(ChangeEvent::CommitFailed {
                    reason: err.to_string(),
                });
            }
        }
        outcome
    }

    /// Drops every pending edit and invalidates the snapshot. No remote calls.
    ///
    /// Also abandons an outstanding commit; its late result is ignored.
    pub fn discard(&mut self) {
        let dropped = self.log.len();
        self.log.clear();
        self.inflight = None;
        self.invalidated = true;
        debug!(dropped, "pending changes discarded");
        self.emit(ChangeEvent::Discarded { dropped });
    }

    pub fn subscribe(
        &mut self,
        observer: impl FnMut(&ChangeEvent) + Send + 'static,
    ) -> SubscriptionId {
        self.observers.add(Box::new(observer))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.remove(id)
    }

    fn find(&self, channel_id: &str) -> Option<&Channel> {
        self.snapshot.iter().find(|c| c.id == channel_id)
    }

    fn effective(&self, channel: &Channel) -> Channel {
        let mut out = channel.clone();
        out.allowed_commands = replay(&channel.allowed_commands, self.pending_for(&channel.id));
        out
    }

    fn emit(&mut self, event: ChangeEvent) {
        self.observers.emit(&event);
    }
}

#[cfg(test)]
#[path = "tests/pending_tests.rs"]
mod tests;
