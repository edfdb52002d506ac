use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::*;
use crate::model::{CommandMode, PendingChange};

/// In-memory stand-in for the management API.
#[derive(Default)]
struct FakeApi {
    channels: Mutex<Vec<Channel>>,
    fail_command: Option<String>,
    fetch_down: AtomicBool,
    fetches: AtomicUsize,
    applies: AtomicUsize,
}

impl FakeApi {
    fn with(channels: Vec<Channel>) -> Self {
        Self {
            channels: Mutex::new(channels),
            ..Self::default()
        }
    }

    fn remote(&self, id: &str) -> Vec<String> {
        let channels = self.channels.lock().unwrap();
        channels
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.allowed_commands.clone())
            .unwrap_or_default()
    }
}

impl ChannelSource for FakeApi {
    async fn list_channels(&self) -> anyhow::Result<Vec<Channel>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fetch_down.load(Ordering::SeqCst) {
            anyhow::bail!("api unreachable");
        }
        Ok(self.channels.lock().unwrap().clone())
    }
}

impl ApplyChange for FakeApi {
    async fn apply(&self, change: &PendingChange) -> anyhow::Result<()> {
        self.applies.fetch_add(1, Ordering::SeqCst);
        if self.fail_command.as_deref() == Some(change.command.as_str()) {
            anyhow::bail!("500 from api");
        }
        let mut channels = self.channels.lock().unwrap();
        let Some(ch) = channels.iter_mut().find(|c| c.id == change.channel_id) else {
            anyhow::bail!("channel not found");
        };
        ch.allowed_commands =
            crate::pending::replay(&ch.allowed_commands, std::iter::once(change));
        Ok(())
    }
}

fn restricted(id: &str, allowed: &[&str]) -> Channel {
    Channel {
        id: id.to_string(),
        name: format!("chan-{}", id),
        command_mode: CommandMode::Restricted,
        allowed_commands: allowed.iter().map(|s| s.to_string()).collect(),
    }
}

#[tokio::test]
async fn load_then_save_commits_to_remote() {
    let api = Arc::new(FakeApi::with(vec![restricted("1", &["ping"])]));
    let mut mgr = ChannelManager::new(api.clone(), None);
    mgr.load().await.unwrap();
    assert_eq!(mgr.load_state(), &LoadState::Loaded);

    assert!(mgr.toggle("1", "help"));
    assert!(mgr.toggle("1", "ping"));
    assert_eq!(mgr.changes().effective_allow_list("1").unwrap(), vec!["help"]);

    let outcome = mgr.save().await.unwrap();
    assert_eq!(outcome, SaveOutcome::Committed { applied: 2 });
    assert_eq!(api.remote("1"), vec!["help"]);
    assert_eq!(mgr.changes().pending_count(), 0);
    assert_eq!(mgr.channels()[0].allowed_commands, vec!["help"]);
}

#[tokio::test]
async fn failed_save_resyncs_to_fresh_snapshot() {
    let api = Arc::new(FakeApi {
        fail_command: Some("boom".to_string()),
        ..FakeApi::with(vec![restricted("1", &["a"])])
    });
    let mut mgr = ChannelManager::new(api.clone(), None);
    mgr.load().await.unwrap();

    mgr.record("1", "b", ChangeAction::Add);
    mgr.record("1", "boom", ChangeAction::Add);
    mgr.record("1", "a", ChangeAction::Remove);

    let outcome = mgr.save().await.unwrap();
    assert!(matches!(
        outcome,
        SaveOutcome::Resynced {
            error: ChangeError::ApplyFailed { failed: 1, total: 3, .. }
        }
    ));

    // Local state is whatever the remote now holds, not old snapshot + journal.
    let fresh = api.remote("1");
    assert_eq!(fresh, vec!["b"]);
    assert_eq!(mgr.changes().effective_allow_list("1").unwrap(), fresh);
    assert_eq!(mgr.changes().pending_count(), 0);
    assert!(!mgr.changes().is_invalidated());
    assert_eq!(api.fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn discard_reloads_without_applying() {
    let api = Arc::new(FakeApi::with(vec![restricted("1", &["a"])]));
    let mut mgr = ChannelManager::new(api.clone(), None);
    mgr.load().await.unwrap();

    mgr.record("1", "b", ChangeAction::Add);
    mgr.discard().await.unwrap();

    assert_eq!(api.applies.load(Ordering::SeqCst), 0);
    assert_eq!(api.fetches.load(Ordering::SeqCst), 2);
    assert_eq!(mgr.changes().effective_allow_list("1").unwrap(), vec!["a"]);
    assert!(!mgr.changes().is_dirty());
}

#[tokio::test]
async fn fetch_failure_is_visible_and_keeps_last_snapshot() {
    let api = Arc::new(FakeApi::with(vec![restricted("1", &["a"])]));
    let mut mgr = ChannelManager::new(api.clone(), None);
    mgr.load().await.unwrap();

    api.fetch_down.store(true, Ordering::SeqCst);
    mgr.record("1", "b", ChangeAction::Add);
    assert!(mgr.discard().await.is_err());

    match mgr.load_state() {
        LoadState::Failed(msg) => assert!(msg.contains("api unreachable")),
        other => panic!("unexpected load state: {other:?}"),
    }
    assert_eq!(mgr.changes().effective_allow_list("1").unwrap(), vec!["a"]);
    // Edits stay blocked until a reload succeeds.
    assert!(!mgr.record("1", "c", ChangeAction::Add));

    api.fetch_down.store(false, Ordering::SeqCst);
    mgr.load().await.unwrap();
    assert!(mgr.record("1", "c", ChangeAction::Add));
}

#[tokio::test]
async fn invalid_edits_are_ignored_on_ui_path() {
    let open = Channel {
        id: "2".to_string(),
        name: "memes".to_string(),
        command_mode: CommandMode::All,
        allowed_commands: Vec::new(),
    };
    let api = Arc::new(FakeApi::with(vec![open]));
    let mut mgr = ChannelManager::new(api.clone(), None);
    mgr.load().await.unwrap();

    assert!(!mgr.record("2", "ping", ChangeAction::Add));
    assert!(!mgr.toggle("404", "ping"));
    assert_eq!(mgr.save().await.unwrap(), SaveOutcome::NothingPending);
    assert_eq!(api.applies.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn failed_reload_after_failed_commit_keeps_edits_blocked() {
    let api = Arc::new(FakeApi {
        fail_command: Some("boom".to_string()),
        ..FakeApi::with(vec![restricted("1", &["a"])])
    });
    let mut mgr = ChannelManager::new(api.clone(), None);
    mgr.load().await.unwrap();

    assert!(mgr.record("1", "boom", ChangeAction::Add));
    api.fetch_down.store(true, Ordering::SeqCst);

    let err = mgr.save().await.unwrap_err();
    assert!(format!("{:#}", err).contains("reload channels after failed commit"));
    assert!(matches!(mgr.load_state(), LoadState::Failed(_)));
    assert!(mgr.changes().is_invalidated());
    assert_eq!(mgr.changes().pending_count(), 0);
    assert!(!mgr.record("1", "c", ChangeAction::Add));
    assert!(!mgr.toggle("1", "a"));

    api.fetch_down.store(false, Ordering::SeqCst);
    mgr.load().await.unwrap();
    assert!(!mgr.changes().is_invalidated());
    assert!(mgr.record("1", "c", ChangeAction::Add));
}
