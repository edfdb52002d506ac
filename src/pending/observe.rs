use crate::model::PendingChange;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChangeEvent {
    SnapshotReplaced { channels: usize },
    Recorded(PendingChange),
    SelectionChanged(Option<String>),
    CommitStarted { pending: usize },
    Committed { applied: usize },
    CommitFailed { reason: String },
    Discarded { dropped: usize },
}

impl ChangeEvent {
    /// The cached snapshot can no longer be trusted and must be fetched again.
    pub fn needs_reload(&self) -> bool {
        matches!(
            self,
            ChangeEvent::CommitFailed { .. } | ChangeEvent::Discarded { .. }
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&ChangeEvent) + Send>;

#[derive(Default)]
pub(super) struct Observers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Observer)>,
}

impl Observers {
    pub(super) fn add(&mut self, observer: Observer) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.entries.push((id, observer));
        id
    }

    pub(super) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(eid, _)| *eid != id);
        self.entries.len() != before
    }

    pub(super) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(super) fn emit(&mut self, event: &ChangeEvent) {
        for (_, observer) in self.entries.iter_mut() {
            observer(event);
        }
    }
}
