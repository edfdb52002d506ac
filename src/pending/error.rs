use std::time::Duration;

pub type Result<T, E = ChangeError> = core::result::Result<T, E>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ChangeError {
    #[error("unknown channel {0}")]
    UnknownChannel(String),
    #[error("channel {0} is not in restricted mode; its allow-list is not editable")]
    UnrestrictedChannel(String),
    #[error("a commit is already in progress")]
    CommitInProgress,
    #[error("channel snapshot was invalidated; reload it before editing")]
    SnapshotInvalidated,
    #[error("{failed} of {total} changes failed to apply (first: {first})")]
    ApplyFailed {
        failed: usize,
        total: usize,
        first: String,
    },
    #[error("commit timed out after {0:?}")]
    TimedOut(Duration),
}

impl ChangeError {
    /// Local contract violations, as opposed to remote failures during commit.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            ChangeError::UnknownChannel(_)
                | ChangeError::UnrestrictedChannel(_)
                | ChangeError::CommitInProgress
                | ChangeError::SnapshotInvalidated
        )
    }

    /// Remote failures leave the snapshot unknown; the caller has to re-fetch it.
    pub fn requires_resync(&self) -> bool {
        matches!(
            self,
            ChangeError::ApplyFailed { .. } | ChangeError::TimedOut(_)
        )
    }
}
