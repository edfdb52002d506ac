use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tracing::{debug, warn};

use super::error::{ChangeError, Result};
use crate::model::PendingChange;

/// Remote side of a commit: applies one journal entry.
///
/// Implementations must be idempotent: adding a command that is already
/// allowed, or removing one that is already gone, succeeds.
pub trait ApplyChange: Send + Sync + 'static {
    fn apply(
        &self,
        change: &PendingChange,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// Adapts a closure into an [`ApplyChange`].
pub struct FnApplier<F>(pub F);

impl<F, Fut> ApplyChange for FnApplier<F>
where
    F: Fn(PendingChange) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    fn apply(
        &self,
        change: &PendingChange,
    ) -> impl Future<Output = anyhow::Result<()>> + Send {
        (self.0)(change.clone())
    }
}

/// Journal entries frozen by `begin_commit`.
#[derive(Debug)]
pub struct CommitBatch {
    pub(super) id: u64,
    pub(super) changes: Vec<PendingChange>,
}

impl CommitBatch {
    pub fn changes(&self) -> &[PendingChange] {
        &self.changes
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommitReport {
    pub applied: usize,
}

/// Applies every entry of `batch` concurrently and waits for all of them.
///
/// Any failed entry fails the whole batch; entries that already landed are not
/// rolled back. When `timeout` elapses first the outstanding calls are aborted
/// and the batch counts as failed.
pub async fn apply_batch<A: ApplyChange>(
    batch: &CommitBatch,
    applier: Arc<A>,
    timeout: Option<Duration>,
) -> Result<CommitReport> {
    let total = batch.changes.len();
    if total == 0 {
        return Ok(CommitReport { applied: 0 });
    }

    let mut tasks = JoinSet::new();
    for change in batch.changes.iter().cloned() {
        let applier = Arc::clone(&applier);
        tasks.spawn(async move {
            let res = applier.apply(&change).await;
            (change, res)
        });
    }
    debug!(total, "commit fan-out started");

    match timeout {
        Some(limit) => match tokio::time::timeout(limit, join_all(&mut tasks, total)).await {
            Ok(res) => res,
            Err(_) => {
                warn!(total, timeout = ?limit, "commit timed out");
                // Dropping the set aborts whatever is still running.
                Err(ChangeError::TimedOut(limit))
            }
        },
        None => join_all(&mut tasks, total).await,
    }
}

async fn join_all(
    tasks: &mut JoinSet<(PendingChange, anyhow::Result<()>)>,
    total: usize,
) -> Result<CommitReport> {
    let mut failed = 0;
    let mut first: Option<String> = None;

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((_, Ok(()))) => {}
            Ok((change, Err(err))) => {
                failed += 1;
                warn!(change = %change, error = %format!("{:#}", err), "change failed to apply");
                first.get_or_insert_with(|| format!("{}: {:#}", change, err));
            }
            Err(err) => {
                failed += 1;
                warn!(error = %err, "apply task did not complete");
                first.get_or_insert_with(|| format!("apply task: {}", err));
            }
        }
    }

    if failed == 0 {
        Ok(CommitReport { applied: total })
    } else {
        Err(ChangeError::ApplyFailed {
            failed,
            total,
            first: first.unwrap_or_default(),
        })
    }
}
