use crate::model::{ChangeAction, PendingChange};

/// Applies `changes` in order on top of `base`.
///
/// `add` appends a command that is absent, `remove` drops one that is present.
/// Entries are not deduplicated first: `[add x, remove x]` replays both.
pub fn replay<'a>(
    base: &[String],
    changes: impl IntoIterator<Item = &'a PendingChange>,
) -> Vec<String> {
    let mut out = base.to_vec();
    for change in changes {
        match change.action {
            ChangeAction::Add => {
                if !out.iter().any(|c| c == &change.command) {
                    out.push(change.command.clone());
                }
            }
            ChangeAction::Remove => out.retain(|c| c != &change.command),
        }
    }
    out
}
