//! Background update planning for the live-sync simulator.
//!
//! The sync actor only emits ticks; the actual mutation is planned and
//! applied here, against the workspace as it exists when the tick
//! resolves. Planning takes an injected `Rng` so tests can drive the
//! random choices deterministically.

use rand::Rng;

use super::task::{TaskId, TaskStatus};
use super::workspace::{Outcome, Workspace};

/// Author recorded on all simulator-driven mutations.
pub const BOT_AUTHOR: &str = "Decommission Bot";
/// Fixed text of the synthetic comment.
pub const BOT_COMMENT: &str = "Routine background check performed.";

/// One planned synthetic mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    /// Move a Pending task to In Progress.
    AdvanceStatus(TaskId),
    /// Append the fixed bot comment.
    BotComment(TaskId),
}

/// Pick a target and an action for this tick.
///
/// Returns None when every task is already Completed (the tick is then
/// a pure timestamp refresh). The target is drawn uniformly from the
/// incomplete tasks; the action is a fair coin flip, except that the
/// status advance is only meaningful for Pending tasks — for any other
/// status the coin falls through to the comment action, so a tick that
/// found work always leaves a visible trace.
pub fn plan<R: Rng>(workspace: &Workspace, rng: &mut R) -> Option<SyncAction> {
    let candidates: Vec<&TaskId> = workspace
        .tasks
        .iter()
        .filter(|t| !t.is_complete())
        .map(|t| &t.id)
        .collect();
    if candidates.is_empty() {
        return None;
    }

    let target = candidates[rng.gen_range(0..candidates.len())].clone();
    let advance = rng.gen_bool(0.5);

    let status = workspace.find_task(&target).map(|t| t.status);
    if advance && status == Some(TaskStatus::Pending) {
        Some(SyncAction::AdvanceStatus(target))
    } else {
        Some(SyncAction::BotComment(target))
    }
}

/// Apply a planned action through the mutation engine.
pub fn apply(workspace: &mut Workspace, action: SyncAction) -> Outcome {
    match action {
        SyncAction::AdvanceStatus(id) => workspace.advance_status(&id, BOT_AUTHOR),
        SyncAction::BotComment(id) => workspace.add_comment(&id, BOT_AUTHOR, BOT_COMMENT),
    }
}
