//! Pure dependency evaluation over a workspace's task list.
//!
//! Blocked-ness is derived state: it is recomputed from the current
//! task list on every read and never stored on the task record.

use super::task::{Task, TaskId};

/// A task is blocked when any of its dependency ids matches a task in
/// the same list whose status is not Completed. Dependency ids that
/// match no task (deleted or never-imported) do not block.
pub fn is_blocked(task: &Task, all_tasks: &[Task]) -> bool {
    task.dependencies.iter().any(|dep_id| {
        all_tasks
            .iter()
            .find(|t| &t.id == dep_id)
            .is_some_and(|dep| !dep.is_complete())
    })
}

/// Ids of the incomplete dependencies currently blocking a task.
pub fn blocking_ids(task: &Task, all_tasks: &[Task]) -> Vec<TaskId> {
    task.dependencies
        .iter()
        .filter(|dep_id| {
            all_tasks
                .iter()
                .find(|t| &t.id == *dep_id)
                .is_some_and(|dep| !dep.is_complete())
        })
        .cloned()
        .collect()
}
