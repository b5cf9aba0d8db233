//! Core domain model for the decommission dashboard.
//!
//! Entities, the pure dependency evaluator, the mutation engine, and
//! the planning logic for the two background processes.

pub mod deps;
pub mod reminder;
pub mod simulate;
pub mod task;
pub mod workspace;

pub use deps::is_blocked;
pub use task::{Category, Comment, HistoryEntry, Priority, Task, TaskId, TaskStatus, TrackedField};
pub use workspace::{Outcome, Workspace, WorkspaceId, WorkspaceStatus};
