//! Workspace model and the mutation engine.
//!
//! A workspace is an isolated decommission board: its own task list,
//! team roster, health status, and region. All task mutations go
//! through the methods here so that audit-history rules are enforced
//! in exactly one place. Operations never fail loudly: invalid input
//! is absorbed and reported as `Outcome::Ignored`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::deps::is_blocked;
use super::task::{Category, Comment, Priority, Task, TaskId, TaskStatus, TrackedField};

/// Unique identifier for a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkspaceId(pub String);

impl WorkspaceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for WorkspaceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for WorkspaceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Workspace health status. User-assigned, never derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkspaceStatus {
    Healthy,
    AtRisk,
    Critical,
}

impl WorkspaceStatus {
    /// Next status in the cycle Healthy -> At Risk -> Critical -> Healthy.
    pub fn cycled(&self) -> Self {
        match self {
            WorkspaceStatus::Healthy => WorkspaceStatus::AtRisk,
            WorkspaceStatus::AtRisk => WorkspaceStatus::Critical,
            WorkspaceStatus::Critical => WorkspaceStatus::Healthy,
        }
    }
}

impl Default for WorkspaceStatus {
    fn default() -> Self {
        Self::Healthy
    }
}

impl std::fmt::Display for WorkspaceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkspaceStatus::Healthy => write!(f, "Healthy"),
            WorkspaceStatus::AtRisk => write!(f, "At Risk"),
            WorkspaceStatus::Critical => write!(f, "Critical"),
        }
    }
}

/// Result of a mutation-engine operation.
///
/// Operations never error: input that cannot be applied (unknown task
/// id, dependency-gated toggle, empty text) is reported as `Ignored`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Ignored,
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

/// Per-category completion rollup for the infrastructure view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRollup {
    pub category: Category,
    pub total: usize,
    pub completed: usize,
    pub percent: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workspace {
    pub id: WorkspaceId,
    pub name: String,
    pub status: WorkspaceStatus,
    pub region: String,
    pub team: Vec<String>,
    /// Display order. Reorders rewrite this Vec wholesale.
    pub tasks: Vec<Task>,
}

impl Workspace {
    /// Create an empty workspace with the default team roster.
    pub fn new(name: &str, region: &str, status: WorkspaceStatus) -> Self {
        Self {
            id: WorkspaceId::new(),
            name: name.to_string(),
            status,
            region: region.to_string(),
            team: vec!["System Admin".to_string()],
            tasks: Vec::new(),
        }
    }

    /// The workspace every session starts with: the legacy production
    /// environment and its initial decommission checklist.
    pub fn seed() -> Self {
        let date = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok();

        let mut migrate_s3 = Task::new(
            "Snapshot and migrate S3 buckets to new org",
            Category::Storage,
            Priority::High,
            "Data Team",
        )
        .with_id("2")
        .with_status(TaskStatus::InProgress)
        .with_dependencies(&["1"]);
        migrate_s3.due_date = date("2025-02-15");
        migrate_s3.comments.push(Comment::new(
            "System",
            "Migration started. Estimated time: 4 hours.",
        ));

        let mut direct_connect = Task::new(
            "Final decommission of legacy Direct Connect",
            Category::Networking,
            Priority::High,
            "Network Eng",
        )
        .with_id("5")
        .with_status(TaskStatus::Blocked)
        .with_dependencies(&["3"]);
        direct_connect.due_date = date("2025-02-22");
        direct_connect.comments.push(Comment::new(
            "NetAdmin",
            "Blocked by dependency on legacy partner connection.",
        ));

        let mut tasks = vec![
            Task::new(
                "Identify all EC2 Classic instances",
                Category::Compute,
                Priority::High,
                "DevOps Team",
            )
            .with_id("1")
            .with_status(TaskStatus::Completed),
            migrate_s3,
            Task::new(
                "Update DNS records for VPC Endpoints",
                Category::Networking,
                Priority::Medium,
                "Network Eng",
            )
            .with_id("3")
            .with_dependencies(&["2"]),
            Task::new(
                "Revoke legacy IAM roles and policies",
                Category::Security,
                Priority::High,
                "Security Team",
            )
            .with_id("4")
            .with_dependencies(&["2", "3"]),
            direct_connect,
            Task::new(
                "Final sanity check on all resource deletion",
                Category::Cleanup,
                Priority::Medium,
                "Audit Team",
            )
            .with_id("6")
            .with_dependencies(&["4", "5"]),
        ];
        tasks[0].due_date = date("2025-02-10");
        tasks[2].due_date = date("2025-02-18");
        tasks[3].due_date = date("2025-02-20");
        tasks[5].due_date = date("2025-02-25");

        Self {
            id: WorkspaceId::from("ws-1"),
            name: "Legacy Production (AWS 1.0)".to_string(),
            status: WorkspaceStatus::Healthy,
            region: "us-east-1".to_string(),
            team: vec![
                "DevOps Team".to_string(),
                "Data Team".to_string(),
                "Network Eng".to_string(),
                "Audit Team".to_string(),
            ],
            tasks,
        }
    }

    pub fn find_task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn find_task_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| &t.id == id)
    }

    // --- Mutation engine ---

    /// Flip a task between Completed and not-Completed.
    ///
    /// Completed goes back to Pending; any other status goes to
    /// Completed. A task whose dependencies are incomplete cannot be
    /// completed; the request is ignored. Appends exactly one status
    /// history entry on success.
    pub fn toggle_completion(&mut self, id: &TaskId, author: &str) -> Outcome {
        let blocked = match self.find_task(id) {
            Some(task) => !task.is_complete() && is_blocked(task, &self.tasks),
            None => return Outcome::Ignored,
        };
        if blocked {
            return Outcome::Ignored;
        }
        if let Some(task) = self.find_task_mut(id) {
            let old = task.status;
            let new = if task.is_complete() {
                TaskStatus::Pending
            } else {
                TaskStatus::Completed
            };
            task.status = new;
            task.record(
                TrackedField::Status,
                &old.to_string(),
                &new.to_string(),
                author,
            );
            Outcome::Applied
        } else {
            Outcome::Ignored
        }
    }

    /// Move a Pending task to In Progress. Used by the background
    /// update simulator; goes through the same history contract as
    /// user edits.
    pub fn advance_status(&mut self, id: &TaskId, author: &str) -> Outcome {
        match self.find_task_mut(id) {
            Some(task) if task.status == TaskStatus::Pending => {
                task.status = TaskStatus::InProgress;
                task.record(TrackedField::Status, "Pending", "In Progress", author);
                Outcome::Applied
            }
            _ => Outcome::Ignored,
        }
    }

    /// Reassign a task and append one owner history entry.
    pub fn set_owner(&mut self, id: &TaskId, owner: &str, author: &str) -> Outcome {
        let owner = owner.trim();
        if owner.is_empty() {
            return Outcome::Ignored;
        }
        match self.find_task_mut(id) {
            Some(task) => {
                let old = std::mem::replace(&mut task.owner, owner.to_string());
                task.record(TrackedField::Owner, &old, owner, author);
                Outcome::Applied
            }
            None => Outcome::Ignored,
        }
    }

    /// Change a task's priority and append one priority history entry.
    pub fn set_priority(&mut self, id: &TaskId, priority: Priority, author: &str) -> Outcome {
        match self.find_task_mut(id) {
            Some(task) => {
                let old = task.priority;
                task.priority = priority;
                task.record(
                    TrackedField::Priority,
                    &old.to_string(),
                    &priority.to_string(),
                    author,
                );
                Outcome::Applied
            }
            None => Outcome::Ignored,
        }
    }

    /// Set or clear a task's reminder and append one reminder history
    /// entry. An unset reminder renders as "None" in the audit record.
    pub fn set_reminder(
        &mut self,
        id: &TaskId,
        reminder: Option<DateTime<Utc>>,
        author: &str,
    ) -> Outcome {
        match self.find_task_mut(id) {
            Some(task) => {
                let old = task.reminder_display();
                task.reminder = reminder;
                let new = task.reminder_display();
                task.record(TrackedField::Reminder, &old, &new, author);
                Outcome::Applied
            }
            None => Outcome::Ignored,
        }
    }

    /// Append a comment. Comments never touch the audit history.
    pub fn add_comment(&mut self, id: &TaskId, author: &str, text: &str) -> Outcome {
        let text = text.trim();
        if text.is_empty() {
            return Outcome::Ignored;
        }
        match self.find_task_mut(id) {
            Some(task) => {
                task.comments.push(Comment::new(author, text));
                Outcome::Applied
            }
            None => Outcome::Ignored,
        }
    }

    /// Replace a task's dependency list. The task's own id is filtered
    /// out. No history entry is written.
    pub fn update_dependencies(&mut self, id: &TaskId, dependencies: Vec<TaskId>) -> Outcome {
        match self.find_task_mut(id) {
            Some(task) => {
                task.dependencies = dependencies.into_iter().filter(|d| d != id).collect();
                Outcome::Applied
            }
            None => Outcome::Ignored,
        }
    }

    /// Add or remove a single dependency edge.
    pub fn toggle_dependency(&mut self, id: &TaskId, dep: &TaskId) -> Outcome {
        let current = match self.find_task(id) {
            Some(task) => task.dependencies.clone(),
            None => return Outcome::Ignored,
        };
        let next = if current.contains(dep) {
            current.into_iter().filter(|d| d != dep).collect()
        } else {
            let mut next = current;
            next.push(dep.clone());
            next
        };
        self.update_dependencies(id, next)
    }

    /// Replace the display order wholesale. The new order must be a
    /// permutation of the current task ids; anything else is ignored.
    /// No history entry is written.
    pub fn reorder(&mut self, order: &[TaskId]) -> Outcome {
        if order.len() != self.tasks.len() {
            return Outcome::Ignored;
        }
        let mut reordered = Vec::with_capacity(self.tasks.len());
        for id in order {
            match self.tasks.iter().position(|t| &t.id == id) {
                Some(idx) if !reordered.iter().any(|t: &Task| &t.id == id) => {
                    reordered.push(self.tasks[idx].clone());
                }
                _ => return Outcome::Ignored,
            }
        }
        self.tasks = reordered;
        Outcome::Applied
    }

    /// Batch-append imported tasks. No history entries are written.
    pub fn upload_tasks(&mut self, new_tasks: Vec<Task>) -> Outcome {
        if new_tasks.is_empty() {
            return Outcome::Ignored;
        }
        self.tasks.extend(new_tasks);
        Outcome::Applied
    }

    /// Add a team member. Whitespace is trimmed; empty and duplicate
    /// names are ignored.
    pub fn add_team_member(&mut self, name: &str) -> Outcome {
        let name = name.trim();
        if name.is_empty() || self.team.iter().any(|m| m == name) {
            return Outcome::Ignored;
        }
        self.team.push(name.to_string());
        Outcome::Applied
    }

    /// Remove a team member. Tasks owned by the member keep their
    /// owner string; there is no reassignment.
    pub fn remove_team_member(&mut self, name: &str) -> Outcome {
        let before = self.team.len();
        self.team.retain(|m| m != name);
        if self.team.len() == before {
            Outcome::Ignored
        } else {
            Outcome::Applied
        }
    }

    pub fn set_status(&mut self, status: WorkspaceStatus) {
        self.status = status;
    }

    // --- Derived read model ---

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_complete()).count()
    }

    /// Tasks carrying the user-assigned Blocked label (the dashboard's
    /// "Blockers" figure), not the derived dependency flag.
    pub fn blocker_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Blocked)
            .count()
    }

    /// Overall completion percentage, rounded. Empty workspaces are 0%.
    pub fn progress_percent(&self) -> u16 {
        if self.tasks.is_empty() {
            return 0;
        }
        let completed = self.completed_count() as f64;
        let total = self.tasks.len() as f64;
        (completed / total * 100.0).round() as u16
    }

    /// Completion rollups for every category, in display order.
    pub fn category_rollups(&self) -> Vec<CategoryRollup> {
        Category::ALL
            .iter()
            .map(|&category| {
                let total = self.tasks.iter().filter(|t| t.category == category).count();
                let completed = self
                    .tasks
                    .iter()
                    .filter(|t| t.category == category && t.is_complete())
                    .count();
                let percent = if total == 0 {
                    0
                } else {
                    (completed as f64 / total as f64 * 100.0).round() as u16
                };
                CategoryRollup {
                    category,
                    total,
                    completed,
                    percent,
                }
            })
            .collect()
    }
}
