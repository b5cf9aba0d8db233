//! Task data model for the decommission board.
//!
//! Tasks are the atomic units of decommission work. Each task tracks
//! its category, lifecycle status, priority, owner, dependencies,
//! comment thread, and an append-only audit history.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a task within a workspace.
///
/// Backed by a plain string: generated ids are UUID v4, but seeded and
/// imported tasks may carry short hand-assigned ids like `"1"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub String);

impl TaskId {
    /// Create a new unique task identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Return the leading characters of the id for display.
    pub fn short(&self) -> String {
        self.0.chars().take(8).collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Unique identifier for a comment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(pub String);

impl CommentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for CommentId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for CommentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Unique identifier for a history entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryId(pub String);

impl HistoryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for HistoryId {
    fn default() -> Self {
        Self::new()
    }
}

/// Infrastructure category a task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Compute,
    Storage,
    Networking,
    Security,
    Cleanup,
}

impl Category {
    /// All categories, in dashboard display order.
    pub const ALL: [Category; 5] = [
        Category::Compute,
        Category::Storage,
        Category::Networking,
        Category::Security,
        Category::Cleanup,
    ];

    /// Parse a free-form string, falling back to Cleanup for anything
    /// unrecognized (bulk import rows are untrusted).
    pub fn parse_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "compute" => Category::Compute,
            "storage" => Category::Storage,
            "networking" => Category::Networking,
            "security" => Category::Security,
            _ => Category::Cleanup,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Compute => write!(f, "Compute"),
            Category::Storage => write!(f, "Storage"),
            Category::Networking => write!(f, "Networking"),
            Category::Security => write!(f, "Security"),
            Category::Cleanup => write!(f, "Cleanup"),
        }
    }
}

/// Task priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Parse a free-form string, falling back to Medium.
    pub fn parse_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "high" => Priority::High,
            "low" => Priority::Low,
            _ => Priority::Medium,
        }
    }

    /// Next priority in the cycle High -> Medium -> Low -> High.
    pub fn cycled(&self) -> Self {
        match self {
            Priority::High => Priority::Medium,
            Priority::Medium => Priority::Low,
            Priority::Low => Priority::High,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "High"),
            Priority::Medium => write!(f, "Medium"),
            Priority::Low => write!(f, "Low"),
        }
    }
}

/// Task lifecycle status.
///
/// `Blocked` here is a user-assigned label; it is independent of the
/// *derived* blocked flag computed from dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Blocked,
}

impl TaskStatus {
    pub fn parse_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "in progress" | "in_progress" => TaskStatus::InProgress,
            "completed" => TaskStatus::Completed,
            "blocked" => TaskStatus::Blocked,
            _ => TaskStatus::Pending,
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "Pending"),
            TaskStatus::InProgress => write!(f, "In Progress"),
            TaskStatus::Completed => write!(f, "Completed"),
            TaskStatus::Blocked => write!(f, "Blocked"),
        }
    }
}

/// The four task fields whose mutations are recorded in the audit history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackedField {
    Status,
    Owner,
    Priority,
    Reminder,
}

impl std::fmt::Display for TrackedField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackedField::Status => write!(f, "status"),
            TrackedField::Owner => write!(f, "owner"),
            TrackedField::Priority => write!(f, "priority"),
            TrackedField::Reminder => write!(f, "reminder"),
        }
    }
}

/// A comment on a task. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub author: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Comment {
    pub fn new(author: &str, text: &str) -> Self {
        Self {
            id: CommentId::new(),
            author: author.to_string(),
            text: text.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// An audit record of a single tracked-field mutation. Immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: HistoryId,
    pub field: TrackedField,
    pub old_value: String,
    pub new_value: String,
    pub timestamp: DateTime<Utc>,
    pub author: String,
}

impl HistoryEntry {
    pub fn new(field: TrackedField, old_value: &str, new_value: &str, author: &str) -> Self {
        Self {
            id: HistoryId::new(),
            field,
            old_value: old_value.to_string(),
            new_value: new_value.to_string(),
            timestamp: Utc::now(),
            author: author.to_string(),
        }
    }
}

/// A single decommission task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub category: Category,
    pub status: TaskStatus,
    pub priority: Priority,
    pub owner: String,
    pub due_date: Option<NaiveDate>,
    /// When set, the reminder monitor fires an alert once this instant
    /// passes (while the task is not completed).
    pub reminder: Option<DateTime<Utc>>,
    pub dependencies: Vec<TaskId>,
    pub comments: Vec<Comment>,
    pub history: Vec<HistoryEntry>,
}

impl Task {
    /// Create a new Pending task with empty comments, dependencies,
    /// and history.
    pub fn new(title: &str, category: Category, priority: Priority, owner: &str) -> Self {
        Self {
            id: TaskId::new(),
            title: title.to_string(),
            category,
            status: TaskStatus::Pending,
            priority,
            owner: owner.to_string(),
            due_date: None,
            reminder: None,
            dependencies: Vec::new(),
            comments: Vec::new(),
            history: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = TaskId::from(id);
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn with_dependencies(mut self, deps: &[&str]) -> Self {
        self.dependencies = deps.iter().map(|d| TaskId::from(*d)).collect();
        self
    }

    pub fn is_complete(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Append an audit record for a tracked-field mutation.
    pub fn record(&mut self, field: TrackedField, old_value: &str, new_value: &str, author: &str) {
        self.history
            .push(HistoryEntry::new(field, old_value, new_value, author));
    }

    /// Reminder value rendered for audit records ("None" when unset).
    pub fn reminder_display(&self) -> String {
        match &self.reminder {
            Some(r) => r.to_rfc3339(),
            None => "None".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // TaskId tests

    #[test]
    fn test_task_id_new_is_unique() {
        let id1 = TaskId::new();
        let id2 = TaskId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_task_id_accepts_short_hand_assigned_ids() {
        let id = TaskId::from("1");
        assert_eq!(id.as_str(), "1");
        assert_eq!(id.short(), "1");
    }

    #[test]
    fn test_task_id_short_truncates_uuid() {
        let id = TaskId::new();
        assert_eq!(id.short().len(), 8);
    }

    #[test]
    fn test_task_id_display() {
        let id = TaskId::from("ws-task-42");
        assert_eq!(format!("{}", id), "ws-task-42");
    }

    #[test]
    fn test_task_id_serialization_is_transparent() {
        let id = TaskId::from("3");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"3\"");
        let parsed: TaskId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_task_id_hash() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(TaskId::from("7"));
        assert!(set.contains(&TaskId::from("7")));
    }

    // Enum tests

    #[test]
    fn test_category_parse_lossy() {
        assert_eq!(Category::parse_lossy("Compute"), Category::Compute);
        assert_eq!(Category::parse_lossy("  storage "), Category::Storage);
        assert_eq!(Category::parse_lossy("NETWORKING"), Category::Networking);
        assert_eq!(Category::parse_lossy("security"), Category::Security);
        assert_eq!(Category::parse_lossy("garbage"), Category::Cleanup);
        assert_eq!(Category::parse_lossy(""), Category::Cleanup);
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::Networking.to_string(), "Networking");
        assert_eq!(Category::ALL.len(), 5);
    }

    #[test]
    fn test_priority_parse_lossy() {
        assert_eq!(Priority::parse_lossy("High"), Priority::High);
        assert_eq!(Priority::parse_lossy("low"), Priority::Low);
        assert_eq!(Priority::parse_lossy("whatever"), Priority::Medium);
    }

    #[test]
    fn test_priority_cycle_covers_all() {
        let p = Priority::High;
        assert_eq!(p.cycled(), Priority::Medium);
        assert_eq!(p.cycled().cycled(), Priority::Low);
        assert_eq!(p.cycled().cycled().cycled(), Priority::High);
    }

    #[test]
    fn test_task_status_default() {
        assert_eq!(TaskStatus::default(), TaskStatus::Pending);
    }

    #[test]
    fn test_task_status_display_in_progress() {
        assert_eq!(TaskStatus::InProgress.to_string(), "In Progress");
    }

    #[test]
    fn test_task_status_parse_lossy() {
        assert_eq!(TaskStatus::parse_lossy("In Progress"), TaskStatus::InProgress);
        assert_eq!(TaskStatus::parse_lossy("in_progress"), TaskStatus::InProgress);
        assert_eq!(TaskStatus::parse_lossy("Completed"), TaskStatus::Completed);
        assert_eq!(TaskStatus::parse_lossy("Blocked"), TaskStatus::Blocked);
        assert_eq!(TaskStatus::parse_lossy("???"), TaskStatus::Pending);
    }

    #[test]
    fn test_tracked_field_display() {
        assert_eq!(TrackedField::Status.to_string(), "status");
        assert_eq!(TrackedField::Reminder.to_string(), "reminder");
    }

    // Comment / HistoryEntry tests

    #[test]
    fn test_comment_new() {
        let comment = Comment::new("NetAdmin", "Blocked by partner connection.");
        assert_eq!(comment.author, "NetAdmin");
        assert_eq!(comment.text, "Blocked by partner connection.");
        assert!(!comment.id.0.is_empty());
    }

    #[test]
    fn test_history_entry_new() {
        let entry = HistoryEntry::new(TrackedField::Owner, "DevOps Team", "Data Team", "Operator");
        assert_eq!(entry.field, TrackedField::Owner);
        assert_eq!(entry.old_value, "DevOps Team");
        assert_eq!(entry.new_value, "Data Team");
        assert_eq!(entry.author, "Operator");
    }

    // Task tests

    #[test]
    fn test_task_new_defaults() {
        let task = Task::new(
            "Revoke legacy IAM roles",
            Category::Security,
            Priority::High,
            "Security Team",
        );

        assert_eq!(task.title, "Revoke legacy IAM roles");
        assert_eq!(task.category, Category::Security);
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.owner, "Security Team");
        assert!(task.due_date.is_none());
        assert!(task.reminder.is_none());
        assert!(task.dependencies.is_empty());
        assert!(task.comments.is_empty());
        assert!(task.history.is_empty());
    }

    #[test]
    fn test_task_builders() {
        let task = Task::new("t", Category::Compute, Priority::Low, "x")
            .with_id("9")
            .with_status(TaskStatus::Blocked)
            .with_dependencies(&["1", "2"]);

        assert_eq!(task.id, TaskId::from("9"));
        assert_eq!(task.status, TaskStatus::Blocked);
        assert_eq!(task.dependencies, vec![TaskId::from("1"), TaskId::from("2")]);
    }

    #[test]
    fn test_task_is_complete() {
        let mut task = Task::new("t", Category::Compute, Priority::Low, "x");
        assert!(!task.is_complete());
        task.status = TaskStatus::Completed;
        assert!(task.is_complete());
    }

    #[test]
    fn test_task_record_appends_history() {
        let mut task = Task::new("t", Category::Compute, Priority::Low, "x");
        task.record(TrackedField::Status, "Pending", "Completed", "Operator");
        task.record(TrackedField::Priority, "Low", "High", "Operator");

        assert_eq!(task.history.len(), 2);
        assert_eq!(task.history[0].field, TrackedField::Status);
        assert_eq!(task.history[1].new_value, "High");
    }

    #[test]
    fn test_task_reminder_display_none() {
        let task = Task::new("t", Category::Compute, Priority::Low, "x");
        assert_eq!(task.reminder_display(), "None");
    }

    #[test]
    fn test_task_reminder_display_set() {
        let mut task = Task::new("t", Category::Compute, Priority::Low, "x");
        task.reminder = Some(Utc::now());
        assert_ne!(task.reminder_display(), "None");
    }

    #[test]
    fn test_task_serialization_roundtrip() {
        let task = Task::new("Snapshot S3 buckets", Category::Storage, Priority::High, "Data Team")
            .with_id("2")
            .with_status(TaskStatus::InProgress)
            .with_dependencies(&["1"]);

        let json = serde_json::to_string(&task).unwrap();
        let parsed: Task = serde_json::from_str(&json).unwrap();

        assert_eq!(task.id, parsed.id);
        assert_eq!(task.title, parsed.title);
        assert_eq!(task.status, parsed.status);
        assert_eq!(task.dependencies, parsed.dependencies);
    }
}
