use chrono::{DateTime, NaiveDate, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::assistant::ChatMessage;
use crate::core::task::{Category, Priority, TaskId, TaskStatus};
use crate::core::workspace::{CategoryRollup, WorkspaceId, WorkspaceStatus};
use crate::tea::{Mode, Notification, View};

/// Render thread frame budget (60fps cap).
pub const FRAME_DURATION: Duration = Duration::from_micros(16_666);

/// View struct for one comment in the detail pane.
#[derive(Debug, Clone)]
pub struct CommentView {
    pub author: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// View struct for one audit record in the detail pane.
#[derive(Debug, Clone)]
pub struct HistoryView {
    pub field: String,
    pub old_value: String,
    pub new_value: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
}

/// Snapshot of one task row plus its expanded detail content.
#[derive(Debug, Clone)]
pub struct TaskView {
    pub id: TaskId,
    pub title: String,
    pub category: Category,
    pub status: TaskStatus,
    pub priority: Priority,
    pub owner: String,
    pub due_date: Option<NaiveDate>,
    pub reminder: Option<DateTime<Utc>>,
    /// Derived from the dependency evaluator at snapshot time.
    pub blocked: bool,
    /// Comment count + history count, the table's "Log" column.
    pub log_count: usize,
    pub comments: Vec<CommentView>,
    pub history: Vec<HistoryView>,
    pub dependencies: Vec<TaskId>,
}

/// One entry in the workspace picker.
#[derive(Debug, Clone)]
pub struct WorkspaceChoice {
    pub id: WorkspaceId,
    pub name: String,
    pub region: String,
    pub active: bool,
}

/// Time remaining until the decommission deadline, clamped at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub expired: bool,
}

impl Countdown {
    pub fn remaining(deadline: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let diff = (deadline - now).num_seconds();
        if diff <= 0 {
            return Self {
                expired: true,
                ..Self::default()
            };
        }
        Self {
            days: diff / 86_400,
            hours: (diff / 3_600) % 24,
            minutes: (diff / 60) % 60,
            seconds: diff % 60,
            expired: false,
        }
    }
}

static VERSION_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn next_version() -> u64 {
    VERSION_COUNTER.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone)]
pub struct RenderState {
    pub version: u64,
    pub view: View,
    pub mode: Mode,

    // Active workspace header
    pub workspace_name: String,
    pub region: String,
    pub workspace_status: WorkspaceStatus,
    pub team: Vec<String>,

    // Task table (already priority-filtered, in display order)
    pub tasks: Vec<TaskView>,
    pub selected: usize,
    /// Cursor inside the dependency tab of the detail pane.
    pub dep_selected: usize,
    pub priority_filter: Option<Priority>,

    // Derived counts
    pub completed: usize,
    pub total: usize,
    pub blockers: usize,
    pub progress_percent: u16,
    pub rollups: Vec<CategoryRollup>,

    // Live sync + deadline
    pub deadline: DateTime<Utc>,
    pub syncing: bool,
    pub last_synced: Option<DateTime<Utc>>,

    // Chat panel
    pub chat: Vec<ChatMessage>,
    pub chat_pending: bool,

    // Input + feedback
    pub input_buffer: String,
    pub notification: Option<Notification>,

    // Workspace picker
    pub workspaces: Vec<WorkspaceChoice>,
    pub picker_selected: usize,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            version: 0,
            view: View::Dashboard,
            mode: Mode::Board,
            workspace_name: String::new(),
            region: String::new(),
            workspace_status: WorkspaceStatus::Healthy,
            team: Vec::new(),
            tasks: Vec::new(),
            selected: 0,
            dep_selected: 0,
            priority_filter: None,
            completed: 0,
            total: 0,
            blockers: 0,
            progress_percent: 0,
            rollups: Vec::new(),
            deadline: Utc::now(),
            syncing: false,
            last_synced: None,
            chat: Vec::new(),
            chat_pending: false,
            input_buffer: String::new(),
            notification: None,
            workspaces: Vec::new(),
            picker_selected: 0,
        }
    }
}
