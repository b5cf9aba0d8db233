//! Model for the TEA (The Elm Architecture) pattern.
//!
//! The Model is pure application state - no channels, no handles, no runtime
//! infrastructure. It owns the workspace list and the active-workspace id;
//! every mutation flows through the engine methods on the active workspace.

use chrono::{DateTime, Utc};

use crate::assistant::{ChatMessage, GREETING};
use crate::config::Config;
use crate::core::deps::is_blocked;
use crate::core::task::{Priority, TaskId};
use crate::core::workspace::{Workspace, WorkspaceId};
use crate::render::{
    next_version, CommentView, HistoryView, RenderState, TaskView, WorkspaceChoice,
};

/// Level of a notification message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// Error notification - displayed in red
    Error,
    /// Informational notification (reminders, import results)
    Info,
}

/// A notification message to display to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// The severity level of the notification
    pub level: NotificationLevel,
    /// The notification message text
    pub message: String,
}

/// Top-level dashboard view, cycled with Tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    Infrastructure,
    Reports,
}

impl View {
    pub fn next(&self) -> View {
        match self {
            View::Dashboard => View::Infrastructure,
            View::Infrastructure => View::Reports,
            View::Reports => View::Dashboard,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Infrastructure => "Infrastructure",
            View::Reports => "Reports",
        }
    }
}

/// Tabs inside the expanded task detail pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailTab {
    #[default]
    Comments,
    History,
    Deps,
}

impl DetailTab {
    pub fn label(&self) -> &'static str {
        match self {
            DetailTab::Comments => "Comments",
            DetailTab::History => "History",
            DetailTab::Deps => "Dependencies",
        }
    }

    pub fn next(&self) -> DetailTab {
        match self {
            DetailTab::Comments => DetailTab::History,
            DetailTab::History => DetailTab::Deps,
            DetailTab::Deps => DetailTab::Comments,
        }
    }

    pub fn prev(&self) -> DetailTab {
        match self {
            DetailTab::Comments => DetailTab::Deps,
            DetailTab::History => DetailTab::Comments,
            DetailTab::Deps => DetailTab::History,
        }
    }
}

/// Application UI mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Task table navigation within the current view.
    #[default]
    Board,
    /// Expanded task detail (comments / history / dependencies).
    Detail(DetailTab),
    /// Text entry.
    Input(InputKind),
    /// Workspace switcher.
    WorkspacePicker,
}

/// Types of input prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Comment,
    Reminder,
    AddMember,
    RemoveMember,
    WorkspaceName,
    WorkspaceRegion,
    ImportPath,
    Chat,
}

impl InputKind {
    pub fn label(&self) -> &'static str {
        match self {
            InputKind::Comment => "Comment",
            InputKind::Reminder => "Reminder (RFC 3339 or +minutes, empty clears)",
            InputKind::AddMember => "New member name",
            InputKind::RemoveMember => "Remove member name",
            InputKind::WorkspaceName => "Workspace name",
            InputKind::WorkspaceRegion => "AWS region",
            InputKind::ImportPath => "Import file path",
            InputKind::Chat => "Ask about decommissioning strategies",
        }
    }
}

/// Pure application state - the single source of truth.
pub struct Model {
    // Core state
    pub workspaces: Vec<Workspace>,
    pub active_workspace: WorkspaceId,
    pub view: View,
    pub mode: Mode,
    pub selected: usize,
    pub dep_selected: usize,
    pub priority_filter: Option<Priority>,

    // Input state
    pub input_buffer: String,
    pub pending_workspace_name: Option<String>,
    pub picker_selected: usize,
    pub notification: Option<Notification>,

    // Live sync state
    pub syncing: bool,
    pub last_synced: Option<DateTime<Utc>>,

    // Chat panel
    pub chat: Vec<ChatMessage>,
    pub chat_pending: bool,

    // Dirty flag - set when state changes and render is needed
    pub dirty: bool,

    // Config (immutable after init)
    pub config: Config,
    pub deadline: DateTime<Utc>,
}

impl Model {
    /// Create a new Model over the given workspaces.
    pub fn new(workspaces: Vec<Workspace>, config: Config) -> Self {
        let active_workspace = workspaces
            .first()
            .map(|w| w.id.clone())
            .unwrap_or_default();
        let deadline = config.deadline_utc();
        Self {
            workspaces,
            active_workspace,
            view: View::default(),
            mode: Mode::default(),
            selected: 0,
            dep_selected: 0,
            priority_filter: None,
            input_buffer: String::new(),
            pending_workspace_name: None,
            picker_selected: 0,
            notification: None,
            syncing: false,
            last_synced: None,
            chat: vec![ChatMessage::model(GREETING)],
            chat_pending: false,
            dirty: true,
            config,
            deadline,
        }
    }

    /// The workspace all reads and mutations target.
    pub fn active(&self) -> &Workspace {
        self.workspaces
            .iter()
            .find(|w| w.id == self.active_workspace)
            .unwrap_or(&self.workspaces[0])
    }

    pub fn active_mut(&mut self) -> &mut Workspace {
        let idx = self
            .workspaces
            .iter()
            .position(|w| w.id == self.active_workspace)
            .unwrap_or(0);
        &mut self.workspaces[idx]
    }

    /// Ids of the tasks currently visible, honoring the priority filter,
    /// in display order.
    pub fn visible_task_ids(&self) -> Vec<TaskId> {
        self.active()
            .tasks
            .iter()
            .filter(|t| self.priority_filter.is_none_or(|p| t.priority == p))
            .map(|t| t.id.clone())
            .collect()
    }

    /// Id of the task under the cursor, if any.
    pub fn selected_task_id(&self) -> Option<TaskId> {
        self.visible_task_ids().get(self.selected).cloned()
    }

    /// Candidate dependencies for the selected task: every other task
    /// in the workspace, in display order.
    pub fn dep_candidates(&self) -> Vec<TaskId> {
        let selected = self.selected_task_id();
        self.active()
            .tasks
            .iter()
            .map(|t| t.id.clone())
            .filter(|id| Some(id) != selected.as_ref())
            .collect()
    }

    /// Clamp the cursor after the visible set shrinks.
    pub fn clamp_selection(&mut self) {
        let len = self.visible_task_ids().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    /// Create an immutable snapshot for the render thread.
    ///
    /// Derived state (blocked flags, counts, rollups) is recomputed
    /// here on every call rather than cached: any task mutation can
    /// flip any other task's blocked flag transitively.
    pub fn snapshot(&self) -> RenderState {
        let ws = self.active();

        let tasks: Vec<TaskView> = ws
            .tasks
            .iter()
            .filter(|t| self.priority_filter.is_none_or(|p| t.priority == p))
            .map(|t| TaskView {
                id: t.id.clone(),
                title: t.title.clone(),
                category: t.category,
                status: t.status,
                priority: t.priority,
                owner: t.owner.clone(),
                due_date: t.due_date,
                reminder: t.reminder,
                blocked: is_blocked(t, &ws.tasks),
                log_count: t.comments.len() + t.history.len(),
                comments: t
                    .comments
                    .iter()
                    .map(|c| CommentView {
                        author: c.author.clone(),
                        text: c.text.clone(),
                        timestamp: c.timestamp,
                    })
                    .collect(),
                history: t
                    .history
                    .iter()
                    .map(|h| HistoryView {
                        field: h.field.to_string(),
                        old_value: h.old_value.clone(),
                        new_value: h.new_value.clone(),
                        author: h.author.clone(),
                        timestamp: h.timestamp,
                    })
                    .collect(),
                dependencies: t.dependencies.clone(),
            })
            .collect();

        let workspaces: Vec<WorkspaceChoice> = self
            .workspaces
            .iter()
            .map(|w| WorkspaceChoice {
                id: w.id.clone(),
                name: w.name.clone(),
                region: w.region.clone(),
                active: w.id == self.active_workspace,
            })
            .collect();

        RenderState {
            version: next_version(),
            view: self.view,
            mode: self.mode,
            workspace_name: ws.name.clone(),
            region: ws.region.clone(),
            workspace_status: ws.status,
            team: ws.team.clone(),
            tasks,
            selected: self.selected,
            dep_selected: self.dep_selected,
            priority_filter: self.priority_filter,
            completed: ws.completed_count(),
            total: ws.tasks.len(),
            blockers: ws.blocker_count(),
            progress_percent: ws.progress_percent(),
            rollups: ws.category_rollups(),
            deadline: self.deadline,
            syncing: self.syncing,
            last_synced: self.last_synced,
            chat: self.chat.clone(),
            chat_pending: self.chat_pending,
            input_buffer: self.input_buffer.clone(),
            notification: self.notification.clone(),
            workspaces,
            picker_selected: self.picker_selected,
        }
    }
}
