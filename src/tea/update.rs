//! Pure update function for the TEA (The Elm Architecture) pattern.
//!
//! The update function takes a model and a message, mutates the model,
//! and returns a list of commands to execute.

use chrono::{DateTime, Duration, Utc};
use crossterm::event::{KeyCode, KeyEvent};

use crate::core::simulate;
use crate::core::task::TaskId;
use crate::core::workspace::Workspace;
use crate::{dlog, dlog_debug, dlog_warn};

use super::command::Command;
use super::message::Message;
use super::model::{DetailTab, InputKind, Mode, Model, Notification, NotificationLevel};

/// Helper to set an error notification and mark model as dirty.
fn set_error(model: &mut Model, message: String) {
    dlog_warn!("UI Error: {}", message);
    model.notification = Some(Notification {
        level: NotificationLevel::Error,
        message,
    });
    model.dirty = true;
}

/// Helper to set an informational notification and mark model as dirty.
fn set_info(model: &mut Model, message: String) {
    model.notification = Some(Notification {
        level: NotificationLevel::Info,
        message,
    });
    model.dirty = true;
}

/// Pure update function: Model + Message → Commands
///
/// This function:
/// 1. Takes the current model and an input message
/// 2. Mutates the model state (and sets dirty flag)
/// 3. Returns a list of commands (side effects) to execute
///
/// The function itself has no side effects beyond the model - all I/O
/// happens via returned Commands.
pub fn update(model: &mut Model, msg: Message) -> Vec<Command> {
    let mut cmds = Vec::new();

    match msg {
        Message::Key(key) => {
            model.notification = None; // Clear notification on any key press
            model.dirty = true; // Keyboard input always triggers render
            match model.mode {
                Mode::Board => update_board_mode(model, key, &mut cmds),
                Mode::Detail(tab) => update_detail_mode(model, key, tab, &mut cmds),
                Mode::Input(kind) => update_input_mode(model, key, kind, &mut cmds),
                Mode::WorkspacePicker => update_picker_mode(model, key, &mut cmds),
            }
        }

        Message::Resize(_, _) => {
            model.dirty = true; // Resize triggers re-render
        }

        // Background sync: step one of the two-step cycle. The apply
        // lands after the settle delay, against whichever workspace is
        // active at that moment.
        Message::SyncTick => {
            dlog_debug!("Message::SyncTick");
            model.syncing = true;
            model.dirty = true;
            cmds.push(Command::ScheduleSyncApply);
        }

        Message::SyncApply => {
            let action = simulate::plan(model.active(), &mut rand::thread_rng());
            if let Some(action) = action {
                dlog!("Message::SyncApply action={:?}", action);
                simulate::apply(model.active_mut(), action);
            } else {
                dlog_debug!("Message::SyncApply: nothing to do");
            }
            // The cycle refreshes the sync time even when every task
            // is already complete.
            model.syncing = false;
            model.last_synced = Some(Utc::now());
            model.dirty = true;
            cmds.push(Command::RefreshReminderProbes);
        }

        Message::ReminderDue { task_id, title } => {
            dlog!("Message::ReminderDue id={} title={}", task_id, title);
            set_info(
                model,
                format!("REMINDER: Task \"{}\" requires immediate attention!", title),
            );
        }

        // Command completion callbacks
        Message::AdviceReady(reply) => {
            model.chat.push(crate::assistant::ChatMessage::model(&reply));
            model.chat_pending = false;
            model.dirty = true;
        }

        Message::TasksImported(tasks) => {
            let count = tasks.len();
            dlog!("Message::TasksImported count={}", count);
            model.active_mut().upload_tasks(tasks);
            model.clamp_selection();
            set_info(model, format!("Imported {} tasks", count));
            cmds.push(Command::RefreshReminderProbes);
        }

        Message::ImportFailed(err) => {
            dlog_warn!("Message::ImportFailed err={}", err);
            set_error(model, format!("Import failed: {}", err));
        }
    }

    cmds
}

fn update_board_mode(model: &mut Model, key: KeyEvent, cmds: &mut Vec<Command>) {
    let author = model.config.operator.clone();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            let len = model.visible_task_ids().len();
            if len > 0 {
                model.selected = (model.selected + 1) % len;
            }
        }

        KeyCode::Char('k') | KeyCode::Up => {
            let len = model.visible_task_ids().len();
            if len > 0 {
                model.selected = model.selected.checked_sub(1).unwrap_or(len - 1);
            }
        }

        KeyCode::Tab => {
            model.view = model.view.next();
        }

        KeyCode::Char(' ') | KeyCode::Char('x') => {
            if let Some(id) = model.selected_task_id() {
                let outcome = model.active_mut().toggle_completion(&id, &author);
                if !outcome.is_applied() {
                    set_error(
                        model,
                        "Task is blocked by incomplete dependencies".to_string(),
                    );
                } else {
                    cmds.push(Command::RefreshReminderProbes);
                }
            }
        }

        // Reorder follows the drag rule from the board UI: only when
        // unfiltered, so the visible order and the stored order are
        // the same list.
        KeyCode::Char('J') => move_selected(model, 1),
        KeyCode::Char('K') => move_selected(model, -1),

        KeyCode::Char('f') => {
            model.priority_filter = cycle_filter(model.priority_filter);
            model.clamp_selection();
        }

        KeyCode::Enter => {
            if model.selected_task_id().is_some() {
                model.dep_selected = 0;
                model.mode = Mode::Detail(DetailTab::Comments);
            }
        }

        KeyCode::Char('c') => {
            if model.selected_task_id().is_some() {
                model.mode = Mode::Input(InputKind::Comment);
                model.input_buffer.clear();
            }
        }

        KeyCode::Char('o') => {
            if let Some(id) = model.selected_task_id() {
                if let Some(next) = next_owner(model.active(), &id) {
                    model.active_mut().set_owner(&id, &next, &author);
                }
            }
        }

        KeyCode::Char('p') => {
            if let Some(id) = model.selected_task_id() {
                if let Some(next) = model.active().find_task(&id).map(|t| t.priority.cycled()) {
                    model.active_mut().set_priority(&id, next, &author);
                }
            }
        }

        KeyCode::Char('r') => {
            if model.selected_task_id().is_some() {
                model.mode = Mode::Input(InputKind::Reminder);
                model.input_buffer.clear();
            }
        }

        KeyCode::Char('T') => {
            model.mode = Mode::Input(InputKind::AddMember);
            model.input_buffer.clear();
        }

        KeyCode::Char('D') => {
            model.mode = Mode::Input(InputKind::RemoveMember);
            model.input_buffer.clear();
        }

        KeyCode::Char('s') => {
            let next = model.active().status.cycled();
            model.active_mut().set_status(next);
        }

        KeyCode::Char('n') => {
            model.mode = Mode::Input(InputKind::WorkspaceName);
            model.input_buffer.clear();
        }

        KeyCode::Char('w') => {
            model.picker_selected = model
                .workspaces
                .iter()
                .position(|w| w.id == model.active_workspace)
                .unwrap_or(0);
            model.mode = Mode::WorkspacePicker;
        }

        KeyCode::Char('a') => {
            model.mode = Mode::Input(InputKind::Chat);
            model.input_buffer.clear();
        }

        KeyCode::Char('u') => {
            model.mode = Mode::Input(InputKind::ImportPath);
            model.input_buffer.clear();
        }

        KeyCode::Char('q') => {
            cmds.push(Command::Quit);
        }

        _ => {}
    }
}

/// Swap the selected task with its neighbor in the stored order.
/// Refused while a priority filter hides part of the list.
fn move_selected(model: &mut Model, delta: i64) {
    if model.priority_filter.is_some() {
        set_error(model, "Reordering is disabled while filtered".to_string());
        return;
    }
    let mut order: Vec<TaskId> = model.active().tasks.iter().map(|t| t.id.clone()).collect();
    let from = model.selected;
    let to = from as i64 + delta;
    if from >= order.len() || to < 0 || to as usize >= order.len() {
        return;
    }
    order.swap(from, to as usize);
    if model.active_mut().reorder(&order).is_applied() {
        model.selected = to as usize;
    }
}

fn cycle_filter(
    current: Option<crate::core::task::Priority>,
) -> Option<crate::core::task::Priority> {
    use crate::core::task::Priority;
    match current {
        None => Some(Priority::High),
        Some(Priority::High) => Some(Priority::Medium),
        Some(Priority::Medium) => Some(Priority::Low),
        Some(Priority::Low) => None,
    }
}

/// Next team member after the task's current owner, wrapping. Owners
/// outside the team roster start the cycle at the first member.
fn next_owner(workspace: &Workspace, id: &TaskId) -> Option<String> {
    if workspace.team.is_empty() {
        return None;
    }
    let owner = &workspace.find_task(id)?.owner;
    let next = match workspace.team.iter().position(|m| m == owner) {
        Some(idx) => (idx + 1) % workspace.team.len(),
        None => 0,
    };
    workspace.team.get(next).cloned()
}

fn update_detail_mode(model: &mut Model, key: KeyEvent, tab: DetailTab, cmds: &mut Vec<Command>) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => {
            model.mode = Mode::Board;
        }

        KeyCode::Char('1') => model.mode = Mode::Detail(DetailTab::Comments),
        KeyCode::Char('2') => model.mode = Mode::Detail(DetailTab::History),
        KeyCode::Char('3') => model.mode = Mode::Detail(DetailTab::Deps),
        KeyCode::Char('l') | KeyCode::Right => model.mode = Mode::Detail(tab.next()),
        KeyCode::Char('h') | KeyCode::Left => model.mode = Mode::Detail(tab.prev()),

        KeyCode::Char('j') | KeyCode::Down if tab == DetailTab::Deps => {
            let len = model.dep_candidates().len();
            if len > 0 {
                model.dep_selected = (model.dep_selected + 1) % len;
            }
        }

        KeyCode::Char('k') | KeyCode::Up if tab == DetailTab::Deps => {
            let len = model.dep_candidates().len();
            if len > 0 {
                model.dep_selected = model.dep_selected.checked_sub(1).unwrap_or(len - 1);
            }
        }

        KeyCode::Char(' ') | KeyCode::Char('x') if tab == DetailTab::Deps => {
            let task = model.selected_task_id();
            let dep = model.dep_candidates().get(model.dep_selected).cloned();
            if let (Some(task), Some(dep)) = (task, dep) {
                model.active_mut().toggle_dependency(&task, &dep);
                cmds.push(Command::RefreshReminderProbes);
            }
        }

        KeyCode::Char('c') => {
            model.mode = Mode::Input(InputKind::Comment);
            model.input_buffer.clear();
        }

        _ => {}
    }
}

fn update_picker_mode(model: &mut Model, key: KeyEvent, cmds: &mut Vec<Command>) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if !model.workspaces.is_empty() {
                model.picker_selected = (model.picker_selected + 1) % model.workspaces.len();
            }
        }

        KeyCode::Char('k') | KeyCode::Up => {
            if !model.workspaces.is_empty() {
                model.picker_selected = model
                    .picker_selected
                    .checked_sub(1)
                    .unwrap_or(model.workspaces.len() - 1);
            }
        }

        KeyCode::Enter => {
            if let Some(ws) = model.workspaces.get(model.picker_selected) {
                dlog!("workspace switch: {}", ws.name);
                model.active_workspace = ws.id.clone();
                model.selected = 0;
                model.dep_selected = 0;
                model.priority_filter = None;
                model.mode = Mode::Board;
                cmds.push(Command::RefreshReminderProbes);
            }
        }

        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('w') => {
            model.mode = Mode::Board;
        }

        _ => {}
    }
}

fn update_input_mode(model: &mut Model, key: KeyEvent, kind: InputKind, cmds: &mut Vec<Command>) {
    match key.code {
        KeyCode::Enter => {
            let value = std::mem::take(&mut model.input_buffer);
            model.mode = Mode::Board;
            submit_input(model, kind, value, cmds);
        }

        KeyCode::Esc => {
            model.input_buffer.clear();
            model.pending_workspace_name = None;
            model.mode = Mode::Board;
        }

        KeyCode::Backspace => {
            model.input_buffer.pop();
        }

        KeyCode::Char(c) => {
            model.input_buffer.push(c);
        }

        _ => {}
    }
}

fn submit_input(model: &mut Model, kind: InputKind, value: String, cmds: &mut Vec<Command>) {
    let author = model.config.operator.clone();
    match kind {
        InputKind::Comment => {
            if let Some(id) = model.selected_task_id() {
                model.active_mut().add_comment(&id, &author, &value);
            }
        }

        InputKind::Reminder => {
            let Some(id) = model.selected_task_id() else {
                return;
            };
            match parse_reminder(&value, Utc::now()) {
                Ok(reminder) => {
                    model.active_mut().set_reminder(&id, reminder, &author);
                    cmds.push(Command::RefreshReminderProbes);
                }
                Err(err) => set_error(model, err),
            }
        }

        InputKind::AddMember => {
            if !model.active_mut().add_team_member(&value).is_applied() && !value.trim().is_empty()
            {
                set_error(model, format!("'{}' is already on the team", value.trim()));
            }
        }

        InputKind::RemoveMember => {
            if !model.active_mut().remove_team_member(&value).is_applied() {
                set_error(model, format!("No team member named '{}'", value.trim()));
            }
        }

        InputKind::WorkspaceName => {
            let name = value.trim().to_string();
            if name.is_empty() {
                return;
            }
            model.pending_workspace_name = Some(name);
            model.mode = Mode::Input(InputKind::WorkspaceRegion);
            model.input_buffer.clear();
        }

        InputKind::WorkspaceRegion => {
            let Some(name) = model.pending_workspace_name.take() else {
                return;
            };
            let region = if value.trim().is_empty() {
                "us-east-1".to_string()
            } else {
                value.trim().to_string()
            };
            let workspace = Workspace::new(
                &name,
                &region,
                crate::core::workspace::WorkspaceStatus::Healthy,
            );
            dlog!("workspace created: {} ({})", name, region);
            model.active_workspace = workspace.id.clone();
            model.workspaces.push(workspace);
            model.selected = 0;
            model.priority_filter = None;
            cmds.push(Command::RefreshReminderProbes);
        }

        InputKind::ImportPath => {
            let path = value.trim();
            if !path.is_empty() {
                cmds.push(Command::ImportFile { path: path.into() });
            }
        }

        InputKind::Chat => {
            let prompt = value.trim().to_string();
            if prompt.is_empty() || model.chat_pending {
                return;
            }
            model.chat.push(crate::assistant::ChatMessage::user(&prompt));
            model.chat_pending = true;
            cmds.push(Command::AskAssistant { prompt });
        }
    }
}

/// Parse reminder input: empty clears, `+<minutes>` offsets from now,
/// anything else must be RFC 3339.
fn parse_reminder(input: &str, now: DateTime<Utc>) -> Result<Option<DateTime<Utc>>, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    if let Some(minutes) = input.strip_prefix('+') {
        return minutes
            .trim()
            .parse::<i64>()
            .map(|m| Some(now + Duration::minutes(m)))
            .map_err(|_| format!("Invalid reminder offset '{}'", input));
    }
    DateTime::parse_from_rfc3339(input)
        .map(|dt| Some(dt.with_timezone(&Utc)))
        .map_err(|_| format!("Invalid reminder '{}': use RFC 3339 or +<minutes>", input))
}
