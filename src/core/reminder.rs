//! Reminder due-window evaluation.
//!
//! A reminder is "due" for a bounded window after its timestamp
//! passes; outside the window it goes quiet without ever being marked
//! as fired. Alerts are therefore best-effort and may repeat across
//! ticks while the window is open.

use chrono::{DateTime, Duration, Utc};

use super::task::{Task, TaskId};

/// How long after its timestamp a reminder keeps firing.
pub const REMINDER_WINDOW_SECS: i64 = 60;

/// Minimal task projection the reminder actor scans. Extracted so the
/// actor can hold a cheap snapshot instead of the whole task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderProbe {
    pub task_id: TaskId,
    pub title: String,
    pub reminder: DateTime<Utc>,
}

/// Collect probes for every incomplete task with a reminder set.
pub fn probes(tasks: &[Task]) -> Vec<ReminderProbe> {
    tasks
        .iter()
        .filter(|t| !t.is_complete())
        .filter_map(|t| {
            t.reminder.map(|reminder| ReminderProbe {
                task_id: t.id.clone(),
                title: t.title.clone(),
                reminder,
            })
        })
        .collect()
}

/// True when the reminder timestamp has passed and is still inside the
/// alert window.
pub fn is_due(reminder: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    reminder <= now && now - reminder < Duration::seconds(REMINDER_WINDOW_SECS)
}

/// Probes that should alert right now.
pub fn due_probes(probes: &[ReminderProbe], now: DateTime<Utc>) -> Vec<ReminderProbe> {
    probes
        .iter()
        .filter(|p| is_due(p.reminder, now))
        .cloned()
        .collect()
}
