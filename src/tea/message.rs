//! Messages for the TEA (The Elm Architecture) pattern.
//!
//! Messages are inputs to the update function - they come from external sources
//! like keyboard events, background actors, or command completion callbacks.

use crossterm::event::KeyEvent;

use crate::core::task::{Task, TaskId};

/// Input messages to the update function.
#[derive(Debug)]
pub enum Message {
    // Keyboard/terminal events
    Key(KeyEvent),
    Resize(u16, u16),

    // From background actors
    /// A sync cycle begins: show the indicator, schedule the apply step.
    SyncTick,
    /// The settle delay elapsed; pick and apply one background action.
    SyncApply,
    /// A reminder on an incomplete task entered its due window.
    ReminderDue {
        /// The task whose reminder fired.
        task_id: TaskId,
        /// Title captured when the probe was taken.
        title: String,
    },

    // Command completion callbacks
    AdviceReady(String),
    TasksImported(Vec<Task>),
    ImportFailed(String),
}
