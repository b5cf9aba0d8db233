//! Shared helpers for the integration suite.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use sundown::config::Config;
use sundown::core::workspace::Workspace;
use sundown::tea::{update, Command, Message, Model};

/// Model over the seed workspace, the state every real session starts in.
pub fn seeded_model() -> Model {
    Model::new(vec![Workspace::seed()], Config::default())
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

/// Feed one key press through the update loop.
pub fn press(model: &mut Model, code: KeyCode) -> Vec<Command> {
    update(model, Message::Key(key(code)))
}

/// Type a string into the active input line.
pub fn type_text(model: &mut Model, text: &str) {
    for ch in text.chars() {
        press(model, KeyCode::Char(ch));
    }
}

/// Open an input prompt with `open`, type `text`, submit with Enter.
pub fn submit_input(model: &mut Model, open: char, text: &str) -> Vec<Command> {
    press(model, KeyCode::Char(open));
    type_text(model, text);
    press(model, KeyCode::Enter)
}

/// Total comments + history entries across the workspace, the audit
/// footprint a sync cycle is allowed to grow by exactly one.
pub fn record_count(model: &Model) -> usize {
    model
        .active()
        .tasks
        .iter()
        .map(|t| t.comments.len() + t.history.len())
        .sum()
}
