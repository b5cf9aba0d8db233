//! Commands for the TEA (The Elm Architecture) pattern.
//!
//! Commands are outputs from the update function - they represent side effects
//! to be executed by the runtime.

use std::path::PathBuf;

/// Output commands from the update function.
/// These represent side effects that need to be executed.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// Sleep the settle delay, then deliver `Message::SyncApply`.
    ScheduleSyncApply,

    /// Ask the chat collaborator for advice (spawns an HTTP request).
    AskAssistant {
        prompt: String,
    },

    /// Re-publish the reminder probe snapshot for the reminder actor.
    RefreshReminderProbes,

    /// Read and parse an import file off the logic thread.
    ImportFile {
        path: PathBuf,
    },

    // App lifecycle
    Quit,
}
