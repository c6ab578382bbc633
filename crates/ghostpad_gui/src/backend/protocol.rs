//! Protocol types for the GUI's background workers.

use chrono::{DateTime, Utc};
use ghostpad_core::{models::Preferences, CompletionError};

/// Commands issued by the UI thread for the store worker to execute.
#[derive(Debug)]
pub enum CoreCmd {
    /// Persist the note and stamp the save time. `revision` is echoed back.
    SaveNote { text: String, revision: u64 },
    /// Persist editor preferences.
    SavePreferences { preferences: Preferences },
    /// Stop after draining earlier commands.
    Shutdown,
}

/// Which command an error event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreErrorSource {
    SaveNote,
    SavePreferences,
}

/// Events produced by the store worker and polled by the UI thread.
#[derive(Debug)]
pub enum CoreEvent {
    /// The note for `revision` was written at `saved_at`.
    NoteSaved {
        revision: u64,
        saved_at: DateTime<Utc>,
    },
    /// Preferences were written.
    PreferencesSaved,
    /// A store operation failed; the UI keeps the in-memory state.
    Error {
        source: CoreErrorSource,
        message: String,
    },
}

/// Commands for the completion worker.
#[derive(Debug)]
pub enum CompletionCmd {
    /// Ask the provider to complete `text` at char offset `cursor`.
    Request {
        request_id: u64,
        text: String,
        cursor: usize,
    },
}

/// Results produced by the completion worker.
#[derive(Debug)]
pub enum CompletionEvent {
    Finished {
        request_id: u64,
        result: Result<Option<String>, CompletionError>,
    },
}
