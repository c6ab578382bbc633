//! Core domain library for Ghostpad (config, storage, completion, copilot).

/// Remote text-completion client, prompt shaping and response cleanup.
pub mod completion;
/// Configuration loading and defaults.
pub mod config;
/// Shared constants used across Ghostpad crates.
pub mod constants;
/// Suggestion lifecycle: edit buffer, scheduler, controller, overlay.
pub mod copilot;
/// redb-backed key-value store for the note, credential and preferences.
pub mod db;
/// Process-global environment mutation helpers.
pub mod env;
/// Storage error type.
pub mod error;
/// Persisted data models.
pub mod models;
/// Char-offset and string normalization helpers.
pub mod text;

pub use completion::{CompletionClient, CompletionError};
pub use config::Config;
pub use constants::*;
pub use copilot::{CopilotController, CopilotState, EditBuffer};
pub use db::Database;
pub use error::AppError;

#[cfg(test)]
pub(crate) mod test_support;
