//! Shared constants used across Ghostpad crates.

use std::time::Duration;

/// Default autosave interval in milliseconds.
pub const DEFAULT_AUTO_SAVE_INTERVAL_MS: u64 = 2_000;

/// Default OpenAI-compatible API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
/// Default completion model name.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Default HTTP timeout for a completion request.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Trailing-edge quiet window before a keystroke burst becomes a request.
pub const SUGGESTION_DEBOUNCE: Duration = Duration::from_millis(500);
/// Minimum spacing between two dispatched completion requests.
pub const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(2_000);
/// Quiet period enforced after the provider reports throttling.
pub const RATE_LIMIT_COOLDOWN: Duration = Duration::from_secs(60);

/// Minimum characters before the cursor required to ask for a completion.
pub const MIN_CONTEXT_CHARS: usize = 20;
/// Completions longer than this are treated as runaway output.
pub const MAX_COMPLETION_CHARS: usize = 100;
/// Lines of context sent from before the cursor.
pub const CONTEXT_LINES_BEFORE: usize = 3;
/// Lines of context sent from after the cursor.
pub const CONTEXT_LINES_AFTER: usize = 2;
/// Marker the model emits when its completion starts a new word.
pub const WORD_BREAK_SENTINEL: &str = "[SPACE]";
/// Token cap passed to the provider for a single completion.
pub const COMPLETION_MAX_TOKENS: u32 = 48;

/// Default editor font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 15.0;
/// Smallest editor font size offered by the UI.
pub const MIN_FONT_SIZE: f32 = 10.0;
/// Largest editor font size offered by the UI.
pub const MAX_FONT_SIZE: f32 = 32.0;

/// File name for the redb database within the configured DB directory.
pub const DB_FILE_NAME: &str = "ghostpad.redb";
