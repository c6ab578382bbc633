//! Data models persisted by the store.

/// Editor and copilot preferences.
pub mod preferences;

pub use preferences::Preferences;
