//! redb table definitions and row keys.

use redb::TableDefinition;

/// Key-value rows (bincode-encoded values).
pub const SETTINGS: TableDefinition<&str, &[u8]> = TableDefinition::new("settings");

/// Note body (`String`).
pub const NOTE_KEY: &str = "note";
/// Completion provider credential (`String`).
pub const API_KEY_KEY: &str = "api_key";
/// Time of the last successful note save (`DateTime<Utc>`).
pub const LAST_SAVED_KEY: &str = "last_saved_at";
/// Editor preferences (`Preferences`).
pub const PREFERENCES_KEY: &str = "preferences";

/// Every key owned by the store; `clear_all` removes exactly these.
pub const ALL_KEYS: [&str; 4] = [NOTE_KEY, API_KEY_KEY, LAST_SAVED_KEY, PREFERENCES_KEY];
