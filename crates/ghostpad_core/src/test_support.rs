//! Shared test-only helpers for ghostpad_core.

use crate::Database;
use tempfile::TempDir;

/// Creates an isolated temporary store and returns it with the temp dir.
///
/// Keep the [`TempDir`] alive for the full test to preserve the backing file.
///
/// # Panics
/// Panics if temp-dir creation or store initialization fails.
pub(crate) fn setup_temp_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("db");
    let db = Database::open(db_path.to_str().expect("db path")).expect("db");
    (db, temp_dir)
}
