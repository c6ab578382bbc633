//! Store round-trip and reopen behavior.

use super::*;
use crate::test_support::setup_temp_db;

#[test]
fn unset_keys_read_as_empty_or_default() {
    let (db, _dir) = setup_temp_db();
    assert_eq!(db.note().expect("note"), "");
    assert_eq!(db.api_key().expect("api key"), None);
    assert_eq!(db.last_saved_at().expect("last saved"), None);
    assert_eq!(db.preferences().expect("prefs"), Preferences::default());
}

#[test]
fn save_note_records_text_and_timestamp_together() {
    let (db, _dir) = setup_temp_db();
    let before = Utc::now();
    let saved_at = db.save_note("first draft").expect("save");
    assert!(saved_at >= before);
    assert_eq!(db.note().expect("note"), "first draft");
    assert_eq!(db.last_saved_at().expect("last saved"), Some(saved_at));

    db.set_note("second draft").expect("set note");
    assert_eq!(db.note().expect("note"), "second draft");
    assert_eq!(
        db.last_saved_at().expect("last saved"),
        Some(saved_at),
        "set_note must not move the save timestamp"
    );
}

#[test]
fn api_key_is_trimmed_and_blank_clears_it() {
    let (db, _dir) = setup_temp_db();
    db.set_api_key("  sk-live  ").expect("set key");
    assert_eq!(db.api_key().expect("key").as_deref(), Some("sk-live"));

    db.set_api_key("   ").expect("blank key");
    assert_eq!(db.api_key().expect("key"), None);

    db.set_api_key("sk-again").expect("set key");
    db.clear_api_key().expect("clear key");
    assert_eq!(db.api_key().expect("key"), None);
}

#[test]
fn preferences_round_trip_and_clear_all_resets_everything() {
    let (db, _dir) = setup_temp_db();
    let prefs = Preferences {
        font_size: 18.0,
        auto_save: false,
        copilot_enabled: false,
    };
    db.set_preferences(&prefs).expect("set prefs");
    db.save_note("keep me").expect("save");
    db.set_api_key("sk").expect("key");
    assert_eq!(db.preferences().expect("prefs"), prefs);

    db.clear_all().expect("clear all");
    assert_eq!(db.note().expect("note"), "");
    assert_eq!(db.api_key().expect("key"), None);
    assert_eq!(db.last_saved_at().expect("last saved"), None);
    assert_eq!(db.preferences().expect("prefs"), Preferences::default());
}

#[test]
fn undecodable_rows_fall_back_to_defaults() {
    let (db, _dir) = setup_temp_db();
    db.write(&[(PREFERENCES_KEY, vec![0xff])])
        .expect("write garbage");
    assert_eq!(db.preferences().expect("prefs"), Preferences::default());
}

#[test]
fn data_survives_reopen() {
    let dir = tempfile::TempDir::new().expect("temp dir");
    let db_path = dir.path().join("db");
    let db_path = db_path.to_str().expect("db path");
    {
        let db = Database::open(db_path).expect("open");
        db.save_note("persisted").expect("save");
    }
    let reopened = Database::open(db_path).expect("reopen");
    assert_eq!(reopened.note().expect("note"), "persisted");
    assert!(reopened.path().ends_with(DB_FILE_NAME));
}
