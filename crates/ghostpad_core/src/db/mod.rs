//! Key-value persistence for the note, credential and preferences.
//!
//! Everything lives in a single redb table. Reads of unset keys return empty
//! or default values; there is no schema versioning, so a row that no longer
//! decodes is treated as unset.

/// Table and key definitions.
pub mod tables;

use crate::constants::DB_FILE_NAME;
use crate::error::AppError;
use crate::models::Preferences;
use chrono::{DateTime, Utc};
use redb::{ReadableDatabase, ReadableTable};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tables::*;
use tracing::warn;

/// Handle to the Ghostpad store. Cheap to clone; clones share one redb file.
#[derive(Clone)]
pub struct Database {
    db: Arc<redb::Database>,
    path: PathBuf,
}

#[cfg(test)]
mod tests;

impl Database {
    /// Open (or create) the store inside `dir`.
    ///
    /// # Arguments
    /// - `dir`: Directory that holds the database file; created if missing.
    ///
    /// # Returns
    /// A ready [`Database`] with its table initialized.
    ///
    /// # Errors
    /// Returns an error when the directory cannot be created, another process
    /// holds the file, or table initialization fails.
    pub fn open(dir: &str) -> Result<Self, AppError> {
        let dir = Path::new(dir);
        std::fs::create_dir_all(dir)?;
        let path = dir.join(DB_FILE_NAME);
        let db = match redb::Database::create(&path) {
            Ok(db) => db,
            Err(redb::DatabaseError::DatabaseAlreadyOpen) => {
                return Err(AppError::StorageMessage(format!(
                    "Another Ghostpad instance is already using {}.\n\
                    Close it first, or set GHOSTPAD_DB_PATH to use a different location.",
                    path.display()
                )));
            }
            Err(err) => return Err(err.into()),
        };

        let write_txn = db.begin_write()?;
        write_txn.open_table(SETTINGS)?;
        write_txn.commit()?;

        Ok(Self {
            db: Arc::new(db),
            path,
        })
    }

    /// Path of the backing database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, AppError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SETTINGS)?;
        let Some(guard) = table.get(key)? else {
            return Ok(None);
        };
        match bincode::deserialize(guard.value()) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!("ignoring undecodable '{}' row: {}", key, err);
                Ok(None)
            }
        }
    }

    fn write(&self, rows: &[(&str, Vec<u8>)]) -> Result<(), AppError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SETTINGS)?;
            for (key, value) in rows {
                table.insert(*key, value.as_slice())?;
            }
        }
        write_txn.commit()?;
        Ok(())
    }

    fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, AppError> {
        Ok(bincode::serialize(value)?)
    }

    fn remove(&self, keys: &[&str]) -> Result<(), AppError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SETTINGS)?;
            for key in keys {
                table.remove(*key)?;
            }
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Stored note text, or an empty string when nothing was saved yet.
    pub fn note(&self) -> Result<String, AppError> {
        Ok(self.read::<String>(NOTE_KEY)?.unwrap_or_default())
    }

    /// Overwrite the note text without touching the save timestamp.
    pub fn set_note(&self, text: &str) -> Result<(), AppError> {
        self.write(&[(NOTE_KEY, Self::encode(&text)?)])
    }

    /// Persist the note and stamp the save time in one transaction.
    ///
    /// # Returns
    /// The timestamp that was recorded.
    pub fn save_note(&self, text: &str) -> Result<DateTime<Utc>, AppError> {
        let saved_at = Utc::now();
        self.write(&[
            (NOTE_KEY, Self::encode(&text)?),
            (LAST_SAVED_KEY, Self::encode(&saved_at)?),
        ])?;
        Ok(saved_at)
    }

    /// Stored provider credential, if any.
    pub fn api_key(&self) -> Result<Option<String>, AppError> {
        Ok(self
            .read::<String>(API_KEY_KEY)?
            .filter(|key| !key.trim().is_empty()))
    }

    /// Store the provider credential. Blank keys clear the stored value.
    pub fn set_api_key(&self, key: &str) -> Result<(), AppError> {
        let trimmed = key.trim();
        if trimmed.is_empty() {
            return self.clear_api_key();
        }
        self.write(&[(API_KEY_KEY, Self::encode(&trimmed)?)])
    }

    /// Remove the stored provider credential.
    pub fn clear_api_key(&self) -> Result<(), AppError> {
        self.remove(&[API_KEY_KEY])
    }

    /// Time of the last successful save.
    pub fn last_saved_at(&self) -> Result<Option<DateTime<Utc>>, AppError> {
        self.read(LAST_SAVED_KEY)
    }

    /// Stored preferences, falling back to defaults when unset.
    pub fn preferences(&self) -> Result<Preferences, AppError> {
        Ok(self
            .read::<Preferences>(PREFERENCES_KEY)?
            .unwrap_or_default()
            .normalized())
    }

    /// Persist preferences.
    pub fn set_preferences(&self, prefs: &Preferences) -> Result<(), AppError> {
        self.write(&[(PREFERENCES_KEY, Self::encode(prefs)?)])
    }

    /// Remove every stored row (note, credential, timestamp, preferences).
    pub fn clear_all(&self) -> Result<(), AppError> {
        self.remove(&ALL_KEYS)
    }
}
