//! The persistence store used by the session controller.
//!
//! Wraps the [`Database`] and hands out short-lived managers for each call,
//! since the managers borrow the connection.

use std::path::Path;

use crate::database::connection::Database;
use crate::managers::config_manager::{ConfigManager, ConfigManagerTrait};
use crate::managers::history_manager::{HistoryManager, HistoryManagerTrait};
use crate::platform;
use crate::types::config::{ConfigKey, SessionConfig};
use crate::types::errors::{ConfigError, HistoryError, StoreError};
use crate::types::history::HistoryEntry;

/// Settings and visit history for one browser profile.
///
/// Owns the [`Database`]; every operation runs as its own statement, so a
/// successful call is durable once it returns.
pub struct Store {
    db: Database,
}

impl Store {
    /// Opens the store file at `path`, creating and seeding it if new.
    ///
    /// # Arguments
    /// * `path` - Location of the SQLite file. Missing parent directories are created.
    ///
    /// # Errors
    /// Returns `StoreError::Unavailable` if the file cannot be opened or initialized.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        Ok(Self {
            db: Database::open(path)?,
        })
    }

    /// Opens `browser.sqlite3` in the per-user application data directory.
    ///
    /// # Errors
    /// Returns `StoreError::NoDataDir` if the platform has no data directory,
    /// otherwise the same errors as [`Store::open`].
    pub fn open_default() -> Result<Self, StoreError> {
        let path = platform::database_path().ok_or(StoreError::NoDataDir)?;
        Self::open(path)
    }

    /// Opens a seeded store that lives only as long as this value.
    ///
    /// # Errors
    /// Returns `StoreError::Unavailable` if the schema cannot be created.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Ok(Self {
            db: Database::open_in_memory()?,
        })
    }

    /// Returns the underlying database.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Reads every settings row into a [`SessionConfig`].
    pub fn get_all_config(&self) -> Result<SessionConfig, ConfigError> {
        let rows = ConfigManager::new(self.db.connection()).get_all()?;
        Ok(SessionConfig::from_entries(&rows))
    }

    /// Replaces the value stored under `key`, inserting the row if missing.
    pub fn set_config(&mut self, key: ConfigKey, value: &str) -> Result<(), ConfigError> {
        ConfigManager::new(self.db.connection()).set(key, value)
    }

    /// Looks up the row whose URL matches `url` exactly.
    pub fn find_history(&self, url: &str) -> Result<Option<HistoryEntry>, HistoryError> {
        HistoryManager::new(self.db.connection()).find(url)
    }

    /// Records one visit to `url` at `now` (seconds since the epoch).
    ///
    /// A new URL gets count 1; a known one has its count incremented and its
    /// time overwritten. Returns the row as stored.
    pub fn record_visit(&mut self, url: &str, now: i64) -> Result<HistoryEntry, HistoryError> {
        HistoryManager::new(self.db.connection()).record_visit(url, now)
    }

    /// Deletes every history row. Settings are untouched.
    pub fn clear_history(&mut self) -> Result<(), HistoryError> {
        HistoryManager::new(self.db.connection()).clear_all()
    }

    /// Returns all history rows in storage order.
    pub fn list_history(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        HistoryManager::new(self.db.connection()).list_history()
    }
}
