//! SQLite connection management for the browser store.
//!
//! Provides the [`Database`] struct that wraps a `rusqlite::Connection`
//! and creates the schema on first open.

use rusqlite::Connection;
use std::fs;
use std::path::Path;

use super::schema;
use crate::types::errors::StoreError;

/// Owns the single connection to the store file.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) the database file at `path` and initialises it.
    ///
    /// Missing parent directories are created. Any failure, including a file
    /// that is not a SQLite database, is reported as
    /// [`StoreError::Unavailable`].
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    StoreError::Unavailable(format!("{}: {}", parent.display(), e))
                })?;
            }
        }

        let conn = Connection::open(path).map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let db = Self { conn };
        db.initialize()?;
        log::info!("[store] opened {}", path.display());
        Ok(db)
    }

    /// Opens an in-memory database with the same schema.
    ///
    /// Useful for testing. The data is discarded when the `Database` is dropped.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn =
            Connection::open_in_memory().map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    fn initialize(&self) -> Result<(), StoreError> {
        match schema::initialize(&self.conn) {
            Ok(true) => {
                log::info!("[store] created history and config tables");
                Ok(())
            }
            Ok(false) => Ok(()),
            Err(e) => Err(StoreError::Unavailable(e.to_string())),
        }
    }

    /// Returns a reference to the underlying `rusqlite::Connection`.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
