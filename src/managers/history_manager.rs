//! History Manager.
//!
//! Implements `HistoryManagerTrait`: recording visits, lookup by URL, listing,
//! and clearing the `history` table via `rusqlite`.

use rusqlite::{params, Connection, OptionalExtension};

use crate::types::errors::HistoryError;
use crate::types::history::HistoryEntry;

/// Trait defining history operations.
pub trait HistoryManagerTrait {
    fn find(&self, url: &str) -> Result<Option<HistoryEntry>, HistoryError>;
    fn record_visit(&mut self, url: &str, now: i64) -> Result<HistoryEntry, HistoryError>;
    fn list_history(&self) -> Result<Vec<HistoryEntry>, HistoryError>;
    fn clear_all(&mut self) -> Result<(), HistoryError>;
}

/// History manager backed by a SQLite connection.
pub struct HistoryManager<'a> {
    conn: &'a Connection,
}

impl<'a> HistoryManager<'a> {
    /// Creates a new `HistoryManager` using the provided database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn row_to_entry(row: &rusqlite::Row) -> rusqlite::Result<HistoryEntry> {
        Ok(HistoryEntry {
            url: row.get(0)?,
            last_update: row.get(1)?,
            count: row.get(2)?,
        })
    }
}

fn db_err(e: rusqlite::Error) -> HistoryError {
    HistoryError::DatabaseError(e.to_string())
}

impl<'a> HistoryManagerTrait for HistoryManager<'a> {
    /// Looks up the entry for `url` by exact, case-sensitive match.
    fn find(&self, url: &str) -> Result<Option<HistoryEntry>, HistoryError> {
        self.conn
            .query_row(
                "SELECT url, last_update, count FROM history WHERE url = ?1",
                params![url],
                Self::row_to_entry,
            )
            .optional()
            .map_err(db_err)
    }

    /// Records a visit at `now`. A new URL gets a row with count 1; a known
    /// URL has its timestamp replaced and its count incremented.
    fn record_visit(&mut self, url: &str, now: i64) -> Result<HistoryEntry, HistoryError> {
        match self.find(url)? {
            Some(existing) => {
                self.conn
                    .execute(
                        "UPDATE history SET last_update = ?1, count = count + 1 WHERE url = ?2",
                        params![now, url],
                    )
                    .map_err(db_err)?;
                Ok(HistoryEntry {
                    url: existing.url,
                    last_update: now,
                    count: existing.count + 1,
                })
            }
            None => {
                self.conn
                    .execute(
                        "INSERT INTO history (url, last_update, count) VALUES (?1, ?2, 1)",
                        params![url, now],
                    )
                    .map_err(db_err)?;
                Ok(HistoryEntry {
                    url: url.to_string(),
                    last_update: now,
                    count: 1,
                })
            }
        }
    }

    /// Returns every row. No ordering is applied.
    fn list_history(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let mut stmt = self
            .conn
            .prepare("SELECT url, last_update, count FROM history")
            .map_err(db_err)?;

        let rows = stmt.query_map([], Self::row_to_entry).map_err(db_err)?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(db_err)?);
        }
        Ok(results)
    }

    fn clear_all(&mut self) -> Result<(), HistoryError> {
        self.conn
            .execute("DELETE FROM history", [])
            .map_err(db_err)?;
        Ok(())
    }
}
