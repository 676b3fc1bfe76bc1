//! Table layout of the store file.
//!
//! There is no schema version: a file that already has a `history` table is
//! taken as initialised and left alone.

use rusqlite::{params, Connection};

use crate::types::config::ConfigKey;

/// Returns true if a table named `name` exists.
pub fn table_exists(conn: &Connection, name: &str) -> Result<bool, rusqlite::Error> {
    conn.query_row(
        "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name=?1",
        params![name],
        |row| row.get(0),
    )
}

/// Creates both tables and seeds the config rows on a new store.
///
/// Returns `true` when the tables were created, `false` when the store was
/// already initialised. Safe to call on every startup.
pub fn initialize(conn: &Connection) -> Result<bool, rusqlite::Error> {
    if table_exists(conn, "history")? {
        return Ok(false);
    }

    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS history (url TEXT, last_update INTEGER, count INTEGER);
         CREATE TABLE IF NOT EXISTS config (skey TEXT, svalue TEXT);",
    )?;
    for key in ConfigKey::ALL {
        tx.execute(
            "INSERT INTO config (skey, svalue) VALUES (?1, ?2)",
            params![key.as_str(), key.default_value()],
        )?;
    }
    tx.commit()?;
    Ok(true)
}
