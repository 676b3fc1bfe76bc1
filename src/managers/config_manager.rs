//! Config Manager.
//!
//! Reads and upserts the fixed settings rows of the `config` table.

use std::collections::HashMap;

use rusqlite::{params, Connection};

use crate::types::config::ConfigKey;
use crate::types::errors::ConfigError;

/// Trait defining settings persistence operations.
pub trait ConfigManagerTrait {
    fn get_all(&self) -> Result<HashMap<String, String>, ConfigError>;
    fn get(&self, key: ConfigKey) -> Result<Option<String>, ConfigError>;
    fn set(&mut self, key: ConfigKey, value: &str) -> Result<(), ConfigError>;
}

/// Config manager backed by a SQLite connection.
pub struct ConfigManager<'a> {
    conn: &'a Connection,
}

impl<'a> ConfigManager<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

fn db_err(e: rusqlite::Error) -> ConfigError {
    ConfigError::DatabaseError(e.to_string())
}

impl<'a> ConfigManagerTrait for ConfigManager<'a> {
    /// Returns every `skey -> svalue` row, including keys this build does
    /// not recognise.
    fn get_all(&self) -> Result<HashMap<String, String>, ConfigError> {
        let mut stmt = self
            .conn
            .prepare("SELECT skey, svalue FROM config")
            .map_err(db_err)?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                ))
            })
            .map_err(db_err)?;

        let mut map = HashMap::new();
        for row in rows {
            let (key, value) = row.map_err(db_err)?;
            map.insert(key, value);
        }
        Ok(map)
    }

    fn get(&self, key: ConfigKey) -> Result<Option<String>, ConfigError> {
        let mut stmt = self
            .conn
            .prepare("SELECT svalue FROM config WHERE skey = ?1")
            .map_err(db_err)?;
        let mut rows = stmt.query(params![key.as_str()]).map_err(db_err)?;
        match rows.next().map_err(db_err)? {
            Some(row) => Ok(Some(
                row.get::<_, Option<String>>(0)
                    .map_err(db_err)?
                    .unwrap_or_default(),
            )),
            None => Ok(None),
        }
    }

    /// Updates the row for `key`, inserting it if the row is missing.
    fn set(&mut self, key: ConfigKey, value: &str) -> Result<(), ConfigError> {
        let affected = self
            .conn
            .execute(
                "UPDATE config SET svalue = ?1 WHERE skey = ?2",
                params![value, key.as_str()],
            )
            .map_err(db_err)?;

        if affected == 0 {
            self.conn
                .execute(
                    "INSERT INTO config (skey, svalue) VALUES (?1, ?2)",
                    params![key.as_str(), value],
                )
                .map_err(db_err)?;
        }
        Ok(())
    }
}
