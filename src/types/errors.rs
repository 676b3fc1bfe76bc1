use thiserror::Error;

// === StoreError ===

/// Errors raised while opening or initialising the persistence store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database file could not be opened or initialised. Fatal at startup.
    #[error("Could not open database. {0}")]
    Unavailable(String),
    /// The platform did not report a per-user data directory.
    #[error("No application data directory available")]
    NoDataDir,
    /// A query failed after the store was opened.
    #[error("Store database error: {0}")]
    Database(#[from] rusqlite::Error),
}

// === HistoryError ===

/// Errors related to visit history operations.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Database operation failed.
    #[error("History database error: {0}")]
    DatabaseError(String),
}

// === ConfigError ===

/// Errors related to persisted settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Database operation failed.
    #[error("Config database error: {0}")]
    DatabaseError(String),
    /// The proxy port text is not a port number.
    #[error("Invalid proxy port: {0:?}")]
    InvalidPort(String),
    /// The setting name is not one of the recognised keys.
    #[error("Unknown config key: {0}")]
    UnknownKey(String),
}

// === ProxyError ===

/// Errors related to building or installing the HTTP proxy.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The proxy port could not be parsed as a non-zero port number.
    #[error("Invalid proxy port: {0:?}")]
    InvalidPort(String),
    /// The proxy subsystem refused the descriptor.
    #[error("Failed to install proxy: {0}")]
    Install(String),
}
