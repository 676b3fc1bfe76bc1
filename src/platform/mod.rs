// Platform paths for the browser store.
//
// Directory resolution is delegated to the `dirs` crate, which follows the
// XDG base directory spec on Linux and the system conventions elsewhere.

use std::path::PathBuf;

/// Directory name under the per-user data directory.
pub const APP_DIR_NAME: &str = "proxybrowser";

/// File name of the SQLite store.
pub const DATABASE_FILE_NAME: &str = "browser.sqlite3";

/// Returns the per-user application data directory.
///
/// - **Linux**: `$XDG_DATA_HOME/proxybrowser` or `~/.local/share/proxybrowser`
/// - **macOS**: `~/Library/Application Support/proxybrowser`
/// - **Windows**: `%APPDATA%\proxybrowser`
pub fn get_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME))
}

/// Full path of the store file, or `None` if the platform has no data directory.
pub fn database_path() -> Option<PathBuf> {
    get_data_dir().map(|dir| dir.join(DATABASE_FILE_NAME))
}
