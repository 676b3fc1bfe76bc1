//! Persistence layer: one SQLite file holding the `history` and `config` tables.
//!
//! # Usage
//!
//! ```no_run
//! use proxybrowser::database::Store;
//!
//! let mut store = Store::open("browser.sqlite3").expect("failed to open store");
//! store.record_visit("https://example.com", 1000).expect("write failed");
//! let rows = store.list_history().expect("read failed");
//! assert_eq!(rows[0].count, 1);
//! ```

pub mod connection;
pub mod schema;
pub mod store;

pub use connection::Database;
pub use store::Store;
