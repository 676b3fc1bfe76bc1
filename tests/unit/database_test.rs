//! Unit tests for the database layer (connection + schema).

use proxybrowser::database::{schema, Database};
use proxybrowser::types::errors::StoreError;
use tempfile::TempDir;

fn config_rows(db: &Database) -> Vec<(String, String)> {
    let mut stmt = db
        .connection()
        .prepare("SELECT skey, svalue FROM config ORDER BY skey")
        .unwrap();
    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
        .unwrap()
        .map(|r| r.unwrap())
        .collect();
    rows
}

#[test]
fn test_open_in_memory_succeeds() {
    let db = Database::open_in_memory();
    assert!(db.is_ok(), "open_in_memory should succeed");
}

#[test]
fn test_new_store_has_both_tables() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let conn = db.connection();

    for table in ["history", "config"] {
        assert!(
            schema::table_exists(conn, table).unwrap(),
            "Table '{}' should exist after initialisation",
            table
        );
    }
}

#[test]
fn test_new_store_seeds_config_rows() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    assert_eq!(
        config_rows(&db),
        vec![
            ("lasturl".to_string(), "".to_string()),
            ("proxyhost".to_string(), "".to_string()),
            ("proxyport".to_string(), "3128".to_string()),
        ]
    );
}

#[test]
fn test_new_store_has_empty_history() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let count: i64 = db
        .connection()
        .query_row("SELECT COUNT(*) FROM history", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn test_initialize_is_idempotent() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let created = schema::initialize(db.connection()).expect("second initialize failed");
    assert!(!created, "An initialised store should be left alone");
    assert_eq!(config_rows(&db).len(), 3, "Config rows must not be seeded twice");
}

#[test]
fn test_existing_store_is_detected_by_history_table() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let conn = db.connection();
    conn.execute("DELETE FROM config WHERE skey = 'lasturl'", [])
        .unwrap();

    // The history table alone marks the store as set up.
    assert!(!schema::initialize(conn).unwrap());
    assert_eq!(config_rows(&db).len(), 2);
}

#[test]
fn test_history_table_schema() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let conn = db.connection();

    conn.execute(
        "INSERT INTO history (url, last_update, count) VALUES (?1, ?2, ?3)",
        rusqlite::params!["https://example.com", 1_700_000_000i64, 4i64],
    )
    .expect("Should be able to insert into history table");

    let (last_update, count): (i64, i64) = conn
        .query_row(
            "SELECT last_update, count FROM history WHERE url = ?1",
            ["https://example.com"],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .expect("Should be able to query history");

    assert_eq!(last_update, 1_700_000_000);
    assert_eq!(count, 4);
}

#[test]
fn test_open_file_database_creates_parent_dirs() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("nested").join("data").join("browser.sqlite3");

    let db = Database::open(&db_path);
    assert!(db.is_ok(), "open with file path should succeed");
    assert!(db_path.exists(), "Database file should exist on disk");
}

#[test]
fn test_reopen_keeps_existing_rows() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("browser.sqlite3");

    {
        let db = Database::open(&db_path).unwrap();
        db.connection()
            .execute(
                "UPDATE config SET svalue = 'proxy.local' WHERE skey = 'proxyhost'",
                [],
            )
            .unwrap();
    }

    let db = Database::open(&db_path).unwrap();
    let host: String = db
        .connection()
        .query_row(
            "SELECT svalue FROM config WHERE skey = 'proxyhost'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(host, "proxy.local");
    assert_eq!(config_rows(&db).len(), 3);
}

#[test]
fn test_open_non_database_file_is_unavailable() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("browser.sqlite3");
    std::fs::write(&db_path, "this is not a sqlite database\n".repeat(64)).unwrap();

    match Database::open(&db_path) {
        Err(StoreError::Unavailable(_)) => {}
        Err(e) => panic!("expected Unavailable, got {}", e),
        Ok(_) => panic!("a text file must not open as a store"),
    }
}

#[test]
fn test_open_under_a_file_is_unavailable() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "x").unwrap();

    let result = Database::open(blocker.join("browser.sqlite3"));
    assert!(matches!(result, Err(StoreError::Unavailable(_))));
}
