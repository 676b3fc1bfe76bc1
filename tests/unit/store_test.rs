//! Unit tests for the `Store` facade used by the session controller.

use proxybrowser::database::Store;
use proxybrowser::types::config::ConfigKey;
use proxybrowser::types::history::HistoryEntry;
use tempfile::TempDir;

fn example(last_update: i64, count: i64) -> HistoryEntry {
    HistoryEntry {
        url: "https://example.com".to_string(),
        last_update,
        count,
    }
}

#[test]
fn test_fresh_store_first_visit() {
    let mut store = Store::open_in_memory().unwrap();
    store.record_visit("https://example.com", 1000).unwrap();
    assert_eq!(store.list_history().unwrap(), vec![example(1000, 1)]);
}

#[test]
fn test_same_store_second_visit() {
    let mut store = Store::open_in_memory().unwrap();
    store.record_visit("https://example.com", 1000).unwrap();
    store.record_visit("https://example.com", 2000).unwrap();
    assert_eq!(store.list_history().unwrap(), vec![example(2000, 2)]);
    assert_eq!(
        store.find_history("https://example.com").unwrap(),
        Some(example(2000, 2))
    );
}

#[test]
fn test_clear_history_then_list_is_empty() {
    let mut store = Store::open_in_memory().unwrap();
    store.record_visit("https://a.test", 1).unwrap();
    store.record_visit("https://b.test", 2).unwrap();

    store.clear_history().unwrap();
    assert!(store.list_history().unwrap().is_empty());
}

#[test]
fn test_clear_history_keeps_config() {
    let mut store = Store::open_in_memory().unwrap();
    store.set_config(ConfigKey::LastUrl, "https://a.test").unwrap();
    store.record_visit("https://a.test", 1).unwrap();

    store.clear_history().unwrap();
    assert_eq!(store.get_all_config().unwrap().last_url, "https://a.test");
}

#[test]
fn test_set_config_then_get_all() {
    let mut store = Store::open_in_memory().unwrap();
    let before = store.get_all_config().unwrap();

    store.set_config(ConfigKey::ProxyHost, "proxy.local").unwrap();
    let after = store.get_all_config().unwrap();

    assert_eq!(after.proxy_host, "proxy.local");
    assert_eq!(after.proxy_port, before.proxy_port);
    assert_eq!(after.last_url, before.last_url);
}

#[test]
fn test_restart_preserves_config_and_history() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("browser.sqlite3");

    {
        let mut store = Store::open(&path).unwrap();
        store.set_config(ConfigKey::ProxyHost, "proxy.local").unwrap();
        store.set_config(ConfigKey::ProxyPort, "8080").unwrap();
        store.set_config(ConfigKey::LastUrl, "https://example.com").unwrap();
        store.record_visit("https://example.com", 1000).unwrap();
        store.record_visit("https://example.com", 2000).unwrap();
        store.record_visit("https://rust-lang.org", 1500).unwrap();
    }

    let store = Store::open(&path).unwrap();
    let config = store.get_all_config().unwrap();
    assert_eq!(config.proxy_host, "proxy.local");
    assert_eq!(config.proxy_port, "8080");
    assert_eq!(config.last_url, "https://example.com");

    let mut rows = store.list_history().unwrap();
    rows.sort_by(|a, b| a.url.cmp(&b.url));
    assert_eq!(
        rows,
        vec![
            example(2000, 2),
            HistoryEntry {
                url: "https://rust-lang.org".to_string(),
                last_update: 1500,
                count: 1,
            },
        ]
    );
}
