//! Unit tests for the control-panel message handler.
//!
//! Drives `handle_message` with the same JSON the panel page posts, against a
//! controller built from the console front end's collaborators.

use proxybrowser::app::SessionController;
use proxybrowser::console::{ConsoleNotifier, ConsoleProxy, ConsoleView};
use proxybrowser::database::Store;
use proxybrowser::panel_handler::{handle_message, render_state, PanelMessage, PanelState};
use proxybrowser::services::Clock;
use proxybrowser::types::history::{HistoryColumn, SortOrder};
use serde_json::json;

struct FixedClock(i64);

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.0
    }
}

type Controller = SessionController<ConsoleView, ConsoleProxy, ConsoleNotifier, FixedClock>;

fn setup() -> (Controller, PanelState) {
    let mut controller = SessionController::new(
        Store::open_in_memory().unwrap(),
        ConsoleView,
        ConsoleProxy::default(),
        ConsoleNotifier,
        FixedClock(1000),
    );
    controller.startup();
    (controller, PanelState::default())
}

#[test]
fn test_parse_messages() {
    assert_eq!(
        PanelMessage::parse(r#"{"cmd":"ui_ready"}"#),
        Ok(PanelMessage::UiReady)
    );
    assert_eq!(
        PanelMessage::parse(r#"{"cmd":"navigate","url":"https://example.com"}"#),
        Ok(PanelMessage::Navigate {
            url: "https://example.com".to_string()
        })
    );
    assert_eq!(
        PanelMessage::parse(r#"{"cmd":"sort","column":"last_update"}"#),
        Ok(PanelMessage::Sort {
            column: HistoryColumn::LastUpdate
        })
    );
}

#[test]
fn test_parse_rejects_unknown_and_malformed() {
    assert!(PanelMessage::parse(r#"{"cmd":"bookmark"}"#).is_err());
    assert!(PanelMessage::parse(r#"{"cmd":"navigate"}"#).is_err());
    assert!(PanelMessage::parse("not json").is_err());
    assert!(PanelMessage::parse(r#"{"cmd":"sort","column":"title"}"#).is_err());
}

#[test]
fn test_ui_ready_renders_current_state() {
    let (mut controller, mut panel) = setup();

    let script = handle_message(&mut controller, &mut panel, r#"{"cmd":"ui_ready"}"#).unwrap();
    assert!(script.starts_with("if(window.__pb_render)__pb_render("));

    let state = render_state(&controller, &panel);
    assert_eq!(state["proxyHost"], "");
    assert_eq!(state["proxyPort"], "3128");
    assert_eq!(state["url"], "");
    assert_eq!(state["history"], json!([]));
    assert_eq!(
        state["sort"],
        json!({"column": "last_update", "order": "descending"})
    );
}

#[test]
fn test_navigate_through_proxy() {
    let (mut controller, mut panel) = setup();

    handle_message(
        &mut controller,
        &mut panel,
        r#"{"cmd":"proxy_host_changed","value":"proxy.local"}"#,
    )
    .unwrap();
    handle_message(
        &mut controller,
        &mut panel,
        r#"{"cmd":"proxy_port_changed","value":"8080"}"#,
    )
    .unwrap();
    handle_message(
        &mut controller,
        &mut panel,
        r#"{"cmd":"navigate","url":"https://example.com"}"#,
    )
    .unwrap();

    let active = controller.proxy().active.as_ref().expect("proxy installed");
    assert_eq!(active.host, "proxy.local");
    assert_eq!(active.port, 8080);

    let state = render_state(&controller, &panel);
    assert_eq!(state["url"], "https://example.com");
    assert_eq!(
        state["history"],
        json!([{"url": "https://example.com", "last_update": 1000, "count": 1}])
    );
}

#[test]
fn test_rejected_port_renders_previous_value() {
    let (mut controller, mut panel) = setup();

    let script = handle_message(
        &mut controller,
        &mut panel,
        r#"{"cmd":"proxy_port_changed","value":"31a"}"#,
    )
    .unwrap();

    assert!(script.contains(r#""proxyPort":"3128""#));
    assert_eq!(controller.fields().proxy_port, "3128");
}

#[test]
fn test_history_click_and_sort() {
    let (mut controller, mut panel) = setup();
    handle_message(
        &mut controller,
        &mut panel,
        r#"{"cmd":"proxy_host_changed","value":"proxy.local"}"#,
    )
    .unwrap();
    for url in ["https://b.test", "https://a.test"] {
        let msg = json!({"cmd": "navigate", "url": url}).to_string();
        handle_message(&mut controller, &mut panel, &msg).unwrap();
    }
    handle_message(
        &mut controller,
        &mut panel,
        r#"{"cmd":"history_clicked","url":"https://b.test"}"#,
    )
    .unwrap();
    assert_eq!(controller.fields().url, "https://b.test");

    handle_message(&mut controller, &mut panel, r#"{"cmd":"sort","column":"count"}"#).unwrap();
    assert_eq!(panel.sort.column, HistoryColumn::Count);
    assert_eq!(panel.sort.order, SortOrder::Ascending);
    let state = render_state(&controller, &panel);
    assert_eq!(state["history"][0]["url"], "https://a.test");

    handle_message(&mut controller, &mut panel, r#"{"cmd":"sort","column":"count"}"#).unwrap();
    assert_eq!(panel.sort.order, SortOrder::Descending);
    let state = render_state(&controller, &panel);
    assert_eq!(state["history"][0]["url"], "https://b.test");
    assert_eq!(state["history"][0]["count"], 2);
}

#[test]
fn test_invalid_message_is_an_error() {
    let (mut controller, mut panel) = setup();
    let result = handle_message(&mut controller, &mut panel, "{}");
    assert!(result.unwrap_err().contains("invalid panel message"));
}
