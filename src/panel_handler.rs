//! Message handler for the control panel.
//!
//! The panel (URL field, proxy fields, history table) sends one JSON object
//! per user action. `handle_message` applies it to the session controller and
//! returns the script that re-renders the panel. Kept free of any GUI types so
//! it can be unit-tested.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::app::SessionController;
use crate::services::{BrowserView, Clock, Notifier, ProxySubsystem};
use crate::types::history::{HistoryColumn, HistorySort};

/// A user action reported by the panel.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PanelMessage {
    /// The panel page finished loading and wants the current state.
    UiReady,
    Navigate { url: String },
    ProxyHostChanged { value: String },
    ProxyPortChanged { value: String },
    HistoryClicked { url: String },
    ClearHistory,
    Sort { column: HistoryColumn },
}

/// Presentation state that lives only in the panel, not in the store.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanelState {
    pub sort: HistorySort,
}

impl PanelMessage {
    pub fn parse(message: &str) -> Result<Self, String> {
        serde_json::from_str(message).map_err(|e| format!("invalid panel message: {}", e))
    }
}

/// Applies one raw panel message and returns the re-render script.
pub fn handle_message<V, P, N, C>(
    controller: &mut SessionController<V, P, N, C>,
    panel: &mut PanelState,
    message: &str,
) -> Result<String, String>
where
    V: BrowserView,
    P: ProxySubsystem,
    N: Notifier,
    C: Clock,
{
    let msg = PanelMessage::parse(message)?;
    apply(controller, panel, msg);
    Ok(render_script(&render_state(controller, panel)))
}

/// Dispatches a parsed message to the matching controller operation.
pub fn apply<V, P, N, C>(
    controller: &mut SessionController<V, P, N, C>,
    panel: &mut PanelState,
    msg: PanelMessage,
) where
    V: BrowserView,
    P: ProxySubsystem,
    N: Notifier,
    C: Clock,
{
    match msg {
        PanelMessage::UiReady => {}
        PanelMessage::Navigate { url } => {
            controller.on_url_changed(&url);
            controller.navigate();
        }
        PanelMessage::ProxyHostChanged { value } => controller.on_proxy_host_changed(&value),
        PanelMessage::ProxyPortChanged { value } => {
            // The re-render puts the last accepted value back in the field.
            if let Err(e) = controller.on_proxy_port_changed(&value) {
                log::debug!("[panel] {}", e);
            }
        }
        PanelMessage::HistoryClicked { url } => {
            controller.on_history_row_clicked(&url);
        }
        PanelMessage::ClearHistory => {
            controller.clear_history();
        }
        PanelMessage::Sort { column } => panel.sort = panel.sort.toggled(column),
    }
}

/// Snapshot of everything the panel displays.
pub fn render_state<V, P, N, C>(controller: &SessionController<V, P, N, C>, panel: &PanelState) -> Value
where
    V: BrowserView,
    P: ProxySubsystem,
    N: Notifier,
    C: Clock,
{
    let fields = controller.fields();
    json!({
        "url": fields.url,
        "proxyHost": fields.proxy_host,
        "proxyPort": fields.proxy_port,
        "sort": panel.sort,
        "history": controller.sorted_history(panel.sort),
    })
}

pub fn render_script(state: &Value) -> String {
    format!("if(window.__pb_render)__pb_render({})", state)
}
