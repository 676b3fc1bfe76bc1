//! WebView-based browser window using `wry` + `tao`.
//!
//! Layout:
//! - A control panel WebView served from the `pb://` custom protocol holds the
//!   URL field, proxy fields, Go / Clear buttons and the history table.
//!   It talks to Rust with `window.ipc.postMessage()`.
//! - A content WebView below it shows the page. wry applies a proxy only when
//!   a WebView is built, so the content view is rebuilt whenever the proxy
//!   requested by the session controller differs from the one it was built with.
//! - Notices and the clear-history confirmation are native dialogs (`rfd`).
//!
//! The IPC handler only forwards messages to the event loop, so the session
//! controller and its store are touched from the UI thread alone.

use std::cell::RefCell;
use std::error::Error;
use std::rc::Rc;

use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder, EventLoopProxy};
use tao::window::{Window, WindowBuilder};
use wry::{ProxyConfig, ProxyEndpoint, WebView, WebViewBuilder};

use crate::app::SessionController;
use crate::database::Store;
use crate::panel_handler::{self, PanelState};
use crate::services::{BrowserView, Notifier, ProxySubsystem, SystemClock};
use crate::types::errors::ProxyError;
use crate::types::proxy::ProxyDescriptor;

const WINDOW_TITLE: &str = "Proxy Browser";

#[cfg_attr(target_os = "linux", allow(dead_code))]
const PANEL_HEIGHT: f64 = 280.0;

#[cfg(target_os = "windows")]
const PANEL_URL: &str = "http://pb.localhost/panel";
#[cfg(not(target_os = "windows"))]
const PANEL_URL: &str = "pb://localhost/panel";

const PANEL_HTML: &str = include_str!("../../resources/ui/panel.html");
const PANEL_CSS: &str = include_str!("../../resources/ui/panel.css");
const PANEL_JS: &str = include_str!("../../resources/ui/panel.js");

#[derive(Debug)]
enum UserEvent {
    /// Raw JSON posted by the control panel.
    Panel(String),
}

fn panel_page() -> String {
    PANEL_HTML
        .replace("/*PANEL_CSS*/", PANEL_CSS)
        .replace("/*PANEL_JS*/", PANEL_JS)
}

// ─── Content view ───

/// The window and the WebView showing the current page.
struct ContentPane {
    window: Window,
    webview: Option<WebView>,
    /// Proxy the current `webview` was built with.
    built_with: Option<ProxyDescriptor>,
    /// Proxy the next load must go through.
    requested: Option<ProxyDescriptor>,
}

impl ContentPane {
    fn new(window: Window) -> Self {
        Self {
            window,
            webview: None,
            built_with: None,
            requested: None,
        }
    }

    fn load(&mut self, url: &str) -> Result<(), Box<dyn Error>> {
        if self.built_with == self.requested {
            if let Some(webview) = &self.webview {
                webview.load_url(url)?;
                return Ok(());
            }
        }
        // Drop the old view first so its widget leaves the window.
        self.webview = None;
        self.webview = Some(self.build(url)?);
        self.built_with = self.requested.clone();
        Ok(())
    }

    fn build(&self, url: &str) -> Result<WebView, Box<dyn Error>> {
        let mut builder = WebViewBuilder::new()
            .with_url(url)
            .with_devtools(cfg!(debug_assertions));

        if let Some(proxy) = &self.requested {
            log::info!(
                "[ui] building content view with HTTP proxy {} (hostname lookup: {})",
                proxy.endpoint(),
                proxy.capabilities.hostname_lookup
            );
            builder = builder.with_proxy_config(ProxyConfig::Http(ProxyEndpoint {
                host: proxy.host.clone(),
                port: proxy.port.to_string(),
            }));
        }

        #[cfg(target_os = "linux")]
        let webview = {
            use tao::platform::unix::WindowExtUnix;
            use wry::WebViewBuilderExtUnix;
            let vbox = self
                .window
                .default_vbox()
                .ok_or("window has no GTK container")?;
            builder.build_gtk(vbox)?
        };

        #[cfg(not(target_os = "linux"))]
        let webview = builder
            .with_bounds(region(&self.window, false))
            .build_as_child(&self.window)?;

        Ok(webview)
    }

    /// Keeps the panel on top and the page below it. GTK packs both views
    /// itself, so there is nothing to do on Linux.
    #[cfg_attr(target_os = "linux", allow(unused_variables))]
    fn layout(&self, panel: &WebView) {
        #[cfg(not(target_os = "linux"))]
        {
            if let Err(e) = panel.set_bounds(region(&self.window, true)) {
                log::warn!("[ui] failed to resize panel: {}", e);
            }
            if let Some(webview) = &self.webview {
                if let Err(e) = webview.set_bounds(region(&self.window, false)) {
                    log::warn!("[ui] failed to resize content view: {}", e);
                }
            }
        }
    }
}

/// Panel strip (`top`) or the page area below it, in logical pixels.
#[cfg(not(target_os = "linux"))]
fn region(window: &Window, top: bool) -> wry::Rect {
    let size = window.inner_size().to_logical::<f64>(window.scale_factor());
    let panel_height = PANEL_HEIGHT.min(size.height);
    let (y, height) = if top {
        (0.0, panel_height)
    } else {
        (panel_height, (size.height - panel_height).max(0.0))
    };
    wry::Rect {
        position: wry::dpi::LogicalPosition::new(0.0, y).into(),
        size: wry::dpi::LogicalSize::new(size.width, height).into(),
    }
}

struct WryBrowserView(Rc<RefCell<ContentPane>>);

impl BrowserView for WryBrowserView {
    fn load(&mut self, url: &str) {
        if let Err(e) = self.0.borrow_mut().load(url) {
            log::error!("[ui] failed to load {}: {}", url, e);
        }
    }
}

struct WryProxySubsystem(Rc<RefCell<ContentPane>>);

impl ProxySubsystem for WryProxySubsystem {
    fn set_application_proxy(&mut self, proxy: &ProxyDescriptor) -> Result<(), ProxyError> {
        if proxy.host.trim().is_empty() || proxy.host.contains(char::is_whitespace) {
            return Err(ProxyError::Install(format!(
                "invalid proxy host {:?}",
                proxy.host
            )));
        }
        self.0.borrow_mut().requested = Some(proxy.clone());
        Ok(())
    }
}

// ─── Dialogs ───

const DISCARD_LABEL: &str = "Discard";

struct DialogNotifier;

impl Notifier for DialogNotifier {
    fn notify(&mut self, message: &str) {
        let _ = MessageDialog::new()
            .set_title(WINDOW_TITLE)
            .set_description(message)
            .set_level(MessageLevel::Warning)
            .set_buttons(MessageButtons::Ok)
            .show();
    }

    fn confirm(&mut self, title: &str, text: &str) -> bool {
        let result = MessageDialog::new()
            .set_title(title)
            .set_description(text)
            .set_level(MessageLevel::Warning)
            .set_buttons(MessageButtons::OkCancelCustom(
                DISCARD_LABEL.to_string(),
                "Cancel".to_string(),
            ))
            .show();
        match result {
            MessageDialogResult::Ok => true,
            MessageDialogResult::Custom(label) => label == DISCARD_LABEL,
            _ => false,
        }
    }
}

fn show_fatal(message: &str) {
    let _ = MessageDialog::new()
        .set_title(WINDOW_TITLE)
        .set_description(message)
        .set_level(MessageLevel::Error)
        .set_buttons(MessageButtons::Ok)
        .show();
}

// ─── Control panel ───

fn build_panel(window: &Window, proxy: EventLoopProxy<UserEvent>) -> Result<WebView, Box<dyn Error>> {
    let builder = WebViewBuilder::new()
        .with_custom_protocol("pb".into(), move |_wv_id, _request| {
            wry::http::Response::builder()
                .header("Content-Type", "text/html; charset=utf-8")
                .body(panel_page().into_bytes().into())
                .unwrap_or_else(|_| wry::http::Response::new(Vec::new().into()))
        })
        .with_url(PANEL_URL)
        .with_ipc_handler(move |msg: wry::http::Request<String>| {
            let body = msg.body().to_string();
            log::debug!("[ipc] {}", body.chars().take(200).collect::<String>());
            if proxy.send_event(UserEvent::Panel(body)).is_err() {
                log::warn!("[ipc] event loop closed, dropping panel message");
            }
        })
        .with_devtools(cfg!(debug_assertions));

    #[cfg(target_os = "linux")]
    let webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        let vbox = window.default_vbox().ok_or("window has no GTK container")?;
        builder.build_gtk(vbox)?
    };

    #[cfg(not(target_os = "linux"))]
    let webview = builder
        .with_bounds(region(window, true))
        .build_as_child(window)?;

    Ok(webview)
}

// ─── Main entry point ───

/// Opens the store, builds the window and runs the event loop.
///
/// Only returns on a startup failure; a store that cannot be opened is
/// reported in a dialog first.
pub fn run() -> Result<(), Box<dyn Error>> {
    let store = match Store::open_default() {
        Ok(store) => store,
        Err(e) => {
            show_fatal(&e.to_string());
            return Err(e.into());
        }
    };

    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let window = WindowBuilder::new()
        .with_title(WINDOW_TITLE)
        .with_inner_size(tao::dpi::LogicalSize::new(1280.0, 900.0))
        .build(&event_loop)?;

    let panel = build_panel(&window, event_loop.create_proxy())?;
    let pane = Rc::new(RefCell::new(ContentPane::new(window)));

    let mut controller = SessionController::new(
        store,
        WryBrowserView(pane.clone()),
        WryProxySubsystem(pane.clone()),
        DialogNotifier,
        SystemClock,
    );
    controller.startup();
    let mut panel_state = PanelState::default();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                log::info!("[ui] window closed");
                *control_flow = ControlFlow::Exit;
            }

            Event::WindowEvent {
                event: WindowEvent::Resized(_),
                ..
            } => pane.borrow().layout(&panel),

            Event::UserEvent(UserEvent::Panel(body)) => {
                match panel_handler::handle_message(&mut controller, &mut panel_state, &body) {
                    Ok(script) => {
                        if let Err(e) = panel.evaluate_script(&script) {
                            log::warn!("[ui] failed to update panel: {}", e);
                        }
                    }
                    Err(e) => log::warn!("[ui] {}", e),
                }
                pane.borrow().layout(&panel);
            }

            _ => {}
        }
    });
}
