//! Proxy Browser: a minimal browser shell with proxy settings and visit history.
//!
//! Entry point: opens the browser window. When built without the `gui`
//! feature, runs the console front end instead.

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    #[cfg(feature = "gui")]
    let result = proxybrowser::ui::webview_app::run();

    #[cfg(not(feature = "gui"))]
    let result = proxybrowser::console::run();

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
