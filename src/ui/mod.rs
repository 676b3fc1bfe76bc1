// Desktop front end: tao window, wry WebViews, rfd dialogs.

pub mod webview_app;
