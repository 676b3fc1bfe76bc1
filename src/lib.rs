//! Proxy Browser: a minimal browser shell with proxy settings and a persisted
//! visit history.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod app;
pub mod console;
pub mod database;
pub mod managers;
pub mod panel_handler;
pub mod platform;
pub mod services;
pub mod types;

#[cfg(feature = "gui")]
pub mod ui;
