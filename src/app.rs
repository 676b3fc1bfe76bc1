//! Session controller.
//!
//! Owns the store and the field values, and turns user actions (navigate,
//! field edits, history clicks, clear) into proxy setup, page loads and
//! store updates.

use crate::database::Store;
use crate::services::notifier::{
    CLEAR_HISTORY_TEXT, CLEAR_HISTORY_TITLE, NO_PROXY_NOTICE, PROXY_PROBLEM_NOTICE,
};
use crate::services::{BrowserView, Clock, Notifier, ProxySubsystem, SystemClock};
use crate::types::config::{validate_port_input, ConfigKey, SessionConfig};
use crate::types::errors::{ConfigError, ProxyError};
use crate::types::history::{HistoryEntry, HistorySort};
use crate::types::proxy::ProxyDescriptor;

/// Current contents of the editable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    pub url: String,
    pub proxy_host: String,
    pub proxy_port: String,
}

/// What a navigation did about the proxy.
#[derive(Debug)]
pub enum NavigationOutcome {
    /// Loaded through the given proxy.
    Proxied(ProxyDescriptor),
    /// Loaded without installing a proxy because a proxy field was empty.
    Direct,
    /// Nothing was loaded or recorded.
    Aborted(ProxyError),
}

pub struct SessionController<V, P, N, C = SystemClock> {
    store: Store,
    config: SessionConfig,
    fields: Fields,
    history: Vec<HistoryEntry>,
    /// Set while startup populates the fields, so those edits are not written back.
    initializing: bool,
    view: V,
    proxy: P,
    notifier: N,
    clock: C,
}

impl<V, P, N, C> SessionController<V, P, N, C>
where
    V: BrowserView,
    P: ProxySubsystem,
    N: Notifier,
    C: Clock,
{
    /// Wraps an already opened store. Call [`startup`](Self::startup) next.
    pub fn new(store: Store, view: V, proxy: P, notifier: N, clock: C) -> Self {
        Self {
            store,
            config: SessionConfig::default(),
            fields: Fields::default(),
            history: Vec::new(),
            initializing: true,
            view,
            proxy,
            notifier,
            clock,
        }
    }

    /// Loads settings into the fields and reopens the last URL, if any.
    pub fn startup(&mut self) {
        self.initializing = true;

        match self.store.get_all_config() {
            Ok(config) => self.config = config,
            Err(e) => log::error!("[session] failed to load config, using defaults: {}", e),
        }

        let host = self.config.proxy_host.clone();
        let port = self.config.proxy_port.clone();
        self.on_proxy_host_changed(&host);
        if let Err(e) = self.on_proxy_port_changed(&port) {
            log::warn!("[session] {}", e);
        }

        self.refresh_history();

        let last_url = self.config.last_url.clone();
        if !last_url.is_empty() {
            log::info!("[session] restoring last URL {}", last_url);
            self.on_url_changed(&last_url);
            self.navigate();
        }

        self.initializing = false;
    }

    /// Loads the URL field, through the proxy when both proxy fields are set.
    pub fn navigate(&mut self) -> NavigationOutcome {
        let url = self.fields.url.clone();

        let outcome = if self.fields.proxy_host.is_empty() || self.fields.proxy_port.is_empty() {
            self.notifier.notify(NO_PROXY_NOTICE);
            NavigationOutcome::Direct
        } else {
            match self.install_proxy() {
                Ok(proxy) => NavigationOutcome::Proxied(proxy),
                Err(e) => {
                    log::warn!("[session] not loading {}: {}", url, e);
                    self.notifier.notify(PROXY_PROBLEM_NOTICE);
                    return NavigationOutcome::Aborted(e);
                }
            }
        };

        log::info!("[session] loading {}", url);
        self.view.load(&url);

        self.persist(ConfigKey::LastUrl, &url);

        let now = self.clock.now();
        if let Err(e) = self.store.record_visit(&url, now) {
            log::warn!("[session] failed to record visit to {}: {}", url, e);
        }
        self.refresh_history();

        outcome
    }

    fn install_proxy(&mut self) -> Result<ProxyDescriptor, ProxyError> {
        let proxy = ProxyDescriptor::http(&self.fields.proxy_host, &self.fields.proxy_port)?;
        self.proxy.set_application_proxy(&proxy)?;
        log::debug!("[session] proxy set to {}", proxy.endpoint());
        Ok(proxy)
    }

    /// Asks for confirmation, then wipes the history and the URL field.
    /// Returns whether the history was cleared. A failed delete leaves the
    /// URL field and the displayed rows as they were.
    pub fn clear_history(&mut self) -> bool {
        if !self.notifier.confirm(CLEAR_HISTORY_TITLE, CLEAR_HISTORY_TEXT) {
            return false;
        }
        if let Err(e) = self.store.clear_history() {
            log::warn!("[session] failed to clear history: {}", e);
            return false;
        }
        self.fields.url.clear();
        self.refresh_history();
        true
    }

    pub fn on_url_changed(&mut self, text: &str) {
        self.fields.url = text.to_string();
    }

    /// Stores every host edit immediately, except while starting up.
    pub fn on_proxy_host_changed(&mut self, text: &str) {
        self.fields.proxy_host = text.to_string();
        if !self.initializing {
            self.persist(ConfigKey::ProxyHost, text);
        }
    }

    /// Accepts a port edit if it is empty or a valid port number.
    ///
    /// Rejected edits leave both the field and the store untouched. Values
    /// loaded at startup are taken as stored.
    pub fn on_proxy_port_changed(&mut self, text: &str) -> Result<(), ConfigError> {
        if !self.initializing {
            validate_port_input(text)?;
        }
        self.fields.proxy_port = text.to_string();
        if !self.initializing {
            self.persist(ConfigKey::ProxyPort, text);
        }
        Ok(())
    }

    /// Puts the clicked row's URL in the URL field and navigates to it.
    pub fn on_history_row_clicked(&mut self, url: &str) -> NavigationOutcome {
        self.on_url_changed(url);
        self.navigate()
    }

    /// Writes a setting and mirrors it in memory. Failures are only logged.
    fn persist(&mut self, key: ConfigKey, value: &str) {
        match self.store.set_config(key, value) {
            Ok(()) => self.config.set(key, value),
            Err(e) => log::warn!("[session] failed to save {}: {}", key, e),
        }
    }

    /// Re-reads the history rows. On failure the previous rows are kept.
    pub fn refresh_history(&mut self) {
        match self.store.list_history() {
            Ok(rows) => self.history = rows,
            Err(e) => log::warn!("[session] failed to list history: {}", e),
        }
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// History rows ordered for display.
    pub fn sorted_history(&self, sort: HistorySort) -> Vec<HistoryEntry> {
        let mut rows = self.history.clone();
        sort.apply(&mut rows);
        rows
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn is_initializing(&self) -> bool {
        self.initializing
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn proxy(&self) -> &P {
        &self.proxy
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }
}
