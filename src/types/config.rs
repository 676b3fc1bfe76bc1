use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::errors::ConfigError;

/// Default proxy port seeded into a new store (squid's default listening port).
pub const DEFAULT_PROXY_PORT: &str = "3128";

/// Names of the settings persisted in the `config` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    ProxyHost,
    ProxyPort,
    LastUrl,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 3] = [ConfigKey::ProxyHost, ConfigKey::ProxyPort, ConfigKey::LastUrl];

    /// The `skey` column value for this setting.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::ProxyHost => "proxyhost",
            ConfigKey::ProxyPort => "proxyport",
            ConfigKey::LastUrl => "lasturl",
        }
    }

    /// Value written when a store is first created.
    pub fn default_value(&self) -> &'static str {
        match self {
            ConfigKey::ProxyPort => DEFAULT_PROXY_PORT,
            ConfigKey::ProxyHost | ConfigKey::LastUrl => "",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "proxyhost" => Ok(ConfigKey::ProxyHost),
            "proxyport" => Ok(ConfigKey::ProxyPort),
            "lasturl" => Ok(ConfigKey::LastUrl),
            other => Err(ConfigError::UnknownKey(other.to_string())),
        }
    }
}

/// In-memory copy of the persisted settings, owned by the session controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub proxy_host: String,
    pub proxy_port: String,
    pub last_url: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            proxy_host: ConfigKey::ProxyHost.default_value().to_string(),
            proxy_port: ConfigKey::ProxyPort.default_value().to_string(),
            last_url: ConfigKey::LastUrl.default_value().to_string(),
        }
    }
}

impl SessionConfig {
    /// Builds the record from raw `skey -> svalue` rows.
    ///
    /// Unrecognised keys are skipped; missing keys keep their defaults.
    pub fn from_entries(entries: &HashMap<String, String>) -> Self {
        let mut config = Self::default();
        for (key, value) in entries {
            match key.parse::<ConfigKey>() {
                Ok(k) => config.set(k, value),
                Err(_) => log::debug!("[config] ignoring unknown key '{}'", key),
            }
        }
        config
    }

    pub fn get(&self, key: ConfigKey) -> &str {
        match key {
            ConfigKey::ProxyHost => &self.proxy_host,
            ConfigKey::ProxyPort => &self.proxy_port,
            ConfigKey::LastUrl => &self.last_url,
        }
    }

    pub fn set(&mut self, key: ConfigKey, value: &str) {
        let slot = match key {
            ConfigKey::ProxyHost => &mut self.proxy_host,
            ConfigKey::ProxyPort => &mut self.proxy_port,
            ConfigKey::LastUrl => &mut self.last_url,
        };
        *slot = value.to_string();
    }
}

/// Checks proxy-port text typed by the user.
///
/// Empty text is allowed (the field is being cleared); otherwise the text
/// must be a decimal port in `1..=65535`.
pub fn validate_port_input(text: &str) -> Result<(), ConfigError> {
    if text.is_empty() {
        return Ok(());
    }
    match text.parse::<u16>() {
        Ok(port) if port > 0 && text.bytes().all(|b| b.is_ascii_digit()) => Ok(()),
        _ => Err(ConfigError::InvalidPort(text.to_string())),
    }
}
