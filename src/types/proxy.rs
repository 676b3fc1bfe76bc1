use serde::{Deserialize, Serialize};

use crate::types::errors::ProxyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProxyKind {
    Http,
}

/// What the proxy is trusted to do on the browser's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyCapabilities {
    /// Host names are resolved by the proxy rather than locally.
    pub hostname_lookup: bool,
}

/// Application-wide proxy to route browser traffic through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyDescriptor {
    pub kind: ProxyKind,
    pub host: String,
    pub port: u16,
    pub capabilities: ProxyCapabilities,
}

impl ProxyDescriptor {
    /// Builds an HTTP proxy descriptor from the raw field values.
    ///
    /// The host is passed through untouched. The port must be plain decimal
    /// digits naming a non-zero `u16`, the same rule the port field enforces.
    pub fn http(host: &str, port: &str) -> Result<Self, ProxyError> {
        let port = match port.parse::<u16>() {
            Ok(p) if p > 0 && port.bytes().all(|b| b.is_ascii_digit()) => p,
            _ => return Err(ProxyError::InvalidPort(port.to_string())),
        };
        Ok(Self {
            kind: ProxyKind::Http,
            host: host.to_string(),
            port,
            capabilities: ProxyCapabilities {
                hostname_lookup: true,
            },
        })
    }

    /// `host:port`, as shown in log lines.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
