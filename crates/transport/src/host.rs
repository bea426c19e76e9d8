// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host string resolution.
//!
//! Accepts the same forms as `DOCKER_HOST`:
//!
//! ```text
//! unix:///var/run/docker.sock   → UnixSocket { path: /var/run/docker.sock }
//! tcp://10.0.0.5:2375           → Tcp { base_url: http://10.0.0.5:2375 }
//! http(s)://host:port           → Tcp { base_url: unchanged }
//! ```
//!
//! Resolution is pure string work; nothing is connected.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use url::Url;

use crate::TransportError;

/// Transport-level address of the daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionTarget {
    /// Path of a Unix domain socket. Never empty.
    UnixSocket { path: PathBuf },
    /// Base URL of an HTTP(S) endpoint
    Tcp { base_url: String },
}

impl ConnectionTarget {
    pub fn parse(raw: &str) -> Result<Self, TransportError> {
        let url = Url::parse(raw).map_err(|e| {
            TransportError::configuration(format!("invalid host {:?}: {}", raw, e))
        })?;

        // Url lowercases the scheme; keep the caller's spelling of the rest.
        let rest = raw.get(url.scheme().len() + 1..).unwrap_or_default();

        match url.scheme() {
            "unix" => {
                let path = rest.strip_prefix("//").unwrap_or(rest);
                if path.is_empty() {
                    return Err(TransportError::configuration(format!(
                        "invalid host {:?}: unix socket path is empty",
                        raw
                    )));
                }
                Ok(ConnectionTarget::UnixSocket { path: PathBuf::from(path) })
            }
            "tcp" => {
                require_host(&url, raw)?;
                let authority = rest.strip_prefix("//").unwrap_or(rest);
                Ok(ConnectionTarget::Tcp { base_url: format!("http://{}", authority) })
            }
            "http" | "https" => {
                require_host(&url, raw)?;
                Ok(ConnectionTarget::Tcp { base_url: raw.to_string() })
            }
            other => Err(TransportError::configuration(format!(
                "invalid host {:?}: unsupported scheme {:?}",
                raw, other
            ))),
        }
    }

    pub fn unix(path: impl Into<PathBuf>) -> Self {
        ConnectionTarget::UnixSocket { path: path.into() }
    }

    pub fn is_unix(&self) -> bool {
        matches!(self, ConnectionTarget::UnixSocket { .. })
    }
}

fn require_host(url: &Url, raw: &str) -> Result<(), TransportError> {
    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(TransportError::configuration(format!("invalid host {:?}: missing host", raw))),
    }
}

impl FromStr for ConnectionTarget {
    type Err = TransportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConnectionTarget::parse(s)
    }
}

impl fmt::Display for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionTarget::UnixSocket { path } => write!(f, "unix://{}", path.display()),
            ConnectionTarget::Tcp { base_url } => f.write_str(base_url),
        }
    }
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;
