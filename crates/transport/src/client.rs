// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One-request-per-connection HTTP client.
//!
//! Each call opens its own socket, sends one request with
//! `Connection: close`, and reads the reply until the daemon hangs up. The
//! socket is owned by the call's future, so it is closed on every exit path,
//! including timeout and cancellation.

use std::path::Path;
use std::time::Duration;

use serde::Serialize;
use tokio::net::{TcpStream, UnixStream};
use tracing::debug;
use url::Url;

use crate::http::{encode_request, exchange, Route};
use crate::{env, ConnectionTarget, IncomingResponse, OutgoingRequest, Strictness};
use crate::TransportError;

/// Everything a [`Client`] needs to reach the daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub target: ConnectionTarget,
    /// Limit on connect + write + read for one request
    pub timeout: Duration,
    pub strictness: Strictness,
}

impl ClientConfig {
    pub fn new(target: ConnectionTarget) -> Self {
        Self { target, timeout: env::DEFAULT_TIMEOUT, strictness: Strictness::default() }
    }

    /// Load configuration from `DH_HOST`/`DOCKER_HOST`, `DH_TIMEOUT_MS`,
    /// and `DH_STRICT`.
    pub fn from_env() -> Result<Self, TransportError> {
        Ok(Self {
            target: ConnectionTarget::parse(&env::host())?,
            timeout: env::request_timeout(),
            strictness: env::strictness(),
        })
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }
}

/// HTTP client bound to one daemon target.
///
/// Holds no connection state; clones and concurrent calls are independent.
#[derive(Debug, Clone)]
pub struct Client {
    config: ClientConfig,
}

impl Client {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Result<Self, TransportError> {
        Ok(Self::new(ClientConfig::from_env()?))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub async fn send(&self, request: &OutgoingRequest) -> Result<IncomingResponse, TransportError> {
        let ClientConfig { target, timeout, strictness } = &self.config;
        match target {
            ConnectionTarget::UnixSocket { path } => {
                send_unix_with(path, request, *timeout, *strictness).await
            }
            ConnectionTarget::Tcp { base_url } => {
                send_tcp(base_url, target, request, *timeout, *strictness).await
            }
        }
    }

    pub async fn get(&self, target: &str) -> Result<IncomingResponse, TransportError> {
        self.send(&OutgoingRequest::get(target)).await
    }

    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        target: &str,
        value: &T,
    ) -> Result<IncomingResponse, TransportError> {
        self.send(&OutgoingRequest::post(target).json(value)?).await
    }
}

/// Send one request over the Unix socket at `path`.
pub async fn send_unix(
    path: &Path,
    request: &OutgoingRequest,
    timeout: Duration,
) -> Result<IncomingResponse, TransportError> {
    send_unix_with(path, request, timeout, Strictness::Lenient).await
}

async fn send_unix_with(
    path: &Path,
    request: &OutgoingRequest,
    timeout: Duration,
    strictness: Strictness,
) -> Result<IncomingResponse, TransportError> {
    let route = Route::resolve(&ConnectionTarget::unix(path), request)?;
    let bytes = encode_request(request, &route);
    debug!(method = %request.method, target = %route.request_target, socket = %path.display(), "sending request");

    let response = timed(timeout, async {
        let stream = UnixStream::connect(path)
            .await
            .map_err(|e| TransportError::io(&format!("connect to {} failed", path.display()), e))?;
        exchange(stream, &bytes, strictness).await
    })
    .await?;

    debug!(status = response.status, bytes = response.body.len(), "received response");
    Ok(response)
}

async fn send_tcp(
    base_url: &str,
    target: &ConnectionTarget,
    request: &OutgoingRequest,
    timeout: Duration,
    strictness: Strictness,
) -> Result<IncomingResponse, TransportError> {
    let url = Url::parse(base_url).map_err(|e| {
        TransportError::configuration(format!("invalid base URL {:?}: {}", base_url, e))
    })?;
    if url.scheme() != "http" {
        return Err(TransportError::configuration(format!(
            "{} targets are not supported (no TLS)",
            url.scheme()
        )));
    }
    let addr = match (url.host_str(), url.port_or_known_default()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        _ => {
            return Err(TransportError::configuration(format!(
                "invalid base URL {:?}: missing host",
                base_url
            )))
        }
    };

    let route = Route::resolve(target, request)?;
    let bytes = encode_request(request, &route);
    debug!(method = %request.method, target = %route.request_target, %addr, "sending request");

    let response = timed(timeout, async {
        let stream = TcpStream::connect(&addr)
            .await
            .map_err(|e| TransportError::io(&format!("connect to {} failed", addr), e))?;
        exchange(stream, &bytes, strictness).await
    })
    .await?;

    debug!(status = response.status, bytes = response.body.len(), "received response");
    Ok(response)
}

/// Run `fut` under a deadline covering the whole exchange.
///
/// On expiry the inner future is dropped, which closes its socket.
async fn timed<F>(timeout: Duration, fut: F) -> Result<IncomingResponse, TransportError>
where
    F: std::future::Future<Output = Result<IncomingResponse, TransportError>>,
{
    tokio::time::timeout(timeout, fut)
        .await
        .map_err(|_| TransportError::Timeout { after: timeout })?
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
