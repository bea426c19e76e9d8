// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP/1.1 request serialization and response parsing.
//!
//! Responses are framed by connection close: the whole reply is read to EOF
//! before parsing, so no `Content-Length` bookkeeping happens while reading.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;
use url::Url;

use crate::{chunked, ConnectionTarget, HeaderMap, IncomingResponse, OutgoingRequest};
use crate::{Strictness, TransportError};

/// Headers the transport always computes itself.
const MANAGED_HEADERS: [&str; 4] = ["Host", "Connection", "Content-Length", "Transfer-Encoding"];

/// Logical URL used for Unix socket targets. Only its host reaches the wire.
const UNIX_LOGICAL_BASE: &str = "http://localhost";

/// Request line target and `Host` value for sending `request` to `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub request_target: String,
    pub host: String,
}

impl Route {
    /// Resolve the logical URL of a request.
    ///
    /// For Unix sockets the URL is `http://localhost<target>`; for TCP it is
    /// the base URL with the target appended. The socket path never appears.
    pub fn resolve(
        target: &ConnectionTarget,
        request: &OutgoingRequest,
    ) -> Result<Self, TransportError> {
        check_head(request)?;
        if !request.target.starts_with('/') {
            return Err(TransportError::configuration(format!(
                "request target {:?} must start with '/'",
                request.target
            )));
        }

        let base = match target {
            ConnectionTarget::UnixSocket { .. } => UNIX_LOGICAL_BASE,
            ConnectionTarget::Tcp { base_url } => base_url.trim_end_matches('/'),
        };
        let logical = format!("{}{}", base, request.target);
        let url = Url::parse(&logical).map_err(|e| {
            TransportError::configuration(format!("cannot resolve {:?}: {}", logical, e))
        })?;
        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => {
                return Err(TransportError::configuration(format!(
                    "cannot resolve {:?}: missing host",
                    logical
                )))
            }
        };

        let prefix = match Url::parse(base) {
            Ok(base_url) => base_url.path().trim_end_matches('/').to_string(),
            Err(_) => String::new(),
        };
        Ok(Route { request_target: format!("{}{}", prefix, request.target), host })
    }
}

/// Reject head fields that would break the request framing on the wire.
fn check_head(request: &OutgoingRequest) -> Result<(), TransportError> {
    let method = &request.method;
    if method.is_empty() || method.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(TransportError::configuration(format!("invalid method {:?}", method)));
    }
    if request.target.chars().any(|c| c == ' ' || c.is_control()) {
        return Err(TransportError::configuration(format!(
            "request target {:?} contains whitespace or control characters",
            request.target
        )));
    }
    let breaks_line = |s: &str| s.contains(['\r', '\n']);
    for (name, value) in request.headers.iter() {
        if breaks_line(name) || breaks_line(value) {
            return Err(TransportError::configuration(format!(
                "header {:?} contains CR or LF",
                name
            )));
        }
    }
    Ok(())
}

/// Serialize a request: request line, headers, blank line, body.
///
/// `Host` and `Connection: close` are always set; caller values for them are
/// dropped. `Content-Length` is present only for a non-empty body.
pub fn encode_request(request: &OutgoingRequest, route: &Route) -> Vec<u8> {
    let body = request.body_bytes();

    let mut headers = HeaderMap::new();
    headers.insert("Host", route.host.as_str());
    for (name, value) in request.headers.iter() {
        if MANAGED_HEADERS.iter().any(|m| m.eq_ignore_ascii_case(name)) {
            continue;
        }
        headers.insert(name, value);
    }
    headers.insert("Connection", "close");
    if !body.is_empty() {
        headers.insert("Content-Length", body.len().to_string());
    }

    let mut head = format!("{} {} HTTP/1.1\r\n", request.method, route.request_target);
    for (name, value) in headers.iter() {
        head.push_str(name);
        head.push_str(": ");
        head.push_str(value);
        head.push_str("\r\n");
    }
    head.push_str("\r\n");

    let mut out = head.into_bytes();
    out.extend_from_slice(body);
    out
}

/// Parse a complete response as read up to connection close.
pub fn parse_response(
    raw: &[u8],
    strictness: Strictness,
) -> Result<IncomingResponse, TransportError> {
    let split = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .ok_or_else(|| TransportError::protocol("response has no header/body delimiter"))?;
    let head = String::from_utf8_lossy(&raw[..split]);
    let body = &raw[split + 4..];

    let mut lines = head.split("\r\n");
    let (status, reason) = parse_status_line(lines.next().unwrap_or_default())?;

    // Duplicate names: the last occurrence wins, but any chunked
    // Transfer-Encoding line selects chunked decoding
    let mut headers = HeaderMap::new();
    let mut is_chunked = false;
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            debug!(line, "skipping malformed header line");
            continue;
        };
        let (name, value) = (name.trim(), value.trim());
        if name.eq_ignore_ascii_case("Transfer-Encoding")
            && value.to_ascii_lowercase().contains("chunked")
        {
            is_chunked = true;
        }
        headers.insert(name, value);
    }

    let body = if is_chunked { chunked::decode_with(body, strictness)? } else { body.to_vec() };
    Ok(IncomingResponse { status, reason, headers, body })
}

fn parse_status_line(line: &str) -> Result<(u16, String), TransportError> {
    let mut parts = line.splitn(3, ' ');
    let version = parts.next().unwrap_or_default();
    if !version.starts_with("HTTP/") {
        return Err(TransportError::protocol(format!("malformed status line {:?}", line)));
    }
    let status = parts
        .next()
        .and_then(|code| code.trim().parse::<u16>().ok())
        .ok_or_else(|| TransportError::protocol(format!("invalid status code in {:?}", line)))?;
    let reason = parts.next().unwrap_or_default().trim().to_string();
    Ok((status, reason))
}

/// Write an encoded request, read until the peer closes, and parse.
pub(crate) async fn exchange<S>(
    mut stream: S,
    request: &[u8],
    strictness: Strictness,
) -> Result<IncomingResponse, TransportError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    stream.write_all(request).await.map_err(|e| TransportError::io("write failed", e))?;
    stream.flush().await.map_err(|e| TransportError::io("write failed", e))?;

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.map_err(|e| TransportError::io("read failed", e))?;
    debug!(bytes = raw.len(), "read response");

    parse_response(&raw, strictness)
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
