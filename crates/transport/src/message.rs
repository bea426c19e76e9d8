// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request and response values exchanged with the transport.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{HeaderMap, TransportError};

/// Content type the daemon uses for multiplexed stdout/stderr bodies.
pub const MULTIPLEXED_STREAM_CONTENT_TYPE: &str = "application/vnd.docker.multiplexed-stream";

/// An HTTP request, independent of how it reaches the daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingRequest {
    pub method: String,
    /// Origin-form target: path plus optional `?query`
    pub target: String,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl OutgoingRequest {
    pub fn new(method: impl Into<String>, target: impl Into<String>) -> Self {
        Self { method: method.into(), target: target.into(), headers: HeaderMap::new(), body: None }
    }

    pub fn get(target: impl Into<String>) -> Self {
        Self::new("GET", target)
    }

    pub fn post(target: impl Into<String>) -> Self {
        Self::new("POST", target)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set a JSON body and matching `Content-Type`.
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self, TransportError> {
        let body = serde_json::to_vec(value).map_err(|e| {
            TransportError::configuration(format!("request body is not serializable: {}", e))
        })?;
        Ok(self.header("Content-Type", "application/json").body(body))
    }

    /// Body bytes, treating an absent body as empty.
    pub fn body_bytes(&self) -> &[u8] {
        self.body.as_deref().unwrap_or_default()
    }
}

/// A parsed HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingResponse {
    pub status: u16,
    pub reason: String,
    pub headers: HeaderMap,
    /// Body after transfer decoding
    pub body: Vec<u8>,
}

impl IncomingResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// `Content-Length` as declared by the peer, if present and numeric.
    pub fn content_length(&self) -> Option<usize> {
        self.header("Content-Length").and_then(|v| v.trim().parse().ok())
    }

    /// Whether the body is shorter than the declared `Content-Length`.
    ///
    /// The transport hands short bodies through unchanged; callers that care
    /// about truncation check here.
    pub fn is_truncated(&self) -> bool {
        self.content_length().is_some_and(|declared| self.body.len() < declared)
    }

    pub fn is_chunked(&self) -> bool {
        self.header("Transfer-Encoding")
            .is_some_and(|v| v.to_ascii_lowercase().contains("chunked"))
    }

    pub fn is_multiplexed(&self) -> bool {
        self.header("Content-Type")
            .is_some_and(|v| v.trim().starts_with(MULTIPLEXED_STREAM_CONTENT_TYPE))
    }

    /// Body as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, TransportError> {
        serde_json::from_slice(&self.body)
            .map_err(|e| TransportError::protocol(format!("invalid JSON body: {}", e)))
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
