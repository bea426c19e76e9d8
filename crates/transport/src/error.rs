// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

use thiserror::Error;

use crate::chunked::ChunkedError;

/// Errors from resolving a target or running an HTTP exchange.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Unusable host string, request target, or unsupported scheme
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Socket could not be opened, or I/O on it failed
    #[error("connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// The peer's reply is not a well-formed HTTP/1.1 response
    #[error("protocol error: {message}")]
    Protocol { message: String },

    #[error("request timed out after {after:?}")]
    Timeout { after: Duration },
}

/// Discriminant of [`TransportError`], for callers that branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    Connection,
    Protocol,
    Timeout,
}

impl TransportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TransportError::Configuration { .. } => ErrorKind::Configuration,
            TransportError::Connection { .. } => ErrorKind::Connection,
            TransportError::Protocol { .. } => ErrorKind::Protocol,
            TransportError::Timeout { .. } => ErrorKind::Timeout,
        }
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        TransportError::Configuration { message: message.into() }
    }

    pub(crate) fn protocol(message: impl Into<String>) -> Self {
        TransportError::Protocol { message: message.into() }
    }

    pub(crate) fn io(context: &str, err: std::io::Error) -> Self {
        TransportError::Connection { message: format!("{}: {}", context, err), source: Some(err) }
    }
}

impl From<ChunkedError> for TransportError {
    fn from(err: ChunkedError) -> Self {
        TransportError::protocol(err.to_string())
    }
}
