// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP/1.1 client transport for a container daemon's Unix socket.
//!
//! One request per connection: the request is sent with `Connection: close`
//! and the response is read until the daemon closes the socket.
//!
//! # Module layout
//!
//! - [`host`] - host string → [`ConnectionTarget`]
//! - [`chunked`] - chunked transfer-encoding decoder
//! - [`http`] - request serialization and response parsing
//! - [`client`] - [`Client`] that runs one exchange per call
//! - [`env`] - environment-derived defaults

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod chunked;
pub mod client;
pub mod env;
mod error;
mod headers;
pub mod host;
pub mod http;
mod message;

pub use client::{Client, ClientConfig};
pub use dh_wire::Strictness;
pub use error::{ErrorKind, TransportError};
pub use headers::HeaderMap;
pub use host::ConnectionTarget;
pub use message::{IncomingResponse, OutgoingRequest, MULTIPLEXED_STREAM_CONTENT_TYPE};
