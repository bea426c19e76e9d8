// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Multiplexed stream codec for container log/exec/attach output.
//!
//! Wire format per frame: 1-byte stream code + 3 zero bytes + 4-byte length
//! prefix (big-endian) + payload

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod decoder;
mod frame;

pub use decoder::FrameDecoder;
pub use frame::{
    decode, decode_with, encode, split, text, text_with, Demuxed, FrameError, LogFrame, StreamType,
    HEADER_LEN,
};

/// How decoders treat malformed input.
///
/// `Lenient` keeps the daemon's fail-soft behavior: bad data is dropped and
/// decoding returns whatever was recovered. `Strict` reports it as an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strictness {
    #[default]
    Lenient,
    Strict,
}

impl Strictness {
    pub fn is_strict(self) -> bool {
        matches!(self, Strictness::Strict)
    }
}
