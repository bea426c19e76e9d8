// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Chunked transfer-encoding decoder (RFC 9112 §7.1).
//!
//! Operates on a body that has already been read in full; there is no
//! incremental mode.

use thiserror::Error;
use tracing::warn;

use crate::Strictness;

/// Malformed chunked body, reported in strict mode.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChunkedError {
    #[error("chunk size line at offset {offset} is not terminated by CRLF")]
    UnterminatedSizeLine { offset: usize },

    #[error("invalid chunk size {line:?} at offset {offset}")]
    InvalidSize { offset: usize, line: String },

    #[error("chunk at offset {offset} declares {declared} bytes but only {available} remain")]
    Truncated { offset: usize, declared: usize, available: usize },

    #[error("chunk data at offset {offset} is not followed by CRLF")]
    MissingDataTerminator { offset: usize },

    #[error("body ended without a zero-size last chunk")]
    MissingLastChunk,
}

/// Decode a chunked body, returning whatever decodes cleanly.
///
/// Decoding stops at the first malformed size line or short chunk and the
/// bytes decoded up to that point are returned.
pub fn decode(body: &[u8]) -> Vec<u8> {
    match decode_with(body, Strictness::Lenient) {
        Ok(out) => out,
        // Lenient decoding has no error paths
        Err(_) => Vec::new(),
    }
}

pub fn decode_with(body: &[u8], strictness: Strictness) -> Result<Vec<u8>, ChunkedError> {
    let mut out = Vec::new();
    let mut pos = 0;

    loop {
        if pos >= body.len() {
            if strictness.is_strict() {
                return Err(ChunkedError::MissingLastChunk);
            }
            return Ok(out);
        }

        let Some(line_len) = find_crlf(&body[pos..]) else {
            return stop(out, strictness, ChunkedError::UnterminatedSizeLine { offset: pos });
        };
        let line = &body[pos..pos + line_len];
        let Some(size) = parse_size(line) else {
            let line = String::from_utf8_lossy(line).into_owned();
            return stop(out, strictness, ChunkedError::InvalidSize { offset: pos, line });
        };

        // Trailer section after the last chunk is not interpreted
        if size == 0 {
            return Ok(out);
        }

        let data_start = pos + line_len + 2;
        let available = body.len() - data_start;
        if available < size {
            let err = ChunkedError::Truncated { offset: pos, declared: size, available };
            if strictness.is_strict() {
                return Err(err);
            }
            out.extend_from_slice(&body[data_start..]);
            return stop(out, strictness, err);
        }
        out.extend_from_slice(&body[data_start..data_start + size]);

        let data_end = data_start + size;
        if body.get(data_end..data_end + 2) != Some(b"\r\n".as_slice()) {
            return stop(out, strictness, ChunkedError::MissingDataTerminator { offset: data_end });
        }
        pos = data_end + 2;
    }
}

/// End decoding: an error when strict, the partial output otherwise.
fn stop(out: Vec<u8>, strictness: Strictness, err: ChunkedError) -> Result<Vec<u8>, ChunkedError> {
    if strictness.is_strict() {
        return Err(err);
    }
    warn!(decoded = out.len(), "stopping chunked decode early: {}", err);
    Ok(out)
}

fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\r\n")
}

/// Hex chunk size, ignoring any `;extension`.
fn parse_size(line: &[u8]) -> Option<usize> {
    let line = std::str::from_utf8(line).ok()?;
    let digits = line.split(';').next().unwrap_or_default().trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    usize::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
#[path = "chunked_tests.rs"]
mod tests;
