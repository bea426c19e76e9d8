// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Frame layout, one-shot encode/decode, and text extraction.

use std::fmt;

use thiserror::Error;
use tracing::warn;

use crate::Strictness;

/// Size of the fixed frame header: stream code, 3 bytes padding, u32 length.
pub const HEADER_LEN: usize = 8;

/// Which standard stream a frame belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StreamType {
    Stdin = 0,
    Stdout = 1,
    Stderr = 2,
}

impl StreamType {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(StreamType::Stdin),
            1 => Some(StreamType::Stdout),
            2 => Some(StreamType::Stderr),
            _ => None,
        }
    }
}

impl fmt::Display for StreamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StreamType::Stdin => "stdin",
            StreamType::Stdout => "stdout",
            StreamType::Stderr => "stderr",
        };
        f.write_str(name)
    }
}

/// One decoded frame of a multiplexed stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFrame {
    pub stream: StreamType,
    pub payload: Vec<u8>,
}

impl LogFrame {
    pub fn new(stream: StreamType, payload: impl Into<Vec<u8>>) -> Self {
        Self { stream, payload: payload.into() }
    }

    /// Payload as UTF-8, or `None` if it is not valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.payload).ok()
    }

    pub fn encode(&self) -> Vec<u8> {
        encode(self.stream, &self.payload)
    }
}

/// Errors reported by strict decoding.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("unknown stream type {code} at offset {offset}")]
    UnknownStream { code: u8, offset: usize },

    #[error("frame at offset {offset} declares {declared} bytes but only {available} remain")]
    Truncated { offset: usize, declared: usize, available: usize },

    #[error("{remaining} trailing bytes at offset {offset} do not form a frame header")]
    PartialHeader { offset: usize, remaining: usize },
}

/// Stdout and stderr payloads of a stream, each concatenated in frame order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Demuxed {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// Encode a payload as a single frame.
///
/// Payloads larger than `u32::MAX` bytes cannot be described by one header
/// and are written as consecutive frames of the same stream.
pub fn encode(stream: StreamType, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
    if payload.is_empty() {
        write_header(&mut out, stream, 0);
        return out;
    }
    for chunk in payload.chunks(u32::MAX as usize) {
        write_header(&mut out, stream, chunk.len() as u32);
        out.extend_from_slice(chunk);
    }
    out
}

fn write_header(out: &mut Vec<u8>, stream: StreamType, len: u32) {
    out.push(stream.code());
    out.extend_from_slice(&[0, 0, 0]);
    out.extend_from_slice(&len.to_be_bytes());
}

/// Parsed frame header: raw stream code and declared payload length.
pub(crate) fn read_header(header: &[u8; HEADER_LEN]) -> (u8, usize) {
    let len = u32::from_be_bytes([header[4], header[5], header[6], header[7]]);
    (header[0], len as usize)
}

/// Resolve a stream code, falling back to stdout unless strict.
pub(crate) fn resolve_stream(
    code: u8,
    offset: usize,
    strictness: Strictness,
) -> Result<StreamType, FrameError> {
    match StreamType::from_code(code) {
        Some(stream) => Ok(stream),
        None if strictness.is_strict() => Err(FrameError::UnknownStream { code, offset }),
        None => Ok(StreamType::Stdout),
    }
}

/// Decode every complete frame in `buffer`.
///
/// Never fails: unknown stream codes are read as stdout, zero-length frames
/// are skipped, and an incomplete trailing frame is dropped.
pub fn decode(buffer: &[u8]) -> Vec<LogFrame> {
    match decode_with(buffer, Strictness::Lenient) {
        Ok(frames) => frames,
        // Lenient decoding has no error paths
        Err(_) => Vec::new(),
    }
}

/// Decode every frame in `buffer` under the given strictness.
pub fn decode_with(buffer: &[u8], strictness: Strictness) -> Result<Vec<LogFrame>, FrameError> {
    let mut frames = Vec::new();
    let mut offset = 0;

    while let Some(header) =
        buffer.get(offset..offset + HEADER_LEN).and_then(|h| <&[u8; HEADER_LEN]>::try_from(h).ok())
    {
        let (code, len) = read_header(header);
        let stream = resolve_stream(code, offset, strictness)?;
        let start = offset + HEADER_LEN;

        if len == 0 {
            offset = start;
            continue;
        }

        let available = buffer.len() - start;
        if available < len {
            if strictness.is_strict() {
                return Err(FrameError::Truncated { offset, declared: len, available });
            }
            warn!(offset, declared = len, available, "dropping truncated trailing frame");
            return Ok(frames);
        }

        frames.push(LogFrame::new(stream, &buffer[start..start + len]));
        offset = start + len;
    }

    let remaining = buffer.len() - offset;
    if remaining > 0 && strictness.is_strict() {
        return Err(FrameError::PartialHeader { offset, remaining });
    }
    Ok(frames)
}

/// Concatenated UTF-8 text of the stdout frames, plus stderr if requested.
///
/// Frames whose payload is not valid UTF-8 are left out entirely.
pub fn text(buffer: &[u8], include_stderr: bool) -> String {
    text_with(buffer, include_stderr, Strictness::Lenient).unwrap_or_default()
}

/// [`text`] with strict framing: malformed frames are an error rather than
/// being dropped. Non-UTF-8 payloads are still skipped.
pub fn text_with(
    buffer: &[u8],
    include_stderr: bool,
    strictness: Strictness,
) -> Result<String, FrameError> {
    let mut out = String::new();
    for frame in decode_with(buffer, strictness)? {
        let wanted = match frame.stream {
            StreamType::Stdout => true,
            StreamType::Stderr => include_stderr,
            StreamType::Stdin => false,
        };
        if !wanted {
            continue;
        }
        match frame.as_str() {
            Some(s) => out.push_str(s),
            None => {
                warn!(stream = %frame.stream, len = frame.payload.len(), "skipping non-UTF-8 frame")
            }
        }
    }
    Ok(out)
}

/// Separate a stream into raw stdout and stderr bytes. Stdin frames are
/// discarded.
pub fn split(buffer: &[u8]) -> Demuxed {
    let mut demuxed = Demuxed::default();
    for frame in decode(buffer) {
        match frame.stream {
            StreamType::Stdout => demuxed.stdout.extend_from_slice(&frame.payload),
            StreamType::Stderr => demuxed.stderr.extend_from_slice(&frame.payload),
            StreamType::Stdin => {}
        }
    }
    demuxed
}

#[cfg(test)]
#[path = "frame_tests.rs"]
mod tests;
