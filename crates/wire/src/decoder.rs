// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Incremental frame decoder for streams that arrive in pieces.

use tracing::warn;

use crate::frame::{read_header, resolve_stream, FrameError, LogFrame, HEADER_LEN};
use crate::Strictness;

/// Buffers partial input and yields frames once they are complete.
///
/// Feeding a stream through `push` in any split yields the same frames as
/// [`decode`](crate::decode) over the whole stream.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buf: Vec<u8>,
    /// Read position within `buf`
    pos: usize,
    /// Bytes consumed before `buf[0]`, for error offsets
    consumed: usize,
    strictness: Strictness,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strictness(strictness: Strictness) -> Self {
        Self { strictness, ..Self::default() }
    }

    pub fn push(&mut self, bytes: &[u8]) {
        if self.pos > 0 && self.pos >= self.buf.len() / 2 {
            self.buf.drain(..self.pos);
            self.consumed += self.pos;
            self.pos = 0;
        }
        self.buf.extend_from_slice(bytes);
    }

    /// Bytes received but not yet returned as frames.
    pub fn pending(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Next complete frame, or `None` if more input is needed.
    pub fn next_frame(&mut self) -> Result<Option<LogFrame>, FrameError> {
        loop {
            let Some(header) = self
                .buf
                .get(self.pos..self.pos + HEADER_LEN)
                .and_then(|h| <&[u8; HEADER_LEN]>::try_from(h).ok())
            else {
                return Ok(None);
            };
            let (code, len) = read_header(header);
            let stream = resolve_stream(code, self.consumed + self.pos, self.strictness)?;
            let start = self.pos + HEADER_LEN;

            if len == 0 {
                self.pos = start;
                continue;
            }
            if self.buf.len() - start < len {
                return Ok(None);
            }

            let frame = LogFrame::new(stream, &self.buf[start..start + len]);
            self.pos = start + len;
            return Ok(Some(frame));
        }
    }

    /// Signal end of input and return the complete frames not yet taken with
    /// `next_frame`.
    ///
    /// Leftover bytes of an incomplete frame are an error in strict mode and
    /// are dropped otherwise.
    pub fn finish(mut self) -> Result<Vec<LogFrame>, FrameError> {
        let mut frames = Vec::new();
        while let Some(frame) = self.next_frame()? {
            frames.push(frame);
        }

        let remaining = self.pending();
        if remaining == 0 {
            return Ok(frames);
        }
        let offset = self.consumed + self.pos;
        if !self.strictness.is_strict() {
            warn!(offset, remaining, "dropping incomplete trailing frame");
            return Ok(frames);
        }
        if remaining < HEADER_LEN {
            return Err(FrameError::PartialHeader { offset, remaining });
        }
        let declared = self
            .buf
            .get(self.pos..self.pos + HEADER_LEN)
            .and_then(|h| <&[u8; HEADER_LEN]>::try_from(h).ok())
            .map(|h| read_header(h).1)
            .unwrap_or_default();
        Err(FrameError::Truncated { offset, declared, available: remaining - HEADER_LEN })
    }
}

#[cfg(test)]
#[path = "decoder_tests.rs"]
mod tests;
