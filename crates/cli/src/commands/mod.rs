// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod demux;
pub mod request;
pub mod resolve;

use std::io::Write;

use anyhow::Result;

/// Write raw bytes to stdout, flushing so output ordering with stderr holds.
pub(crate) fn write_stdout(bytes: &[u8]) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(bytes)?;
    stdout.flush()?;
    Ok(())
}
