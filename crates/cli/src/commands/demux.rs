// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `dh demux` - extract text from a captured multiplexed stream

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use super::write_stdout;
use crate::GlobalOpts;

#[derive(Args)]
pub struct DemuxArgs {
    /// File holding the raw stream, or `-` for stdin
    pub file: PathBuf,

    /// Include stderr frames in the output
    #[arg(long)]
    pub stderr: bool,
}

pub fn demux(args: DemuxArgs, opts: &GlobalOpts) -> Result<()> {
    let buffer = if args.file.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin().lock().read_to_end(&mut buf).context("reading stdin")?;
        buf
    } else {
        std::fs::read(&args.file).with_context(|| format!("reading {}", args.file.display()))?
    };

    let text = dh_wire::text_with(&buffer, args.stderr, opts.strictness)?;
    write_stdout(text.as_bytes())
}
