// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `dh resolve` - show what a host string resolves to

use anyhow::Result;
use clap::Args;
use dh_transport::ConnectionTarget;

use crate::GlobalOpts;

#[derive(Args)]
pub struct ResolveArgs {
    /// Host string to resolve (default: the configured host)
    pub host: Option<String>,
}

pub fn resolve(args: ResolveArgs, opts: &GlobalOpts) -> Result<()> {
    let raw = args.host.as_deref().unwrap_or(&opts.host);
    println!("{}", describe(&ConnectionTarget::parse(raw)?));
    Ok(())
}

fn describe(target: &ConnectionTarget) -> String {
    match target {
        ConnectionTarget::UnixSocket { path } => format!("unix {}", path.display()),
        ConnectionTarget::Tcp { base_url } => format!("tcp {}", base_url),
    }
}
