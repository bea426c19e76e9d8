// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `dh request` and `dh ping`

use anyhow::{anyhow, Result};
use clap::Args;
use dh_transport::{Client, IncomingResponse, OutgoingRequest};
use tracing::warn;

use super::write_stdout;
use crate::exit_error::ExitError;
use crate::GlobalOpts;

#[derive(Args)]
pub struct RequestArgs {
    /// HTTP method (GET, POST, DELETE, ...)
    pub method: String,

    /// Request path and query, e.g. /containers/json?all=1
    pub path: String,

    /// Request body
    #[arg(short = 'd', long)]
    pub data: Option<String>,

    /// Extra header as "Name: Value" (repeatable)
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Print multiplexed bodies as received instead of extracting their text
    #[arg(long)]
    pub raw: bool,

    /// Include stderr frames when extracting multiplexed text
    #[arg(long)]
    pub stderr: bool,

    /// Print the status line and response headers to stderr
    #[arg(short = 'i', long)]
    pub include: bool,
}

pub(crate) fn parse_header(raw: &str) -> Result<(String, String)> {
    let (name, value) =
        raw.split_once(':').ok_or_else(|| anyhow!("header {:?} is not \"Name: Value\"", raw))?;
    let name = name.trim();
    if name.is_empty() || name.contains(char::is_whitespace) {
        return Err(anyhow!("invalid header name in {:?}", raw));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

pub(crate) fn build_request(args: &RequestArgs) -> OutgoingRequest {
    let mut req = OutgoingRequest::new(args.method.to_ascii_uppercase(), args.path.as_str());
    for (name, value) in &args.headers {
        req = req.header(name.as_str(), value.as_str());
    }
    if let Some(data) = &args.data {
        req = req.body(data.as_bytes());
    }
    req
}

pub async fn request(args: RequestArgs, opts: &GlobalOpts) -> Result<()> {
    let client = Client::new(opts.client_config()?);
    let resp = client.send(&build_request(&args)).await?;

    if args.include {
        print_head(&resp);
    }
    if resp.is_multiplexed() && !args.raw {
        let text = dh_wire::text_with(&resp.body, args.stderr, opts.strictness)?;
        write_stdout(text.as_bytes())?;
    } else {
        write_stdout(&resp.body)?;
    }
    if resp.is_truncated() {
        warn!(
            declared = resp.content_length().unwrap_or_default(),
            received = resp.body.len(),
            "response body shorter than Content-Length"
        );
    }

    check_status(&resp)
}

pub async fn ping(opts: &GlobalOpts) -> Result<()> {
    let client = Client::new(opts.client_config()?);
    let resp = client.get("/_ping").await?;
    check_status(&resp)?;
    println!("{}", resp.text().trim_end());
    Ok(())
}

fn print_head(resp: &IncomingResponse) {
    eprintln!("HTTP/1.1 {} {}", resp.status, resp.reason);
    for (name, value) in resp.headers.iter() {
        eprintln!("{}: {}", name, value);
    }
    eprintln!();
}

fn check_status(resp: &IncomingResponse) -> Result<()> {
    if resp.is_success() {
        return Ok(());
    }
    Err(ExitError::http_status(resp.status, &resp.reason).into())
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
