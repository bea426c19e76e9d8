// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `dh` - talk HTTP/1.1 to a container daemon over its socket

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod commands;
mod exit_error;

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dh_transport::{env, ClientConfig, ConnectionTarget, Strictness};
use tracing_subscriber::EnvFilter;

use crate::commands::{demux, request, resolve};
use crate::exit_error::ExitError;

#[derive(Parser)]
#[command(
    name = "dh",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("DH_GIT_HASH"), ")"),
    about = "HTTP/1.1 client for container daemon sockets"
)]
struct Cli {
    /// Daemon host: unix:///path, tcp://host:port, or http://host:port
    /// (default: $DH_HOST, $DOCKER_HOST, unix:///var/run/docker.sock)
    #[arg(long, global = true)]
    host: Option<String>,

    /// Request timeout in milliseconds (default: $DH_TIMEOUT_MS or 30000)
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Fail on malformed chunked or multiplexed data instead of dropping it
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send one HTTP request and print the response body
    Request(request::RequestArgs),
    /// Check that the daemon answers `GET /_ping`
    Ping,
    /// Print the text of a captured multiplexed stream
    Demux(demux::DemuxArgs),
    /// Show the connection target a host string resolves to
    Resolve(resolve::ResolveArgs),
}

/// Connection settings shared by all subcommands.
pub struct GlobalOpts {
    pub host: String,
    pub timeout: Duration,
    pub strictness: Strictness,
}

impl GlobalOpts {
    fn from_cli(cli: &Cli) -> Self {
        let strictness = if cli.strict { Strictness::Strict } else { env::strictness() };
        Self {
            host: cli.host.clone().unwrap_or_else(env::host),
            timeout: cli.timeout_ms.map(Duration::from_millis).unwrap_or_else(env::request_timeout),
            strictness,
        }
    }

    pub fn client_config(&self) -> Result<ClientConfig> {
        let target = ConnectionTarget::parse(&self.host)?;
        Ok(ClientConfig::new(target).timeout(self.timeout).strictness(self.strictness))
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("DH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let opts = GlobalOpts::from_cli(&cli);

    match cli.command {
        Commands::Request(args) => request::request(args, &opts).await,
        Commands::Ping => request::ping(&opts).await,
        Commands::Demux(args) => demux::demux(args, &opts),
        Commands::Resolve(args) => resolve::resolve(args, &opts),
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        if let Some(exit) = e.downcast_ref::<ExitError>() {
            if !exit.message.is_empty() {
                eprintln!("error: {}", exit.message);
            }
            std::process::exit(exit.code);
        }
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
