// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help output specs

use crate::prelude::*;

#[test]
fn dh_help_shows_usage() {
    cli().args(&["--help"]).passes().stdout_has("Usage:");
}

#[test]
fn dh_help_lists_subcommands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("request")
        .stdout_has("ping")
        .stdout_has("demux")
        .stdout_has("resolve");
}

#[test]
fn dh_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2");
}

#[test]
fn resolve_unix_host() {
    cli()
        .args(&["resolve", "unix:///var/run/docker.sock"])
        .passes()
        .stdout_eq("unix /var/run/docker.sock\n");
}

#[test]
fn resolve_rewrites_tcp() {
    cli().args(&["resolve", "tcp://1.2.3.4:2375"]).passes().stdout_eq("tcp http://1.2.3.4:2375\n");
}

#[test]
fn resolve_uses_docker_host_env() {
    cli()
        .env("DOCKER_HOST", "unix:///run/user/1000/docker.sock")
        .args(&["resolve"])
        .passes()
        .stdout_eq("unix /run/user/1000/docker.sock\n");
}

#[test]
fn resolve_rejects_unknown_scheme() {
    cli().args(&["resolve", "ftp://x"]).fails().stderr_has("configuration error");
}
