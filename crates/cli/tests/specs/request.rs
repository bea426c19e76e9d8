// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `dh request` and `dh ping` specs against a fake daemon

use crate::prelude::*;

#[test]
fn ping_prints_body() {
    let daemon = FakeDaemon::reply(b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nOK".to_vec());

    cli().args(&["--host", &daemon.host(), "ping"]).passes().stdout_eq("OK\n");

    let request = daemon.request();
    assert!(request.starts_with("GET /_ping HTTP/1.1\r\n"), "{request}");
    assert!(request.contains("Host: localhost\r\n"), "{request}");
    assert!(request.contains("Connection: close\r\n"), "{request}");
}

#[test]
fn request_sends_body_and_headers() {
    let daemon = FakeDaemon::reply(b"HTTP/1.1 201 Created\r\n\r\n{\"Id\":\"abc\"}".to_vec());

    cli()
        .env("DH_HOST", &daemon.host())
        .args(&[
            "request",
            "post",
            "/containers/create",
            "-H",
            "Content-Type: application/json",
            "-d",
            "{\"Image\":\"alpine\"}",
        ])
        .passes()
        .stdout_eq("{\"Id\":\"abc\"}");

    let request = daemon.request();
    assert!(request.starts_with("POST /containers/create HTTP/1.1\r\n"), "{request}");
    assert!(request.contains("Content-Type: application/json\r\n"), "{request}");
    assert!(request.contains("Content-Length: 18\r\n"), "{request}");
}

#[test]
fn request_demultiplexes_log_stream() {
    let mut response =
        b"HTTP/1.1 200 OK\r\nContent-Type: application/vnd.docker.multiplexed-stream\r\n\r\n"
            .to_vec();
    response.extend(frame(1, b"hello\n"));
    response.extend(frame(2, b"oops\n"));
    let daemon = FakeDaemon::reply(response);

    cli()
        .args(&["--host", &daemon.host(), "request", "GET", "/containers/c1/logs?stdout=1&stderr=1"])
        .passes()
        .stdout_eq("hello\n");
}

#[test]
fn request_decodes_chunked_body() {
    let daemon = FakeDaemon::reply(
        b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n4\r\nWiki\r\n5\r\npedia\r\n0\r\n\r\n"
            .to_vec(),
    );

    cli()
        .args(&["--host", &daemon.host(), "request", "GET", "/x"])
        .passes()
        .stdout_eq("Wikipedia");
}

#[test]
fn error_status_exits_nonzero_with_body() {
    let daemon = FakeDaemon::reply(
        b"HTTP/1.1 404 Not Found\r\n\r\n{\"message\":\"No such container: c1\"}".to_vec(),
    );

    cli()
        .args(&["--host", &daemon.host(), "request", "GET", "/containers/c1/json"])
        .fails()
        .code_is(1)
        .stdout_has("No such container")
        .stderr_has("HTTP 404 Not Found");
}

#[test]
fn missing_socket_reports_connection_error() {
    let dir = TempDir::new().unwrap();
    let host = format!("unix://{}", dir.path().join("absent.sock").display());

    cli().args(&["--host", &host, "ping"]).fails().stderr_has("connection error");
}
