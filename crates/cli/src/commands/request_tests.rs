// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn args(method: &str, path: &str) -> RequestArgs {
    RequestArgs {
        method: method.to_string(),
        path: path.to_string(),
        data: None,
        headers: Vec::new(),
        raw: false,
        stderr: false,
        include: false,
    }
}

#[yare::parameterized(
    simple        = { "Accept: */*",              "Accept",          "*/*" },
    no_space      = { "X-Registry-Auth:e30=",     "X-Registry-Auth", "e30=" },
    colon_in_val  = { "X-Url: http://a:1",        "X-Url",           "http://a:1" },
    empty_value   = { "X-Empty:",                 "X-Empty",         "" },
)]
fn parse_header_ok(raw: &str, name: &str, value: &str) {
    assert_eq!(parse_header(raw).unwrap(), (name.to_string(), value.to_string()));
}

#[yare::parameterized(
    no_colon    = { "Accept */*" },
    empty_name  = { ": value" },
    spaced_name = { "Bad Name: x" },
)]
fn parse_header_rejects(raw: &str) {
    assert!(parse_header(raw).is_err());
}

#[test]
fn build_request_uppercases_method_and_sets_body() {
    let mut a = args("post", "/containers/create");
    a.data = Some("{}".to_string());
    a.headers.push(("Content-Type".to_string(), "application/json".to_string()));

    let req = build_request(&a);

    assert_eq!(req.method, "POST");
    assert_eq!(req.target, "/containers/create");
    assert_eq!(req.body_bytes(), b"{}");
    assert_eq!(req.headers.get("content-type"), Some("application/json"));
}

#[test]
fn build_request_without_data_has_no_body() {
    assert_eq!(build_request(&args("GET", "/_ping")).body, None);
}

#[test]
fn http_status_error_carries_exit_code() {
    let err = ExitError::http_status(404, "Not Found");
    assert_eq!(err.code, 1);
    assert_eq!(err.message, "daemon returned HTTP 404 Not Found");
    assert_eq!(ExitError::http_status(500, "").message, "daemon returned HTTP 500");
}
