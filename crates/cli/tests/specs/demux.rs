// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `dh demux` specs

use crate::prelude::*;

fn sample() -> Vec<u8> {
    let mut buf = frame(1, b"hello");
    buf.extend(frame(2, b"oops"));
    buf
}

#[test]
fn demux_stdin_prints_stdout_frames() {
    cli().args(&["demux", "-"]).stdin(sample()).passes().stdout_eq("hello");
}

#[test]
fn demux_with_stderr_includes_both_in_order() {
    cli().args(&["demux", "--stderr", "-"]).stdin(sample()).passes().stdout_eq("hellooops");
}

#[test]
fn demux_reads_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("logs.bin");
    std::fs::write(&path, sample()).unwrap();

    cli().args(&["demux", path.to_str().unwrap()]).passes().stdout_eq("hello");
}

#[test]
fn demux_drops_truncated_frame_by_default() {
    let mut buf = frame(1, b"kept");
    buf.extend_from_slice(&[1, 0, 0, 0, 0, 0, 0, 10, b'a', b'b', b'c']);

    cli().args(&["demux", "-"]).stdin(buf).passes().stdout_eq("kept");
}

#[test]
fn strict_demux_fails_on_truncated_frame() {
    let mut buf = frame(1, b"kept");
    buf.extend_from_slice(&[1, 0, 0, 0, 0, 0, 0, 10, b'a', b'b', b'c']);

    cli().args(&["--strict", "demux", "-"]).stdin(buf).fails().stderr_has("declares 10 bytes");
}

#[test]
fn demux_missing_file_fails() {
    cli().args(&["demux", "/nonexistent/logs.bin"]).fails().stderr_has("reading /nonexistent");
}
