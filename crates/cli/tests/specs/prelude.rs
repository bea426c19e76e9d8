// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Helpers shared by the CLI specs.

use std::io::{Read, Write};
use std::os::unix::net::UnixListener;
use std::path::PathBuf;
use std::thread::JoinHandle;

pub use tempfile::TempDir;

/// Builder for one `dh` invocation.
pub struct Cli {
    cmd: assert_cmd::Command,
}

pub fn cli() -> Cli {
    let mut cmd = assert_cmd::Command::cargo_bin("dh").unwrap();
    for var in ["DH_HOST", "DOCKER_HOST", "DH_TIMEOUT_MS", "DH_STRICT", "DH_LOG"] {
        cmd.env_remove(var);
    }
    Cli { cmd }
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn stdin(mut self, bytes: Vec<u8>) -> Self {
        self.cmd.write_stdin(bytes);
        self
    }

    pub fn passes(mut self) -> Output {
        let out = self.cmd.output().unwrap();
        let output = Output::from(out);
        assert!(output.success, "expected success, got:\n{}", output);
        output
    }

    pub fn fails(mut self) -> Output {
        let out = self.cmd.output().unwrap();
        let output = Output::from(out);
        assert!(!output.success, "expected failure, got:\n{}", output);
        output
    }
}

pub struct Output {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl From<std::process::Output> for Output {
    fn from(out: std::process::Output) -> Self {
        Self {
            success: out.status.success(),
            code: out.status.code(),
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        }
    }
}

impl std::fmt::Display for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "exit: {:?}\nstdout:\n{}\nstderr:\n{}", self.code, self.stdout, self.stderr)
    }
}

impl Output {
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout.contains(needle), "stdout missing {:?}:\n{}", needle, self);
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr.contains(needle), "stderr missing {:?}:\n{}", needle, self);
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        assert_eq!(self.stdout, expected, "{}", self);
        self
    }

    pub fn code_is(self, code: i32) -> Self {
        assert_eq!(self.code, Some(code), "{}", self);
        self
    }
}

/// A fake daemon that answers a single request with a canned response.
pub struct FakeDaemon {
    _dir: TempDir,
    pub path: PathBuf,
    handle: JoinHandle<Vec<u8>>,
}

impl FakeDaemon {
    pub fn reply(response: Vec<u8>) -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("docker.sock");
        let listener = UnixListener::bind(&path).unwrap();
        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut chunk).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
            }
            stream.write_all(&response).unwrap();
            request
        });
        Self { _dir: dir, path, handle }
    }

    pub fn host(&self) -> String {
        format!("unix://{}", self.path.display())
    }

    /// Raw request bytes the daemon received (headers and whatever body
    /// arrived with them).
    pub fn request(self) -> String {
        String::from_utf8_lossy(&self.handle.join().unwrap()).into_owned()
    }
}

/// Encode one multiplexed frame.
pub fn frame(stream: u8, payload: &[u8]) -> Vec<u8> {
    let mut out = vec![stream, 0, 0, 0];
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(payload);
    out
}
