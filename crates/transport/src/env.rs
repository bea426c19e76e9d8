// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the transport crate.

use std::time::Duration;

use crate::Strictness;

/// Host used when neither `DH_HOST` nor `DOCKER_HOST` is set
pub const DEFAULT_HOST: &str = "unix:///var/run/docker.sock";

/// Per-request timeout when `DH_TIMEOUT_MS` is unset
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Resolve host string: DH_HOST > DOCKER_HOST > unix:///var/run/docker.sock
pub fn host() -> String {
    std::env::var("DH_HOST")
        .ok()
        .filter(|s| !s.is_empty())
        .or_else(|| std::env::var("DOCKER_HOST").ok().filter(|s| !s.is_empty()))
        .unwrap_or_else(|| DEFAULT_HOST.to_string())
}

/// Request timeout covering connect + write + read
pub fn request_timeout() -> Duration {
    std::env::var("DH_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_TIMEOUT)
}

/// `DH_STRICT=1` (or `true`) turns fail-soft decoding into errors.
pub fn strictness() -> Strictness {
    match std::env::var("DH_STRICT").ok().as_deref().map(str::trim) {
        Some("1") => Strictness::Strict,
        Some(v) if v.eq_ignore_ascii_case("true") => Strictness::Strict,
        _ => Strictness::Lenient,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear() {
        for var in ["DH_HOST", "DOCKER_HOST", "DH_TIMEOUT_MS", "DH_STRICT"] {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn defaults_when_unset() {
        clear();
        assert_eq!(host(), DEFAULT_HOST);
        assert_eq!(request_timeout(), DEFAULT_TIMEOUT);
        assert_eq!(strictness(), Strictness::Lenient);
    }

    #[test]
    #[serial]
    fn dh_host_overrides_docker_host() {
        clear();
        std::env::set_var("DOCKER_HOST", "tcp://1.2.3.4:2375");
        assert_eq!(host(), "tcp://1.2.3.4:2375");

        std::env::set_var("DH_HOST", "unix:///tmp/dh.sock");
        assert_eq!(host(), "unix:///tmp/dh.sock");
        clear();
    }

    #[test]
    #[serial]
    fn timeout_and_strictness_from_env() {
        clear();
        std::env::set_var("DH_TIMEOUT_MS", "250");
        std::env::set_var("DH_STRICT", "TRUE");
        assert_eq!(request_timeout(), Duration::from_millis(250));
        assert_eq!(strictness(), Strictness::Strict);

        std::env::set_var("DH_TIMEOUT_MS", "soon");
        assert_eq!(request_timeout(), DEFAULT_TIMEOUT);
        clear();
    }
}
