// crates/ciphercore-config/tests/config_defaults.rs
// =============================================================================
// Module: Config Defaults and Core Validation Tests
// Description: Validate default behavior and core config invariants.
// Purpose: Ensure minimal config is valid and critical invariants are enforced.
// =============================================================================
//! ## Overview
//! Config defaults and validation tests for ciphercore-config.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::path::PathBuf;

use ciphercore_config::AuditSinkMode;
use ciphercore_config::CipherCoreConfig;
use ciphercore_config::ConfigError;

type TestResult = Result<(), String>;

fn assert_invalid(result: Result<(), ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(()) => Err("expected invalid config".to_string()),
    }
}

#[test]
fn default_config_validates() -> TestResult {
    let config = CipherCoreConfig::default();
    config.validate().map_err(|err| err.to_string())?;
    Ok(())
}

#[test]
fn defaults_bind_loopback_with_bounded_bodies() {
    let config = CipherCoreConfig::default();
    assert_eq!(config.server.bind, "127.0.0.1:8080");
    assert_eq!(config.server.max_body_bytes, 64 * 1024);
    assert!(!config.chat.auto_reply);
    assert_eq!(config.audit.sink, AuditSinkMode::Stderr);
}

#[test]
fn invalid_bind_is_rejected() -> TestResult {
    let mut config = CipherCoreConfig::default();
    config.server.bind = "not-an-address".to_string();
    assert_invalid(config.validate(), "server.bind")?;
    Ok(())
}

#[test]
fn zero_body_limit_is_rejected() -> TestResult {
    let mut config = CipherCoreConfig::default();
    config.server.max_body_bytes = 0;
    assert_invalid(config.validate(), "server.max_body_bytes must be greater than zero")?;
    Ok(())
}

#[test]
fn oversized_body_limit_is_rejected() -> TestResult {
    let mut config = CipherCoreConfig::default();
    config.server.max_body_bytes = usize::MAX;
    assert_invalid(config.validate(), "server.max_body_bytes must be at most")?;
    Ok(())
}

#[test]
fn file_sink_requires_path() -> TestResult {
    let mut config = CipherCoreConfig::default();
    config.audit.sink = AuditSinkMode::File;
    assert_invalid(config.validate(), "audit.sink=file requires audit.path")?;
    Ok(())
}

#[test]
fn path_without_file_sink_is_rejected() -> TestResult {
    let mut config = CipherCoreConfig::default();
    config.audit.path = Some(PathBuf::from("audit.log"));
    assert_invalid(config.validate(), "audit.path only allowed with audit.sink=file")?;
    Ok(())
}
