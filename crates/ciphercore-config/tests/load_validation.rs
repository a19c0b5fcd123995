// crates/ciphercore-config/tests/load_validation.rs
// =============================================================================
// Module: Config Load Tests
// Description: Validate TOML loading, parse failures, and fail-closed limits.
// Purpose: Ensure on-disk configuration resolves and fails closed correctly.
// =============================================================================
//! ## Overview
//! Loads configuration files from temporary directories and checks parse,
//! validation, and missing-file behavior.

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

use std::fs;
use std::path::Path;

use ciphercore_config::AuditSinkMode;
use ciphercore_config::CipherCoreConfig;
use ciphercore_config::ConfigError;

fn write_config(dir: &Path, content: &str) -> std::path::PathBuf {
    let path = dir.join("ciphercore.toml");
    fs::write(&path, content).expect("write config");
    path
}

#[test]
fn full_config_round_trips() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(
        dir.path(),
        r#"
[server]
bind = "0.0.0.0:9000"
max_body_bytes = 32768

[chat]
auto_reply = true

[audit]
sink = "file"
path = "requests.log"
"#,
    );
    let config = CipherCoreConfig::load(Some(&path)).expect("load config");
    assert_eq!(config.server.bind, "0.0.0.0:9000");
    assert_eq!(config.server.max_body_bytes, 32_768);
    assert!(config.chat.auto_reply);
    assert_eq!(config.audit.sink, AuditSinkMode::File);
    assert_eq!(config.audit.path.as_deref(), Some(Path::new("requests.log")));
}

#[test]
fn partial_config_fills_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(dir.path(), "[server]\nbind = \"127.0.0.1:3000\"\n");
    let config = CipherCoreConfig::load(Some(&path)).expect("load config");
    assert_eq!(config.server.bind, "127.0.0.1:3000");
    assert_eq!(config.server.max_body_bytes, 64 * 1024);
    assert!(!config.chat.auto_reply);
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(dir.path(), "[server\nbind = ");
    let result = CipherCoreConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn invalid_settings_fail_closed_on_load() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(dir.path(), "[server]\nmax_body_bytes = 0\n");
    let result = CipherCoreConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn explicit_missing_path_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.toml");
    let result = CipherCoreConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}
