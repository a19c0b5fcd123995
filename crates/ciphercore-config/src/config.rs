// crates/ciphercore-config/src/config.rs
// ============================================================================
// Module: CipherCore Configuration
// Description: Configuration loading and validation for the submissions backend.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size limits. Missing
//! files fall back to defaults; an invalid file fails closed so the server
//! never starts on a half-understood configuration. Resolution order for the
//! config path: explicit argument, then the `CIPHERCORE_CONFIG` environment
//! variable, then `ciphercore.toml` in the working directory.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "ciphercore.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "CIPHERCORE_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Default server bind address.
pub(crate) const DEFAULT_BIND: &str = "127.0.0.1:8080";
/// Default maximum request body size in bytes.
pub(crate) const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;
/// Maximum allowed request body size in bytes.
pub(crate) const MAX_MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// CipherCore submissions backend configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CipherCoreConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Live-chat configuration.
    #[serde(default)]
    pub chat: ChatConfig,
    /// Request audit configuration.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl CipherCoreConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// A missing file yields the default configuration; any other failure is
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when reading, parsing, or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path);
        if !resolved.exists() {
            if path.is_some() || env::var_os(CONFIG_ENV_VAR).is_some() {
                return Err(ConfigError::Io(format!(
                    "config file not found: {}",
                    resolved.display()
                )));
            }
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.audit.validate()?;
        Ok(())
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address the server binds to.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Maximum allowed request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerConfig {
    /// Validates the server section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the bind address or body limit is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bind.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::Invalid(format!(
                "server.bind must be a socket address: {}",
                self.bind
            )));
        }
        if self.max_body_bytes == 0 {
            return Err(ConfigError::Invalid(
                "server.max_body_bytes must be greater than zero".to_string(),
            ));
        }
        if self.max_body_bytes > MAX_MAX_BODY_BYTES {
            return Err(ConfigError::Invalid(format!(
                "server.max_body_bytes must be at most {MAX_MAX_BODY_BYTES}"
            )));
        }
        Ok(())
    }
}

/// Live-chat configuration.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ChatConfig {
    /// Records a canned keyword-matched reply after each visitor message
    /// when enabled. Off by default.
    #[serde(default)]
    pub auto_reply: bool,
}

/// Request audit sink selection.
///
/// # Invariants
/// - Variants are stable for serialization and configuration matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkMode {
    /// JSON lines to stderr.
    #[default]
    Stderr,
    /// JSON lines appended to a file.
    File,
    /// Discard audit events.
    None,
}

/// Request audit configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditConfig {
    /// Selected audit sink.
    #[serde(default)]
    pub sink: AuditSinkMode,
    /// Audit log path, required when `sink = "file"`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl AuditConfig {
    /// Validates the audit section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the sink/path combination is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.sink {
            AuditSinkMode::File => {
                if self.path.is_none() {
                    return Err(ConfigError::Invalid(
                        "audit.sink=file requires audit.path".to_string(),
                    ));
                }
            }
            AuditSinkMode::Stderr | AuditSinkMode::None => {
                if self.path.is_some() {
                    return Err(ConfigError::Invalid(
                        "audit.path only allowed with audit.sink=file".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Returns the default bind address.
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

/// Returns the default maximum body size.
const fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

// ============================================================================
// SECTION: Path Resolution
// ============================================================================

/// Resolves the configuration path from argument, environment, or default.
fn resolve_path(path: Option<&Path>) -> PathBuf {
    if let Some(path) = path {
        return path.to_path_buf();
    }
    if let Some(env_path) = env::var_os(CONFIG_ENV_VAR) {
        return PathBuf::from(env_path);
    }
    PathBuf::from(DEFAULT_CONFIG_NAME)
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("config io error: {0}")]
    Io(String),
    /// Configuration file could not be parsed.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Configuration is internally inconsistent or out of bounds.
    #[error("config invalid: {0}")]
    Invalid(String),
}
