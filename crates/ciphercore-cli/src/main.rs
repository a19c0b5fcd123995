// crates/ciphercore-cli/src/main.rs
// ============================================================================
// Module: CipherCore CLI Entry Point
// Description: Command dispatcher for the submissions backend.
// Purpose: Load configuration and run the API server from the command line.
// Dependencies: ciphercore-api, ciphercore-config, clap, thiserror, tokio
// ============================================================================

//! ## Overview
//! The `ciphercore` binary wires configuration into the API server: `serve`
//! loads the TOML config (explicit path, `CIPHERCORE_CONFIG`, or the default
//! file), builds the server, and runs it on a multi-threaded tokio runtime.
//! Failures map to a non-zero exit code with a single stderr line.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use ciphercore_api::ApiServer;
use ciphercore_api::ApiServerError;
use ciphercore_config::CipherCoreConfig;
use ciphercore_config::ConfigError;
use clap::ArgAction;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "ciphercore", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the submissions API server.
    Serve {
        /// Path to the configuration file.
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI errors.
#[derive(Debug, Error)]
enum CliError {
    /// Configuration loading or validation failed.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Server construction or serving failed.
    #[error(transparent)]
    Server(#[from] ApiServerError),
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.show_version {
        print_version();
        return ExitCode::SUCCESS;
    }
    match cli.command {
        Some(Commands::Serve {
            config,
        }) => match serve(config.as_deref()).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                report_error(&err);
                ExitCode::FAILURE
            }
        },
        None => {
            print_usage();
            ExitCode::FAILURE
        }
    }
}

/// Loads configuration and runs the API server to completion.
async fn serve(config_path: Option<&Path>) -> Result<(), CliError> {
    let config = CipherCoreConfig::load(config_path)?;
    let server = ApiServer::from_config(config)?;
    server.serve().await?;
    Ok(())
}

// ============================================================================
// SECTION: User-Facing Output
// ============================================================================

/// Prints the crate version to stdout.
#[allow(clippy::print_stdout, reason = "User-facing CLI version output.")]
fn print_version() {
    println!("ciphercore {}", env!("CARGO_PKG_VERSION"));
}

/// Prints command usage to stderr when no subcommand is given.
#[allow(clippy::print_stderr, reason = "User-facing CLI usage output.")]
fn print_usage() {
    let mut command = Cli::command();
    let help = command.render_long_help();
    eprintln!("{help}");
}

/// Prints a failure line to stderr.
#[allow(clippy::print_stderr, reason = "User-facing CLI error output.")]
fn report_error(err: &CliError) {
    eprintln!("ciphercore: {err}");
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
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

    use clap::CommandFactory;
    use clap::Parser;

    use super::Cli;
    use super::Commands;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_accepts_a_config_path() {
        let cli = Cli::parse_from(["ciphercore", "serve", "--config", "ciphercore.toml"]);
        match cli.command {
            Some(Commands::Serve {
                config,
            }) => {
                assert_eq!(config.as_deref(), Some(std::path::Path::new("ciphercore.toml")));
            }
            _ => panic!("expected serve command"),
        }
    }

    #[test]
    fn version_flag_parses_without_a_subcommand() {
        let cli = Cli::parse_from(["ciphercore", "--version"]);
        assert!(cli.show_version);
        assert!(cli.command.is_none());
    }
}
