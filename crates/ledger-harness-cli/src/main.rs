// crates/ledger-harness-cli/src/main.rs
// ============================================================================
// Module: Ledger Harness CLI Entry Point
// Description: Command dispatcher for harness runs and config utilities.
// Purpose: Run the multi-signature scenario and report a machine-readable summary.
// Dependencies: clap, ledger-harness-cli, ledger-harness-config, serde_json, thiserror
// ============================================================================

//! ## Overview
//! `ledger-harness run` executes the end-to-end scenario against a fresh
//! simulated ledger and prints a JSON summary on stdout. The exit code is
//! success only when every step matched its expectation. Progress events go
//! to the configured sink, stderr by default.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use ledger_harness_cli::runner::RunOptions;
use ledger_harness_cli::runner::run_scenario;
use ledger_harness_config::LedgerHarnessConfig;
use ledger_harness_config::config_toml_example;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "ledger-harness", version, disable_help_subcommand = true)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the end-to-end multi-signature scenario.
    Run(RunCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Arguments for the `run` command.
#[derive(Args, Debug)]
struct RunCommand {
    /// Optional config file path (defaults to ledger-harness.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Fund the issuer from the funding source instead of the faucet.
    #[arg(long, action = ArgAction::SetTrue)]
    no_faucet: bool,
    /// Append progress events to this file instead of the configured sink.
    #[arg(long, value_name = "PATH")]
    report_file: Option<PathBuf>,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a configuration file.
    Validate(ConfigValidateCommand),
    /// Print the canonical example configuration.
    Example,
}

/// Arguments for config validation.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to ledger-harness.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Commands::Run(command) => command_run(command),
        Commands::Config {
            command,
        } => command_config(command),
    }
}

// ============================================================================
// SECTION: Run Command
// ============================================================================

/// Executes the `run` command.
fn command_run(command: RunCommand) -> CliResult<ExitCode> {
    let config = LedgerHarnessConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(format!("failed to load config: {err}")))?;
    let options = RunOptions {
        no_faucet: command.no_faucet,
        report_file: command.report_file,
        run_id: None,
    };
    let summary = run_scenario(&config, &options)
        .map_err(|err| CliError::new(format!("run aborted: {err}")))?;
    let payload = serde_json::to_string_pretty(&summary)
        .map_err(|err| CliError::new(format!("failed to serialize summary: {err}")))?;
    print_line(&payload)?;
    Ok(if summary.passed { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => {
            LedgerHarnessConfig::load(command.config.as_deref())
                .map_err(|err| CliError::new(format!("failed to load config: {err}")))?;
            print_line("config ok")?;
        }
        ConfigCommand::Example => print_line(config_toml_example().trim_end())?,
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Prints one line of command output on stdout.
fn print_line(message: &str) -> CliResult<()> {
    writeln!(std::io::stdout().lock(), "{message}")
        .map_err(|err| CliError::new(format!("failed to write to stdout: {err}")))
}

/// Reports `message` on stderr and fails the process.
fn emit_error(message: &str) -> ExitCode {
    let _ = writeln!(std::io::stderr().lock(), "{message}");
    ExitCode::FAILURE
}
