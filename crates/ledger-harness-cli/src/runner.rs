// crates/ledger-harness-cli/src/runner.rs
// ============================================================================
// Module: Harness Runner
// Description: Builds the run environment from configuration and executes it.
// Purpose: Single entry point for `ledger-harness run` and system tests.
// Dependencies: ledger-harness-config, ledger-harness-core, ledger-harness-faucet, ledger-harness-sim, rand
// ============================================================================

//! ## Overview
//! A run owns a fresh simulated ledger. The funding source is credited at
//! genesis, a faucet is attached according to `[faucet]`, and events go to the
//! sink named by `[reporter]` unless the caller overrides it with a file.
//! Scenario divergence is not a runner error: it is reported in
//! [`RunSummary::failure`] with `passed = false`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use ledger_harness_config::FaucetKind;
use ledger_harness_config::LedgerHarnessConfig;
use ledger_harness_config::ReporterConfig;
use ledger_harness_config::ReporterSink;
use ledger_harness_core::Address;
use ledger_harness_core::Amount;
use ledger_harness_core::EndToEndScenario;
use ledger_harness_core::Faucet;
use ledger_harness_core::FileReporter;
use ledger_harness_core::HarnessReporter;
use ledger_harness_core::KeyPair;
use ledger_harness_core::LedgerError;
use ledger_harness_core::NoopReporter;
use ledger_harness_core::RunContext;
use ledger_harness_core::ScenarioReport;
use ledger_harness_core::StderrReporter;
use ledger_harness_faucet::FriendbotFaucet;
use ledger_harness_sim::SimulatedFaucet;
use ledger_harness_sim::SimulatedLedger;
use ledger_harness_sim::derive_key_pair;
use rand::RngCore;
use rand::rngs::OsRng;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Random bytes in a run identifier.
const RUN_ID_BYTES: usize = 8;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Command-line overrides applied on top of the loaded configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Skip the faucet even when configured.
    pub no_faucet: bool,
    /// Append events to this file instead of the configured sink.
    pub report_file: Option<PathBuf>,
    /// Fixed run identifier; a random one is generated when unset.
    pub run_id: Option<String>,
}

/// Machine-readable outcome of one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Run identifier.
    pub run_id: String,
    /// True when every step matched its expectation.
    pub passed: bool,
    /// Funding source address.
    pub funding_source: Address,
    /// Transactions that reached authorization on the ledger.
    pub transactions: usize,
    /// Fees collected by the ledger during the run.
    pub fees_collected: Amount,
    /// Scenario report when the run passed.
    pub report: Option<ScenarioReport>,
    /// First divergence when the run failed.
    pub failure: Option<String>,
}

/// Errors that stop a run before the scenario can start.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// Configured funding source seed is unusable.
    #[error("funding source seed rejected: {0}")]
    FundingSource(String),
    /// Ledger setup failed.
    #[error("ledger setup failed: {0}")]
    Ledger(#[from] LedgerError),
    /// Faucet setup failed.
    #[error("faucet setup failed: {0}")]
    Faucet(String),
    /// Event sink could not be opened.
    #[error("reporter setup failed for {path}: {error}")]
    Reporter {
        /// Report file path.
        path: String,
        /// Underlying I/O error.
        error: String,
    },
    /// Run identifier could not be generated.
    #[error("run id generation failed: {0}")]
    RunId(String),
}

// ============================================================================
// SECTION: Run
// ============================================================================

/// Runs the end-to-end scenario described by `config`.
///
/// # Errors
///
/// Returns [`RunnerError`] when the environment cannot be built. Scenario
/// divergence is reported in the summary instead.
pub fn run_scenario(
    config: &LedgerHarnessConfig,
    options: &RunOptions,
) -> Result<RunSummary, RunnerError> {
    let ledger = SimulatedLedger::new(config.ledger.simulated_ledger_config());
    let funding_source = funding_source(config, &ledger)?;
    let faucet = if options.no_faucet { None } else { build_faucet(config, &ledger)? };
    let reporter = build_reporter(&config.reporter, options.report_file.as_deref())?;
    let run_id = match &options.run_id {
        Some(run_id) => run_id.clone(),
        None => new_run_id()?,
    };

    let mut settings = config.scenario_settings();
    settings.use_faucet = settings.use_faucet && faucet.is_some();
    let ctx = RunContext::new(run_id.clone(), reporter);
    let result =
        EndToEndScenario::new(&ledger, faucet.as_deref(), settings, &ctx).run(&funding_source);

    let (report, failure) = match result {
        Ok(report) => (Some(report), None),
        Err(err) => (None, Some(err.to_string())),
    };
    Ok(RunSummary {
        run_id,
        passed: failure.is_none(),
        funding_source: funding_source.address,
        transactions: ledger.history()?.len(),
        fees_collected: ledger.fees_collected()?,
        report,
        failure,
    })
}

/// Opens the event sink, preferring an explicit report file.
///
/// # Errors
///
/// Returns [`RunnerError::Reporter`] when the report file cannot be opened.
pub fn build_reporter(
    config: &ReporterConfig,
    report_file: Option<&Path>,
) -> Result<Arc<dyn HarnessReporter>, RunnerError> {
    let file_path = report_file.or(match config.sink {
        ReporterSink::File => config.path.as_deref(),
        ReporterSink::Stderr | ReporterSink::None => None,
    });
    if let Some(path) = file_path {
        let reporter = FileReporter::new(path).map_err(|err| RunnerError::Reporter {
            path: path.display().to_string(),
            error: err.to_string(),
        })?;
        return Ok(Arc::new(reporter));
    }
    Ok(match config.sink {
        ReporterSink::None => Arc::new(NoopReporter),
        ReporterSink::Stderr | ReporterSink::File => Arc::new(StderrReporter),
    })
}

/// Generates a random run identifier such as `run-1f2e3d4c5b6a7988`.
///
/// # Errors
///
/// Returns [`RunnerError::RunId`] when the OS random source fails.
pub fn new_run_id() -> Result<String, RunnerError> {
    let mut bytes = [0u8; RUN_ID_BYTES];
    OsRng.try_fill_bytes(&mut bytes).map_err(|err| RunnerError::RunId(err.to_string()))?;
    let mut run_id = String::from("run-");
    for byte in bytes {
        let _ = write!(run_id, "{byte:02x}");
    }
    Ok(run_id)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Creates and genesis-funds the funding source.
fn funding_source(
    config: &LedgerHarnessConfig,
    ledger: &SimulatedLedger,
) -> Result<KeyPair, RunnerError> {
    let seed = config
        .ledger
        .funding_source()
        .map_err(|err| RunnerError::FundingSource(err.to_string()))?;
    let Some(seed) = seed else {
        return Ok(ledger.genesis_key_pair(config.ledger.genesis_balance)?);
    };
    let secret = seed.secret_bytes().map_err(|err| RunnerError::FundingSource(err.to_string()))?;
    let pair = derive_key_pair(secret);
    ledger.fund_genesis(&pair.address, config.ledger.genesis_balance)?;
    Ok(pair)
}

/// Builds the configured faucet.
fn build_faucet(
    config: &LedgerHarnessConfig,
    ledger: &SimulatedLedger,
) -> Result<Option<Box<dyn Faucet>>, RunnerError> {
    let faucet = &config.faucet;
    match faucet.kind {
        FaucetKind::Disabled => Ok(None),
        FaucetKind::Simulated => {
            let simulated =
                SimulatedFaucet::new(ledger.clone(), faucet.starting_balance, faucet.grant)?;
            simulated.set_available(faucet.available);
            Ok(Some(Box::new(simulated)))
        }
        FaucetKind::Http => {
            let client = FriendbotFaucet::new(faucet.friendbot_config())
                .map_err(|err| RunnerError::Faucet(err.to_string()))?;
            Ok(Some(Box::new(client)))
        }
    }
}
