// system-tests/tests/helpers/fixtures.rs
// ============================================================================
// Module: Ledger Fixtures
// Description: Ledger, faucet, and context builders for system-tests.
// Purpose: Keep suite setup short and uniform.
// Dependencies: ledger-harness-core, ledger-harness-sim, ledger-harness-faucet
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use ledger_harness_core::Amount;
use ledger_harness_core::HarnessReporter;
use ledger_harness_core::MemoryReporter;
use ledger_harness_core::RunContext;
use ledger_harness_faucet::FriendbotConfig;
use ledger_harness_faucet::FriendbotFaucet;
use ledger_harness_sim::SimulatedFaucet;
use ledger_harness_sim::SimulatedLedger;
use ledger_harness_sim::SimulatedLedgerConfig;
use system_tests::config::SystemTestConfig;

/// Default HTTP timeout for loopback faucet calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Whole-unit amount.
pub fn units(value: i64) -> Amount {
    Amount::from_units(value).unwrap_or(Amount::ZERO)
}

/// Fresh ledger with default network parameters.
pub fn fresh_ledger() -> SimulatedLedger {
    SimulatedLedger::new(SimulatedLedgerConfig::default())
}

/// Fresh ledger that rejects unneeded signatures.
pub fn strict_ledger() -> SimulatedLedger {
    SimulatedLedger::new(SimulatedLedgerConfig {
        reject_extra_signatures: true,
        ..SimulatedLedgerConfig::default()
    })
}

/// Simulated faucet with a large account and a 10 000 unit grant.
pub fn simulated_faucet(ledger: &SimulatedLedger) -> Result<SimulatedFaucet, String> {
    SimulatedFaucet::new(ledger.clone(), units(1_000_000), units(10_000))
        .map_err(|err| err.to_string())
}

/// Run context recording into memory.
pub struct MemoryRun {
    /// Captured events.
    pub reporter: Arc<MemoryReporter>,
    /// Context handed to harness components.
    pub ctx: RunContext,
}

impl MemoryRun {
    /// Creates a context with the given run id.
    pub fn new(run_id: &str) -> Self {
        let reporter = Arc::new(MemoryReporter::new());
        let sink: Arc<dyn HarnessReporter> = reporter.clone();
        let ctx = RunContext::new(run_id, sink);
        Self {
            reporter,
            ctx,
        }
    }

    /// Returns the event labels in emission order.
    pub fn labels(&self) -> Vec<String> {
        self.reporter
            .events()
            .iter()
            .filter_map(|event| event["event"].as_str().map(str::to_string))
            .collect()
    }
}

/// HTTP faucet client for a loopback stub.
pub fn http_faucet(base_url: &str) -> Result<FriendbotFaucet, String> {
    let timeout = SystemTestConfig::load()?.http_timeout.unwrap_or(DEFAULT_TIMEOUT);
    let timeout_ms = u64::try_from(timeout.as_millis()).map_err(|err| err.to_string())?;
    FriendbotFaucet::new(FriendbotConfig {
        url: base_url.to_string(),
        allow_http: true,
        timeout_ms,
        ..FriendbotConfig::default()
    })
    .map_err(|err| err.to_string())
}
