// system-tests/tests/suites/friendbot.rs
// ============================================================================
// Module: Friendbot Client Tests
// Description: HTTP faucet client against a loopback friendbot.
// Purpose: Ensure friendbot answers map to receipts, rejections, and outages.
// Dependencies: system-tests helpers, ledger-harness-faucet, ledger-harness-sim
// ============================================================================

//! Friendbot client coverage over real HTTP.

use ledger_harness_core::Faucet;
use ledger_harness_core::FaucetError;
use ledger_harness_core::LedgerClient;
use ledger_harness_faucet::FriendbotConfig;
use ledger_harness_faucet::FriendbotFaucet;
use ledger_harness_sim::generate_key_pair;
use serde_json::json;
use system_tests::config::SystemTestConfig;
use system_tests::config::SystemTestEnv;

use crate::helpers::artifacts::TestReporter;
use crate::helpers::fixtures::fresh_ledger;
use crate::helpers::fixtures::http_faucet;
use crate::helpers::fixtures::simulated_faucet;
use crate::helpers::fixtures::units;
use crate::helpers::friendbot_stub::spawn_friendbot_stub;

type DynError = Box<dyn std::error::Error>;

#[test]
fn friendbot_funds_once_then_rejects() -> Result<(), DynError> {
    let mut reporter = TestReporter::new("friendbot_funds_once_then_rejects")?;
    let ledger = fresh_ledger();
    let stub = spawn_friendbot_stub(simulated_faucet(&ledger)?)?;
    let faucet = http_faucet(stub.base_url())?;
    let fresh = ledger.create_key_pair()?;

    let receipt = faucet.fund(&fresh.address)?;
    let balance = ledger.load_account(&fresh.address)?.native_balance;
    if balance != units(10_000) {
        return Err(format!("funded account holds {balance}").into());
    }
    let history = ledger.history()?;
    if history.last().map(|record| record.hash.as_str()) != Some(receipt.reference.as_str()) {
        return Err("receipt reference should be the funding transaction hash".into());
    }

    let repeat = faucet.fund(&fresh.address);
    match &repeat {
        Err(FaucetError::Rejected(detail))
            if detail.starts_with("400 Bad Request") && detail.contains("already funded") => {}
        other => return Err(format!("expected an already-funded rejection, got {other:?}").into()),
    }

    let transcript = json!({
        "requests": stub.requests(),
        "reference": receipt.reference,
        "repeat": repeat.err().map(|err| err.to_string()),
    });
    reporter.write_json("transcript.json", &transcript)?;
    reporter.pass(Vec::new())?;
    Ok(())
}

#[test]
fn friendbot_outage_is_unavailable() -> Result<(), DynError> {
    let reporter = TestReporter::new("friendbot_outage_is_unavailable")?;
    let ledger = fresh_ledger();
    let stub = spawn_friendbot_stub(simulated_faucet(&ledger)?)?;
    stub.set_available(false);
    let faucet = http_faucet(stub.base_url())?;
    let fresh = ledger.create_key_pair()?;

    let result = faucet.fund(&fresh.address);

    match result {
        Err(FaucetError::Unavailable(detail)) if detail.contains("503") => {}
        other => return Err(format!("expected an outage, got {other:?}").into()),
    }
    if ledger.load_account(&fresh.address).is_ok() {
        return Err("an outage must not create the account".into());
    }
    if stub.requests().len() != 1 {
        return Err("client should not retry".into());
    }

    reporter.pass(Vec::new())?;
    Ok(())
}

#[test]
fn stopped_friendbot_is_unreachable() -> Result<(), DynError> {
    let reporter = TestReporter::new("stopped_friendbot_is_unreachable")?;
    let ledger = fresh_ledger();
    let stub = spawn_friendbot_stub(simulated_faucet(&ledger)?)?;
    let faucet = http_faucet(stub.base_url())?;
    drop(stub);
    let fresh = ledger.create_key_pair()?;

    let result = faucet.fund(&fresh.address);

    if !matches!(result, Err(FaucetError::Unavailable(_))) {
        return Err(format!("expected an unreachable faucet, got {result:?}").into());
    }

    reporter.pass(Vec::new())?;
    Ok(())
}

#[test]
fn live_friendbot_funds_a_fresh_address() -> Result<(), DynError> {
    let mut reporter = TestReporter::new("live_friendbot_funds_a_fresh_address")?;
    let config = SystemTestConfig::load()?;
    let Some(url) = config.live_friendbot_url else {
        let reason = format!("{} is unset", SystemTestEnv::LiveFriendbotUrl.as_str());
        reporter.skip(&reason)?;
        return Ok(());
    };
    let faucet = FriendbotFaucet::new(FriendbotConfig {
        url: url.clone(),
        ..FriendbotConfig::default()
    })?;
    let fresh = generate_key_pair()?;

    let receipt = faucet.fund(&fresh.address)?;

    if receipt.address != fresh.address || receipt.reference.is_empty() {
        return Err(format!("unexpected receipt {receipt:?}").into());
    }
    reporter.write_json("receipt.json", &receipt)?;
    reporter.pass(vec![format!("funded {} via {url}", fresh.address)])?;
    Ok(())
}
