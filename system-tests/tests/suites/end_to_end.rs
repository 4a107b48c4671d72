// system-tests/tests/suites/end_to_end.rs
// ============================================================================
// Module: End-to-End Scenario Tests
// Description: Full scenario runs with simulated, HTTP, and strict ledgers.
// Purpose: Ensure the scenario passes end to end and diverges where it must.
// Dependencies: system-tests helpers, ledger-harness-cli, ledger-harness-core
// ============================================================================

//! End-to-end scenario coverage for the ledger harness.

use ledger_harness_cli::runner::RunOptions;
use ledger_harness_cli::runner::run_scenario;
use ledger_harness_config::FaucetKind;
use ledger_harness_config::LedgerHarnessConfig;
use ledger_harness_config::ReporterSink;
use ledger_harness_core::AuthState;
use ledger_harness_core::EndToEndScenario;
use ledger_harness_core::FaucetStatus;
use ledger_harness_core::FundingDecision;
use ledger_harness_core::HarnessError;
use ledger_harness_core::RejectionCode;
use ledger_harness_core::ScenarioSettings;
use serde_json::Value;

use crate::helpers::artifacts::TestReporter;
use crate::helpers::fixtures::MemoryRun;
use crate::helpers::fixtures::fresh_ledger;
use crate::helpers::fixtures::http_faucet;
use crate::helpers::fixtures::simulated_faucet;
use crate::helpers::fixtures::strict_ledger;
use crate::helpers::fixtures::units;
use crate::helpers::friendbot_stub::spawn_friendbot_stub;

type DynError = Box<dyn std::error::Error>;

/// Defaults with events discarded.
fn quiet_config() -> LedgerHarnessConfig {
    let mut config = LedgerHarnessConfig::default();
    config.reporter.sink = ReporterSink::None;
    config
}

#[test]
fn runner_passes_with_default_config() -> Result<(), DynError> {
    let mut reporter = TestReporter::new("runner_passes_with_default_config")?;
    let events_path = reporter.root().join("events.jsonl");
    let options = RunOptions {
        report_file: Some(events_path.clone()),
        run_id: Some("run-system-default".to_string()),
        ..RunOptions::default()
    };

    let summary = run_scenario(&quiet_config(), &options)?;
    reporter.adopt("events.jsonl");
    reporter.write_json("run_summary.json", &summary)?;

    if !summary.passed {
        return Err(format!("run failed: {}", summary.failure.unwrap_or_default()).into());
    }
    let Some(report) = summary.report else {
        return Err("passed run has no report".into());
    };
    if report.final_state != AuthState::ThresholdRaised {
        return Err(format!("unexpected final state {}", report.final_state).into());
    }
    if report.balances.len() != 5 {
        return Err(format!("expected 5 balance reports, got {}", report.balances.len()).into());
    }

    let contents = std::fs::read_to_string(&events_path)?;
    let mut events = Vec::new();
    for line in contents.lines() {
        events.push(serde_json::from_str::<Value>(line)?);
    }
    if events.iter().any(|event| event["run_id"] != "run-system-default") {
        return Err("event with a foreign run id".into());
    }
    if events.first().map(|event| event["event"].clone()) != Some(Value::from("faucet_attempt")) {
        return Err("first event should be the issuer faucet attempt".into());
    }
    if events.last().map(|event| event["event"].clone()) != Some(Value::from("scenario_finished")) {
        return Err("last event should be scenario_finished".into());
    }

    let note = format!("{} events, {} transactions", events.len(), summary.transactions);
    reporter.pass(vec![note])?;
    Ok(())
}

#[test]
fn scenario_over_http_friendbot_returns_surplus() -> Result<(), DynError> {
    let mut reporter = TestReporter::new("scenario_over_http_friendbot_returns_surplus")?;
    let ledger = fresh_ledger();
    let stub = spawn_friendbot_stub(simulated_faucet(&ledger)?)?;
    let faucet = http_faucet(stub.base_url())?;
    let source = ledger.genesis_key_pair(units(100_000))?;
    let run = MemoryRun::new("run-http-friendbot");

    let report =
        EndToEndScenario::new(&ledger, Some(&faucet), ScenarioSettings::default(), &run.ctx)
            .run(&source)?;
    reporter.write_events("events.jsonl", &run.reporter.events())?;

    let issuer = &report.identities[0];
    let FaucetStatus::Funded {
        reference,
    } = &issuer.faucet
    else {
        return Err(format!("issuer faucet status {:?}", issuer.faucet).into());
    };
    if reference.len() != 64 {
        return Err(format!("expected a transaction hash reference, got {reference}").into());
    }
    let expected = FundingDecision::ReturnSurplus {
        amount: units(5_000),
    };
    if issuer.decision != expected {
        return Err(format!("issuer decision {:?}", issuer.decision).into());
    }
    let requests = stub.requests();
    if requests.len() != 1 || !requests[0].contains(issuer.address.as_str()) {
        return Err(format!("unexpected friendbot requests {requests:?}").into());
    }

    reporter.pass(vec![format!("friendbot reference {reference}")])?;
    Ok(())
}

#[test]
fn http_faucet_on_a_foreign_ledger_falls_back_to_the_source() -> Result<(), DynError> {
    let mut reporter =
        TestReporter::new("http_faucet_on_a_foreign_ledger_falls_back_to_the_source")?;
    let foreign = fresh_ledger();
    let stub = spawn_friendbot_stub(simulated_faucet(&foreign)?)?;
    let mut config = quiet_config();
    config.faucet.kind = FaucetKind::Http;
    config.faucet.url = stub.base_url().to_string();
    config.faucet.allow_http = true;
    let options = RunOptions {
        run_id: Some("run-foreign-faucet".to_string()),
        ..RunOptions::default()
    };

    let summary = run_scenario(&config, &options)?;
    reporter.write_json("run_summary.json", &summary)?;

    let Some(report) = summary.report else {
        return Err(format!("run failed: {}", summary.failure.unwrap_or_default()).into());
    };
    let issuer = &report.identities[0];
    if !matches!(issuer.faucet, FaucetStatus::Funded { .. }) {
        return Err(format!("issuer faucet status {:?}", issuer.faucet).into());
    }
    let expected = FundingDecision::FundFromSource {
        amount: units(1_000),
    };
    if issuer.decision != expected {
        return Err(format!("issuer decision {:?}", issuer.decision).into());
    }

    reporter.pass(vec!["faucet grant landed on another ledger".to_string()])?;
    Ok(())
}

#[test]
fn strict_ledger_rejects_surplus_signatures() -> Result<(), DynError> {
    let mut reporter = TestReporter::new("strict_ledger_rejects_surplus_signatures")?;
    let ledger = strict_ledger();
    let faucet = simulated_faucet(&ledger)?;
    let source = ledger.genesis_key_pair(units(100_000))?;
    let run = MemoryRun::new("run-strict");

    let result =
        EndToEndScenario::new(&ledger, Some(&faucet), ScenarioSettings::default(), &run.ctx)
            .run(&source);
    reporter.write_events("events.jsonl", &run.reporter.events())?;

    match result {
        Err(HarnessError::UnexpectedRejection {
            step,
            code: RejectionCode::TxBadAuthExtra,
        }) if step.contains("signer1 and signer2 at default thresholds") => {}
        other => return Err(format!("expected tx_bad_auth_extra divergence, got {other:?}").into()),
    }
    let labels = run.labels();
    if labels.last().map(String::as_str) != Some("scenario_finished") {
        return Err("divergent run must still finish with scenario_finished".into());
    }

    reporter.pass(vec!["strict ledger diverged at the two-signer payment".to_string()])?;
    Ok(())
}
