// system-tests/tests/suites/funding.rs
// ============================================================================
// Module: Funding Tests
// Description: Identity provisioning against live faucet outcomes.
// Purpose: Ensure each funding decision moves the expected native amounts.
// Dependencies: system-tests helpers, ledger-harness-core, ledger-harness-sim
// ============================================================================

//! Funding decision coverage for the account provisioner.

use ledger_harness_core::AccountProvisioner;
use ledger_harness_core::FaucetStatus;
use ledger_harness_core::FundingDecision;
use ledger_harness_core::FundingSettings;
use ledger_harness_core::HarnessError;
use ledger_harness_core::LedgerClient;
use ledger_harness_core::PaybackPolicy;

use crate::helpers::artifacts::TestReporter;
use crate::helpers::fixtures::MemoryRun;
use crate::helpers::fixtures::fresh_ledger;
use crate::helpers::fixtures::http_faucet;
use crate::helpers::fixtures::simulated_faucet;
use crate::helpers::fixtures::units;
use crate::helpers::friendbot_stub::spawn_friendbot_stub;

type DynError = Box<dyn std::error::Error>;

/// Default funding with a different payback policy.
fn with_payback(payback: PaybackPolicy) -> FundingSettings {
    FundingSettings {
        payback,
        ..FundingSettings::default()
    }
}

#[test]
fn fraction_payback_returns_half_the_grant() -> Result<(), DynError> {
    let mut reporter = TestReporter::new("fraction_payback_returns_half_the_grant")?;
    let ledger = fresh_ledger();
    let stub = spawn_friendbot_stub(simulated_faucet(&ledger)?)?;
    let faucet = http_faucet(stub.base_url())?;
    let source = ledger.genesis_key_pair(units(100_000))?;
    let run = MemoryRun::new("run-fraction");

    let provisioner =
        AccountProvisioner::new(&ledger, Some(&faucet), FundingSettings::default(), &run.ctx);
    let identity = provisioner.provision("issuer", &source, true)?;

    let expected = FundingDecision::ReturnSurplus {
        amount: units(5_000),
    };
    if identity.decision != expected {
        return Err(format!("unexpected decision {:?}", identity.decision).into());
    }
    let source_balance = ledger.load_account(&source.address)?.native_balance;
    if source_balance != units(105_000) {
        return Err(format!("source holds {source_balance}, expected 105000").into());
    }
    let fee = ledger.config().base_fee;
    let kept = units(5_000).checked_sub(fee).ok_or("fee exceeds kept balance")?;
    if identity.native_balance != kept {
        return Err(format!("identity holds {}, expected {kept}", identity.native_balance).into());
    }

    reporter.write_events("events.jsonl", &run.reporter.events())?;
    reporter.pass(vec![format!("identity kept {kept}")])?;
    Ok(())
}

#[test]
fn fixed_payback_returns_the_fixed_amount() -> Result<(), DynError> {
    let reporter = TestReporter::new("fixed_payback_returns_the_fixed_amount")?;
    let ledger = fresh_ledger();
    let faucet = simulated_faucet(&ledger)?;
    let source = ledger.genesis_key_pair(units(100_000))?;
    let run = MemoryRun::new("run-fixed");
    let settings = with_payback(PaybackPolicy::Fixed {
        amount: units(2_500),
    });

    let identity = AccountProvisioner::new(&ledger, Some(&faucet), settings, &run.ctx)
        .provision("issuer", &source, true)?;

    let expected = FundingDecision::ReturnSurplus {
        amount: units(2_500),
    };
    if identity.decision != expected {
        return Err(format!("unexpected decision {:?}", identity.decision).into());
    }
    let kept = units(7_500).checked_sub(ledger.config().base_fee).ok_or("fee exceeds balance")?;
    if identity.native_balance != kept {
        return Err(format!("identity holds {}, expected {kept}", identity.native_balance).into());
    }

    reporter.pass(Vec::new())?;
    Ok(())
}

#[test]
fn oversized_or_disabled_payback_keeps_the_grant() -> Result<(), DynError> {
    let reporter = TestReporter::new("oversized_or_disabled_payback_keeps_the_grant")?;
    let ledger = fresh_ledger();
    let faucet = simulated_faucet(&ledger)?;
    let source = ledger.genesis_key_pair(units(100_000))?;
    let run = MemoryRun::new("run-keep");
    let policies = [
        PaybackPolicy::None,
        PaybackPolicy::Fixed {
            amount: units(20_000),
        },
    ];

    for policy in policies {
        let provisioner =
            AccountProvisioner::new(&ledger, Some(&faucet), with_payback(policy), &run.ctx);
        let identity = provisioner.provision("keeper", &source, true)?;
        if identity.decision != FundingDecision::KeepBalance {
            return Err(format!("{policy:?} produced {:?}", identity.decision).into());
        }
        if identity.native_balance != units(10_000) {
            return Err(format!("{policy:?} left {}", identity.native_balance).into());
        }
    }
    let source_balance = ledger.load_account(&source.address)?.native_balance;
    if source_balance != units(100_000) {
        return Err(format!("source balance moved to {source_balance}").into());
    }

    reporter.pass(Vec::new())?;
    Ok(())
}

#[test]
fn offline_friendbot_falls_back_to_the_source() -> Result<(), DynError> {
    let reporter = TestReporter::new("offline_friendbot_falls_back_to_the_source")?;
    let ledger = fresh_ledger();
    let stub = spawn_friendbot_stub(simulated_faucet(&ledger)?)?;
    stub.set_available(false);
    let faucet = http_faucet(stub.base_url())?;
    let source = ledger.genesis_key_pair(units(100_000))?;
    let run = MemoryRun::new("run-offline");

    let provisioner =
        AccountProvisioner::new(&ledger, Some(&faucet), FundingSettings::default(), &run.ctx);
    let identity = provisioner.provision("issuer", &source, true)?;

    let FaucetStatus::Failed {
        reason,
    } = &identity.faucet
    else {
        return Err(format!("unexpected faucet status {:?}", identity.faucet).into());
    };
    if !reason.contains("503") {
        return Err(format!("failure reason should carry the status: {reason}").into());
    }
    let bootstrap = FundingSettings::default().bootstrap_amount;
    let expected = FundingDecision::FundFromSource {
        amount: bootstrap,
    };
    if identity.decision != expected || identity.native_balance != bootstrap {
        let detail = format!("{:?} / {}", identity.decision, identity.native_balance);
        return Err(format!("unexpected funding {detail}").into());
    }
    if !run.labels().starts_with(&["faucet_attempt".to_string(), "funding_decision".to_string()]) {
        return Err(format!("unexpected event order {:?}", run.labels()).into());
    }

    reporter.pass(vec![format!("faucet failure: {reason}")])?;
    Ok(())
}

#[test]
fn underfunded_source_is_fatal() -> Result<(), DynError> {
    let reporter = TestReporter::new("underfunded_source_is_fatal")?;
    let ledger = fresh_ledger();
    let source = ledger.genesis_key_pair(units(10))?;
    let run = MemoryRun::new("run-underfunded");

    let result = AccountProvisioner::new(&ledger, None, FundingSettings::default(), &run.ctx)
        .provision("distributor", &source, false);

    match result {
        Err(HarnessError::Funding {
            ..
        }) => {}
        other => return Err(format!("expected a funding failure, got {other:?}").into()),
    }
    if ledger.load_account(&source.address)?.native_balance >= units(10) {
        return Err("the rejected transaction should still charge its fee".into());
    }

    reporter.pass(Vec::new())?;
    Ok(())
}
