// system-tests/tests/suites/authorization.rs
// ============================================================================
// Module: Authorization Tests
// Description: Multi-signature behavior under non-default weights.
// Purpose: Ensure the authorization model and the ledger agree step by step.
// Dependencies: system-tests helpers, ledger-harness-core, ledger-harness-sim
// ============================================================================

//! Authorization and trust-line coverage on the simulated ledger.

use ledger_harness_core::AccountProvisioner;
use ledger_harness_core::Asset;
use ledger_harness_core::AssetRegistry;
use ledger_harness_core::AssetType;
use ledger_harness_core::AuthState;
use ledger_harness_core::AuthorizationHarness;
use ledger_harness_core::CanonicalCases;
use ledger_harness_core::Expectation;
use ledger_harness_core::FundedIdentity;
use ledger_harness_core::FundingSettings;
use ledger_harness_core::HarnessError;
use ledger_harness_core::LedgerClient;
use ledger_harness_core::LedgerError;
use ledger_harness_core::PaymentAttempt;
use ledger_harness_core::PaymentSource;
use ledger_harness_core::RejectionCode;
use ledger_harness_core::StepOutcome;
use ledger_harness_core::Thresholds;
use ledger_harness_core::TrustLineManager;
use ledger_harness_core::TxOptions;
use ledger_harness_sim::SimulatedLedger;

use crate::helpers::artifacts::TestReporter;
use crate::helpers::fixtures::MemoryRun;
use crate::helpers::fixtures::fresh_ledger;
use crate::helpers::fixtures::units;

type DynError = Box<dyn std::error::Error>;

/// Distributor holding issued supply, a trusting customer, and two signers.
struct Cast {
    distributor: FundedIdentity,
    customer: FundedIdentity,
    signer1: FundedIdentity,
    signer2: FundedIdentity,
    asset: Asset,
}

/// Funds the cast and issues 1000 units of `EUR` to the distributor.
fn prepare_cast(ledger: &SimulatedLedger, run: &MemoryRun) -> Result<Cast, DynError> {
    let source = ledger.genesis_key_pair(units(100_000))?;
    let provisioner = AccountProvisioner::new(ledger, None, FundingSettings::default(), &run.ctx);
    let issuer = provisioner.provision("issuer", &source, false)?;
    let distributor = provisioner.provision("distributor", &source, false)?;
    let customer = provisioner.provision("customer", &source, false)?;
    let signer1 = provisioner.provision("signer1", &source, false)?;
    let signer2 = provisioner.provision("signer2", &source, false)?;

    let mut registry = AssetRegistry::new();
    let asset = registry.define_asset("EUR", issuer.address(), AssetType::CreditAlphanum4);
    let trust_lines = TrustLineManager::new(ledger, &run.ctx);
    trust_lines.establish(&distributor.key_pair, &asset, &units(10_000))?;
    trust_lines.establish(&customer.key_pair, &asset, &units(10_000))?;
    ledger.pay(
        &PaymentSource::KeyPair(issuer.key_pair.clone()),
        distributor.address(),
        &units(1_000),
        &asset,
        &TxOptions::new(),
    )?;
    Ok(Cast {
        distributor,
        customer,
        signer1,
        signer2,
        asset,
    })
}

#[test]
fn weighted_signers_follow_the_canonical_sequence() -> Result<(), DynError> {
    let mut reporter = TestReporter::new("weighted_signers_follow_the_canonical_sequence")?;
    let ledger = fresh_ledger();
    let run = MemoryRun::new("run-weighted");
    let cast = prepare_cast(&ledger, &run)?;
    let auth = AuthorizationHarness::new(&ledger, &run.ctx, &cast.distributor.key_pair);

    auth.add_signer(cast.signer1.address(), 2)?;
    auth.add_signer(cast.signer2.address(), 1)?;
    if auth.disable_master()? != AuthState::MasterDisabled {
        return Err("master key should be disabled".into());
    }
    let cases = CanonicalCases {
        signer1: cast.signer1.key_pair.clone(),
        signer2: cast.signer2.key_pair.clone(),
        destination: cast.customer.address().clone(),
        asset: cast.asset.clone(),
        amount: units(10),
        raised_threshold: 3,
    };
    let outcomes = auth.run_canonical_cases(&cases)?;

    let admitted: Vec<bool> =
        outcomes.iter().map(|outcome| *outcome == StepOutcome::Admitted).collect();
    if admitted != [false, true, true, false, true] {
        return Err(format!("unexpected outcomes {outcomes:?}").into());
    }
    let snapshot = ledger.load_account(cast.customer.address())?;
    if snapshot.balance_of(&cast.asset) != Some(units(30)) {
        return Err(format!("customer holds {:?}", snapshot.balance_of(&cast.asset)).into());
    }

    let by_signer1 = PaymentAttempt::new(
        PaymentSource::Address(cast.distributor.address().clone()),
        cast.customer.address().clone(),
        units(10),
        cast.asset.clone(),
    )
    .with_co_signer(cast.signer1.key_pair.clone());
    let outcome =
        auth.attempt_payment("signer1 alone below threshold 3", &by_signer1, Expectation::Reject)?;
    if outcome != StepOutcome::Rejected(RejectionCode::TxBadAuth) {
        return Err(format!("signer1 alone should lack weight, got {outcome:?}").into());
    }

    reporter.write_events("events.jsonl", &run.reporter.events())?;
    reporter.pass(vec![format!("{} judged steps", run.ctx.records().len())])?;
    Ok(())
}

#[test]
fn raised_thresholds_lock_out_the_weak_signer() -> Result<(), DynError> {
    let reporter = TestReporter::new("raised_thresholds_lock_out_the_weak_signer")?;
    let ledger = fresh_ledger();
    let run = MemoryRun::new("run-lockout");
    let cast = prepare_cast(&ledger, &run)?;
    let auth = AuthorizationHarness::new(&ledger, &run.ctx, &cast.distributor.key_pair);
    auth.add_signer(cast.signer1.address(), 1)?;
    auth.add_signer(cast.signer2.address(), 1)?;
    auth.disable_master()?;
    auth.set_thresholds(Thresholds::uniform(2), &[&cast.signer1.key_pair])?;

    let lowered = auth.set_thresholds(Thresholds::DEFAULT, &[&cast.signer2.key_pair]);
    if !matches!(lowered, Err(HarnessError::InconsistentExpectation { .. })) {
        return Err(format!("model should predict rejection, got {lowered:?}").into());
    }
    let direct = ledger.set_thresholds(
        cast.distributor.address(),
        Thresholds::DEFAULT,
        &TxOptions::new().with_signer(cast.signer2.key_pair.seed.clone()),
    );
    if direct != Err(LedgerError::Rejected(RejectionCode::TxBadAuth)) {
        return Err(format!("ledger should reject the change, got {direct:?}").into());
    }
    if auth.state()? != AuthState::ThresholdRaised {
        return Err("thresholds must remain raised".into());
    }

    reporter.pass(Vec::new())?;
    Ok(())
}

#[test]
fn unreachable_raised_threshold_is_refused() -> Result<(), DynError> {
    let reporter = TestReporter::new("unreachable_raised_threshold_is_refused")?;
    let ledger = fresh_ledger();
    let run = MemoryRun::new("run-unreachable");
    let cast = prepare_cast(&ledger, &run)?;
    let auth = AuthorizationHarness::new(&ledger, &run.ctx, &cast.distributor.key_pair);
    auth.add_signer(cast.signer1.address(), 1)?;
    auth.add_signer(cast.signer2.address(), 1)?;
    auth.disable_master()?;
    let cases = CanonicalCases {
        signer1: cast.signer1.key_pair.clone(),
        signer2: cast.signer2.key_pair.clone(),
        destination: cast.customer.address().clone(),
        asset: cast.asset.clone(),
        amount: units(10),
        raised_threshold: 3,
    };

    let result = auth.run_canonical_cases(&cases);

    if !matches!(result, Err(HarnessError::InvalidSettings(_))) {
        return Err(format!("expected invalid settings, got {result:?}").into());
    }
    if auth.state()? != AuthState::MasterDisabled {
        return Err("refused cases must not change the account".into());
    }

    reporter.pass(Vec::new())?;
    Ok(())
}

#[test]
fn trust_line_removal_requires_an_empty_balance() -> Result<(), DynError> {
    let reporter = TestReporter::new("trust_line_removal_requires_an_empty_balance")?;
    let ledger = fresh_ledger();
    let run = MemoryRun::new("run-trust-lines");
    let cast = prepare_cast(&ledger, &run)?;
    let trust_lines = TrustLineManager::new(&ledger, &run.ctx);

    let held = trust_lines.remove(&cast.distributor.key_pair, &cast.asset);
    match held {
        Err(err) if err.source == LedgerError::Rejected(RejectionCode::OpTrustLineNotEmpty) => {}
        other => return Err(format!("expected op_trust_line_not_empty, got {other:?}").into()),
    }

    trust_lines.remove(&cast.customer.key_pair, &cast.asset)?;
    let snapshot = ledger.load_account(cast.customer.address())?;
    if snapshot.trust_line(&cast.asset).is_some() {
        return Err("customer trust line should be gone".into());
    }
    let payment = ledger.pay(
        &PaymentSource::KeyPair(cast.distributor.key_pair.clone()),
        cast.customer.address(),
        &units(1),
        &cast.asset,
        &TxOptions::new(),
    );
    if payment != Err(LedgerError::Rejected(RejectionCode::OpNoTrust)) {
        return Err(format!("payment without a trust line should fail, got {payment:?}").into());
    }

    reporter.pass(Vec::new())?;
    Ok(())
}
