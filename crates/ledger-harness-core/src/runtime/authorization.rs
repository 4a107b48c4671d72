// crates/ledger-harness-core/src/runtime/authorization.rs
// ============================================================================
// Module: Authorization Harness
// Description: Drives an account through signer and threshold states.
// Purpose: Exercise multi-signature admission and judge each attempt.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The harness owns one account under test and moves it through
//! [`AuthState`]s: default, multi-signer, master-disabled, and
//! threshold-raised. Every transition is a judged step followed by a fresh
//! reload; the observed state must equal the state the change intended.
//!
//! Before each payment attempt the harness predicts admission from a fresh
//! snapshot. A declared expectation that contradicts the prediction fails the
//! run with [`HarnessError::InconsistentExpectation`] before anything is
//! submitted, so a passing run cannot be asserting the wrong thing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::account::AccountSnapshot;
use crate::core::account::SignerEntry;
use crate::core::account::SignerType;
use crate::core::account::Thresholds;
use crate::core::amount::Amount;
use crate::core::asset::Asset;
use crate::core::authorization::AuthState;
use crate::core::authorization::OperationKind;
use crate::core::authorization::SignerSet;
use crate::core::events::EventKind;
use crate::core::identifiers::Address;
use crate::core::identifiers::KeyPair;
use crate::core::options::PaymentAttempt;
use crate::core::options::PaymentSource;
use crate::core::options::TxOptions;
use crate::core::outcome::Expectation;
use crate::core::outcome::StepOutcome;
use crate::interfaces::LedgerClient;
use crate::interfaces::LedgerError;
use crate::runtime::error::HarnessError;
use crate::runtime::steps::RunContext;

// ============================================================================
// SECTION: Canonical Cases
// ============================================================================

/// Memo on canonical payments expected to be admitted.
pub const ADMITTED_PAYMENT_MEMO: &str = "real payment";

/// Memo on canonical payments expected to be rejected.
pub const REJECTED_PAYMENT_MEMO: &str = "failed payment";

/// Inputs for the canonical authorization sequence.
///
/// # Invariants
/// - `signer2` weight `< raised_threshold <=` combined signer weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalCases {
    /// First additional signer.
    pub signer1: KeyPair,
    /// Second additional signer.
    pub signer2: KeyPair,
    /// Payment destination.
    pub destination: Address,
    /// Asset paid in each attempt.
    pub asset: Asset,
    /// Amount paid in each attempt.
    pub amount: Amount,
    /// Threshold applied to every category in the raised state.
    pub raised_threshold: u8,
}

// ============================================================================
// SECTION: Harness
// ============================================================================

/// Authorization state machine over one account.
pub struct AuthorizationHarness<'a, L: LedgerClient> {
    /// Ledger client.
    ledger: &'a L,
    /// Run context for steps and events.
    ctx: &'a RunContext,
    /// Account under test.
    account: &'a KeyPair,
}

impl<'a, L: LedgerClient> AuthorizationHarness<'a, L> {
    /// Creates a harness for `account`.
    #[must_use]
    pub const fn new(ledger: &'a L, ctx: &'a RunContext, account: &'a KeyPair) -> Self {
        Self {
            ledger,
            ctx,
            account,
        }
    }

    /// Classifies the account's current state from a fresh snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Snapshot`] when the account cannot be loaded.
    pub fn state(&self) -> Result<AuthState, HarnessError> {
        self.snapshot(&self.account.address).map(|snapshot| AuthState::classify(&snapshot))
    }

    /// Adds `signer` with `weight`, signed by the master key.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when the change is rejected or the observed
    /// state differs from the intended one.
    pub fn add_signer(&self, signer: &Address, weight: u8) -> Result<AuthState, HarnessError> {
        let step = format!("add signer {signer} weight {weight}");
        let signing = [self.account.address.clone()];
        self.transition(
            &step,
            &signing,
            |snapshot| {
                snapshot.signers.retain(|entry| &entry.key != signer);
                if weight > 0 {
                    snapshot.signers.push(SignerEntry {
                        key: signer.clone(),
                        weight,
                        signer_type: SignerType::Ed25519PublicKey,
                    });
                }
            },
            || self.ledger.add_signer(&self.account.seed, signer, weight),
        )
    }

    /// Sets the master weight to zero, signed by the master key.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when the change is rejected or the observed
    /// state differs from the intended one.
    pub fn disable_master(&self) -> Result<AuthState, HarnessError> {
        let signing = [self.account.address.clone()];
        self.transition(
            "disable master key",
            &signing,
            |snapshot| snapshot.master_weight = 0,
            || self.ledger.set_master_weight(&self.account.seed, 0),
        )
    }

    /// Sets thresholds, signed only by `signers`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when the change is rejected or the observed
    /// state differs from the intended one.
    pub fn set_thresholds(
        &self,
        thresholds: Thresholds,
        signers: &[&KeyPair],
    ) -> Result<AuthState, HarnessError> {
        let step = format!(
            "set thresholds {}/{}/{} signed by {} key(s)",
            thresholds.low,
            thresholds.medium,
            thresholds.high,
            signers.len()
        );
        let signing: Vec<Address> = signers.iter().map(|pair| pair.address.clone()).collect();
        let options = signers
            .iter()
            .fold(TxOptions::new(), |options, pair| options.with_signer(pair.seed.clone()));
        self.transition(
            &step,
            &signing,
            |snapshot| snapshot.thresholds = thresholds,
            || self.ledger.set_thresholds(&self.account.address, thresholds, &options),
        )
    }

    /// Submits a payment as a judged step.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::InconsistentExpectation`] when `expectation`
    /// contradicts the authorization model, or the judging error when the
    /// ledger outcome contradicts `expectation`. An expected rejection that
    /// arrives with a non-authorization code is
    /// [`HarnessError::UnexpectedRejection`].
    pub fn attempt_payment(
        &self,
        step: &str,
        attempt: &PaymentAttempt,
        expectation: Expectation,
    ) -> Result<StepOutcome, HarnessError> {
        let snapshot = self.snapshot(attempt.source.address())?;
        let decision = SignerSet::from_snapshot(&snapshot)
            .authorize(OperationKind::Payment, &attempt.signing_addresses());
        check_expectation(step, expectation, Expectation::from_admitted(decision.admitted))?;
        self.ctx.run_authorization_step(step, expectation, || {
            self.ledger.pay(
                &attempt.source,
                &attempt.destination,
                &attempt.amount,
                &attempt.asset,
                &attempt.tx_options(),
            )
        })
    }

    /// Runs the canonical sequence from the master-disabled state.
    ///
    /// 1. Master key alone: rejected.
    /// 2. Both signers at default thresholds: admitted.
    /// 3. Second signer alone at default thresholds: admitted.
    /// 4. Thresholds raised, signed by the first signer: admitted.
    /// 5. Second signer alone below the raised threshold: rejected.
    /// 6. Both signers at the raised threshold: admitted.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] on the first divergence.
    pub fn run_canonical_cases(
        &self,
        cases: &CanonicalCases,
    ) -> Result<Vec<StepOutcome>, HarnessError> {
        let snapshot = self.snapshot(&self.account.address)?;
        let observed = AuthState::classify(&snapshot);
        if observed != AuthState::MasterDisabled {
            return Err(HarnessError::StateMismatch {
                address: self.account.address.clone(),
                expected: AuthState::MasterDisabled,
                observed,
            });
        }
        let weight1 = registered_weight(&snapshot, &cases.signer1.address)?;
        let weight2 = registered_weight(&snapshot, &cases.signer2.address)?;
        let threshold = u32::from(cases.raised_threshold);
        if threshold <= u32::from(weight2) || threshold > u32::from(weight1) + u32::from(weight2) {
            return Err(HarnessError::InvalidSettings(format!(
                "raised threshold {threshold} must exceed signer2 weight {weight2} and not \
                 exceed combined weight {}",
                u32::from(weight1) + u32::from(weight2)
            )));
        }

        let by_master = PaymentSource::KeyPair(self.account.clone());
        let by_signers = PaymentSource::Address(self.account.address.clone());
        let mut outcomes = Vec::with_capacity(5);

        outcomes.push(self.canonical_attempt(
            "payment signed by disabled master key",
            by_master,
            cases,
            &[],
            Expectation::Reject,
        )?);
        outcomes.push(self.canonical_attempt(
            "payment signed by signer1 and signer2 at default thresholds",
            by_signers.clone(),
            cases,
            &[&cases.signer1, &cases.signer2],
            Expectation::Admit,
        )?);
        outcomes.push(self.canonical_attempt(
            "payment signed by signer2 at default thresholds",
            by_signers.clone(),
            cases,
            &[&cases.signer2],
            Expectation::Admit,
        )?);
        self.set_thresholds(Thresholds::uniform(cases.raised_threshold), &[&cases.signer1])?;
        outcomes.push(self.canonical_attempt(
            "payment signed by signer2 below raised threshold",
            by_signers.clone(),
            cases,
            &[&cases.signer2],
            Expectation::Reject,
        )?);
        outcomes.push(self.canonical_attempt(
            "payment signed by signer1 and signer2 at raised threshold",
            by_signers,
            cases,
            &[&cases.signer1, &cases.signer2],
            Expectation::Admit,
        )?);
        Ok(outcomes)
    }

    /// Submits one canonical payment, memo-tagged by its expectation.
    fn canonical_attempt(
        &self,
        step: &str,
        source: PaymentSource,
        cases: &CanonicalCases,
        co_signers: &[&KeyPair],
        expectation: Expectation,
    ) -> Result<StepOutcome, HarnessError> {
        let memo = match expectation {
            Expectation::Admit => ADMITTED_PAYMENT_MEMO,
            Expectation::Reject => REJECTED_PAYMENT_MEMO,
        };
        let payment =
            PaymentAttempt::new(source, cases.destination.clone(), cases.amount, cases.asset.clone());
        let attempt = co_signers.iter().fold(payment.with_memo_text(memo), |attempt, signer| {
            attempt.with_co_signer((*signer).clone())
        });
        self.attempt_payment(step, &attempt, expectation)
    }

    /// Runs a set-options step and verifies the resulting state.
    fn transition<A, F>(
        &self,
        step: &str,
        signing: &[Address],
        intend: A,
        submit: F,
    ) -> Result<AuthState, HarnessError>
    where
        A: FnOnce(&mut AccountSnapshot),
        F: FnOnce() -> Result<(), LedgerError>,
    {
        let before = self.snapshot(&self.account.address)?;
        let decision = SignerSet::from_snapshot(&before).authorize(OperationKind::SetOptions, signing);
        check_expectation(step, Expectation::Admit, Expectation::from_admitted(decision.admitted))?;

        let mut intended = before.clone();
        intend(&mut intended);
        let expected = AuthState::classify(&intended);

        self.ctx.run_step(step, Expectation::Admit, submit)?;

        let observed = AuthState::classify(&self.snapshot(&self.account.address)?);
        self.ctx.emit(EventKind::StateTransition {
            address: self.account.address.clone(),
            from: AuthState::classify(&before),
            to: observed,
        });
        if observed != expected {
            return Err(HarnessError::StateMismatch {
                address: self.account.address.clone(),
                expected,
                observed,
            });
        }
        Ok(observed)
    }

    /// Loads a fresh snapshot.
    fn snapshot(&self, address: &Address) -> Result<AccountSnapshot, HarnessError> {
        self.ledger.load_account(address).map_err(|source| HarnessError::Snapshot {
            address: address.clone(),
            source,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Fails when a declared expectation contradicts the prediction.
fn check_expectation(
    step: &str,
    declared: Expectation,
    predicted: Expectation,
) -> Result<(), HarnessError> {
    if declared == predicted {
        Ok(())
    } else {
        Err(HarnessError::InconsistentExpectation {
            step: step.to_string(),
            declared,
            predicted,
        })
    }
}

/// Returns the nonzero weight of a registered signer.
fn registered_weight(snapshot: &AccountSnapshot, signer: &Address) -> Result<u8, HarnessError> {
    match snapshot.signer_weight(signer) {
        Some(weight) if weight > 0 && signer != &snapshot.address => Ok(weight),
        _ => Err(HarnessError::InvalidSettings(format!(
            "{signer} is not a registered signer of {}",
            snapshot.address
        ))),
    }
}
