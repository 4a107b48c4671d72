// crates/ledger-harness-core/src/core/events.rs
// ============================================================================
// Module: Harness Events
// Description: Structured progress events emitted by the harness.
// Purpose: Give reporters a redacted, serializable view of each run.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Every component reports progress as a [`HarnessEvent`]. Events carry
//! addresses, amounts, and verdicts but never seeds: [`crate::Seed`] is not
//! serializable, so a seed cannot be placed into an event by accident.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::core::account::BalanceReport;
use crate::core::amount::Amount;
use crate::core::authorization::AuthState;
use crate::core::funding::FundingDecision;
use crate::core::identifiers::Address;
use crate::core::outcome::Expectation;
use crate::core::outcome::StepRecord;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// A new identity is funded and verified.
    IdentityProvisioned {
        /// Identity label.
        label: String,
        /// Account address.
        address: Address,
        /// Verified native balance.
        native_balance: Amount,
    },
    /// The faucet was called for an address.
    FaucetAttempt {
        /// Account address.
        address: Address,
        /// True when the faucet reported success.
        succeeded: bool,
        /// Receipt reference or failure reason.
        detail: String,
    },
    /// The funding decision table produced a decision.
    FundingDecision {
        /// Account address.
        address: Address,
        /// Balance observed before deciding.
        observed_balance: Amount,
        /// Chosen decision.
        decision: FundingDecision,
    },
    /// A judged step is about to run.
    StepStarted {
        /// Step name.
        step: String,
        /// Declared expectation.
        expectation: Expectation,
    },
    /// A judged step completed.
    StepFinished {
        /// Step record with outcome and verdict.
        record: StepRecord,
    },
    /// A balance report was produced.
    BalanceReport {
        /// Report contents.
        report: BalanceReport,
    },
    /// An account moved between authorization states.
    StateTransition {
        /// Account address.
        address: Address,
        /// State before the change.
        from: AuthState,
        /// State observed after the change.
        to: AuthState,
    },
    /// The scenario finished.
    ScenarioFinished {
        /// True when every step passed.
        passed: bool,
        /// Number of judged steps.
        steps: usize,
        /// Failure description, when the run aborted.
        failure: Option<String>,
    },
    /// Free-form note (non-fatal failures and progress).
    Note {
        /// Note text.
        message: String,
    },
}

impl EventKind {
    /// Returns the stable event label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::IdentityProvisioned {
                ..
            } => "identity_provisioned",
            Self::FaucetAttempt {
                ..
            } => "faucet_attempt",
            Self::FundingDecision {
                ..
            } => "funding_decision",
            Self::StepStarted {
                ..
            } => "step_started",
            Self::StepFinished {
                ..
            } => "step_finished",
            Self::BalanceReport {
                ..
            } => "balance_report",
            Self::StateTransition {
                ..
            } => "state_transition",
            Self::ScenarioFinished {
                ..
            } => "scenario_finished",
            Self::Note {
                ..
            } => "note",
        }
    }
}

/// Harness event envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HarnessEvent {
    /// Event label.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Run identifier.
    pub run_id: String,
    /// Event payload.
    pub kind: EventKind,
}

impl HarnessEvent {
    /// Creates a new event stamped with the current time.
    #[must_use]
    pub fn new(run_id: impl Into<String>, kind: EventKind) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: kind.label(),
            timestamp_ms,
            run_id: run_id.into(),
            kind,
        }
    }
}
