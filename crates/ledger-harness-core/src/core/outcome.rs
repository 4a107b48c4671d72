// crates/ledger-harness-core/src/core/outcome.rs
// ============================================================================
// Module: Step Outcomes
// Description: Ledger rejection codes, step outcomes, and the judging table.
// Purpose: Separate business rejections from infrastructure failures.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Every ledger step resolves to a [`StepOutcome`]: admitted, rejected by the
//! ledger with a [`RejectionCode`], or failed for infrastructure reasons.
//! The harness pairs each step with an explicit [`Expectation`] and
//! [`judge`] maps the pair to a [`Verdict`]. Infrastructure failures never
//! pass, whatever was expected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Rejection Codes
// ============================================================================

/// Ledger result codes for rejected transactions and operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionCode {
    /// Signatures do not reach the required weight.
    TxBadAuth,
    /// Transaction carries unused or unknown signatures.
    TxBadAuthExtra,
    /// Source cannot pay the transaction fee.
    TxInsufficientFeeBalance,
    /// Source lacks the funds for the operation.
    OpUnderfunded,
    /// Operation would drop the account below its reserve.
    OpLowReserve,
    /// Destination account does not exist.
    OpNoDestination,
    /// Account to create already exists.
    OpAccountExists,
    /// Destination has no trust line for the asset.
    OpNoTrust,
    /// Source has no trust line for the asset.
    OpSrcNoTrust,
    /// Destination trust line limit would be exceeded.
    OpLineFull,
    /// Asset issuer does not exist.
    OpNoIssuer,
    /// Trust-line limit below the current balance.
    OpInvalidLimit,
    /// Trust line still holds a balance.
    OpTrustLineNotEmpty,
    /// Operation is malformed.
    OpMalformed,
    /// Account already has the maximum number of signers.
    OpTooManySigners,
    /// Signer key is invalid (for example, the account's own key).
    OpBadSigner,
}

impl RejectionCode {
    /// Returns the ledger's result code text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TxBadAuth => "tx_bad_auth",
            Self::TxBadAuthExtra => "tx_bad_auth_extra",
            Self::TxInsufficientFeeBalance => "tx_insufficient_fee_balance",
            Self::OpUnderfunded => "op_underfunded",
            Self::OpLowReserve => "op_low_reserve",
            Self::OpNoDestination => "op_no_destination",
            Self::OpAccountExists => "op_account_exists",
            Self::OpNoTrust => "op_no_trust",
            Self::OpSrcNoTrust => "op_src_no_trust",
            Self::OpLineFull => "op_line_full",
            Self::OpNoIssuer => "op_no_issuer",
            Self::OpInvalidLimit => "op_invalid_limit",
            Self::OpTrustLineNotEmpty => "op_trust_line_not_empty",
            Self::OpMalformed => "op_malformed",
            Self::OpTooManySigners => "op_too_many_signers",
            Self::OpBadSigner => "op_bad_signer",
        }
    }

    /// Returns true for transaction-level authorization failures.
    #[must_use]
    pub const fn is_auth_failure(self) -> bool {
        matches!(self, Self::TxBadAuth | Self::TxBadAuthExtra)
    }
}

impl fmt::Display for RejectionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Result of one ledger step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum StepOutcome {
    /// The ledger accepted the transaction.
    Admitted,
    /// The ledger rejected the transaction.
    Rejected(RejectionCode),
    /// The ledger could not be reached or the request was invalid.
    Infrastructure(String),
}

/// Declared expectation for a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expectation {
    /// The step must be admitted.
    Admit,
    /// The step must be rejected.
    Reject,
}

impl Expectation {
    /// Returns the expectation matching a predicted admission.
    #[must_use]
    pub const fn from_admitted(admitted: bool) -> Self {
        if admitted { Self::Admit } else { Self::Reject }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admit => f.write_str("admit"),
            Self::Reject => f.write_str("reject"),
        }
    }
}

/// Judgement of an outcome against an expectation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", content = "detail", rename_all = "snake_case")]
pub enum Verdict {
    /// Outcome matched the expectation.
    Pass,
    /// A rejection was expected but the ledger admitted the step.
    UnexpectedAdmission,
    /// An admission was expected but the ledger rejected the step.
    UnexpectedRejection(RejectionCode),
    /// The step failed for infrastructure reasons.
    Infrastructure(String),
}

/// Maps an expectation and an outcome to a verdict.
#[must_use]
pub fn judge(expectation: Expectation, outcome: &StepOutcome) -> Verdict {
    match (expectation, outcome) {
        (_, StepOutcome::Infrastructure(reason)) => Verdict::Infrastructure(reason.clone()),
        (Expectation::Admit, StepOutcome::Admitted)
        | (Expectation::Reject, StepOutcome::Rejected(_)) => Verdict::Pass,
        (Expectation::Reject, StepOutcome::Admitted) => Verdict::UnexpectedAdmission,
        (Expectation::Admit, StepOutcome::Rejected(code)) => Verdict::UnexpectedRejection(*code),
    }
}

/// Judges a payment whose admission depends on signature weight.
///
/// An expected rejection passes only when the ledger refused the signatures
/// ([`RejectionCode::is_auth_failure`]). Any other rejection code becomes
/// [`Verdict::UnexpectedRejection`].
#[must_use]
pub fn judge_authorization(expectation: Expectation, outcome: &StepOutcome) -> Verdict {
    match (expectation, outcome) {
        (Expectation::Reject, StepOutcome::Rejected(code)) if !code.is_auth_failure() => {
            Verdict::UnexpectedRejection(*code)
        }
        _ => judge(expectation, outcome),
    }
}

/// Record of one judged step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Step name.
    pub step: String,
    /// Declared expectation.
    pub expectation: Expectation,
    /// Observed outcome.
    pub outcome: StepOutcome,
    /// Verdict.
    pub verdict: Verdict,
}
