// crates/ledger-harness-core/src/runtime/error.rs
// ============================================================================
// Module: Harness Errors
// Description: Fatal divergences and failures raised by harness components.
// Purpose: Give callers one typed error for "the run stopped here".
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! A [`HarnessError`] always means the run aborted. Business rejections that
//! were expected are not errors; they are recorded as passing steps.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use thiserror::Error;

use crate::core::asset::Asset;
use crate::core::authorization::AuthState;
use crate::core::identifiers::Address;
use crate::core::outcome::Expectation;
use crate::core::outcome::RejectionCode;
use crate::interfaces::LedgerError;

// ============================================================================
// SECTION: Trust Line Errors
// ============================================================================

/// Trust-line action that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrustLineAction {
    /// Creating the trust line.
    Establish,
    /// Removing the trust line.
    Remove,
}

impl fmt::Display for TrustLineAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Establish => f.write_str("establish"),
            Self::Remove => f.write_str("remove"),
        }
    }
}

/// Trust-line failure with the ledger's reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("trust line {action} failed for {holder} on {asset}: {source}")]
pub struct TrustLineError {
    /// Failed action.
    pub action: TrustLineAction,
    /// Trust-line holder.
    pub holder: Address,
    /// Asset of the trust line.
    pub asset: Asset,
    /// Ledger failure.
    pub source: LedgerError,
}

// ============================================================================
// SECTION: Harness Errors
// ============================================================================

/// Fatal harness errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HarnessError {
    /// Scenario or component settings are inconsistent.
    #[error("invalid harness settings: {0}")]
    InvalidSettings(String),
    /// Key generation failed.
    #[error("key generation failed: {0}")]
    KeyGeneration(LedgerError),
    /// Funding a new identity failed.
    #[error("funding {address} failed: {source}")]
    Funding {
        /// Account being funded.
        address: Address,
        /// Ledger failure.
        source: LedgerError,
    },
    /// An identity has no native balance after provisioning.
    #[error("identity {0} is unfunded after provisioning")]
    Unfunded(Address),
    /// A trust-line step failed.
    #[error(transparent)]
    TrustLine(#[from] TrustLineError),
    /// Loading an account snapshot failed.
    #[error("snapshot of {address} failed: {source}")]
    Snapshot {
        /// Account being loaded.
        address: Address,
        /// Ledger failure.
        source: LedgerError,
    },
    /// Observed authorization state differs from the intended state.
    #[error("state mismatch for {address}: expected {expected}, observed {observed}")]
    StateMismatch {
        /// Account under test.
        address: Address,
        /// Intended state.
        expected: AuthState,
        /// Observed state.
        observed: AuthState,
    },
    /// The authorization model disagrees with the declared expectation.
    #[error("step {step}: expectation {declared} contradicts predicted {predicted}")]
    InconsistentExpectation {
        /// Step name.
        step: String,
        /// Declared expectation.
        declared: Expectation,
        /// Expectation implied by the authorization model.
        predicted: Expectation,
    },
    /// A step expected to be rejected was admitted.
    #[error("step {step}: expected rejection but the ledger admitted it")]
    UnexpectedAdmission {
        /// Step name.
        step: String,
    },
    /// A step expected to be admitted was rejected.
    #[error("step {step}: expected admission but the ledger rejected it ({code})")]
    UnexpectedRejection {
        /// Step name.
        step: String,
        /// Ledger rejection code.
        code: RejectionCode,
    },
    /// A step failed for infrastructure reasons.
    #[error("step {step}: infrastructure failure: {reason}")]
    Infrastructure {
        /// Step name.
        step: String,
        /// Failure reason.
        reason: String,
    },
    /// An observed balance differs from the expected balance.
    #[error("balance check {check} failed: {detail}")]
    BalanceMismatch {
        /// Check name.
        check: String,
        /// Mismatch detail.
        detail: String,
    },
}
