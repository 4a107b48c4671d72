// crates/ledger-harness-core/src/core/funding.rs
// ============================================================================
// Module: Funding Decisions
// Description: Decision table for bootstrapping new identities.
// Purpose: Keep the funding choice a pure, testable function.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! After a faucet attempt the provisioner observes the new account's native
//! balance and asks [`decide`] what to do:
//!
//! | faucet attempted | balance | decision |
//! |---|---|---|
//! | any | 0 | fund from the source account |
//! | yes | > 0 | return the configured payback, or keep |
//! | no | > 0 | keep |
//!
//! A payback is only returned when it is strictly between zero and the
//! observed balance, so the identity always stays funded.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::amount::Amount;

// ============================================================================
// SECTION: Payback Policy
// ============================================================================

/// How much of a faucet grant is returned to the funding source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum PaybackPolicy {
    /// Keep the whole grant.
    None,
    /// Return a fixed amount.
    Fixed {
        /// Amount returned.
        amount: Amount,
    },
    /// Return `numerator / denominator` of the observed balance.
    Fraction {
        /// Fraction numerator.
        numerator: u32,
        /// Fraction denominator.
        denominator: u32,
    },
}

impl Default for PaybackPolicy {
    fn default() -> Self {
        Self::Fraction {
            numerator: 1,
            denominator: 2,
        }
    }
}

impl PaybackPolicy {
    /// Returns the raw payback for an observed balance before range checks.
    #[must_use]
    pub fn payback_for(self, balance: Amount) -> Option<Amount> {
        match self {
            Self::None => None,
            Self::Fixed {
                amount,
            } => Some(amount),
            Self::Fraction {
                numerator,
                denominator,
            } => balance.scale(numerator, denominator),
        }
    }
}

// ============================================================================
// SECTION: Decision Table
// ============================================================================

/// Funding action chosen for a new identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum FundingDecision {
    /// Create the account from the funding source with `amount`.
    FundFromSource {
        /// Bootstrap amount.
        amount: Amount,
    },
    /// Return `amount` of the faucet grant to the funding source.
    ReturnSurplus {
        /// Amount returned.
        amount: Amount,
    },
    /// Keep the observed balance.
    KeepBalance,
}

/// Applies the funding decision table.
#[must_use]
pub fn decide(
    policy: PaybackPolicy,
    bootstrap_amount: Amount,
    faucet_attempted: bool,
    observed_balance: Amount,
) -> FundingDecision {
    if observed_balance.is_zero() {
        return FundingDecision::FundFromSource {
            amount: bootstrap_amount,
        };
    }
    if !faucet_attempted {
        return FundingDecision::KeepBalance;
    }
    match policy.payback_for(observed_balance) {
        Some(amount) if !amount.is_zero() && amount < observed_balance => {
            FundingDecision::ReturnSurplus {
                amount,
            }
        }
        _ => FundingDecision::KeepBalance,
    }
}
