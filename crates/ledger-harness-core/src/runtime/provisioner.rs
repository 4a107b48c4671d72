// crates/ledger-harness-core/src/runtime/provisioner.rs
// ============================================================================
// Module: Account Provisioner
// Description: Creates and funds test identities with or without a faucet.
// Purpose: Guarantee every identity ends up funded exactly once.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Provisioning generates a key pair, optionally asks the faucet for funds,
//! observes the resulting balance, and applies the funding decision table
//! ([`crate::core::funding::decide`]). A faucet failure is never fatal: the
//! balance stays zero and the identity is funded from the source account
//! instead. Returning surplus to the source is best effort. The run only
//! fails when the source cannot fund the identity or the final reload shows
//! no native balance.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::amount::Amount;
use crate::core::events::EventKind;
use crate::core::funding::FundingDecision;
use crate::core::funding::PaybackPolicy;
use crate::core::funding::decide;
use crate::core::identifiers::Address;
use crate::core::identifiers::KeyPair;
use crate::core::options::TxOptions;
use crate::interfaces::Faucet;
use crate::interfaces::LedgerClient;
use crate::interfaces::LedgerError;
use crate::runtime::error::HarnessError;
use crate::runtime::steps::RunContext;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Memo attached when the source funds a new identity.
pub const INITIAL_FUND_MEMO: &str = "initial fund";
/// Memo attached when surplus faucet funds are returned.
pub const PAYBACK_MEMO: &str = "friendbot payback";
/// Default bootstrap amount in whole native units.
pub const DEFAULT_BOOTSTRAP_UNITS: i64 = 100;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Funding parameters for new identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingSettings {
    /// Native amount the source pays into an unfunded identity.
    pub bootstrap_amount: Amount,
    /// Portion of a faucet grant returned to the source.
    pub payback: PaybackPolicy,
}

impl Default for FundingSettings {
    fn default() -> Self {
        Self {
            bootstrap_amount: Amount::from_units(DEFAULT_BOOTSTRAP_UNITS).unwrap_or_default(),
            payback: PaybackPolicy::default(),
        }
    }
}

/// What happened when the faucet was consulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FaucetStatus {
    /// The faucet was not requested.
    NotAttempted,
    /// The faucet reported success.
    Funded {
        /// Faucet reference.
        reference: String,
    },
    /// The faucet failed or was not configured.
    Failed {
        /// Failure reason.
        reason: String,
    },
}

/// A provisioned, funded identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundedIdentity {
    /// Identity label.
    pub label: String,
    /// Identity key pair.
    pub key_pair: KeyPair,
    /// Verified native balance after provisioning.
    pub native_balance: Amount,
    /// Funding decision that was applied.
    pub decision: FundingDecision,
    /// Faucet result.
    pub faucet: FaucetStatus,
}

impl FundedIdentity {
    /// Returns the identity address.
    #[must_use]
    pub const fn address(&self) -> &Address {
        &self.key_pair.address
    }
}

// ============================================================================
// SECTION: Provisioner
// ============================================================================

/// Creates and funds identities.
pub struct AccountProvisioner<'a, L: LedgerClient> {
    /// Ledger client.
    ledger: &'a L,
    /// Optional faucet.
    faucet: Option<&'a dyn Faucet>,
    /// Funding parameters.
    settings: FundingSettings,
    /// Run context for events.
    ctx: &'a RunContext,
}

impl<'a, L: LedgerClient> AccountProvisioner<'a, L> {
    /// Creates a provisioner.
    #[must_use]
    pub const fn new(
        ledger: &'a L,
        faucet: Option<&'a dyn Faucet>,
        settings: FundingSettings,
        ctx: &'a RunContext,
    ) -> Self {
        Self {
            ledger,
            faucet,
            settings,
            ctx,
        }
    }

    /// Returns a provisioner with a different bootstrap amount.
    #[must_use]
    pub const fn with_bootstrap_amount(mut self, amount: Amount) -> Self {
        self.settings.bootstrap_amount = amount;
        self
    }

    /// Creates, funds, and verifies a new identity.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when key generation fails, the source cannot
    /// fund the identity, or the identity is unfunded after provisioning.
    pub fn provision(
        &self,
        label: &str,
        funding_source: &KeyPair,
        use_faucet: bool,
    ) -> Result<FundedIdentity, HarnessError> {
        let key_pair = self.ledger.create_key_pair().map_err(HarnessError::KeyGeneration)?;
        let address = key_pair.address.clone();

        let faucet = if use_faucet { self.request_faucet(&address) } else { FaucetStatus::NotAttempted };
        let observed_balance = self.observe_balance(&address);
        let decision = decide(
            self.settings.payback,
            self.settings.bootstrap_amount,
            use_faucet,
            observed_balance,
        );
        self.ctx.emit(EventKind::FundingDecision {
            address: address.clone(),
            observed_balance,
            decision,
        });

        match decision {
            FundingDecision::FundFromSource {
                amount,
            } => {
                let options = TxOptions::new().with_memo_text(INITIAL_FUND_MEMO);
                self.ledger
                    .fund_account(&funding_source.seed, &address, &amount, &options)
                    .map_err(|source| HarnessError::Funding {
                        address: address.clone(),
                        source,
                    })?;
            }
            FundingDecision::ReturnSurplus {
                amount,
            } => {
                let options = TxOptions::new().with_memo_text(PAYBACK_MEMO);
                if let Err(err) =
                    self.ledger.pay_native(&key_pair.seed, &funding_source.address, &amount, &options)
                {
                    self.ctx.note(format!("payback from {address} failed: {err}"));
                }
            }
            FundingDecision::KeepBalance => {}
        }

        let snapshot = self.ledger.load_account(&address).map_err(|source| {
            HarnessError::Snapshot {
                address: address.clone(),
                source,
            }
        })?;
        if snapshot.native_balance.is_zero() {
            return Err(HarnessError::Unfunded(address));
        }
        self.ctx.emit(EventKind::IdentityProvisioned {
            label: label.to_string(),
            address,
            native_balance: snapshot.native_balance,
        });
        Ok(FundedIdentity {
            label: label.to_string(),
            key_pair,
            native_balance: snapshot.native_balance,
            decision,
            faucet,
        })
    }

    /// Calls the faucet and reports the attempt.
    fn request_faucet(&self, address: &Address) -> FaucetStatus {
        let status = match self.faucet {
            Some(faucet) => match faucet.fund(address) {
                Ok(receipt) => FaucetStatus::Funded {
                    reference: receipt.reference,
                },
                Err(err) => FaucetStatus::Failed {
                    reason: err.to_string(),
                },
            },
            None => FaucetStatus::Failed {
                reason: "faucet not configured".to_string(),
            },
        };
        let (succeeded, detail) = match &status {
            FaucetStatus::Funded {
                reference,
            } => (true, reference.clone()),
            FaucetStatus::Failed {
                reason,
            } => (false, reason.clone()),
            FaucetStatus::NotAttempted => (false, String::new()),
        };
        self.ctx.emit(EventKind::FaucetAttempt {
            address: address.clone(),
            succeeded,
            detail,
        });
        status
    }

    /// Reads the native balance, treating any load failure as zero.
    fn observe_balance(&self, address: &Address) -> Amount {
        match self.ledger.load_account(address) {
            Ok(snapshot) => snapshot.native_balance,
            Err(LedgerError::AccountNotFound(_)) => Amount::ZERO,
            Err(err) => {
                self.ctx.note(format!("balance probe for {address} failed: {err}"));
                Amount::ZERO
            }
        }
    }
}
