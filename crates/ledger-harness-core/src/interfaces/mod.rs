// crates/ledger-harness-core/src/interfaces/mod.rs
// ============================================================================
// Module: Ledger Harness Interfaces
// Description: Backend-agnostic interfaces for the ledger, faucet, and reporter.
// Purpose: Define the contract surfaces the harness components depend on.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! The harness never talks to a network directly. Ledger access, faucet
//! funding, and progress reporting are reached through the traits in this
//! module so the same components run against a live network client, the
//! simulated ledger, or a test double.
//!
//! Ledger calls are synchronous and block until the transaction resolves.
//! Rejections ([`LedgerError::Rejected`]) are business outcomes the harness
//! judges; every other variant is an infrastructure failure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::account::AccountSnapshot;
use crate::core::account::Thresholds;
use crate::core::amount::Amount;
use crate::core::asset::Asset;
use crate::core::events::HarnessEvent;
use crate::core::identifiers::Address;
use crate::core::identifiers::KeyPair;
use crate::core::identifiers::Seed;
use crate::core::options::PaymentSource;
use crate::core::options::TxOptions;
use crate::core::outcome::RejectionCode;
use crate::core::outcome::StepOutcome;

// ============================================================================
// SECTION: Ledger Client
// ============================================================================

/// Ledger client errors.
///
/// # Invariants
/// - Messages never include secret seeds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The ledger rejected the transaction.
    #[error("transaction rejected: {0}")]
    Rejected(RejectionCode),
    /// The account does not exist on the ledger.
    #[error("account not found: {0}")]
    AccountNotFound(Address),
    /// The ledger could not be reached.
    #[error("ledger unavailable: {0}")]
    Unavailable(String),
    /// The request could not be built or was malformed.
    #[error("invalid ledger request: {0}")]
    Invalid(String),
}

impl LedgerError {
    /// Returns the rejection code for business rejections.
    #[must_use]
    pub const fn rejection(&self) -> Option<RejectionCode> {
        match self {
            Self::Rejected(code) => Some(*code),
            _ => None,
        }
    }
}

/// Maps a ledger call result to a step outcome.
#[must_use]
pub fn step_outcome(result: &Result<(), LedgerError>) -> StepOutcome {
    match result {
        Ok(()) => StepOutcome::Admitted,
        Err(LedgerError::Rejected(code)) => StepOutcome::Rejected(*code),
        Err(err) => StepOutcome::Infrastructure(err.to_string()),
    }
}

/// Synchronous ledger client.
///
/// Every submitting call is one single-operation transaction signed by the
/// named seed plus any signers in the [`TxOptions`].
pub trait LedgerClient {
    /// Generates a fresh key pair. The account does not exist until funded.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] when key generation fails.
    fn create_key_pair(&self) -> Result<KeyPair, LedgerError>;

    /// Loads a fresh snapshot of an account.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::AccountNotFound`] for unfunded accounts.
    fn load_account(&self, address: &Address) -> Result<AccountSnapshot, LedgerError>;

    /// Creates `destination` with a starting native balance paid by `source`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] when the transaction is rejected or fails.
    fn fund_account(
        &self,
        source: &Seed,
        destination: &Address,
        amount: &Amount,
        options: &TxOptions,
    ) -> Result<(), LedgerError>;

    /// Pays native currency from `source` to an existing account.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] when the transaction is rejected or fails.
    fn pay_native(
        &self,
        source: &Seed,
        destination: &Address,
        amount: &Amount,
        options: &TxOptions,
    ) -> Result<(), LedgerError>;

    /// Pays `asset` from `source`; the master key signs only for
    /// [`PaymentSource::KeyPair`].
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] when the transaction is rejected or fails.
    fn pay(
        &self,
        source: &PaymentSource,
        destination: &Address,
        amount: &Amount,
        asset: &Asset,
        options: &TxOptions,
    ) -> Result<(), LedgerError>;

    /// Creates or updates a trust line with the given limit.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] when the transaction is rejected or fails.
    fn create_trust_line(&self, holder: &Seed, asset: &Asset, limit: &Amount)
    -> Result<(), LedgerError>;

    /// Removes a trust line (limit zero). The balance must already be zero.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] when the transaction is rejected or fails.
    fn remove_trust_line(&self, holder: &Seed, asset: &Asset) -> Result<(), LedgerError>;

    /// Adds (or reweights) an additional signer on the seed's account.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] when the transaction is rejected or fails.
    fn add_signer(&self, account: &Seed, signer: &Address, weight: u8) -> Result<(), LedgerError>;

    /// Sets the master key weight of the seed's account.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] when the transaction is rejected or fails.
    fn set_master_weight(&self, account: &Seed, weight: u8) -> Result<(), LedgerError>;

    /// Sets thresholds on `account`, signed only by the signers in `options`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] when the transaction is rejected or fails.
    fn set_thresholds(
        &self,
        account: &Address,
        thresholds: Thresholds,
        options: &TxOptions,
    ) -> Result<(), LedgerError>;
}

// ============================================================================
// SECTION: Faucet
// ============================================================================

/// Faucet errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FaucetError {
    /// The faucet could not be reached.
    #[error("faucet unavailable: {0}")]
    Unavailable(String),
    /// The faucet refused the request.
    #[error("faucet rejected request: {0}")]
    Rejected(String),
}

/// Receipt returned by a successful faucet call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaucetReceipt {
    /// Funded address.
    pub address: Address,
    /// Faucet-reported reference (transaction hash or similar).
    pub reference: String,
}

/// Faucet that creates and funds accounts on request.
pub trait Faucet {
    /// Requests funds for `address`.
    ///
    /// # Errors
    ///
    /// Returns [`FaucetError`] when the faucet is unreachable or refuses.
    fn fund(&self, address: &Address) -> Result<FaucetReceipt, FaucetError>;
}

// ============================================================================
// SECTION: Reporter
// ============================================================================

/// Sink for harness progress events.
pub trait HarnessReporter: Send + Sync {
    /// Records an event. Sinks must not fail the run.
    fn record(&self, event: &HarnessEvent);
}
