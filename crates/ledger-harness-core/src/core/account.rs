// crates/ledger-harness-core/src/core/account.rs
// ============================================================================
// Module: Account Snapshots
// Description: Point-in-time account state as reported by the ledger.
// Purpose: Give every component one read model for balances and signers.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! An [`AccountSnapshot`] is a fresh read of an account. It is never cached by
//! the harness: every decision that depends on account state reloads it. The
//! master key is not part of [`AccountSnapshot::signers`]; its weight is
//! reported separately as [`AccountSnapshot::master_weight`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::amount::Amount;
use crate::core::asset::Asset;
use crate::core::identifiers::Address;

// ============================================================================
// SECTION: Thresholds
// ============================================================================

/// Per-category weight thresholds of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Thresholds {
    /// Low threshold.
    pub low: u8,
    /// Medium threshold (payments, trust lines, account creation).
    pub medium: u8,
    /// High threshold (set-options).
    pub high: u8,
}

impl Thresholds {
    /// Thresholds of a freshly created account.
    pub const DEFAULT: Self = Self::uniform(0);

    /// Returns thresholds with the same value for every category.
    #[must_use]
    pub const fn uniform(value: u8) -> Self {
        Self {
            low: value,
            medium: value,
            high: value,
        }
    }

    /// Returns true when any threshold is above the default.
    #[must_use]
    pub const fn is_raised(self) -> bool {
        self.low > 0 || self.medium > 0 || self.high > 0
    }
}

// ============================================================================
// SECTION: Signers
// ============================================================================

/// Kind of additional signer key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignerType {
    /// Ed25519 public key signer.
    Ed25519PublicKey,
}

/// Additional signer registered on an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerEntry {
    /// Signer public key.
    pub key: Address,
    /// Signer weight.
    pub weight: u8,
    /// Signer key kind.
    pub signer_type: SignerType,
}

// ============================================================================
// SECTION: Balances
// ============================================================================

/// Issued-asset balance held through a trust line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustLineBalance {
    /// Asset held.
    pub asset: Asset,
    /// Current balance.
    pub balance: Amount,
    /// Trust-line limit.
    pub limit: Amount,
}

// ============================================================================
// SECTION: Snapshot
// ============================================================================

/// Fresh read of an account's state.
///
/// # Invariants
/// - `signers` never contains the account's own address.
/// - `balances` holds issued assets only; the native balance is separate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    /// Account address.
    pub address: Address,
    /// Current sequence number.
    pub sequence: u64,
    /// Native balance.
    pub native_balance: Amount,
    /// Issued-asset balances.
    pub balances: Vec<TrustLineBalance>,
    /// Weight of the account's master key.
    pub master_weight: u8,
    /// Additional signers, excluding the master key.
    pub signers: Vec<SignerEntry>,
    /// Current thresholds.
    pub thresholds: Thresholds,
}

impl AccountSnapshot {
    /// Returns the trust line for `asset`, if one exists.
    #[must_use]
    pub fn trust_line(&self, asset: &Asset) -> Option<&TrustLineBalance> {
        self.balances.iter().find(|line| &line.asset == asset)
    }

    /// Returns the balance held in `asset`; native assets read the native balance.
    #[must_use]
    pub fn balance_of(&self, asset: &Asset) -> Option<Amount> {
        if asset.is_native() {
            return Some(self.native_balance);
        }
        self.trust_line(asset).map(|line| line.balance)
    }

    /// Returns the weight of `key` as a signer of this account.
    ///
    /// The account's own address maps to the master weight.
    #[must_use]
    pub fn signer_weight(&self, key: &Address) -> Option<u8> {
        if key == &self.address {
            return Some(self.master_weight);
        }
        self.signers.iter().find(|signer| &signer.key == key).map(|signer| signer.weight)
    }
}

// ============================================================================
// SECTION: Balance Reports
// ============================================================================

/// Human-facing summary of one account, produced by the balance reporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceReport {
    /// Identity label (for example `issuer`).
    pub label: String,
    /// Account address.
    pub address: Address,
    /// Master key weight.
    pub master_weight: u8,
    /// Native balance.
    pub native_balance: Amount,
    /// Balance of the requested asset; `None` when no asset was requested or
    /// the account has no trust line for it.
    pub asset_balance: Option<Amount>,
    /// Additional signers.
    pub signers: Vec<SignerEntry>,
}
