// crates/ledger-harness-core/src/core/options.rs
// ============================================================================
// Module: Transaction Options
// Description: Memo and co-signer options plus payment attempt descriptions.
// Purpose: Describe who signs a transaction and what it carries.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! [`TxOptions`] carries the optional text memo and any additional signing
//! seeds for a single transaction. [`PaymentAttempt`] is the harness-level
//! description of one payment: a source (signing with its master key or not),
//! a destination, the asset and amount, and the co-signers whose signatures
//! are attached.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::amount::Amount;
use crate::core::asset::Asset;
use crate::core::identifiers::Address;
use crate::core::identifiers::KeyPair;
use crate::core::identifiers::Seed;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum memo text length in bytes.
pub const MAX_MEMO_TEXT_BYTES: usize = 28;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Transaction option validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    /// Memo text exceeds [`MAX_MEMO_TEXT_BYTES`].
    #[error("memo text is {0} bytes (max {MAX_MEMO_TEXT_BYTES})")]
    MemoTooLong(usize),
}

// ============================================================================
// SECTION: Transaction Options
// ============================================================================

/// Per-transaction options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxOptions {
    /// Optional text memo.
    pub memo_text: Option<String>,
    /// Additional signing seeds.
    pub signers: Vec<Seed>,
}

impl TxOptions {
    /// Creates empty options.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            memo_text: None,
            signers: Vec::new(),
        }
    }

    /// Attaches a text memo.
    #[must_use]
    pub fn with_memo_text(mut self, text: impl Into<String>) -> Self {
        self.memo_text = Some(text.into());
        self
    }

    /// Adds a signing seed.
    #[must_use]
    pub fn with_signer(mut self, seed: Seed) -> Self {
        self.signers.push(seed);
        self
    }

    /// Checks the options against ledger limits.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::MemoTooLong`] when the memo exceeds 28 bytes.
    pub fn validate(&self) -> Result<(), OptionsError> {
        match &self.memo_text {
            Some(text) if text.len() > MAX_MEMO_TEXT_BYTES => {
                Err(OptionsError::MemoTooLong(text.len()))
            }
            _ => Ok(()),
        }
    }
}

// ============================================================================
// SECTION: Payments
// ============================================================================

/// Source of a payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentSource {
    /// The source's master key signs.
    KeyPair(KeyPair),
    /// Only the address is named; the master key does not sign.
    Address(Address),
}

impl PaymentSource {
    /// Returns the source account address.
    #[must_use]
    pub const fn address(&self) -> &Address {
        match self {
            Self::KeyPair(pair) => &pair.address,
            Self::Address(address) => address,
        }
    }

    /// Returns the master seed when the master key signs.
    #[must_use]
    pub const fn master_seed(&self) -> Option<&Seed> {
        match self {
            Self::KeyPair(pair) => Some(&pair.seed),
            Self::Address(_) => None,
        }
    }
}

/// One payment the harness submits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentAttempt {
    /// Paying account.
    pub source: PaymentSource,
    /// Receiving account.
    pub destination: Address,
    /// Amount to move.
    pub amount: Amount,
    /// Asset to move.
    pub asset: Asset,
    /// Optional memo text.
    pub memo_text: Option<String>,
    /// Additional signers attached to the transaction.
    pub co_signers: Vec<KeyPair>,
}

impl PaymentAttempt {
    /// Creates an attempt with no memo and no co-signers.
    #[must_use]
    pub const fn new(
        source: PaymentSource,
        destination: Address,
        amount: Amount,
        asset: Asset,
    ) -> Self {
        Self {
            source,
            destination,
            amount,
            asset,
            memo_text: None,
            co_signers: Vec::new(),
        }
    }

    /// Attaches a memo.
    #[must_use]
    pub fn with_memo_text(mut self, text: impl Into<String>) -> Self {
        self.memo_text = Some(text.into());
        self
    }

    /// Adds a co-signer.
    #[must_use]
    pub fn with_co_signer(mut self, signer: KeyPair) -> Self {
        self.co_signers.push(signer);
        self
    }

    /// Addresses whose signatures the transaction carries, master first.
    #[must_use]
    pub fn signing_addresses(&self) -> Vec<Address> {
        let mut addresses = Vec::with_capacity(self.co_signers.len() + 1);
        if let PaymentSource::KeyPair(pair) = &self.source {
            addresses.push(pair.address.clone());
        }
        addresses.extend(self.co_signers.iter().map(|signer| signer.address.clone()));
        addresses
    }

    /// Builds the ledger options (memo and co-signer seeds).
    #[must_use]
    pub fn tx_options(&self) -> TxOptions {
        let mut options = TxOptions::new();
        if let Some(memo) = &self.memo_text {
            options = options.with_memo_text(memo.clone());
        }
        for signer in &self.co_signers {
            options = options.with_signer(signer.seed.clone());
        }
        options
    }
}
