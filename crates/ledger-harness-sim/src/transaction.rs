// crates/ledger-harness-sim/src/transaction.rs
// ============================================================================
// Module: Simulated Transactions
// Description: Operations, transactions, envelopes, and canonical hashing.
// Purpose: Give every submission a stable hash that signatures commit to.
// Dependencies: serde, serde_jcs, sha2, ledger-harness-core
// ============================================================================

//! ## Overview
//! A transaction carries exactly one [`Operation`]. Its hash is SHA-256 over
//! the RFC 8785 canonical JSON of the network passphrase and the transaction,
//! so the same transaction on another network never shares a hash.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use ledger_harness_core::Address;
use ledger_harness_core::Amount;
use ledger_harness_core::Asset;
use ledger_harness_core::LedgerError;
use ledger_harness_core::OperationKind;
use ledger_harness_core::Thresholds;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;

// ============================================================================
// SECTION: Operations
// ============================================================================

/// Signer addition, update, or removal (weight zero removes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignerUpdate {
    /// Signer key.
    pub key: Address,
    /// New weight.
    pub weight: u8,
}

/// Ledger operations supported by the simulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    /// Creates and funds a new account.
    CreateAccount {
        /// New account address.
        destination: Address,
        /// Native starting balance.
        starting_balance: Amount,
    },
    /// Pays native or issued funds.
    Payment {
        /// Receiving account.
        destination: Address,
        /// Asset paid.
        asset: Asset,
        /// Amount paid.
        amount: Amount,
    },
    /// Creates, updates, or removes (limit zero) a trust line.
    ChangeTrust {
        /// Trusted asset.
        asset: Asset,
        /// Trust-line limit.
        limit: Amount,
    },
    /// Changes master weight, thresholds, or one signer.
    SetOptions {
        /// New master weight.
        master_weight: Option<u8>,
        /// New thresholds.
        thresholds: Option<Thresholds>,
        /// Signer change.
        signer: Option<SignerUpdate>,
    },
}

impl Operation {
    /// Returns the authorization category of the operation.
    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        match self {
            Self::CreateAccount {
                ..
            } => OperationKind::CreateAccount,
            Self::Payment {
                ..
            } => OperationKind::Payment,
            Self::ChangeTrust {
                ..
            } => OperationKind::ChangeTrust,
            Self::SetOptions {
                ..
            } => OperationKind::SetOptions,
        }
    }
}

// ============================================================================
// SECTION: Transactions
// ============================================================================

/// Single-operation transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    /// Source account; pays the fee and consumes the sequence number.
    pub source: Address,
    /// Sequence number; must be the source's current sequence plus one.
    pub sequence: u64,
    /// Fee offered.
    pub fee: Amount,
    /// Optional text memo.
    pub memo_text: Option<String>,
    /// The operation.
    pub operation: Operation,
}

/// Hash input binding a transaction to a network.
#[derive(Serialize)]
struct SignaturePayload<'a> {
    /// Network passphrase.
    network: &'a str,
    /// Transaction body.
    transaction: &'a Transaction,
}

impl Transaction {
    /// Computes the network-bound transaction hash.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Invalid`] when canonicalization fails.
    pub fn hash(&self, network_passphrase: &str) -> Result<TxHash, LedgerError> {
        let payload = SignaturePayload {
            network: network_passphrase,
            transaction: self,
        };
        let bytes = serde_jcs::to_vec(&payload).map_err(|err| {
            LedgerError::Invalid(format!("transaction canonicalization failed: {err}"))
        })?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let digest = hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&digest);
        Ok(TxHash(out))
    }
}

/// SHA-256 transaction hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TxHash([u8; 32]);

impl TxHash {
    /// Returns the raw hash bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Envelopes
// ============================================================================

/// Signature with the claimed signer key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoratedSignature {
    /// Claimed signer.
    pub signer: Address,
    /// Raw ed25519 signature bytes.
    pub signature: Vec<u8>,
}

/// Transaction plus signatures, as submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionEnvelope {
    /// Transaction body.
    pub transaction: Transaction,
    /// Signatures over the transaction hash.
    pub signatures: Vec<DecoratedSignature>,
}
