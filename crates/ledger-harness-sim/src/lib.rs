// crates/ledger-harness-sim/src/lib.rs
// ============================================================================
// Module: Ledger Harness Simulated Ledger
// Description: In-memory ledger and faucet backends for the harness.
// Purpose: Run the authorization harness without a live network.
// Dependencies: ledger-harness-core, ed25519-dalek, rand, serde_jcs, sha2
// ============================================================================

//! ## Overview
//! This crate provides [`SimulatedLedger`], an in-memory ledger that builds,
//! signs, hashes, and applies single-operation transactions, and
//! [`SimulatedFaucet`], a friendbot-style faucet funded from a genesis account.
//! Invariants:
//! - Admission follows the weighted multi-signature rule from
//!   `ledger_harness_core::SignerSet`, evaluated over verified signatures only.
//! - Fees are charged and sequence numbers consumed for every transaction that
//!   passes authorization, even when its operation fails.
//! - Operation effects are all-or-nothing.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod faucet;
pub mod keys;
pub mod ledger;
pub mod transaction;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use faucet::SimulatedFaucet;
pub use keys::derive_key_pair;
pub use keys::generate_key_pair;
pub use ledger::DEFAULT_NETWORK_PASSPHRASE;
pub use ledger::MAX_SIGNERS;
pub use ledger::SimulatedLedger;
pub use ledger::SimulatedLedgerConfig;
pub use ledger::TransactionRecord;
pub use transaction::DecoratedSignature;
pub use transaction::Operation;
pub use transaction::SignerUpdate;
pub use transaction::Transaction;
pub use transaction::TransactionEnvelope;
pub use transaction::TxHash;
