// crates/ledger-harness-core/src/core/mod.rs
// ============================================================================
// Module: Ledger Harness Core Types
// Description: Identities, amounts, assets, snapshots, events, and auth rules.
// Purpose: Provide the shared data model for every harness component.
// Dependencies: bigdecimal, serde, stellar-strkey
// ============================================================================

//! ## Overview
//! Core types are pure values: they perform no ledger I/O. Components in
//! [`crate::runtime`] combine them with the interfaces in
//! [`crate::interfaces`].

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod account;
pub mod amount;
pub mod asset;
pub mod authorization;
pub mod events;
pub mod funding;
pub mod identifiers;
pub mod options;
pub mod outcome;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use account::AccountSnapshot;
pub use account::BalanceReport;
pub use account::SignerEntry;
pub use account::SignerType;
pub use account::Thresholds;
pub use account::TrustLineBalance;
pub use amount::Amount;
pub use amount::AmountError;
pub use amount::STROOPS_PER_UNIT;
pub use asset::Asset;
pub use asset::AssetError;
pub use asset::AssetRegistry;
pub use asset::AssetType;
pub use asset::NATIVE_ASSET_CODE;
pub use authorization::AuthState;
pub use authorization::AuthorizationDecision;
pub use authorization::OperationKind;
pub use authorization::SignerSet;
pub use authorization::ThresholdLevel;
pub use events::EventKind;
pub use events::HarnessEvent;
pub use funding::FundingDecision;
pub use funding::PaybackPolicy;
pub use funding::decide;
pub use identifiers::Address;
pub use identifiers::IdentifierError;
pub use identifiers::KeyPair;
pub use identifiers::Seed;
pub use options::MAX_MEMO_TEXT_BYTES;
pub use options::OptionsError;
pub use options::PaymentAttempt;
pub use options::PaymentSource;
pub use options::TxOptions;
pub use outcome::Expectation;
pub use outcome::RejectionCode;
pub use outcome::StepOutcome;
pub use outcome::StepRecord;
pub use outcome::Verdict;
pub use outcome::judge;
pub use outcome::judge_authorization;
