// crates/ledger-harness-core/src/lib.rs
// ============================================================================
// Module: Ledger Harness Core Library
// Description: Public API surface for the ledger harness core.
// Purpose: Expose core types, interfaces, and runtime components.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Ledger harness core validates a ledger's account and multi-signature
//! authorization model end to end: identity funding, asset issuance, trust
//! lines, and payments under changing signer weights and thresholds. It is
//! backend-agnostic: the ledger, faucet, and event sink are reached only
//! through the traits in [`interfaces`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use interfaces::Faucet;
pub use interfaces::FaucetError;
pub use interfaces::FaucetReceipt;
pub use interfaces::HarnessReporter;
pub use interfaces::LedgerClient;
pub use interfaces::LedgerError;
pub use interfaces::step_outcome;
pub use runtime::ADMITTED_PAYMENT_MEMO;
pub use runtime::AccountProvisioner;
pub use runtime::AuthorizationHarness;
pub use runtime::BalanceReporter;
pub use runtime::CanonicalCases;
pub use runtime::EndToEndScenario;
pub use runtime::FaucetStatus;
pub use runtime::FileReporter;
pub use runtime::FundedIdentity;
pub use runtime::FundingSettings;
pub use runtime::HarnessError;
pub use runtime::IdentityRole;
pub use runtime::IdentitySummary;
pub use runtime::MemoryReporter;
pub use runtime::NoopReporter;
pub use runtime::REJECTED_PAYMENT_MEMO;
pub use runtime::RunContext;
pub use runtime::ScenarioReport;
pub use runtime::ScenarioSettings;
pub use runtime::StderrReporter;
pub use runtime::TrustLineAction;
pub use runtime::TrustLineError;
pub use runtime::TrustLineManager;
