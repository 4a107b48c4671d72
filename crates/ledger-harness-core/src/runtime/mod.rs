// crates/ledger-harness-core/src/runtime/mod.rs
// ============================================================================
// Module: Ledger Harness Runtime
// Description: Harness components, step judging, reporters, and the scenario.
// Purpose: Execute the end-to-end walkthrough against any ledger client.
// Dependencies: crate::{core, interfaces}, serde_json
// ============================================================================

//! ## Overview
//! Runtime modules implement the five harness components (provisioner,
//! asset registry via [`crate::core::asset`], trust lines, authorization
//! harness, balance reporter) plus the orchestration that strings them
//! together. All ledger calls flow through [`steps::RunContext`] so every
//! step is recorded and judged the same way.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod authorization;
pub mod balances;
pub mod error;
pub mod provisioner;
pub mod reporter;
pub mod scenario;
pub mod steps;
pub mod trust_lines;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use authorization::ADMITTED_PAYMENT_MEMO;
pub use authorization::AuthorizationHarness;
pub use authorization::CanonicalCases;
pub use authorization::REJECTED_PAYMENT_MEMO;
pub use balances::BalanceReporter;
pub use error::HarnessError;
pub use error::TrustLineAction;
pub use error::TrustLineError;
pub use provisioner::AccountProvisioner;
pub use provisioner::FaucetStatus;
pub use provisioner::FundedIdentity;
pub use provisioner::FundingSettings;
pub use reporter::FileReporter;
pub use reporter::MemoryReporter;
pub use reporter::NoopReporter;
pub use reporter::StderrReporter;
pub use scenario::EndToEndScenario;
pub use scenario::IdentityRole;
pub use scenario::IdentitySummary;
pub use scenario::ScenarioReport;
pub use scenario::ScenarioSettings;
pub use steps::RunContext;
pub use trust_lines::TrustLineManager;
