// crates/ledger-harness-cli/src/lib.rs
// ============================================================================
// Module: Ledger Harness CLI Library
// Description: Shared run orchestration for the ledger harness CLI.
// Purpose: Wire configuration into a ledger, faucet, reporter, and scenario.
// Dependencies: ledger-harness-config, ledger-harness-core, ledger-harness-faucet, ledger-harness-sim
// ============================================================================

//! ## Overview
//! The binary entry point (`src/main.rs`) parses arguments and delegates to
//! [`runner`], which system tests drive directly.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Run orchestration.
pub mod runner;
