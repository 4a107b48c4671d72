// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared helpers for ledger harness system-tests.
// Purpose: Provide ledger fixtures, a friendbot stub, and artifact utilities.
// Dependencies: system-tests, ledger-harness-core, ledger-harness-sim
// ============================================================================

//! ## Overview
//! Shared helpers for ledger harness system-tests.
//! Invariants:
//! - Every test builds its own simulated ledger; no state is shared.
//! - Network use is limited to loopback stubs.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod artifacts;
pub mod fixtures;
