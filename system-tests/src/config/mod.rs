// system-tests/src/config/mod.rs
// ============================================================================
// Module: System Test Configuration
// Description: Centralized configuration for ledger harness system tests.
// Purpose: Expose the typed environment switches to every suite.
// Dependencies: std
// ============================================================================

//! ## Overview
//! System tests are tuned through `LEDGER_HARNESS_SYSTEM_TEST_*` variables.
//! [`SystemTestConfig::load`] turns them into typed settings that the test
//! helpers share: where artifacts go, how long faucet calls may take, and
//! whether the live friendbot smoke test runs.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod env;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use env::SystemTestConfig;
pub use env::SystemTestEnv;
pub use env::read_env_strict;
