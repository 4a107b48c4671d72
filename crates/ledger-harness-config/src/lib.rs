// crates/ledger-harness-config/src/lib.rs
// ============================================================================
// Module: Ledger Harness Config Library
// Description: Canonical config model, validation, and example generation.
// Purpose: Single source of truth for ledger-harness.toml semantics.
// Dependencies: ledger-harness-core, ledger-harness-faucet, ledger-harness-sim, serde, toml
// ============================================================================

//! ## Overview
//! `ledger-harness-config` defines the configuration model for the ledger
//! harness. Validation is strict and fail-closed: a config that loads is one
//! the scenario can run with.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
