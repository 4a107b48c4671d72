// system-tests/src/lib.rs
// ============================================================================
// Module: Ledger Harness System Tests Library
// Description: Shared configuration for system test scenarios.
// Purpose: Provide common settings for the ledger harness system-test binaries.
// Dependencies: std
// ============================================================================

//! ## Overview
//! This crate hosts shared configuration used by the ledger harness
//! system-test binaries in `system-tests/tests`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
