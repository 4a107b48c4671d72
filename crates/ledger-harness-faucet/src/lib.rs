// crates/ledger-harness-faucet/src/lib.rs
// ============================================================================
// Module: Ledger Harness HTTP Faucet
// Description: Friendbot-style HTTP faucet client.
// Purpose: Fund test accounts from a public test-network faucet.
// Dependencies: ledger-harness-core, reqwest, serde_json, thiserror
// ============================================================================

//! ## Overview
//! [`FriendbotFaucet`] issues `GET <url>?addr=<address>` and maps the answer
//! onto the harness faucet interface. Redirects are not followed, response
//! bodies are read under a hard byte limit, and cleartext HTTP is refused
//! unless explicitly allowed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod friendbot;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use friendbot::DEFAULT_FRIENDBOT_URL;
pub use friendbot::FriendbotConfig;
pub use friendbot::FriendbotFaucet;
pub use friendbot::FriendbotSetupError;
