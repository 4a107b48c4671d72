// crates/ledger-harness-core/src/core/identifiers.rs
// ============================================================================
// Module: Ledger Identities
// Description: Account addresses, secret seeds, and key pairs.
// Purpose: Provide strongly typed StrKey identities with redacted secrets.
// Dependencies: serde, stellar-strkey
// ============================================================================

//! ## Overview
//! Identities use the ledger's StrKey text forms: `G...` for ed25519 public
//! keys (account addresses) and `S...` for ed25519 secret seeds. Addresses are
//! opaque strings once validated. Seeds are never rendered by `Debug` or
//! `Display` and are not serializable, so they cannot leak into reports.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use stellar_strkey::ed25519::PrivateKey;
use stellar_strkey::ed25519::PublicKey;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Identity parsing errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Messages never include secret material.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// Address is not a valid `G...` StrKey.
    #[error("invalid account address: {0}")]
    InvalidAddress(String),
    /// Seed is not a valid `S...` StrKey.
    #[error("invalid secret seed")]
    InvalidSeed,
}

// ============================================================================
// SECTION: Address
// ============================================================================

/// Public account identifier (`G...` StrKey).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Parses and validates a StrKey account address.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::InvalidAddress`] when the value is not a
    /// valid ed25519 public key StrKey.
    pub fn parse(value: &str) -> Result<Self, IdentifierError> {
        let trimmed = value.trim();
        PublicKey::from_str(trimmed)
            .map(|_| Self(trimmed.to_string()))
            .map_err(|_| IdentifierError::InvalidAddress(trimmed.to_string()))
    }

    /// Encodes raw ed25519 public key bytes as an address.
    #[must_use]
    pub fn from_public_key(bytes: [u8; 32]) -> Self {
        Self(PublicKey(bytes).to_string())
    }

    /// Decodes the address into raw ed25519 public key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::InvalidAddress`] when decoding fails.
    pub fn public_key(&self) -> Result<[u8; 32], IdentifierError> {
        PublicKey::from_str(&self.0)
            .map(|key| key.0)
            .map_err(|_| IdentifierError::InvalidAddress(self.0.clone()))
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<String> for Address {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.0
    }
}

// ============================================================================
// SECTION: Seed
// ============================================================================

/// Secret signing seed (`S...` StrKey).
///
/// # Invariants
/// - The secret is only reachable through [`Seed::expose`] and
///   [`Seed::secret_bytes`]; formatting always redacts it.
#[derive(Clone, PartialEq, Eq)]
pub struct Seed(String);

impl Seed {
    /// Parses and validates a StrKey secret seed.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::InvalidSeed`] when the value is not a valid
    /// ed25519 secret seed StrKey.
    pub fn parse(value: &str) -> Result<Self, IdentifierError> {
        let trimmed = value.trim();
        PrivateKey::from_str(trimmed)
            .map(|_| Self(trimmed.to_string()))
            .map_err(|_| IdentifierError::InvalidSeed)
    }

    /// Encodes raw ed25519 secret bytes as a seed.
    #[must_use]
    pub fn from_secret_bytes(bytes: [u8; 32]) -> Self {
        Self(PrivateKey(bytes).to_string())
    }

    /// Decodes the seed into raw ed25519 secret bytes.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::InvalidSeed`] when decoding fails.
    pub fn secret_bytes(&self) -> Result<[u8; 32], IdentifierError> {
        PrivateKey::from_str(&self.0).map(|key| key.0).map_err(|_| IdentifierError::InvalidSeed)
    }

    /// Returns the raw StrKey text of the seed.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed(<redacted>)")
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted seed>")
    }
}

// ============================================================================
// SECTION: Key Pair
// ============================================================================

/// Test identity: an address and the seed that controls it.
///
/// # Invariants
/// - Created once per identity and never mutated.
/// - The seed's public half is the address (enforced by whoever creates it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPair {
    /// Public account identifier.
    pub address: Address,
    /// Secret signing seed.
    pub seed: Seed,
}

impl KeyPair {
    /// Creates a key pair from its parts.
    #[must_use]
    pub const fn new(address: Address, seed: Seed) -> Self {
        Self {
            address,
            seed,
        }
    }
}
