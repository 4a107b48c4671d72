// crates/ledger-harness-sim/src/keys.rs
// ============================================================================
// Module: Simulated Key Material
// Description: Ed25519 key derivation, signing, and signature verification.
// Purpose: Give simulated accounts real signatures over transaction hashes.
// Dependencies: ed25519-dalek, rand, ledger-harness-core
// ============================================================================

//! ## Overview
//! Seeds carry the 32-byte ed25519 secret; the address is the StrKey of the
//! derived verifying key. Fresh key pairs draw their secret from the OS RNG.

// ============================================================================
// SECTION: Imports
// ============================================================================

use ed25519_dalek::Signature;
use ed25519_dalek::Signer;
use ed25519_dalek::SigningKey;
use ed25519_dalek::Verifier;
use ed25519_dalek::VerifyingKey;
use ledger_harness_core::Address;
use ledger_harness_core::KeyPair;
use ledger_harness_core::LedgerError;
use ledger_harness_core::Seed;
use rand::RngCore;
use rand::rngs::OsRng;

use crate::transaction::DecoratedSignature;
use crate::transaction::TxHash;

// ============================================================================
// SECTION: Key Pairs
// ============================================================================

/// Derives the key pair for a 32-byte ed25519 secret.
#[must_use]
pub fn derive_key_pair(secret: [u8; 32]) -> KeyPair {
    let signing = SigningKey::from_bytes(&secret);
    let address = Address::from_public_key(signing.verifying_key().to_bytes());
    KeyPair::new(address, Seed::from_secret_bytes(secret))
}

/// Generates a fresh random key pair.
///
/// # Errors
///
/// Returns [`LedgerError::Unavailable`] when the OS entropy source fails.
pub fn generate_key_pair() -> Result<KeyPair, LedgerError> {
    let mut secret = [0u8; 32];
    OsRng
        .try_fill_bytes(&mut secret)
        .map_err(|err| LedgerError::Unavailable(format!("entropy source failed: {err}")))?;
    Ok(derive_key_pair(secret))
}

// ============================================================================
// SECTION: Signatures
// ============================================================================

/// Signs a transaction hash with `seed`.
///
/// # Errors
///
/// Returns [`LedgerError::Invalid`] when the seed does not decode.
pub fn sign(seed: &Seed, hash: &TxHash) -> Result<DecoratedSignature, LedgerError> {
    let secret = seed.secret_bytes().map_err(|err| LedgerError::Invalid(err.to_string()))?;
    let signing = SigningKey::from_bytes(&secret);
    let signature = signing.sign(hash.as_bytes());
    Ok(DecoratedSignature {
        signer: Address::from_public_key(signing.verifying_key().to_bytes()),
        signature: signature.to_bytes().to_vec(),
    })
}

/// Returns the signers whose signatures verify against `hash`, deduplicated
/// in first-seen order. Malformed or forged signatures are dropped.
#[must_use]
pub fn verified_signers(hash: &TxHash, signatures: &[DecoratedSignature]) -> Vec<Address> {
    let mut verified: Vec<Address> = Vec::with_capacity(signatures.len());
    for decorated in signatures {
        if verifies(hash, decorated) && !verified.contains(&decorated.signer) {
            verified.push(decorated.signer.clone());
        }
    }
    verified
}

/// Checks one decorated signature.
fn verifies(hash: &TxHash, decorated: &DecoratedSignature) -> bool {
    let Ok(public_key) = decorated.signer.public_key() else {
        return false;
    };
    let Ok(verifying) = VerifyingKey::from_bytes(&public_key) else {
        return false;
    };
    let Ok(signature) = Signature::from_slice(&decorated.signature) else {
        return false;
    };
    verifying.verify(hash.as_bytes(), &signature).is_ok()
}
