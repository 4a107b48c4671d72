// crates/ledger-harness-core/src/core/authorization.rs
// ============================================================================
// Module: Authorization Model
// Description: Weighted multi-signature admission rule and account auth states.
// Purpose: Predict ledger admission from a snapshot and classify signer setups.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! An operation is admitted iff the summed weight of the recognized keys that
//! signed it reaches `max(threshold(category), 1)`. The master key counts
//! only when it signs and its weight is nonzero; unknown keys contribute
//! nothing. Because the floor is one, a zero threshold still needs one valid
//! signature with nonzero weight, so a disabled master can never act alone.
//!
//! The same rule is used by the harness to predict outcomes and by the
//! simulated ledger to enforce them.
//!
//! [`AuthState`] names the four signer configurations the harness walks an
//! account through and is derived from a fresh snapshot, never remembered.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::account::AccountSnapshot;
use crate::core::account::Thresholds;
use crate::core::identifiers::Address;

// ============================================================================
// SECTION: Operation Categories
// ============================================================================

/// Threshold category an operation is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdLevel {
    /// Low threshold.
    Low,
    /// Medium threshold.
    Medium,
    /// High threshold.
    High,
}

impl Thresholds {
    /// Returns the threshold for `level`.
    #[must_use]
    pub const fn for_level(self, level: ThresholdLevel) -> u8 {
        match level {
            ThresholdLevel::Low => self.low,
            ThresholdLevel::Medium => self.medium,
            ThresholdLevel::High => self.high,
        }
    }
}

/// Ledger operations the harness submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Create and fund a new account.
    CreateAccount,
    /// Native or issued-asset payment.
    Payment,
    /// Create, update, or remove a trust line.
    ChangeTrust,
    /// Signer, master weight, or threshold changes.
    SetOptions,
}

impl OperationKind {
    /// Returns the threshold category of the operation.
    #[must_use]
    pub const fn threshold_level(self) -> ThresholdLevel {
        match self {
            Self::CreateAccount | Self::Payment | Self::ChangeTrust => ThresholdLevel::Medium,
            Self::SetOptions => ThresholdLevel::High,
        }
    }

    /// Returns a stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateAccount => "create_account",
            Self::Payment => "payment",
            Self::ChangeTrust => "change_trust",
            Self::SetOptions => "set_options",
        }
    }
}

// ============================================================================
// SECTION: Signer Set
// ============================================================================

/// Outcome of applying the admission rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationDecision {
    /// Summed weight of recognized signatures.
    pub effective_weight: u32,
    /// Weight needed: `max(threshold, 1)`.
    pub required_weight: u32,
    /// True when `effective_weight >= required_weight`.
    pub admitted: bool,
}

/// Keys able to sign for one account, with their weights.
///
/// # Invariants
/// - `signers` never contains the account address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerSet {
    /// Account the set belongs to.
    account: Address,
    /// Master key weight.
    master_weight: u8,
    /// Additional signer weights.
    signers: BTreeMap<Address, u8>,
    /// Current thresholds.
    thresholds: Thresholds,
}

impl SignerSet {
    /// Creates a signer set from explicit parts.
    #[must_use]
    pub fn new(
        account: Address,
        master_weight: u8,
        signers: impl IntoIterator<Item = (Address, u8)>,
        thresholds: Thresholds,
    ) -> Self {
        let signers = signers.into_iter().filter(|(key, _)| key != &account).collect();
        Self {
            account,
            master_weight,
            signers,
            thresholds,
        }
    }

    /// Derives the signer set from a snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &AccountSnapshot) -> Self {
        Self::new(
            snapshot.address.clone(),
            snapshot.master_weight,
            snapshot.signers.iter().map(|signer| (signer.key.clone(), signer.weight)),
            snapshot.thresholds,
        )
    }

    /// Returns the account thresholds.
    #[must_use]
    pub const fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Weight contributed by one signing key; unknown keys weigh zero.
    #[must_use]
    pub fn weight_of(&self, key: &Address) -> u8 {
        if key == &self.account {
            return self.master_weight;
        }
        self.signers.get(key).copied().unwrap_or(0)
    }

    /// Sums the weight of distinct signing keys.
    #[must_use]
    pub fn effective_weight(&self, signing: &[Address]) -> u32 {
        let mut seen: Vec<&Address> = Vec::with_capacity(signing.len());
        let mut total = 0_u32;
        for key in signing {
            if seen.contains(&key) {
                continue;
            }
            seen.push(key);
            total += u32::from(self.weight_of(key));
        }
        total
    }

    /// Applies the admission rule for an operation signed by `signing`.
    #[must_use]
    pub fn authorize(&self, kind: OperationKind, signing: &[Address]) -> AuthorizationDecision {
        let threshold = self.thresholds.for_level(kind.threshold_level());
        let required_weight = u32::from(threshold).max(1);
        let effective_weight = self.effective_weight(signing);
        AuthorizationDecision {
            effective_weight,
            required_weight,
            admitted: effective_weight >= required_weight,
        }
    }

    /// Returns signatures that are unknown, zero-weight, or not needed.
    ///
    /// A signature is not needed when the remaining signatures still reach
    /// the required weight without it.
    #[must_use]
    pub fn extra_signatures(&self, kind: OperationKind, signing: &[Address]) -> Vec<Address> {
        let decision = self.authorize(kind, signing);
        signing
            .iter()
            .filter(|key| {
                let weight = u32::from(self.weight_of(key));
                weight == 0
                    || (decision.admitted
                        && decision.effective_weight - weight >= decision.required_weight)
            })
            .cloned()
            .collect()
    }
}

// ============================================================================
// SECTION: Auth States
// ============================================================================

/// Signer configuration of an account under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthState {
    /// S0: master key only, default thresholds.
    Default,
    /// S1: additional signers registered, master still active.
    MultiSigner,
    /// S2: master weight zero, default thresholds.
    MasterDisabled,
    /// S3: thresholds raised above default.
    ThresholdRaised,
}

impl AuthState {
    /// Classifies a fresh snapshot.
    #[must_use]
    pub fn classify(snapshot: &AccountSnapshot) -> Self {
        if snapshot.thresholds.is_raised() {
            Self::ThresholdRaised
        } else if snapshot.master_weight == 0 {
            Self::MasterDisabled
        } else if snapshot.signers.is_empty() {
            Self::Default
        } else {
            Self::MultiSigner
        }
    }

    /// Returns the short state label (`S0`..`S3`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Default => "S0",
            Self::MultiSigner => "S1",
            Self::MasterDisabled => "S2",
            Self::ThresholdRaised => "S3",
        }
    }
}

impl fmt::Display for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Default => "default",
            Self::MultiSigner => "multi_signer",
            Self::MasterDisabled => "master_disabled",
            Self::ThresholdRaised => "threshold_raised",
        };
        write!(f, "{} ({name})", self.label())
    }
}
