// crates/ledger-harness-core/src/core/asset.rs
// ============================================================================
// Module: Assets
// Description: Native and issued asset handles plus the test asset registry.
// Purpose: Define the test-scoped currency shared by every component.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! An [`Asset`] is an immutable value: code, issuer, and precision type.
//! Construction never fails; [`Asset::validate`] checks the code against the
//! ledger's alphanumeric rules for callers (config, simulator) that need to
//! reject malformed assets. Equality is by value, so two independently built
//! handles for the same code and issuer are interchangeable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::identifiers::Address;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Code reported for the native asset.
pub const NATIVE_ASSET_CODE: &str = "XLM";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Asset precision type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
    /// The ledger's native currency.
    Native,
    /// Issued asset with a 1-4 character code.
    CreditAlphanum4,
    /// Issued asset with a 5-12 character code.
    CreditAlphanum12,
}

impl AssetType {
    /// Returns a stable label for the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::CreditAlphanum4 => "credit_alphanum4",
            Self::CreditAlphanum12 => "credit_alphanum12",
        }
    }

    /// Checks an asset code against this type's length and charset rules.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::InvalidCode`] when the code does not fit.
    pub fn validate_code(self, code: &str) -> Result<(), AssetError> {
        let valid = match self {
            Self::Native => code == NATIVE_ASSET_CODE,
            Self::CreditAlphanum4 | Self::CreditAlphanum12 => {
                let (min, max) = if self == Self::CreditAlphanum4 { (1, 4) } else { (5, 12) };
                (min ..= max).contains(&code.len())
                    && code.chars().all(|ch| ch.is_ascii_alphanumeric())
            }
        };
        if valid {
            Ok(())
        } else {
            Err(AssetError::InvalidCode {
                code: code.to_string(),
                asset_type: self.as_str(),
            })
        }
    }
}

/// Asset validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    /// Code length or characters do not match the asset type.
    #[error("invalid asset code {code:?} for {asset_type}")]
    InvalidCode {
        /// Offending code.
        code: String,
        /// Declared asset type label.
        asset_type: &'static str,
    },
    /// Issued asset without an issuer, or native asset with one.
    #[error("asset issuer does not match asset type {0}")]
    IssuerMismatch(&'static str),
}

/// Asset handle: code, issuer, and precision type.
///
/// # Invariants
/// - Immutable after construction; compared by value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Asset {
    /// Asset code (short symbol).
    pub code: String,
    /// Issuing account; `None` only for the native asset.
    pub issuer: Option<Address>,
    /// Precision type.
    pub asset_type: AssetType,
}

impl Asset {
    /// Returns the native asset.
    #[must_use]
    pub fn native() -> Self {
        Self {
            code: NATIVE_ASSET_CODE.to_string(),
            issuer: None,
            asset_type: AssetType::Native,
        }
    }

    /// Creates an issued asset.
    #[must_use]
    pub fn credit(code: impl Into<String>, issuer: Address, asset_type: AssetType) -> Self {
        Self {
            code: code.into(),
            issuer: Some(issuer),
            asset_type,
        }
    }

    /// Returns true for the native asset.
    #[must_use]
    pub const fn is_native(&self) -> bool {
        matches!(self.asset_type, AssetType::Native)
    }

    /// Checks the code and issuer against the asset type.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError`] when the code or issuer is malformed.
    pub fn validate(&self) -> Result<(), AssetError> {
        if self.is_native() == self.issuer.is_some() {
            return Err(AssetError::IssuerMismatch(self.asset_type.as_str()));
        }
        self.asset_type.validate_code(&self.code)
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.issuer {
            Some(issuer) => write!(f, "{}:{issuer}", self.code),
            None => f.write_str(&self.code),
        }
    }
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Registry of assets defined for a test run.
///
/// Defining an asset that already exists returns the stored handle, so all
/// components share one value per `(code, issuer, asset_type)`. The same code
/// and issuer under another precision type is a distinct asset.
#[derive(Debug, Default, Clone)]
pub struct AssetRegistry {
    /// Defined assets in definition order.
    assets: Vec<Asset>,
}

impl AssetRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            assets: Vec::new(),
        }
    }

    /// Defines (or re-fetches) an issued asset. Pure; no ledger interaction.
    pub fn define_asset(
        &mut self,
        code: &str,
        issuer: &Address,
        asset_type: AssetType,
    ) -> Asset {
        if let Some(existing) = self.lookup(code, issuer, asset_type) {
            return existing.clone();
        }
        let asset = Asset::credit(code, issuer.clone(), asset_type);
        self.assets.push(asset.clone());
        asset
    }

    /// Returns the stored handle for `(code, issuer, asset_type)`.
    #[must_use]
    pub fn lookup(&self, code: &str, issuer: &Address, asset_type: AssetType) -> Option<&Asset> {
        self.assets.iter().find(|asset| {
            asset.code == code
                && asset.issuer.as_ref() == Some(issuer)
                && asset.asset_type == asset_type
        })
    }

    /// Returns all defined assets.
    #[must_use]
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }
}
