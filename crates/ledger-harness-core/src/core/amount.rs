// crates/ledger-harness-core/src/core/amount.rs
// ============================================================================
// Module: Ledger Amounts
// Description: Fixed-point amounts with seven decimal places.
// Purpose: Parse and render ledger amounts without floating point.
// Dependencies: bigdecimal, serde
// ============================================================================

//! ## Overview
//! Ledger amounts are non-negative fixed-point values stored as integer
//! stroops (`1 unit = 10_000_000 stroops`). Text input is parsed through
//! [`BigDecimal`] so that precision is never lost; values with more than seven
//! fractional digits, signs, exponents, or values beyond `i64` stroops are
//! rejected. Amounts render with exactly seven decimals.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use bigdecimal::ToPrimitive;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Stroops per whole unit.
pub const STROOPS_PER_UNIT: i64 = 10_000_000;
/// Fractional digits carried by an amount.
const MAX_FRACTION_DIGITS: usize = 7;
/// Maximum accepted length of an amount string.
const MAX_AMOUNT_TEXT_LEN: usize = 32;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Amount parsing and arithmetic errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Input is not a plain non-negative decimal.
    #[error("invalid amount: {0}")]
    Invalid(String),
    /// Input has more than seven fractional digits.
    #[error("amount has more than 7 decimal places: {0}")]
    TooPrecise(String),
    /// Input does not fit in the ledger's amount range.
    #[error("amount out of range: {0}")]
    OutOfRange(String),
}

// ============================================================================
// SECTION: Amount
// ============================================================================

/// Non-negative ledger amount in stroops.
///
/// # Invariants
/// - The stroop count is always `>= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(i64);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from stroops, rejecting negatives.
    #[must_use]
    pub const fn from_stroops(stroops: i64) -> Option<Self> {
        if stroops < 0 { None } else { Some(Self(stroops)) }
    }

    /// Creates an amount from whole units.
    #[must_use]
    pub const fn from_units(units: i64) -> Option<Self> {
        match units.checked_mul(STROOPS_PER_UNIT) {
            Some(stroops) => Self::from_stroops(stroops),
            None => None,
        }
    }

    /// Parses a decimal amount string such as `"100"` or `"0.5"`.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError`] when the text is not a plain non-negative
    /// decimal, carries more than seven fractional digits, or overflows.
    pub fn parse(text: &str) -> Result<Self, AmountError> {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.len() > MAX_AMOUNT_TEXT_LEN {
            return Err(AmountError::Invalid(trimmed.to_string()));
        }
        let mut dots = 0;
        for ch in trimmed.chars() {
            match ch {
                '0' ..= '9' => {}
                '.' => dots += 1,
                _ => return Err(AmountError::Invalid(trimmed.to_string())),
            }
        }
        if dots > 1 || trimmed.starts_with('.') || trimmed.ends_with('.') {
            return Err(AmountError::Invalid(trimmed.to_string()));
        }
        if let Some((_, fraction)) = trimmed.split_once('.')
            && fraction.len() > MAX_FRACTION_DIGITS
        {
            return Err(AmountError::TooPrecise(trimmed.to_string()));
        }
        let value = BigDecimal::from_str(trimmed)
            .map_err(|_| AmountError::Invalid(trimmed.to_string()))?;
        let stroops = value * BigDecimal::from(STROOPS_PER_UNIT);
        stroops
            .to_i64()
            .and_then(Self::from_stroops)
            .ok_or_else(|| AmountError::OutOfRange(trimmed.to_string()))
    }

    /// Returns the amount in stroops.
    #[must_use]
    pub const fn stroops(self) -> i64 {
        self.0
    }

    /// Returns true when the amount is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Adds two amounts, returning `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Subtracts `other`, returning `None` when the result would be negative.
    #[must_use]
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        if other.0 > self.0 { None } else { Some(Self(self.0 - other.0)) }
    }

    /// Scales the amount by `numerator / denominator`, rounding down.
    ///
    /// Returns `None` when `denominator` is zero.
    #[must_use]
    pub fn scale(self, numerator: u32, denominator: u32) -> Option<Self> {
        if denominator == 0 {
            return None;
        }
        let scaled = i128::from(self.0) * i128::from(numerator) / i128::from(denominator);
        i64::try_from(scaled).ok().and_then(Self::from_stroops)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:07}", self.0 / STROOPS_PER_UNIT, self.0 % STROOPS_PER_UNIT)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Amount {
    type Error = AmountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Amount> for String {
    fn from(value: Amount) -> Self {
        value.to_string()
    }
}
