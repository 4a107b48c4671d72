// crates/ledger-harness-core/src/runtime/trust_lines.rs
// ============================================================================
// Module: Trust Line Manager
// Description: Establishes and removes trust lines for test identities.
// Purpose: Let accounts hold the test asset and clean up afterwards.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Trust-line changes are single change-trust transactions signed by the
//! holder's master key. Rejections are not retried; they surface as
//! [`TrustLineError`] carrying the ledger's reason. Removal requires a zero
//! balance, so callers return the balance to another account first.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::amount::Amount;
use crate::core::asset::Asset;
use crate::core::identifiers::KeyPair;
use crate::core::outcome::Expectation;
use crate::core::outcome::StepOutcome;
use crate::interfaces::LedgerClient;
use crate::interfaces::LedgerError;
use crate::interfaces::step_outcome;
use crate::runtime::error::HarnessError;
use crate::runtime::error::TrustLineAction;
use crate::runtime::error::TrustLineError;
use crate::runtime::steps::RunContext;

// ============================================================================
// SECTION: Manager
// ============================================================================

/// Trust-line operations for test identities.
pub struct TrustLineManager<'a, L: LedgerClient> {
    /// Ledger client.
    ledger: &'a L,
    /// Run context for step records.
    ctx: &'a RunContext,
}

impl<'a, L: LedgerClient> TrustLineManager<'a, L> {
    /// Creates a manager.
    #[must_use]
    pub const fn new(ledger: &'a L, ctx: &'a RunContext) -> Self {
        Self {
            ledger,
            ctx,
        }
    }

    /// Creates a trust line from `holder` to `asset` with `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`TrustLineError`] when the ledger rejects or fails the change.
    pub fn establish(
        &self,
        holder: &KeyPair,
        asset: &Asset,
        limit: &Amount,
    ) -> Result<(), TrustLineError> {
        let step = format!("trust {} limit {limit} by {}", asset.code, holder.address);
        self.ctx.begin(&step, Expectation::Admit);
        let result = self.ledger.create_trust_line(&holder.seed, asset, limit);
        self.settle(&step, TrustLineAction::Establish, holder, asset, result)
    }

    /// Removes `holder`'s trust line to `asset`.
    ///
    /// # Errors
    ///
    /// Returns [`TrustLineError`] when the ledger rejects or fails the
    /// removal, including when the line still holds a balance.
    pub fn remove(&self, holder: &KeyPair, asset: &Asset) -> Result<(), TrustLineError> {
        let step = format!("remove trust {} by {}", asset.code, holder.address);
        self.ctx.begin(&step, Expectation::Admit);
        let result = self.ledger.remove_trust_line(&holder.seed, asset);
        self.settle(&step, TrustLineAction::Remove, holder, asset, result)
    }

    /// Attempts a removal as a judged step with an explicit expectation.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when the outcome contradicts `expectation`.
    pub fn attempt_remove(
        &self,
        step: &str,
        holder: &KeyPair,
        asset: &Asset,
        expectation: Expectation,
    ) -> Result<StepOutcome, HarnessError> {
        self.ctx.run_step(step, expectation, || self.ledger.remove_trust_line(&holder.seed, asset))
    }

    /// Records an admit-expected step result and maps failures to [`TrustLineError`].
    fn settle(
        &self,
        step: &str,
        action: TrustLineAction,
        holder: &KeyPair,
        asset: &Asset,
        result: Result<(), LedgerError>,
    ) -> Result<(), TrustLineError> {
        self.ctx.finish(step, Expectation::Admit, step_outcome(&result));
        result.map_err(|source| TrustLineError {
            action,
            holder: holder.address.clone(),
            asset: asset.clone(),
            source,
        })
    }
}
