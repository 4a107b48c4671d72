// crates/ledger-harness-core/src/runtime/balances.rs
// ============================================================================
// Module: Balance Reporter
// Description: Human-facing balance and signer summaries.
// Purpose: Snapshot identities for progress output and final reports.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Each report is built from a fresh snapshot and emitted as a
//! `balance_report` event. A failed load is fatal because the harness can no
//! longer verify what it is asserting.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::account::BalanceReport;
use crate::core::asset::Asset;
use crate::core::events::EventKind;
use crate::core::identifiers::Address;
use crate::interfaces::LedgerClient;
use crate::runtime::error::HarnessError;
use crate::runtime::steps::RunContext;

// ============================================================================
// SECTION: Reporter
// ============================================================================

/// Produces balance reports.
pub struct BalanceReporter<'a, L: LedgerClient> {
    /// Ledger client.
    ledger: &'a L,
    /// Run context for events.
    ctx: &'a RunContext,
}

impl<'a, L: LedgerClient> BalanceReporter<'a, L> {
    /// Creates a reporter.
    #[must_use]
    pub const fn new(ledger: &'a L, ctx: &'a RunContext) -> Self {
        Self {
            ledger,
            ctx,
        }
    }

    /// Reports balances and signers for `address`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Snapshot`] when the account cannot be loaded.
    pub fn report(
        &self,
        label: &str,
        address: &Address,
        asset: Option<&Asset>,
    ) -> Result<BalanceReport, HarnessError> {
        let snapshot = self.ledger.load_account(address).map_err(|source| {
            HarnessError::Snapshot {
                address: address.clone(),
                source,
            }
        })?;
        let report = BalanceReport {
            label: label.to_string(),
            address: address.clone(),
            master_weight: snapshot.master_weight,
            native_balance: snapshot.native_balance,
            asset_balance: asset.and_then(|asset| snapshot.balance_of(asset)),
            signers: snapshot.signers,
        };
        self.ctx.emit(EventKind::BalanceReport {
            report: report.clone(),
        });
        Ok(report)
    }
}
