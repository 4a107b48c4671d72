// crates/ledger-harness-sim/src/faucet.rs
// ============================================================================
// Module: Simulated Faucet
// Description: Friendbot-style faucet backed by a simulated ledger account.
// Purpose: Fund new accounts through real create-account transactions.
// Dependencies: ledger-harness-core, crate::ledger
// ============================================================================

//! ## Overview
//! The faucet owns a genesis-funded account and answers each request with a
//! create-account transaction for a fixed grant. It can be switched offline
//! to exercise the harness fallback path.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use ledger_harness_core::Address;
use ledger_harness_core::Amount;
use ledger_harness_core::Faucet;
use ledger_harness_core::FaucetError;
use ledger_harness_core::FaucetReceipt;
use ledger_harness_core::KeyPair;
use ledger_harness_core::LedgerClient;
use ledger_harness_core::LedgerError;
use ledger_harness_core::RejectionCode;
use ledger_harness_core::TxOptions;

use crate::ledger::SimulatedLedger;

// ============================================================================
// SECTION: Faucet
// ============================================================================

/// Faucet that creates accounts on a [`SimulatedLedger`].
pub struct SimulatedFaucet {
    /// Ledger the faucet funds on.
    ledger: SimulatedLedger,
    /// Faucet's own funded account.
    account: KeyPair,
    /// Grant per request.
    grant: Amount,
    /// Requests fail with `Unavailable` while false.
    available: AtomicBool,
}

impl SimulatedFaucet {
    /// Creates a faucet whose account holds `starting_balance`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] when the faucet account cannot be funded.
    pub fn new(
        ledger: SimulatedLedger,
        starting_balance: Amount,
        grant: Amount,
    ) -> Result<Self, LedgerError> {
        let account = ledger.genesis_key_pair(starting_balance)?;
        Ok(Self {
            ledger,
            account,
            grant,
            available: AtomicBool::new(true),
        })
    }

    /// Switches the faucet on or off.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Returns the faucet account address.
    #[must_use]
    pub const fn address(&self) -> &Address {
        &self.account.address
    }

    /// Returns the grant per request.
    #[must_use]
    pub const fn grant(&self) -> Amount {
        self.grant
    }
}

impl Faucet for SimulatedFaucet {
    fn fund(&self, address: &Address) -> Result<FaucetReceipt, FaucetError> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(FaucetError::Unavailable("simulated faucet offline".to_string()));
        }
        self.ledger
            .fund_account(&self.account.seed, address, &self.grant, &TxOptions::new())
            .map_err(|err| match err {
                LedgerError::Rejected(RejectionCode::OpAccountExists) => {
                    FaucetError::Rejected(format!("{address} is already funded"))
                }
                LedgerError::Rejected(code) => FaucetError::Rejected(code.to_string()),
                other => FaucetError::Unavailable(other.to_string()),
            })?;
        let reference = self
            .ledger
            .history()
            .ok()
            .and_then(|history| history.last().map(|record| record.hash.clone()))
            .unwrap_or_default();
        Ok(FaucetReceipt {
            address: address.clone(),
            reference,
        })
    }
}
