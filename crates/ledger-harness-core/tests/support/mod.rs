// crates/ledger-harness-core/tests/support/mod.rs
// ============================================================================
// Module: Core Test Support
// Description: Scripted in-memory ledger and faucet doubles.
// Purpose: Exercise harness components without a ledger backend crate.
// Dependencies: ledger-harness-core
// ============================================================================

//! ## Overview
//! [`FakeLedger`] applies the core authorization model to a small in-memory
//! account table. It skips fees and reserves, and exposes knobs for failure
//! injection: an outage switch, an "admit everything" switch, and a switch
//! that silently drops set-options changes.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test files.")]
#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only helpers are permitted to panic."
)]

use std::cell::Cell;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::sync::Arc;

use ledger_harness_core::AccountSnapshot;
use ledger_harness_core::Address;
use ledger_harness_core::Amount;
use ledger_harness_core::Asset;
use ledger_harness_core::Faucet;
use ledger_harness_core::FaucetError;
use ledger_harness_core::FaucetReceipt;
use ledger_harness_core::KeyPair;
use ledger_harness_core::LedgerClient;
use ledger_harness_core::LedgerError;
use ledger_harness_core::MemoryReporter;
use ledger_harness_core::OperationKind;
use ledger_harness_core::PaymentSource;
use ledger_harness_core::RejectionCode;
use ledger_harness_core::RunContext;
use ledger_harness_core::Seed;
use ledger_harness_core::SignerEntry;
use ledger_harness_core::SignerSet;
use ledger_harness_core::SignerType;
use ledger_harness_core::Thresholds;
use ledger_harness_core::TrustLineBalance;
use ledger_harness_core::TxOptions;

/// Scripted in-memory ledger.
#[derive(Default)]
pub struct FakeLedger {
    /// Accounts by address.
    accounts: RefCell<BTreeMap<Address, AccountSnapshot>>,
    /// Seed text to address.
    keys: RefCell<BTreeMap<String, Address>>,
    /// Key counter for deterministic key generation.
    next_key: Cell<u8>,
    /// Every call fails with `Unavailable` while set.
    pub unavailable: Cell<bool>,
    /// Authorization checks are skipped while set.
    pub admit_everything: Cell<bool>,
    /// Set-options changes are acknowledged but not applied while set.
    pub drop_set_options: Cell<bool>,
    /// Submitted memos in order.
    pub memos: RefCell<Vec<String>>,
}

impl FakeLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a funded account directly.
    pub fn genesis(&self, units: i64) -> KeyPair {
        let pair = self.create_key_pair().unwrap();
        self.credit(&pair.address, Amount::from_units(units).unwrap());
        pair
    }

    /// Credits native funds, creating the account when missing.
    pub fn credit(&self, address: &Address, amount: Amount) {
        let mut accounts = self.accounts.borrow_mut();
        let account = accounts.entry(address.clone()).or_insert_with(|| empty_account(address));
        account.native_balance = account.native_balance.checked_add(amount).unwrap();
    }

    /// Returns a snapshot or panics.
    pub fn snapshot(&self, address: &Address) -> AccountSnapshot {
        self.load_account(address).unwrap()
    }

    /// Resolves a seed to its address.
    fn address_of(&self, seed: &Seed) -> Result<Address, LedgerError> {
        self.keys
            .borrow()
            .get(seed.expose())
            .cloned()
            .ok_or_else(|| LedgerError::Invalid("unknown seed".to_string()))
    }

    /// Checks the outage switch.
    fn reachable(&self) -> Result<(), LedgerError> {
        if self.unavailable.get() {
            Err(LedgerError::Unavailable("fake ledger offline".to_string()))
        } else {
            Ok(())
        }
    }

    /// Applies the authorization model for `source` signed by `signing`.
    fn authorize(
        &self,
        source: &Address,
        kind: OperationKind,
        signing: &[Address],
    ) -> Result<(), LedgerError> {
        if self.admit_everything.get() {
            return Ok(());
        }
        let accounts = self.accounts.borrow();
        let account =
            accounts.get(source).ok_or_else(|| LedgerError::AccountNotFound(source.clone()))?;
        if SignerSet::from_snapshot(account).authorize(kind, signing).admitted {
            Ok(())
        } else {
            Err(LedgerError::Rejected(RejectionCode::TxBadAuth))
        }
    }

    /// Collects signing addresses from a master seed and options.
    fn signing(&self, master: Option<&Seed>, options: &TxOptions) -> Result<Vec<Address>, LedgerError> {
        let mut signing = Vec::new();
        if let Some(seed) = master {
            signing.push(self.address_of(seed)?);
        }
        for seed in &options.signers {
            signing.push(self.address_of(seed)?);
        }
        Ok(signing)
    }

    /// Records a memo when present.
    fn record_memo(&self, options: &TxOptions) {
        if let Some(memo) = &options.memo_text {
            self.memos.borrow_mut().push(memo.clone());
        }
    }

    /// Moves an issued asset between trust lines (issuer mints and burns).
    fn move_credit(
        &self,
        source: &Address,
        destination: &Address,
        amount: Amount,
        asset: &Asset,
    ) -> Result<(), LedgerError> {
        let issuer = asset.issuer.clone().ok_or(LedgerError::Rejected(RejectionCode::OpMalformed))?;
        let mut accounts = self.accounts.borrow_mut();
        if !accounts.contains_key(destination) {
            return Err(LedgerError::Rejected(RejectionCode::OpNoDestination));
        }
        if source != &issuer {
            let line = accounts
                .get_mut(source)
                .and_then(|account| account.balances.iter_mut().find(|line| &line.asset == asset))
                .ok_or(LedgerError::Rejected(RejectionCode::OpSrcNoTrust))?;
            line.balance =
                line.balance.checked_sub(amount).ok_or(LedgerError::Rejected(RejectionCode::OpUnderfunded))?;
        }
        if destination != &issuer {
            let line = accounts
                .get_mut(destination)
                .and_then(|account| account.balances.iter_mut().find(|line| &line.asset == asset))
                .ok_or(LedgerError::Rejected(RejectionCode::OpNoTrust))?;
            let next = line.balance.checked_add(amount).unwrap();
            if next > line.limit {
                return Err(LedgerError::Rejected(RejectionCode::OpLineFull));
            }
            line.balance = next;
        }
        Ok(())
    }

    /// Moves native funds.
    fn move_native(&self, source: &Address, destination: &Address, amount: Amount) -> Result<(), LedgerError> {
        let mut accounts = self.accounts.borrow_mut();
        if !accounts.contains_key(destination) {
            return Err(LedgerError::Rejected(RejectionCode::OpNoDestination));
        }
        let from = accounts.get_mut(source).ok_or_else(|| LedgerError::AccountNotFound(source.clone()))?;
        from.native_balance = from
            .native_balance
            .checked_sub(amount)
            .ok_or(LedgerError::Rejected(RejectionCode::OpUnderfunded))?;
        let to = accounts.get_mut(destination).unwrap();
        to.native_balance = to.native_balance.checked_add(amount).unwrap();
        Ok(())
    }

    /// Mutates an account unless set-options changes are being dropped.
    fn set_options(&self, address: &Address, change: impl FnOnce(&mut AccountSnapshot)) {
        if self.drop_set_options.get() {
            return;
        }
        if let Some(account) = self.accounts.borrow_mut().get_mut(address) {
            change(account);
        }
    }
}

impl LedgerClient for FakeLedger {
    fn create_key_pair(&self) -> Result<KeyPair, LedgerError> {
        let index = self.next_key.get().wrapping_add(1);
        self.next_key.set(index);
        let address = Address::from_public_key([index; 32]);
        let seed = Seed::from_secret_bytes([index; 32]);
        self.keys.borrow_mut().insert(seed.expose().to_string(), address.clone());
        Ok(KeyPair::new(address, seed))
    }

    fn load_account(&self, address: &Address) -> Result<AccountSnapshot, LedgerError> {
        self.reachable()?;
        self.accounts
            .borrow()
            .get(address)
            .cloned()
            .ok_or_else(|| LedgerError::AccountNotFound(address.clone()))
    }

    fn fund_account(
        &self,
        source: &Seed,
        destination: &Address,
        amount: &Amount,
        options: &TxOptions,
    ) -> Result<(), LedgerError> {
        self.reachable()?;
        let source_address = self.address_of(source)?;
        self.authorize(&source_address, OperationKind::CreateAccount, &self.signing(Some(source), options)?)?;
        if self.accounts.borrow().contains_key(destination) {
            return Err(LedgerError::Rejected(RejectionCode::OpAccountExists));
        }
        self.accounts.borrow_mut().insert(destination.clone(), empty_account(destination));
        if let Err(err) = self.move_native(&source_address, destination, *amount) {
            self.accounts.borrow_mut().remove(destination);
            return Err(err);
        }
        self.record_memo(options);
        Ok(())
    }

    fn pay_native(
        &self,
        source: &Seed,
        destination: &Address,
        amount: &Amount,
        options: &TxOptions,
    ) -> Result<(), LedgerError> {
        self.reachable()?;
        let source_address = self.address_of(source)?;
        self.authorize(&source_address, OperationKind::Payment, &self.signing(Some(source), options)?)?;
        self.move_native(&source_address, destination, *amount)?;
        self.record_memo(options);
        Ok(())
    }

    fn pay(
        &self,
        source: &PaymentSource,
        destination: &Address,
        amount: &Amount,
        asset: &Asset,
        options: &TxOptions,
    ) -> Result<(), LedgerError> {
        self.reachable()?;
        let signing = self.signing(source.master_seed(), options)?;
        self.authorize(source.address(), OperationKind::Payment, &signing)?;
        if asset.is_native() {
            self.move_native(source.address(), destination, *amount)?;
        } else {
            self.move_credit(source.address(), destination, *amount, asset)?;
        }
        self.record_memo(options);
        Ok(())
    }

    fn create_trust_line(&self, holder: &Seed, asset: &Asset, limit: &Amount) -> Result<(), LedgerError> {
        self.reachable()?;
        let address = self.address_of(holder)?;
        self.authorize(&address, OperationKind::ChangeTrust, &[address.clone()])?;
        let mut accounts = self.accounts.borrow_mut();
        let account = accounts.get_mut(&address).ok_or_else(|| LedgerError::AccountNotFound(address.clone()))?;
        match account.balances.iter_mut().find(|line| &line.asset == asset) {
            Some(line) => line.limit = *limit,
            None => account.balances.push(TrustLineBalance {
                asset: asset.clone(),
                balance: Amount::ZERO,
                limit: *limit,
            }),
        }
        Ok(())
    }

    fn remove_trust_line(&self, holder: &Seed, asset: &Asset) -> Result<(), LedgerError> {
        self.reachable()?;
        let address = self.address_of(holder)?;
        self.authorize(&address, OperationKind::ChangeTrust, &[address.clone()])?;
        let mut accounts = self.accounts.borrow_mut();
        let account = accounts.get_mut(&address).ok_or_else(|| LedgerError::AccountNotFound(address.clone()))?;
        let line = account
            .balances
            .iter()
            .position(|line| &line.asset == asset)
            .ok_or(LedgerError::Rejected(RejectionCode::OpNoTrust))?;
        if !account.balances[line].balance.is_zero() {
            return Err(LedgerError::Rejected(RejectionCode::OpTrustLineNotEmpty));
        }
        account.balances.remove(line);
        Ok(())
    }

    fn add_signer(&self, account: &Seed, signer: &Address, weight: u8) -> Result<(), LedgerError> {
        self.reachable()?;
        let address = self.address_of(account)?;
        self.authorize(&address, OperationKind::SetOptions, &[address.clone()])?;
        self.set_options(&address, |snapshot| {
            snapshot.signers.retain(|entry| &entry.key != signer);
            if weight > 0 {
                snapshot.signers.push(SignerEntry {
                    key: signer.clone(),
                    weight,
                    signer_type: SignerType::Ed25519PublicKey,
                });
            }
        });
        Ok(())
    }

    fn set_master_weight(&self, account: &Seed, weight: u8) -> Result<(), LedgerError> {
        self.reachable()?;
        let address = self.address_of(account)?;
        self.authorize(&address, OperationKind::SetOptions, &[address.clone()])?;
        self.set_options(&address, |snapshot| snapshot.master_weight = weight);
        Ok(())
    }

    fn set_thresholds(
        &self,
        account: &Address,
        thresholds: Thresholds,
        options: &TxOptions,
    ) -> Result<(), LedgerError> {
        self.reachable()?;
        self.authorize(account, OperationKind::SetOptions, &self.signing(None, options)?)?;
        self.set_options(account, |snapshot| snapshot.thresholds = thresholds);
        Ok(())
    }
}

/// Faucet double that credits a [`FakeLedger`].
pub struct FakeFaucet<'a> {
    /// Ledger to credit.
    pub ledger: &'a FakeLedger,
    /// Grant per request.
    pub grant: Amount,
    /// Fails every request while set.
    pub offline: bool,
}

impl Faucet for FakeFaucet<'_> {
    fn fund(&self, address: &Address) -> Result<FaucetReceipt, FaucetError> {
        if self.offline {
            return Err(FaucetError::Unavailable("fake faucet offline".to_string()));
        }
        self.ledger.credit(address, self.grant);
        Ok(FaucetReceipt {
            address: address.clone(),
            reference: format!("grant-{address}"),
        })
    }
}

/// Returns a new account snapshot with default settings.
fn empty_account(address: &Address) -> AccountSnapshot {
    AccountSnapshot {
        address: address.clone(),
        sequence: 1,
        native_balance: Amount::ZERO,
        balances: Vec::new(),
        master_weight: 1,
        signers: Vec::new(),
        thresholds: Thresholds::DEFAULT,
    }
}

/// Creates a run context backed by a memory reporter.
pub fn memory_context() -> (RunContext, Arc<MemoryReporter>) {
    let reporter = Arc::new(MemoryReporter::new());
    let ctx = RunContext::new("test-run", reporter.clone());
    (ctx, reporter)
}

/// Whole units as an amount.
pub fn units(value: i64) -> Amount {
    Amount::from_units(value).unwrap()
}
