// crates/ledger-harness-sim/src/ledger.rs
// ============================================================================
// Module: Simulated Ledger
// Description: In-memory accounts, transaction validation, and application.
// Purpose: Provide a deterministic ledger client for harness runs and tests.
// Dependencies: ledger-harness-core, crate::{keys, transaction}
// ============================================================================

//! ## Overview
//! [`SimulatedLedger`] keeps accounts behind `Arc<Mutex<..>>` so clones share
//! one ledger. Every client call builds a single-operation transaction, signs
//! its hash with the supplied seeds, and submits it through the same path a
//! raw [`TransactionEnvelope`] takes:
//!
//! 1. memo, source, sequence, and fee checks,
//! 2. signature verification and the weighted authorization rule,
//! 3. optional rejection of unneeded signatures,
//! 4. fee charge and sequence bump,
//! 5. all-or-nothing application of the operation.
//!
//! Every submission that reaches authorization is recorded in the history.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use ledger_harness_core::AccountSnapshot;
use ledger_harness_core::Address;
use ledger_harness_core::Amount;
use ledger_harness_core::Asset;
use ledger_harness_core::KeyPair;
use ledger_harness_core::LedgerClient;
use ledger_harness_core::LedgerError;
use ledger_harness_core::MAX_MEMO_TEXT_BYTES;
use ledger_harness_core::OperationKind;
use ledger_harness_core::PaymentSource;
use ledger_harness_core::RejectionCode;
use ledger_harness_core::Seed;
use ledger_harness_core::SignerEntry;
use ledger_harness_core::SignerSet;
use ledger_harness_core::SignerType;
use ledger_harness_core::Thresholds;
use ledger_harness_core::TrustLineBalance;
use ledger_harness_core::TxOptions;

use crate::keys::generate_key_pair;
use crate::keys::sign;
use crate::keys::verified_signers;
use crate::transaction::Operation;
use crate::transaction::SignerUpdate;
use crate::transaction::Transaction;
use crate::transaction::TransactionEnvelope;
use crate::transaction::TxHash;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default network passphrase.
pub const DEFAULT_NETWORK_PASSPHRASE: &str = "Ledger Harness Simulated Network ; 2026";
/// Maximum additional signers per account.
pub const MAX_SIGNERS: usize = 20;
/// Reserve entries every account carries before subentries.
const BASE_RESERVE_ENTRIES: i64 = 2;
/// Default base fee in stroops.
const DEFAULT_BASE_FEE_STROOPS: i64 = 100;
/// Default base reserve in stroops (0.5 units).
const DEFAULT_BASE_RESERVE_STROOPS: i64 = 5_000_000;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Simulated network parameters.
///
/// # Invariants
/// - `base_fee` and `base_reserve` are non-negative by construction of [`Amount`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedLedgerConfig {
    /// Passphrase mixed into every transaction hash.
    pub network_passphrase: String,
    /// Fee charged per transaction.
    pub base_fee: Amount,
    /// Reserve per ledger entry.
    pub base_reserve: Amount,
    /// Reject transactions carrying signatures the rule did not need.
    pub reject_extra_signatures: bool,
}

impl Default for SimulatedLedgerConfig {
    fn default() -> Self {
        Self {
            network_passphrase: DEFAULT_NETWORK_PASSPHRASE.to_string(),
            base_fee: Amount::from_stroops(DEFAULT_BASE_FEE_STROOPS).unwrap_or(Amount::ZERO),
            base_reserve: Amount::from_stroops(DEFAULT_BASE_RESERVE_STROOPS)
                .unwrap_or(Amount::ZERO),
            reject_extra_signatures: false,
        }
    }
}

// ============================================================================
// SECTION: History
// ============================================================================

/// One submitted transaction that reached authorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    /// Hex transaction hash.
    pub hash: String,
    /// Ledger sequence the transaction closed in.
    pub ledger: u64,
    /// Source account.
    pub source: Address,
    /// Operation category.
    pub kind: OperationKind,
    /// Memo text, if any.
    pub memo_text: Option<String>,
    /// Fee charged (zero for authorization failures).
    pub fee_charged: Amount,
    /// Rejection code, or `None` when applied.
    pub rejection: Option<RejectionCode>,
}

/// Mutable ledger state.
struct LedgerState {
    /// Accounts by address.
    accounts: BTreeMap<Address, AccountSnapshot>,
    /// Last closed ledger sequence.
    ledger_sequence: u64,
    /// Fees collected so far.
    fee_pool: Amount,
    /// Submission history.
    history: Vec<TransactionRecord>,
}

// ============================================================================
// SECTION: Ledger
// ============================================================================

/// Shared in-memory ledger.
#[derive(Clone)]
pub struct SimulatedLedger {
    /// Network parameters.
    config: Arc<SimulatedLedgerConfig>,
    /// Shared state.
    state: Arc<Mutex<LedgerState>>,
}

impl Default for SimulatedLedger {
    fn default() -> Self {
        Self::new(SimulatedLedgerConfig::default())
    }
}

impl SimulatedLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new(config: SimulatedLedgerConfig) -> Self {
        Self {
            config: Arc::new(config),
            state: Arc::new(Mutex::new(LedgerState {
                accounts: BTreeMap::new(),
                ledger_sequence: 1,
                fee_pool: Amount::ZERO,
                history: Vec::new(),
            })),
        }
    }

    /// Returns the network parameters.
    #[must_use]
    pub fn config(&self) -> &SimulatedLedgerConfig {
        &self.config
    }

    /// Creates or credits an account outside of any transaction.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] when the state is poisoned or the balance
    /// would overflow.
    pub fn fund_genesis(&self, address: &Address, amount: Amount) -> Result<(), LedgerError> {
        let mut state = self.lock()?;
        let sequence = state.ledger_sequence << 32;
        let account =
            state.accounts.entry(address.clone()).or_insert_with(|| new_account(address, sequence));
        account.native_balance = account
            .native_balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::Invalid("genesis balance overflow".to_string()))?;
        Ok(())
    }

    /// Generates a key pair and funds it through [`Self::fund_genesis`].
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] when key generation or funding fails.
    pub fn genesis_key_pair(&self, amount: Amount) -> Result<KeyPair, LedgerError> {
        let pair = generate_key_pair()?;
        self.fund_genesis(&pair.address, amount)?;
        Ok(pair)
    }

    /// Returns the submission history.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Unavailable`] when the state is poisoned.
    pub fn history(&self) -> Result<Vec<TransactionRecord>, LedgerError> {
        Ok(self.lock()?.history.clone())
    }

    /// Returns the total fees collected.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Unavailable`] when the state is poisoned.
    pub fn fees_collected(&self) -> Result<Amount, LedgerError> {
        Ok(self.lock()?.fee_pool)
    }

    /// Returns the last closed ledger sequence.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Unavailable`] when the state is poisoned.
    pub fn ledger_sequence(&self) -> Result<u64, LedgerError> {
        Ok(self.lock()?.ledger_sequence)
    }

    /// Submits a pre-signed envelope.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Rejected`] for business rejections and
    /// [`LedgerError::Invalid`] for malformed submissions.
    pub fn submit(&self, envelope: &TransactionEnvelope) -> Result<TxHash, LedgerError> {
        let mut state = self.lock()?;
        self.apply_envelope(&mut state, envelope)
    }

    /// Builds an unsigned transaction for `source` at its next sequence.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::AccountNotFound`] when the source is missing.
    pub fn build_transaction(
        &self,
        source: &Address,
        operation: Operation,
        memo_text: Option<String>,
    ) -> Result<Transaction, LedgerError> {
        let state = self.lock()?;
        let account = state
            .accounts
            .get(source)
            .ok_or_else(|| LedgerError::AccountNotFound(source.clone()))?;
        Ok(Transaction {
            source: source.clone(),
            sequence: account.sequence + 1,
            fee: self.config.base_fee,
            memo_text,
            operation,
        })
    }

    /// Builds, signs, and submits a transaction while holding the state lock.
    fn execute(
        &self,
        source: &Address,
        operation: Operation,
        signers: &[&Seed],
        options: &TxOptions,
    ) -> Result<(), LedgerError> {
        options.validate().map_err(|err| LedgerError::Invalid(err.to_string()))?;
        let mut state = self.lock()?;
        let account = state
            .accounts
            .get(source)
            .ok_or_else(|| LedgerError::AccountNotFound(source.clone()))?;
        let transaction = Transaction {
            source: source.clone(),
            sequence: account.sequence + 1,
            fee: self.config.base_fee,
            memo_text: options.memo_text.clone(),
            operation,
        };
        let hash = transaction.hash(&self.config.network_passphrase)?;
        let mut signatures = Vec::with_capacity(signers.len());
        for seed in signers {
            signatures.push(sign(seed, &hash)?);
        }
        let envelope = TransactionEnvelope {
            transaction,
            signatures,
        };
        self.apply_envelope(&mut state, &envelope).map(|_| ())
    }

    /// Validates, authorizes, charges, and applies one envelope.
    fn apply_envelope(
        &self,
        state: &mut LedgerState,
        envelope: &TransactionEnvelope,
    ) -> Result<TxHash, LedgerError> {
        let tx = &envelope.transaction;
        if let Some(memo) = &tx.memo_text
            && memo.len() > MAX_MEMO_TEXT_BYTES
        {
            return Err(LedgerError::Invalid(format!(
                "memo text is {} bytes; limit is {MAX_MEMO_TEXT_BYTES}",
                memo.len()
            )));
        }
        if tx.fee < self.config.base_fee {
            return Err(LedgerError::Invalid(format!(
                "fee {} below base fee {}",
                tx.fee, self.config.base_fee
            )));
        }
        let source = state
            .accounts
            .get(&tx.source)
            .ok_or_else(|| LedgerError::AccountNotFound(tx.source.clone()))?;
        if tx.sequence != source.sequence + 1 {
            return Err(LedgerError::Invalid(format!(
                "bad sequence {} for {}; expected {}",
                tx.sequence,
                tx.source,
                source.sequence + 1
            )));
        }

        let hash = tx.hash(&self.config.network_passphrase)?;
        let kind = tx.operation.kind();
        let signing = verified_signers(&hash, &envelope.signatures);
        let signer_set = SignerSet::from_snapshot(source);
        let mut rejection = None;
        if !signer_set.authorize(kind, &signing).admitted {
            rejection = Some(RejectionCode::TxBadAuth);
        } else if self.config.reject_extra_signatures
            && (signing.len() < envelope.signatures.len()
                || !signer_set.extra_signatures(kind, &signing).is_empty())
        {
            rejection = Some(RejectionCode::TxBadAuthExtra);
        } else if source.native_balance < tx.fee {
            rejection = Some(RejectionCode::TxInsufficientFeeBalance);
        }
        if let Some(code) = rejection {
            record(state, &hash, tx, Amount::ZERO, Some(code));
            return Err(LedgerError::Rejected(code));
        }

        if let Some(account) = state.accounts.get_mut(&tx.source) {
            account.native_balance = account.native_balance.checked_sub(tx.fee).unwrap_or(Amount::ZERO);
            account.sequence = tx.sequence;
        }
        state.fee_pool = state.fee_pool.checked_add(tx.fee).unwrap_or(state.fee_pool);

        let mut staged = state.accounts.clone();
        let result = self.apply_operation(&mut staged, &tx.source, &tx.operation, state.ledger_sequence);
        if result.is_ok() {
            state.accounts = staged;
        }
        record(state, &hash, tx, tx.fee, result.err());
        match result {
            Ok(()) => Ok(hash),
            Err(code) => Err(LedgerError::Rejected(code)),
        }
    }

    /// Applies an operation to staged accounts.
    fn apply_operation(
        &self,
        accounts: &mut BTreeMap<Address, AccountSnapshot>,
        source: &Address,
        operation: &Operation,
        ledger_sequence: u64,
    ) -> Result<(), RejectionCode> {
        match operation {
            Operation::CreateAccount {
                destination,
                starting_balance,
            } => self.create_account(accounts, source, destination, *starting_balance, ledger_sequence),
            Operation::Payment {
                destination,
                asset,
                amount,
            } => {
                if amount.is_zero() {
                    return Err(RejectionCode::OpMalformed);
                }
                if !accounts.contains_key(destination) {
                    return Err(RejectionCode::OpNoDestination);
                }
                if asset.is_native() {
                    self.pay_native_funds(accounts, source, destination, *amount)
                } else {
                    pay_issued_funds(accounts, source, destination, asset, *amount)
                }
            }
            Operation::ChangeTrust {
                asset,
                limit,
            } => self.change_trust(accounts, source, asset, *limit),
            Operation::SetOptions {
                master_weight,
                thresholds,
                signer,
            } => self.set_options(accounts, source, *master_weight, *thresholds, signer.as_ref()),
        }
    }

    /// Creates and funds a new account.
    fn create_account(
        &self,
        accounts: &mut BTreeMap<Address, AccountSnapshot>,
        source: &Address,
        destination: &Address,
        starting_balance: Amount,
        ledger_sequence: u64,
    ) -> Result<(), RejectionCode> {
        if starting_balance.is_zero() || destination == source {
            return Err(RejectionCode::OpMalformed);
        }
        if accounts.contains_key(destination) {
            return Err(RejectionCode::OpAccountExists);
        }
        let minimum = self.reserve_for(0).ok_or(RejectionCode::OpMalformed)?;
        if starting_balance < minimum {
            return Err(RejectionCode::OpLowReserve);
        }
        self.debit_native(accounts, source, starting_balance)?;
        let mut account = new_account(destination, ledger_sequence << 32);
        account.native_balance = starting_balance;
        accounts.insert(destination.clone(), account);
        Ok(())
    }

    /// Moves native funds, keeping the source above its reserve.
    fn pay_native_funds(
        &self,
        accounts: &mut BTreeMap<Address, AccountSnapshot>,
        source: &Address,
        destination: &Address,
        amount: Amount,
    ) -> Result<(), RejectionCode> {
        self.debit_native(accounts, source, amount)?;
        let receiver = accounts.get_mut(destination).ok_or(RejectionCode::OpNoDestination)?;
        receiver.native_balance =
            receiver.native_balance.checked_add(amount).ok_or(RejectionCode::OpLineFull)?;
        Ok(())
    }

    /// Debits native funds above the account's reserve.
    fn debit_native(
        &self,
        accounts: &mut BTreeMap<Address, AccountSnapshot>,
        source: &Address,
        amount: Amount,
    ) -> Result<(), RejectionCode> {
        let account = accounts.get_mut(source).ok_or(RejectionCode::OpUnderfunded)?;
        let reserve = self.reserve_for(subentries(account)).ok_or(RejectionCode::OpUnderfunded)?;
        let remaining =
            account.native_balance.checked_sub(amount).ok_or(RejectionCode::OpUnderfunded)?;
        if remaining < reserve {
            return Err(RejectionCode::OpUnderfunded);
        }
        account.native_balance = remaining;
        Ok(())
    }

    /// Creates, updates, or removes a trust line.
    fn change_trust(
        &self,
        accounts: &mut BTreeMap<Address, AccountSnapshot>,
        source: &Address,
        asset: &Asset,
        limit: Amount,
    ) -> Result<(), RejectionCode> {
        let issuer = asset.issuer.as_ref().ok_or(RejectionCode::OpMalformed)?;
        if asset.validate().is_err() || issuer == source {
            return Err(RejectionCode::OpMalformed);
        }
        if !accounts.contains_key(issuer) {
            return Err(RejectionCode::OpNoIssuer);
        }
        let account = accounts.get_mut(source).ok_or(RejectionCode::OpMalformed)?;
        let existing = account.balances.iter().position(|line| &line.asset == asset);
        match existing {
            Some(index) if limit.is_zero() => {
                if !account.balances[index].balance.is_zero() {
                    return Err(RejectionCode::OpTrustLineNotEmpty);
                }
                account.balances.remove(index);
            }
            Some(index) => {
                if limit < account.balances[index].balance {
                    return Err(RejectionCode::OpInvalidLimit);
                }
                account.balances[index].limit = limit;
            }
            None if limit.is_zero() => return Err(RejectionCode::OpNoTrust),
            None => {
                let reserve =
                    self.reserve_for(subentries(account) + 1).ok_or(RejectionCode::OpLowReserve)?;
                if account.native_balance < reserve {
                    return Err(RejectionCode::OpLowReserve);
                }
                account.balances.push(TrustLineBalance {
                    asset: asset.clone(),
                    balance: Amount::ZERO,
                    limit,
                });
            }
        }
        Ok(())
    }

    /// Applies master weight, thresholds, and signer changes.
    fn set_options(
        &self,
        accounts: &mut BTreeMap<Address, AccountSnapshot>,
        source: &Address,
        master_weight: Option<u8>,
        thresholds: Option<Thresholds>,
        signer: Option<&SignerUpdate>,
    ) -> Result<(), RejectionCode> {
        let account = accounts.get_mut(source).ok_or(RejectionCode::OpMalformed)?;
        if let Some(update) = signer {
            if &update.key == source {
                return Err(RejectionCode::OpBadSigner);
            }
            let existing = account.signers.iter().position(|entry| entry.key == update.key);
            match existing {
                Some(index) if update.weight == 0 => {
                    account.signers.remove(index);
                }
                Some(index) => account.signers[index].weight = update.weight,
                None if update.weight == 0 => {}
                None => {
                    if account.signers.len() >= MAX_SIGNERS {
                        return Err(RejectionCode::OpTooManySigners);
                    }
                    let reserve = self
                        .reserve_for(subentries(account) + 1)
                        .ok_or(RejectionCode::OpLowReserve)?;
                    if account.native_balance < reserve {
                        return Err(RejectionCode::OpLowReserve);
                    }
                    account.signers.push(SignerEntry {
                        key: update.key.clone(),
                        weight: update.weight,
                        signer_type: SignerType::Ed25519PublicKey,
                    });
                }
            }
        }
        if let Some(weight) = master_weight {
            account.master_weight = weight;
        }
        if let Some(thresholds) = thresholds {
            account.thresholds = thresholds;
        }
        Ok(())
    }

    /// Minimum balance for an account with `subentries` subentries.
    fn reserve_for(&self, subentries: usize) -> Option<Amount> {
        let entries = BASE_RESERVE_ENTRIES.checked_add(i64::try_from(subentries).ok()?)?;
        self.config.base_reserve.stroops().checked_mul(entries).and_then(Amount::from_stroops)
    }

    /// Locks the shared state.
    fn lock(&self) -> Result<MutexGuard<'_, LedgerState>, LedgerError> {
        self.state
            .lock()
            .map_err(|_| LedgerError::Unavailable("simulated ledger mutex poisoned".to_string()))
    }

    /// Resolves the address a seed signs for.
    fn address_of(seed: &Seed) -> Result<Address, LedgerError> {
        let secret = seed.secret_bytes().map_err(|err| LedgerError::Invalid(err.to_string()))?;
        Ok(crate::keys::derive_key_pair(secret).address)
    }
}

// ============================================================================
// SECTION: Ledger Client
// ============================================================================

impl LedgerClient for SimulatedLedger {
    fn create_key_pair(&self) -> Result<KeyPair, LedgerError> {
        generate_key_pair()
    }

    fn load_account(&self, address: &Address) -> Result<AccountSnapshot, LedgerError> {
        self.lock()?
            .accounts
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
        let operation = Operation::CreateAccount {
            destination: destination.clone(),
            starting_balance: *amount,
        };
        self.execute(&Self::address_of(source)?, operation, &signing_seeds(Some(source), options), options)
    }

    fn pay_native(
        &self,
        source: &Seed,
        destination: &Address,
        amount: &Amount,
        options: &TxOptions,
    ) -> Result<(), LedgerError> {
        let operation = Operation::Payment {
            destination: destination.clone(),
            asset: Asset::native(),
            amount: *amount,
        };
        self.execute(&Self::address_of(source)?, operation, &signing_seeds(Some(source), options), options)
    }

    fn pay(
        &self,
        source: &PaymentSource,
        destination: &Address,
        amount: &Amount,
        asset: &Asset,
        options: &TxOptions,
    ) -> Result<(), LedgerError> {
        let operation = Operation::Payment {
            destination: destination.clone(),
            asset: asset.clone(),
            amount: *amount,
        };
        let signers = signing_seeds(source.master_seed(), options);
        self.execute(source.address(), operation, &signers, options)
    }

    fn create_trust_line(&self, holder: &Seed, asset: &Asset, limit: &Amount) -> Result<(), LedgerError> {
        if limit.is_zero() {
            return Err(LedgerError::Rejected(RejectionCode::OpInvalidLimit));
        }
        let operation = Operation::ChangeTrust {
            asset: asset.clone(),
            limit: *limit,
        };
        self.execute(&Self::address_of(holder)?, operation, &[holder], &TxOptions::new())
    }

    fn remove_trust_line(&self, holder: &Seed, asset: &Asset) -> Result<(), LedgerError> {
        let operation = Operation::ChangeTrust {
            asset: asset.clone(),
            limit: Amount::ZERO,
        };
        self.execute(&Self::address_of(holder)?, operation, &[holder], &TxOptions::new())
    }

    fn add_signer(&self, account: &Seed, signer: &Address, weight: u8) -> Result<(), LedgerError> {
        let operation = Operation::SetOptions {
            master_weight: None,
            thresholds: None,
            signer: Some(SignerUpdate {
                key: signer.clone(),
                weight,
            }),
        };
        self.execute(&Self::address_of(account)?, operation, &[account], &TxOptions::new())
    }

    fn set_master_weight(&self, account: &Seed, weight: u8) -> Result<(), LedgerError> {
        let operation = Operation::SetOptions {
            master_weight: Some(weight),
            thresholds: None,
            signer: None,
        };
        self.execute(&Self::address_of(account)?, operation, &[account], &TxOptions::new())
    }

    fn set_thresholds(
        &self,
        account: &Address,
        thresholds: Thresholds,
        options: &TxOptions,
    ) -> Result<(), LedgerError> {
        let operation = Operation::SetOptions {
            master_weight: None,
            thresholds: Some(thresholds),
            signer: None,
        };
        self.execute(account, operation, &signing_seeds(None, options), options)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Moves an issued asset; the issuer mints when paying and burns when paid.
fn pay_issued_funds(
    accounts: &mut BTreeMap<Address, AccountSnapshot>,
    source: &Address,
    destination: &Address,
    asset: &Asset,
    amount: Amount,
) -> Result<(), RejectionCode> {
    let issuer = asset.issuer.as_ref().ok_or(RejectionCode::OpMalformed)?;
    if !accounts.contains_key(issuer) {
        return Err(RejectionCode::OpNoIssuer);
    }
    if source != issuer {
        let line = trust_line_mut(accounts, source, asset).ok_or(RejectionCode::OpSrcNoTrust)?;
        line.balance = line.balance.checked_sub(amount).ok_or(RejectionCode::OpUnderfunded)?;
    }
    if destination != issuer {
        let line = trust_line_mut(accounts, destination, asset).ok_or(RejectionCode::OpNoTrust)?;
        let next = line.balance.checked_add(amount).ok_or(RejectionCode::OpLineFull)?;
        if next > line.limit {
            return Err(RejectionCode::OpLineFull);
        }
        line.balance = next;
    }
    Ok(())
}

/// Finds a mutable trust line.
fn trust_line_mut<'a>(
    accounts: &'a mut BTreeMap<Address, AccountSnapshot>,
    holder: &Address,
    asset: &Asset,
) -> Option<&'a mut TrustLineBalance> {
    accounts.get_mut(holder)?.balances.iter_mut().find(|line| &line.asset == asset)
}

/// Number of reserve-bearing subentries.
fn subentries(account: &AccountSnapshot) -> usize {
    account.balances.len() + account.signers.len()
}

/// Returns a fresh account with default authorization settings.
fn new_account(address: &Address, sequence: u64) -> AccountSnapshot {
    AccountSnapshot {
        address: address.clone(),
        sequence,
        native_balance: Amount::ZERO,
        balances: Vec::new(),
        master_weight: 1,
        signers: Vec::new(),
        thresholds: Thresholds::DEFAULT,
    }
}

/// Master seed (when present) followed by co-signer seeds.
fn signing_seeds<'a>(master: Option<&'a Seed>, options: &'a TxOptions) -> Vec<&'a Seed> {
    master.into_iter().chain(options.signers.iter()).collect()
}

/// Appends a history record and closes a ledger.
fn record(
    state: &mut LedgerState,
    hash: &TxHash,
    tx: &Transaction,
    fee_charged: Amount,
    rejection: Option<RejectionCode>,
) {
    state.ledger_sequence += 1;
    state.history.push(TransactionRecord {
        hash: hash.to_string(),
        ledger: state.ledger_sequence,
        source: tx.source.clone(),
        kind: tx.operation.kind(),
        memo_text: tx.memo_text.clone(),
        fee_charged,
        rejection,
    });
}
