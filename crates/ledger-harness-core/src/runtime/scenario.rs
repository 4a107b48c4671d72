// crates/ledger-harness-core/src/runtime/scenario.rs
// ============================================================================
// Module: End-to-End Scenario
// Description: Orchestrates provisioning, issuance, authorization, and cleanup.
// Purpose: Run the full multi-signature walkthrough and stop on divergence.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! The scenario provisions five identities (issuer, distributor, customer,
//! and two signers), issues a credit asset to the distributor, walks the
//! distributor through the canonical authorization cases, then returns the
//! customer's balance and removes its trust line. Every ledger call is a
//! judged step and the first failure aborts the run.
//!
//! A `scenario_finished` event is emitted whether the run passes or not.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::core::account::BalanceReport;
use crate::core::amount::Amount;
use crate::core::asset::Asset;
use crate::core::asset::AssetRegistry;
use crate::core::asset::AssetType;
use crate::core::authorization::AuthState;
use crate::core::events::EventKind;
use crate::core::funding::FundingDecision;
use crate::core::identifiers::Address;
use crate::core::identifiers::KeyPair;
use crate::core::options::PaymentSource;
use crate::core::options::TxOptions;
use crate::core::outcome::Expectation;
use crate::core::outcome::StepOutcome;
use crate::core::outcome::StepRecord;
use crate::interfaces::Faucet;
use crate::interfaces::LedgerClient;
use crate::runtime::authorization::AuthorizationHarness;
use crate::runtime::authorization::CanonicalCases;
use crate::runtime::balances::BalanceReporter;
use crate::runtime::error::HarnessError;
use crate::runtime::provisioner::AccountProvisioner;
use crate::runtime::provisioner::FaucetStatus;
use crate::runtime::provisioner::FundedIdentity;
use crate::runtime::provisioner::FundingSettings;
use crate::runtime::steps::RunContext;
use crate::runtime::trust_lines::TrustLineManager;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Memo attached when the customer returns its balance.
pub const RETURN_MEMO: &str = "take it back";
/// Number of canonical payments expected to be admitted.
const ADMITTED_CANONICAL_PAYMENTS: i64 = 3;
/// Number of identities the issuer funds.
const ISSUER_FUNDED_IDENTITIES: i64 = 4;
/// Default issuer reserve: two 0.5 base reserves plus six 100-stroop fees.
const DEFAULT_ISSUER_RESERVE_STROOPS: i64 = 10_000_600;

// ============================================================================
// SECTION: Identities
// ============================================================================

/// Roles of the scenario's identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityRole {
    /// Issues the test asset; funded from the external source.
    Issuer,
    /// Holds the issued supply; account under authorization test.
    Distributor,
    /// Receives payments from the distributor.
    Customer,
    /// First additional signer of the distributor.
    Signer1,
    /// Second additional signer of the distributor.
    Signer2,
}

impl IdentityRole {
    /// All roles in provisioning order.
    pub const ALL: [Self; 5] =
        [Self::Issuer, Self::Distributor, Self::Customer, Self::Signer1, Self::Signer2];

    /// Returns the role label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Issuer => "issuer",
            Self::Distributor => "distributor",
            Self::Customer => "customer",
            Self::Signer1 => "signer1",
            Self::Signer2 => "signer2",
        }
    }
}

// ============================================================================
// SECTION: Settings
// ============================================================================

/// Scenario parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioSettings {
    /// Ask the faucet to fund the issuer.
    pub use_faucet: bool,
    /// Funding parameters for identities funded by the issuer.
    pub funding: FundingSettings,
    /// Bootstrap amount for the issuer when funded from the source.
    pub issuer_bootstrap_amount: Amount,
    /// Native balance the issuer keeps after funding the other identities:
    /// its account reserve plus the fees of its own transactions.
    pub issuer_reserve: Amount,
    /// Asset code.
    pub asset_code: String,
    /// Asset precision type.
    pub asset_type: AssetType,
    /// Distributor trust-line limit.
    pub distributor_limit: Amount,
    /// Amount issued to the distributor.
    pub issue_amount: Amount,
    /// Customer trust-line limit.
    pub customer_limit: Amount,
    /// Amount of each canonical payment.
    pub payment_amount: Amount,
    /// Weight of the first signer.
    pub signer1_weight: u8,
    /// Weight of the second signer.
    pub signer2_weight: u8,
    /// Threshold for the raised state.
    pub raised_threshold: u8,
}

impl Default for ScenarioSettings {
    fn default() -> Self {
        Self {
            use_faucet: true,
            funding: FundingSettings::default(),
            issuer_bootstrap_amount: units(1_000),
            issuer_reserve: Amount::from_stroops(DEFAULT_ISSUER_RESERVE_STROOPS)
                .unwrap_or_default(),
            asset_code: "USD".to_string(),
            asset_type: AssetType::CreditAlphanum4,
            distributor_limit: units(1_000_000),
            issue_amount: units(500_000),
            customer_limit: units(100_000),
            payment_amount: units(5_000),
            signer1_weight: 1,
            signer2_weight: 1,
            raised_threshold: 2,
        }
    }
}

impl ScenarioSettings {
    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::InvalidSettings`] when settings are inconsistent.
    pub fn validate(&self) -> Result<(), HarnessError> {
        let invalid = |message: String| Err(HarnessError::InvalidSettings(message));
        if self.asset_type == AssetType::Native {
            return invalid("scenario asset must be an issued asset".to_string());
        }
        if let Err(err) = self.asset_type.validate_code(&self.asset_code) {
            return invalid(err.to_string());
        }
        if self.signer1_weight == 0 || self.signer2_weight == 0 {
            return invalid("signer weights must be greater than zero".to_string());
        }
        let combined = u16::from(self.signer1_weight) + u16::from(self.signer2_weight);
        let threshold = u16::from(self.raised_threshold);
        if threshold <= u16::from(self.signer2_weight) || threshold > combined {
            return invalid(format!(
                "raised_threshold must satisfy signer2_weight < threshold <= {combined}"
            ));
        }
        if self.payment_amount.is_zero() || self.funding.bootstrap_amount.is_zero() {
            return invalid("payment and bootstrap amounts must be greater than zero".to_string());
        }
        if self.issue_amount > self.distributor_limit {
            return invalid("issue_amount exceeds distributor_limit".to_string());
        }
        let received = scaled(self.payment_amount, ADMITTED_CANONICAL_PAYMENTS);
        if received.is_none_or(|total| total > self.customer_limit || total > self.issue_amount) {
            return invalid(
                "three payments must fit within customer_limit and issue_amount".to_string(),
            );
        }
        match self.issuer_requirement() {
            Some(required) if required <= self.issuer_bootstrap_amount => Ok(()),
            _ => invalid(format!(
                "issuer_bootstrap_amount must cover four identity bootstraps plus the issuer \
                 reserve of {}",
                self.issuer_reserve
            )),
        }
    }

    /// Native balance the issuer needs before funding the other identities.
    #[must_use]
    pub fn issuer_requirement(&self) -> Option<Amount> {
        scaled(self.funding.bootstrap_amount, ISSUER_FUNDED_IDENTITIES)?
            .checked_add(self.issuer_reserve)
    }
}

// ============================================================================
// SECTION: Report
// ============================================================================

/// Summary of one provisioned identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentitySummary {
    /// Identity label.
    pub label: String,
    /// Account address.
    pub address: Address,
    /// Native balance after provisioning.
    pub native_balance: Amount,
    /// Funding decision applied.
    pub decision: FundingDecision,
    /// Faucet result.
    pub faucet: FaucetStatus,
}

impl From<&FundedIdentity> for IdentitySummary {
    fn from(identity: &FundedIdentity) -> Self {
        Self {
            label: identity.label.clone(),
            address: identity.key_pair.address.clone(),
            native_balance: identity.native_balance,
            decision: identity.decision,
            faucet: identity.faucet.clone(),
        }
    }
}

/// Result of a passing scenario run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioReport {
    /// Run identifier.
    pub run_id: String,
    /// Provisioned identities.
    pub identities: Vec<IdentitySummary>,
    /// Asset under test.
    pub asset: Asset,
    /// Judged steps in execution order.
    pub steps: Vec<StepRecord>,
    /// Final authorization state of the distributor.
    pub final_state: AuthState,
    /// Final balance reports for every identity.
    pub balances: Vec<BalanceReport>,
}

// ============================================================================
// SECTION: Scenario
// ============================================================================

/// The end-to-end multi-signature scenario.
pub struct EndToEndScenario<'a, L: LedgerClient> {
    /// Ledger client.
    ledger: &'a L,
    /// Optional faucet for the issuer.
    faucet: Option<&'a dyn Faucet>,
    /// Scenario parameters.
    settings: ScenarioSettings,
    /// Run context.
    ctx: &'a RunContext,
}

impl<'a, L: LedgerClient> EndToEndScenario<'a, L> {
    /// Creates a scenario.
    #[must_use]
    pub const fn new(
        ledger: &'a L,
        faucet: Option<&'a dyn Faucet>,
        settings: ScenarioSettings,
        ctx: &'a RunContext,
    ) -> Self {
        Self {
            ledger,
            faucet,
            settings,
            ctx,
        }
    }

    /// Runs the scenario with `funding_source` paying for the issuer.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] on the first divergence.
    pub fn run(&self, funding_source: &KeyPair) -> Result<ScenarioReport, HarnessError> {
        let result = self.execute(funding_source);
        self.ctx.emit(EventKind::ScenarioFinished {
            passed: result.is_ok(),
            steps: self.ctx.records().len(),
            failure: result.as_ref().err().map(ToString::to_string),
        });
        result
    }

    /// Executes every scenario phase in order.
    fn execute(&self, funding_source: &KeyPair) -> Result<ScenarioReport, HarnessError> {
        self.settings.validate()?;
        let settings = &self.settings;

        let provisioner =
            AccountProvisioner::new(self.ledger, self.faucet, settings.funding, self.ctx);
        let issuer = AccountProvisioner::new(self.ledger, self.faucet, settings.funding, self.ctx)
            .with_bootstrap_amount(settings.issuer_bootstrap_amount)
            .provision(IdentityRole::Issuer.label(), funding_source, settings.use_faucet)?;
        self.ensure_issuer_solvent(&issuer)?;
        let distributor =
            provisioner.provision(IdentityRole::Distributor.label(), &issuer.key_pair, false)?;
        let customer =
            provisioner.provision(IdentityRole::Customer.label(), &issuer.key_pair, false)?;
        let signer1 = provisioner.provision(IdentityRole::Signer1.label(), &issuer.key_pair, false)?;
        let signer2 = provisioner.provision(IdentityRole::Signer2.label(), &issuer.key_pair, false)?;

        let mut registry = AssetRegistry::new();
        let asset = registry.define_asset(&settings.asset_code, issuer.address(), settings.asset_type);

        let trust_lines = TrustLineManager::new(self.ledger, self.ctx);
        trust_lines.establish(&distributor.key_pair, &asset, &settings.distributor_limit)?;
        let issuer_source = PaymentSource::KeyPair(issuer.key_pair.clone());
        self.ctx.run_step(
            &format!("issue {} {} to distributor", settings.issue_amount, asset.code),
            Expectation::Admit,
            || {
                self.ledger.pay(
                    &issuer_source,
                    distributor.address(),
                    &settings.issue_amount,
                    &asset,
                    &TxOptions::new(),
                )
            },
        )?;
        self.expect_asset_balance(
            "distributor holds issued supply",
            distributor.address(),
            &asset,
            settings.issue_amount,
        )?;
        trust_lines.establish(&customer.key_pair, &asset, &settings.customer_limit)?;

        let balances = BalanceReporter::new(self.ledger, self.ctx);
        let auth = AuthorizationHarness::new(self.ledger, self.ctx, &distributor.key_pair);
        auth.add_signer(signer1.address(), settings.signer1_weight)?;
        auth.add_signer(signer2.address(), settings.signer2_weight)?;
        auth.disable_master()?;
        balances.report(IdentityRole::Distributor.label(), distributor.address(), Some(&asset))?;

        let cases = CanonicalCases {
            signer1: signer1.key_pair.clone(),
            signer2: signer2.key_pair.clone(),
            destination: customer.address().clone(),
            asset: asset.clone(),
            amount: settings.payment_amount,
            raised_threshold: settings.raised_threshold,
        };
        let outcomes = auth.run_canonical_cases(&cases)?;
        let admitted = outcomes.iter().filter(|outcome| **outcome == StepOutcome::Admitted).count();
        let received = i64::try_from(admitted)
            .ok()
            .and_then(|count| scaled(settings.payment_amount, count))
            .unwrap_or(Amount::ZERO);
        self.expect_asset_balance("customer received admitted payments", customer.address(), &asset, received)?;

        trust_lines.attempt_remove(
            "premature customer trust line removal",
            &customer.key_pair,
            &asset,
            Expectation::Reject,
        )?;
        self.return_customer_balance(&customer, &distributor, &asset)?;
        trust_lines.remove(&customer.key_pair, &asset)?;
        let customer_snapshot = self.ledger.load_account(customer.address()).map_err(|source| {
            HarnessError::Snapshot {
                address: customer.address().clone(),
                source,
            }
        })?;
        if customer_snapshot.trust_line(&asset).is_some() {
            return Err(HarnessError::BalanceMismatch {
                check: "customer trust line removed".to_string(),
                detail: format!("{} still trusts {}", customer.address(), asset.code),
            });
        }

        let identities = [&issuer, &distributor, &customer, &signer1, &signer2];
        let mut reports = Vec::with_capacity(identities.len());
        for identity in identities {
            reports.push(balances.report(&identity.label, identity.address(), Some(&asset))?);
        }
        Ok(ScenarioReport {
            run_id: self.ctx.run_id().to_string(),
            identities: identities.iter().map(|identity| IdentitySummary::from(*identity)).collect(),
            asset,
            steps: self.ctx.records(),
            final_state: auth.state()?,
            balances: reports,
        })
    }

    /// Customer pays its whole asset balance back and verifies it is empty.
    fn return_customer_balance(
        &self,
        customer: &FundedIdentity,
        distributor: &FundedIdentity,
        asset: &Asset,
    ) -> Result<(), HarnessError> {
        let held = self.asset_balance(customer.address(), asset)?;
        if !held.is_zero() {
            let source = PaymentSource::KeyPair(customer.key_pair.clone());
            let options = TxOptions::new().with_memo_text(RETURN_MEMO);
            self.ctx.run_step(
                &format!("customer returns {held} {}", asset.code),
                Expectation::Admit,
                || self.ledger.pay(&source, distributor.address(), &held, asset, &options),
            )?;
        }
        self.expect_asset_balance("customer balance returned", customer.address(), asset, Amount::ZERO)
    }

    /// Reads an asset balance; a missing trust line reads as zero.
    fn asset_balance(&self, address: &Address, asset: &Asset) -> Result<Amount, HarnessError> {
        self.ledger
            .load_account(address)
            .map(|snapshot| snapshot.balance_of(asset).unwrap_or(Amount::ZERO))
            .map_err(|source| HarnessError::Snapshot {
                address: address.clone(),
                source,
            })
    }

    /// Fails before any identity is funded when the issuer cannot pay for all of them.
    fn ensure_issuer_solvent(&self, issuer: &FundedIdentity) -> Result<(), HarnessError> {
        let required = self.settings.issuer_requirement().ok_or_else(|| {
            HarnessError::InvalidSettings("issuer requirement overflows".to_string())
        })?;
        if issuer.native_balance < required {
            return Err(HarnessError::InvalidSettings(format!(
                "issuer {} holds {} but needs {required} to fund four identities",
                issuer.address(),
                issuer.native_balance
            )));
        }
        Ok(())
    }

    /// Fails unless `address` holds exactly `expected` of `asset`.
    fn expect_asset_balance(
        &self,
        check: &str,
        address: &Address,
        asset: &Asset,
        expected: Amount,
    ) -> Result<(), HarnessError> {
        let observed = self.asset_balance(address, asset)?;
        if observed == expected {
            Ok(())
        } else {
            Err(HarnessError::BalanceMismatch {
                check: check.to_string(),
                detail: format!("{address} holds {observed} {}, expected {expected}", asset.code),
            })
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Whole native units as an amount.
fn units(value: i64) -> Amount {
    Amount::from_units(value).unwrap_or(Amount::ZERO)
}

/// Multiplies an amount by a count.
fn scaled(amount: Amount, count: i64) -> Option<Amount> {
    amount.stroops().checked_mul(count).and_then(Amount::from_stroops)
}
