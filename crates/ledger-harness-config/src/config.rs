// crates/ledger-harness-config/src/config.rs
// ============================================================================
// Module: Ledger Harness Configuration
// Description: Configuration loading and validation for the ledger harness.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: ledger-harness-core, ledger-harness-faucet, ledger-harness-sim, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with size, encoding, and path
//! limits. The path comes from the caller, then `LEDGER_HARNESS_CONFIG`, then
//! `ledger-harness.toml` in the working directory. Only the implicit default
//! file may be absent; in that case built-in defaults apply.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use ledger_harness_core::Amount;
use ledger_harness_core::AssetType;
use ledger_harness_core::FundingSettings;
use ledger_harness_core::PaybackPolicy;
use ledger_harness_core::ScenarioSettings;
use ledger_harness_core::Seed;
use ledger_harness_faucet::DEFAULT_FRIENDBOT_URL;
use ledger_harness_faucet::FriendbotConfig;
use ledger_harness_sim::DEFAULT_NETWORK_PASSPHRASE;
use ledger_harness_sim::SimulatedLedgerConfig;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "ledger-harness.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "LEDGER_HARNESS_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum network passphrase length.
pub(crate) const MAX_PASSPHRASE_LENGTH: usize = 256;
/// Minimum faucet timeout in milliseconds.
pub(crate) const MIN_FAUCET_TIMEOUT_MS: u64 = 100;
/// Maximum faucet timeout in milliseconds.
pub(crate) const MAX_FAUCET_TIMEOUT_MS: u64 = 120_000;
/// Maximum faucet response size in bytes.
pub(crate) const MAX_FAUCET_RESPONSE_BYTES: usize = 1024 * 1024;
/// Base reserves held by an account with no subentries.
const ACCOUNT_RESERVE_ENTRIES: i64 = 2;
/// Transactions the issuer pays for: four account creations, one issuance,
/// and a faucet payback.
const ISSUER_TRANSACTIONS: i64 = 6;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Ledger harness configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerHarnessConfig {
    /// Ledger backend configuration.
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// Identity funding configuration.
    #[serde(default)]
    pub funding: FundingConfig,
    /// Faucet configuration.
    #[serde(default)]
    pub faucet: FaucetConfig,
    /// Scenario parameters.
    #[serde(default)]
    pub scenario: ScenarioConfig,
    /// Event sink configuration.
    #[serde(default)]
    pub reporter: ReporterConfig,
}

impl LedgerHarnessConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (resolved, implicit) = resolve_path(path, env::var(CONFIG_ENV_VAR).ok())?;
        validate_path(&resolved)?;
        let bytes = match fs::read(&resolved) {
            Ok(bytes) => bytes,
            Err(err) if implicit && err.kind() == io::ErrorKind::NotFound => {
                let config = Self::default();
                config.validate()?;
                return Ok(config);
            }
            Err(err) => return Err(ConfigError::Io(err.to_string())),
        };
        Self::from_bytes(&bytes)
    }

    /// Parses and validates configuration from raw file contents.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the contents are oversized, not UTF-8,
    /// malformed, or inconsistent.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ledger.validate()?;
        self.funding.validate()?;
        self.faucet.validate()?;
        self.reporter.validate()?;
        if self.funding.use_faucet && self.faucet.kind == FaucetKind::Disabled {
            return Err(ConfigError::Invalid(
                "funding.use_faucet requires faucet.kind other than disabled".to_string(),
            ));
        }
        self.scenario_settings()
            .validate()
            .map_err(|err| ConfigError::Invalid(err.to_string()))
    }

    /// Returns the scenario settings described by this configuration.
    #[must_use]
    pub fn scenario_settings(&self) -> ScenarioSettings {
        ScenarioSettings {
            use_faucet: self.funding.use_faucet,
            funding: FundingSettings {
                bootstrap_amount: self.funding.bootstrap_amount,
                payback: self.funding.payback,
            },
            issuer_bootstrap_amount: self.funding.issuer_bootstrap_amount,
            issuer_reserve: self
                .ledger
                .issuer_reserve()
                .unwrap_or_else(|| ScenarioSettings::default().issuer_reserve),
            asset_code: self.scenario.asset_code.clone(),
            asset_type: self.scenario.asset_type,
            distributor_limit: self.scenario.distributor_limit,
            issue_amount: self.scenario.issue_amount,
            customer_limit: self.scenario.customer_limit,
            payment_amount: self.scenario.payment_amount,
            signer1_weight: self.scenario.signer1_weight,
            signer2_weight: self.scenario.signer2_weight,
            raised_threshold: self.scenario.raised_threshold,
        }
    }
}

/// Ledger backend configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Passphrase mixed into transaction hashes.
    #[serde(default = "default_network_passphrase")]
    pub network_passphrase: String,
    /// Fee charged per transaction.
    #[serde(default = "default_base_fee")]
    pub base_fee: Amount,
    /// Reserve per ledger entry.
    #[serde(default = "default_base_reserve")]
    pub base_reserve: Amount,
    /// Native balance credited to the funding source at startup.
    #[serde(default = "default_genesis_balance")]
    pub genesis_balance: Amount,
    /// Reject transactions carrying signatures the rule did not need.
    #[serde(default)]
    pub reject_extra_signatures: bool,
    /// Fixed funding source secret seed; a fresh key is generated when unset.
    #[serde(default)]
    pub funding_source_seed: Option<String>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            network_passphrase: default_network_passphrase(),
            base_fee: default_base_fee(),
            base_reserve: default_base_reserve(),
            genesis_balance: default_genesis_balance(),
            reject_extra_signatures: false,
            funding_source_seed: None,
        }
    }
}

impl LedgerConfig {
    /// Validates ledger settings.
    fn validate(&self) -> Result<(), ConfigError> {
        let passphrase = self.network_passphrase.trim();
        if passphrase.is_empty() || passphrase.len() > MAX_PASSPHRASE_LENGTH {
            return Err(ConfigError::Invalid(format!(
                "ledger.network_passphrase must be 1-{MAX_PASSPHRASE_LENGTH} characters"
            )));
        }
        if self.base_fee.is_zero() {
            return Err(ConfigError::Invalid("ledger.base_fee must be greater than zero".to_string()));
        }
        if self.issuer_reserve().is_none() {
            return Err(ConfigError::Invalid(
                "ledger.base_reserve and ledger.base_fee are too large".to_string(),
            ));
        }
        if self.genesis_balance.is_zero() {
            return Err(ConfigError::Invalid(
                "ledger.genesis_balance must be greater than zero".to_string(),
            ));
        }
        self.funding_source()?;
        Ok(())
    }

    /// Returns the parsed funding source seed, if configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the seed is malformed.
    pub fn funding_source(&self) -> Result<Option<Seed>, ConfigError> {
        self.funding_source_seed
            .as_deref()
            .map(|text| {
                Seed::parse(text.trim()).map_err(|_| {
                    ConfigError::Invalid("ledger.funding_source_seed is not a valid seed".to_string())
                })
            })
            .transpose()
    }

    /// Returns the native balance the issuer must keep after funding the
    /// other identities: its own reserve plus a fee per issuer transaction.
    #[must_use]
    pub fn issuer_reserve(&self) -> Option<Amount> {
        let reserve = self.base_reserve.stroops().checked_mul(ACCOUNT_RESERVE_ENTRIES)?;
        let fees = self.base_fee.stroops().checked_mul(ISSUER_TRANSACTIONS)?;
        reserve.checked_add(fees).and_then(Amount::from_stroops)
    }

    /// Returns the simulated ledger settings.
    #[must_use]
    pub fn simulated_ledger_config(&self) -> SimulatedLedgerConfig {
        SimulatedLedgerConfig {
            network_passphrase: self.network_passphrase.clone(),
            base_fee: self.base_fee,
            base_reserve: self.base_reserve,
            reject_extra_signatures: self.reject_extra_signatures,
        }
    }
}

/// Identity funding configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingConfig {
    /// Ask the faucet to fund the issuer.
    #[serde(default = "default_true")]
    pub use_faucet: bool,
    /// Native amount paid into each identity the issuer funds.
    #[serde(default = "default_bootstrap_amount")]
    pub bootstrap_amount: Amount,
    /// Issuer bootstrap when funded directly from the source.
    #[serde(default = "default_issuer_bootstrap_amount")]
    pub issuer_bootstrap_amount: Amount,
    /// Portion of a faucet grant returned to the source.
    #[serde(default)]
    pub payback: PaybackPolicy,
}

impl Default for FundingConfig {
    fn default() -> Self {
        Self {
            use_faucet: true,
            bootstrap_amount: default_bootstrap_amount(),
            issuer_bootstrap_amount: default_issuer_bootstrap_amount(),
            payback: PaybackPolicy::default(),
        }
    }
}

impl FundingConfig {
    /// Validates funding settings.
    fn validate(&self) -> Result<(), ConfigError> {
        match self.payback {
            PaybackPolicy::Fraction {
                numerator,
                denominator,
            } if numerator == 0 || numerator >= denominator => Err(ConfigError::Invalid(
                "funding.payback fraction must satisfy 0 < numerator < denominator".to_string(),
            )),
            PaybackPolicy::Fixed {
                amount,
            } if amount.is_zero() => Err(ConfigError::Invalid(
                "funding.payback fixed amount must be greater than zero".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

/// Faucet backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaucetKind {
    /// Faucet backed by the simulated ledger.
    Simulated,
    /// Friendbot-compatible HTTP faucet.
    Http,
    /// No faucet.
    Disabled,
}

/// Faucet configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaucetConfig {
    /// Faucet backend.
    #[serde(default = "default_faucet_kind")]
    pub kind: FaucetKind,
    /// HTTP faucet endpoint.
    #[serde(default = "default_faucet_url")]
    pub url: String,
    /// Allow cleartext HTTP endpoints.
    #[serde(default)]
    pub allow_http: bool,
    /// HTTP request timeout in milliseconds.
    #[serde(default = "default_faucet_timeout_ms")]
    pub timeout_ms: u64,
    /// Maximum HTTP response size in bytes.
    #[serde(default = "default_faucet_max_response_bytes")]
    pub max_response_bytes: usize,
    /// Simulated faucet account balance.
    #[serde(default = "default_faucet_starting_balance")]
    pub starting_balance: Amount,
    /// Simulated faucet grant per request.
    #[serde(default = "default_faucet_grant")]
    pub grant: Amount,
    /// Whether the simulated faucet answers requests.
    #[serde(default = "default_true")]
    pub available: bool,
}

impl Default for FaucetConfig {
    fn default() -> Self {
        Self {
            kind: default_faucet_kind(),
            url: default_faucet_url(),
            allow_http: false,
            timeout_ms: default_faucet_timeout_ms(),
            max_response_bytes: default_faucet_max_response_bytes(),
            starting_balance: default_faucet_starting_balance(),
            grant: default_faucet_grant(),
            available: true,
        }
    }
}

impl FaucetConfig {
    /// Validates faucet settings for the selected backend.
    fn validate(&self) -> Result<(), ConfigError> {
        match self.kind {
            FaucetKind::Http => {
                let url = self.url.trim();
                let scheme_ok = url.starts_with("https://")
                    || (self.allow_http && url.starts_with("http://"));
                if !scheme_ok {
                    return Err(ConfigError::Invalid(
                        "faucet.url must be https (or http with allow_http)".to_string(),
                    ));
                }
                if !(MIN_FAUCET_TIMEOUT_MS ..= MAX_FAUCET_TIMEOUT_MS).contains(&self.timeout_ms) {
                    return Err(ConfigError::Invalid(format!(
                        "faucet.timeout_ms must be between {MIN_FAUCET_TIMEOUT_MS} and \
                         {MAX_FAUCET_TIMEOUT_MS}"
                    )));
                }
                if self.max_response_bytes == 0
                    || self.max_response_bytes > MAX_FAUCET_RESPONSE_BYTES
                {
                    return Err(ConfigError::Invalid(format!(
                        "faucet.max_response_bytes must be between 1 and \
                         {MAX_FAUCET_RESPONSE_BYTES}"
                    )));
                }
            }
            FaucetKind::Simulated => {
                if self.grant.is_zero() {
                    return Err(ConfigError::Invalid(
                        "faucet.grant must be greater than zero".to_string(),
                    ));
                }
            }
            FaucetKind::Disabled => {}
        }
        Ok(())
    }

    /// Returns the HTTP faucet client settings.
    #[must_use]
    pub fn friendbot_config(&self) -> FriendbotConfig {
        FriendbotConfig {
            url: self.url.trim().to_string(),
            allow_http: self.allow_http,
            timeout_ms: self.timeout_ms,
            max_response_bytes: self.max_response_bytes,
            ..FriendbotConfig::default()
        }
    }
}

/// Scenario parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Asset code.
    #[serde(default = "default_asset_code")]
    pub asset_code: String,
    /// Asset precision type.
    #[serde(default = "default_asset_type")]
    pub asset_type: AssetType,
    /// Distributor trust-line limit.
    #[serde(default = "default_distributor_limit")]
    pub distributor_limit: Amount,
    /// Amount issued to the distributor.
    #[serde(default = "default_issue_amount")]
    pub issue_amount: Amount,
    /// Customer trust-line limit.
    #[serde(default = "default_customer_limit")]
    pub customer_limit: Amount,
    /// Amount of each canonical payment.
    #[serde(default = "default_payment_amount")]
    pub payment_amount: Amount,
    /// Weight of the first signer.
    #[serde(default = "default_signer_weight")]
    pub signer1_weight: u8,
    /// Weight of the second signer.
    #[serde(default = "default_signer_weight")]
    pub signer2_weight: u8,
    /// Threshold for the raised state.
    #[serde(default = "default_raised_threshold")]
    pub raised_threshold: u8,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        let settings = ScenarioSettings::default();
        Self {
            asset_code: settings.asset_code,
            asset_type: settings.asset_type,
            distributor_limit: settings.distributor_limit,
            issue_amount: settings.issue_amount,
            customer_limit: settings.customer_limit,
            payment_amount: settings.payment_amount,
            signer1_weight: settings.signer1_weight,
            signer2_weight: settings.signer2_weight,
            raised_threshold: settings.raised_threshold,
        }
    }
}

/// Event sink selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReporterSink {
    /// JSON lines on stderr.
    Stderr,
    /// JSON lines appended to a file.
    File,
    /// Events are discarded.
    None,
}

/// Event sink configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReporterConfig {
    /// Sink kind.
    #[serde(default = "default_reporter_sink")]
    pub sink: ReporterSink,
    /// Output path for the file sink.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            sink: default_reporter_sink(),
            path: None,
        }
    }
}

impl ReporterConfig {
    /// Validates sink settings.
    fn validate(&self) -> Result<(), ConfigError> {
        match (&self.sink, &self.path) {
            (ReporterSink::File, None) => {
                Err(ConfigError::Invalid("reporter.path is required for the file sink".to_string()))
            }
            (ReporterSink::File, Some(path)) => validate_path(path),
            _ => Ok(()),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path; the flag reports whether it is the implicit default.
fn resolve_path(
    path: Option<&Path>,
    env_path: Option<String>,
) -> Result<(PathBuf, bool), ConfigError> {
    if let Some(path) = path {
        return Ok((path.to_path_buf(), false));
    }
    if let Some(env_path) = env_path {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok((PathBuf::from(env_path), false));
    }
    Ok((PathBuf::from(DEFAULT_CONFIG_NAME), true))
}

/// Validates a path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Whole native units as an [`Amount`]; out-of-range input yields zero.
fn units(value: i64) -> Amount {
    Amount::from_units(value).unwrap_or_default()
}

/// Default for boolean switches that start enabled.
const fn default_true() -> bool {
    true
}

/// Default network passphrase.
fn default_network_passphrase() -> String {
    DEFAULT_NETWORK_PASSPHRASE.to_string()
}

/// Default base fee.
fn default_base_fee() -> Amount {
    SimulatedLedgerConfig::default().base_fee
}

/// Default base reserve.
fn default_base_reserve() -> Amount {
    SimulatedLedgerConfig::default().base_reserve
}

/// Default funding source genesis balance.
fn default_genesis_balance() -> Amount {
    units(100_000)
}

/// Default identity bootstrap amount.
fn default_bootstrap_amount() -> Amount {
    FundingSettings::default().bootstrap_amount
}

/// Default issuer bootstrap amount.
fn default_issuer_bootstrap_amount() -> Amount {
    ScenarioSettings::default().issuer_bootstrap_amount
}

/// Default faucet backend.
const fn default_faucet_kind() -> FaucetKind {
    FaucetKind::Simulated
}

/// Default HTTP faucet endpoint.
fn default_faucet_url() -> String {
    DEFAULT_FRIENDBOT_URL.to_string()
}

/// Default HTTP faucet timeout.
fn default_faucet_timeout_ms() -> u64 {
    FriendbotConfig::default().timeout_ms
}

/// Default HTTP faucet response limit.
fn default_faucet_max_response_bytes() -> usize {
    FriendbotConfig::default().max_response_bytes
}

/// Default simulated faucet balance.
fn default_faucet_starting_balance() -> Amount {
    units(1_000_000)
}

/// Default simulated faucet grant, matching the public friendbot.
fn default_faucet_grant() -> Amount {
    units(10_000)
}

/// Default asset code.
fn default_asset_code() -> String {
    ScenarioSettings::default().asset_code
}

/// Default asset type.
fn default_asset_type() -> AssetType {
    ScenarioSettings::default().asset_type
}

/// Default distributor limit.
fn default_distributor_limit() -> Amount {
    ScenarioSettings::default().distributor_limit
}

/// Default issue amount.
fn default_issue_amount() -> Amount {
    ScenarioSettings::default().issue_amount
}

/// Default customer limit.
fn default_customer_limit() -> Amount {
    ScenarioSettings::default().customer_limit
}

/// Default canonical payment amount.
fn default_payment_amount() -> Amount {
    ScenarioSettings::default().payment_amount
}

/// Default signer weight.
const fn default_signer_weight() -> u8 {
    1
}

/// Default raised threshold.
const fn default_raised_threshold() -> u8 {
    2
}

/// Default event sink.
const fn default_reporter_sink() -> ReporterSink {
    ReporterSink::Stderr
}

// ============================================================================
// SECTION: Tests
// ============================================================================
