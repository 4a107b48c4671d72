// system-tests/src/config/env.rs
// ============================================================================
// Module: System Test Environment
// Description: Environment switches for the ledger harness system tests.
// Purpose: Parse artifact, timeout, and live-friendbot settings fail closed.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Every variable is optional. A variable that is set must be valid UTF-8,
//! non-blank, and well formed; anything else fails the load instead of being
//! ignored.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// SECTION: Variables
// ============================================================================

/// Environment variables read by the system tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemTestEnv {
    /// Directory that receives per-test artifacts.
    ArtifactRoot,
    /// HTTP timeout for faucet calls, in milliseconds.
    HttpTimeoutMs,
    /// Reuse artifact directories that already hold a summary.
    AllowOverwrite,
    /// Public friendbot for the opt-in live smoke test.
    LiveFriendbotUrl,
}

impl SystemTestEnv {
    /// Every variable, in documentation order.
    pub const ALL: [Self; 4] =
        [Self::ArtifactRoot, Self::HttpTimeoutMs, Self::AllowOverwrite, Self::LiveFriendbotUrl];

    /// Returns the variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ArtifactRoot => "LEDGER_HARNESS_SYSTEM_TEST_ARTIFACT_ROOT",
            Self::HttpTimeoutMs => "LEDGER_HARNESS_SYSTEM_TEST_HTTP_TIMEOUT_MS",
            Self::AllowOverwrite => "LEDGER_HARNESS_SYSTEM_TEST_ALLOW_OVERWRITE",
            Self::LiveFriendbotUrl => "LEDGER_HARNESS_SYSTEM_TEST_LIVE_FRIENDBOT_URL",
        }
    }

    /// Reads the variable; unset is `None`, blank or non-UTF-8 is an error.
    fn read(self) -> Result<Option<String>, String> {
        let name = self.as_str();
        let Some(value) = read_env_strict(name)? else {
            return Ok(None);
        };
        if value.trim().is_empty() {
            return Err(format!("{name} is set but blank"));
        }
        Ok(Some(value.trim().to_string()))
    }
}

// ============================================================================
// SECTION: Config
// ============================================================================

/// Bounds for the faucet HTTP timeout.
const HTTP_TIMEOUT_RANGE_MS: std::ops::RangeInclusive<u64> = 100..=120_000;

/// Settings for one system-test process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SystemTestConfig {
    /// Artifact root; `target/system-tests/run_<ms>` when unset.
    pub artifact_root: Option<PathBuf>,
    /// Faucet HTTP timeout.
    pub http_timeout: Option<Duration>,
    /// Reuse artifact directories that already hold a summary.
    pub allow_overwrite: bool,
    /// Live friendbot URL; the live smoke test is skipped when unset.
    pub live_friendbot_url: Option<String>,
}

impl SystemTestConfig {
    /// Loads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns the first malformed variable as a message naming it.
    pub fn load() -> Result<Self, String> {
        let http_timeout = match SystemTestEnv::HttpTimeoutMs.read()? {
            Some(raw) => Some(parse_timeout(&raw)?),
            None => None,
        };
        let allow_overwrite = match SystemTestEnv::AllowOverwrite.read()? {
            Some(raw) => parse_flag(&raw)?,
            None => false,
        };
        let live_friendbot_url = SystemTestEnv::LiveFriendbotUrl.read()?;
        if let Some(url) = &live_friendbot_url
            && !url.starts_with("https://")
        {
            return Err(format!(
                "{} must be an https URL",
                SystemTestEnv::LiveFriendbotUrl.as_str()
            ));
        }
        Ok(Self {
            artifact_root: SystemTestEnv::ArtifactRoot.read()?.map(PathBuf::from),
            http_timeout,
            allow_overwrite,
            live_friendbot_url,
        })
    }
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Reads a variable as UTF-8 without trimming.
///
/// # Errors
///
/// Returns an error when the value is not valid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, String> {
    match env::var_os(name) {
        None => Ok(None),
        Some(raw) => raw.into_string().map(Some).map_err(|_| format!("{name} is not valid UTF-8")),
    }
}

/// Parses the HTTP timeout in milliseconds.
fn parse_timeout(raw: &str) -> Result<Duration, String> {
    let name = SystemTestEnv::HttpTimeoutMs.as_str();
    let millis: u64 = raw.parse().map_err(|_| format!("{name} must be whole milliseconds"))?;
    if !HTTP_TIMEOUT_RANGE_MS.contains(&millis) {
        return Err(format!(
            "{name} must be within {}..={} ms",
            HTTP_TIMEOUT_RANGE_MS.start(),
            HTTP_TIMEOUT_RANGE_MS.end()
        ));
    }
    Ok(Duration::from_millis(millis))
}

/// Parses an on/off flag.
fn parse_flag(raw: &str) -> Result<bool, String> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(format!(
            "{} must be one of 1, 0, true, false, yes, no",
            SystemTestEnv::AllowOverwrite.as_str()
        )),
    }
}
