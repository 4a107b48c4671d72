// crates/ledger-harness-faucet/src/friendbot.rs
// ============================================================================
// Module: Friendbot Faucet
// Description: Blocking HTTP client for friendbot-style faucets.
// Purpose: Request test funds and classify faucet answers.
// Dependencies: ledger-harness-core, reqwest, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A faucet answer is classified as:
//! - 2xx: funded; the receipt reference is the response `hash` when present.
//! - 4xx: rejected; the problem `detail` (or body text) is the reason.
//! - anything else, transport failures, and oversize bodies: unavailable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;
use std::time::Duration;

use ledger_harness_core::Address;
use ledger_harness_core::Faucet;
use ledger_harness_core::FaucetError;
use ledger_harness_core::FaucetReceipt;
use reqwest::StatusCode;
use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::blocking::Response;
use reqwest::redirect::Policy;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Public test-network friendbot endpoint.
pub const DEFAULT_FRIENDBOT_URL: &str = "https://friendbot.stellar.org";
/// Longest body excerpt quoted in a rejection reason.
const MAX_REASON_CHARS: usize = 200;

/// Friendbot client configuration.
///
/// # Invariants
/// - `max_response_bytes` is a hard upper bound on response bodies.
/// - `timeout_ms` applies to the full request lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendbotConfig {
    /// Faucet endpoint; the `addr` query parameter is appended.
    pub url: String,
    /// Allow cleartext `http://` endpoints.
    pub allow_http: bool,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum response size, in bytes.
    pub max_response_bytes: usize,
    /// User agent for outbound requests.
    pub user_agent: String,
}

impl Default for FriendbotConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_FRIENDBOT_URL.to_string(),
            allow_http: false,
            timeout_ms: 30_000,
            max_response_bytes: 64 * 1024,
            user_agent: "ledger-harness/0.1".to_string(),
        }
    }
}

/// Errors raised while building a faucet client.
#[derive(Debug, Error)]
pub enum FriendbotSetupError {
    /// The endpoint URL does not parse.
    #[error("invalid faucet url: {0}")]
    InvalidUrl(String),
    /// The endpoint scheme is not permitted.
    #[error("unsupported faucet url scheme: {0}")]
    UnsupportedScheme(String),
    /// The HTTP client could not be built.
    #[error("faucet http client build failed: {0}")]
    Client(String),
}

// ============================================================================
// SECTION: Faucet
// ============================================================================

/// Faucet client for friendbot-compatible endpoints.
pub struct FriendbotFaucet {
    /// Client configuration.
    config: FriendbotConfig,
    /// Parsed endpoint.
    endpoint: Url,
    /// HTTP client.
    client: Client,
}

impl FriendbotFaucet {
    /// Creates a faucet client.
    ///
    /// # Errors
    ///
    /// Returns [`FriendbotSetupError`] when the URL is invalid or refused,
    /// or the HTTP client cannot be built.
    pub fn new(config: FriendbotConfig) -> Result<Self, FriendbotSetupError> {
        let endpoint =
            Url::parse(&config.url).map_err(|err| FriendbotSetupError::InvalidUrl(err.to_string()))?;
        match endpoint.scheme() {
            "https" => {}
            "http" if config.allow_http => {}
            other => return Err(FriendbotSetupError::UnsupportedScheme(other.to_string())),
        }
        if !endpoint.username().is_empty() || endpoint.password().is_some() {
            return Err(FriendbotSetupError::InvalidUrl("url credentials are not allowed".to_string()));
        }
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .redirect(Policy::none())
            .build()
            .map_err(|err| FriendbotSetupError::Client(err.to_string()))?;
        Ok(Self {
            config,
            endpoint,
            client,
        })
    }

    /// Returns the request URL for `address`.
    #[must_use]
    pub fn request_url(&self, address: &Address) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("addr", address.as_str());
        url
    }
}

impl Faucet for FriendbotFaucet {
    fn fund(&self, address: &Address) -> Result<FaucetReceipt, FaucetError> {
        let mut response = self
            .client
            .get(self.request_url(address))
            .send()
            .map_err(|err| FaucetError::Unavailable(format!("faucet request failed: {err}")))?;
        let status = response.status();
        let body = read_response_limited(&mut response, self.config.max_response_bytes)?;
        if status.is_success() {
            return Ok(FaucetReceipt {
                address: address.clone(),
                reference: json_field(&body, "hash").unwrap_or_else(|| status.to_string()),
            });
        }
        if status.is_client_error() {
            return Err(FaucetError::Rejected(rejection_reason(status, &body)));
        }
        Err(FaucetError::Unavailable(format!("faucet answered {status}")))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds a rejection reason from a problem document or body excerpt.
fn rejection_reason(status: StatusCode, body: &[u8]) -> String {
    let detail = json_field(body, "detail").unwrap_or_else(|| {
        String::from_utf8_lossy(body).chars().take(MAX_REASON_CHARS).collect::<String>()
    });
    if detail.trim().is_empty() {
        status.to_string()
    } else {
        format!("{status}: {}", detail.trim())
    }
}

/// Extracts a top-level string field from a JSON body.
fn json_field(body: &[u8], field: &str) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value.get(field)?.as_str().map(ToString::to_string)
}

/// Reads the response body while enforcing a byte limit.
fn read_response_limited(response: &mut Response, max_bytes: usize) -> Result<Vec<u8>, FaucetError> {
    let max_bytes_u64 = u64::try_from(max_bytes)
        .map_err(|_| FaucetError::Unavailable("response size limit exceeds u64".to_string()))?;
    if let Some(expected) = response.content_length()
        && expected > max_bytes_u64
    {
        return Err(FaucetError::Unavailable("faucet response exceeds size limit".to_string()));
    }
    let mut buf = Vec::new();
    response
        .take(max_bytes_u64.saturating_add(1))
        .read_to_end(&mut buf)
        .map_err(|_| FaucetError::Unavailable("failed to read faucet response".to_string()))?;
    if buf.len() > max_bytes {
        return Err(FaucetError::Unavailable("faucet response exceeds size limit".to_string()));
    }
    Ok(buf)
}
