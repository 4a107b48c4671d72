// crates/ledger-harness-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payload.
// Purpose: Deterministic example for docs and the CLI.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example for `ledger-harness.toml`. Every value shown is the
//! built-in default unless noted.

/// Returns a canonical example `ledger-harness.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[ledger]
network_passphrase = "Ledger Harness Simulated Network ; 2026"
base_fee = "0.00001"
base_reserve = "0.5"
genesis_balance = "100000"
reject_extra_signatures = false
# funding_source_seed = "S..."

[funding]
use_faucet = true
bootstrap_amount = "100"
issuer_bootstrap_amount = "1000"
payback = { policy = "fraction", numerator = 1, denominator = 2 }

[faucet]
# simulated | http | disabled
kind = "simulated"
starting_balance = "1000000"
grant = "10000"
available = true
url = "https://friendbot.stellar.org"
allow_http = false
timeout_ms = 30000
max_response_bytes = 65536

[scenario]
asset_code = "USD"
asset_type = "credit_alphanum4"
distributor_limit = "1000000"
issue_amount = "500000"
customer_limit = "100000"
payment_amount = "5000"
signer1_weight = 1
signer2_weight = 1
raised_threshold = 2

[reporter]
# stderr | file | none
sink = "stderr"
# path = "ledger-harness.jsonl"
"#,
    )
}
