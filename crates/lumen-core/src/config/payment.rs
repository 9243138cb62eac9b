//! Card processor configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the external card processor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfig {
    /// Base URL of the processor's HTTP API.
    pub api_base_url: String,
    /// Secret API key used for server-side calls.
    pub secret_key: String,
    /// Shared secret used to verify webhook signatures.
    pub webhook_secret: String,
    /// Default ISO 4217 currency code for event prices.
    #[serde(default = "default_currency")]
    pub default_currency: String,
    /// Request timeout in seconds for processor calls.
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_timeout() -> u64 {
    15
}
