//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// JWT and password policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to sign access tokens.
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub jwt_access_ttl_minutes: u32,
    /// Minimum password length for new accounts.
    #[serde(default = "default_password_min_length")]
    pub password_min_length: u32,
}

fn default_access_ttl() -> u32 {
    60
}

fn default_password_min_length() -> u32 {
    10
}
