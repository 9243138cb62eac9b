//! Outbound email configuration.

use serde::{Deserialize, Serialize};

/// SMTP settings for the notification dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Whether outbound email is enabled. When disabled, confirmations
    /// are logged instead of sent.
    #[serde(default)]
    pub enabled: bool,
    /// SMTP relay host.
    #[serde(default = "default_host")]
    pub smtp_host: String,
    /// SMTP relay port.
    #[serde(default = "default_port")]
    pub smtp_port: u16,
    /// SMTP username.
    #[serde(default)]
    pub smtp_username: Option<String>,
    /// SMTP password.
    #[serde(default)]
    pub smtp_password: Option<String>,
    /// From address for all outbound mail.
    #[serde(default = "default_from")]
    pub from_address: String,
    /// Display name for the From header.
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    587
}

fn default_from() -> String {
    "no-reply@lumen.example".to_string()
}

fn default_from_name() -> String {
    "Lumen Events".to_string()
}
