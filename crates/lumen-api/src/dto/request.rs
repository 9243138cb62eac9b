//! Request DTOs.

use serde::Deserialize;

/// Login request body.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Registration request body (attendee contact details).
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Attendee name.
    pub attendee_name: String,
    /// Attendee contact email.
    pub attendee_email: String,
    /// Attendee contact phone.
    pub attendee_phone: Option<String>,
}
