//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lumen_auth::gate::Access;
use lumen_entity::user::User;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Plain message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable outcome.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Login response: token plus the account it belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Signed access token.
    pub access_token: String,
    /// Token expiry.
    pub expires_at: DateTime<Utc>,
    /// The authenticated account.
    pub user: User,
}

/// The current account plus its freshly resolved access level.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    /// The account.
    pub user: User,
    /// Gate-resolved access for this request.
    pub access: Access,
}
