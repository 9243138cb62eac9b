//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::ApprovalStatus;

/// A member account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Email address, unique, used to sign in.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Human-readable display name.
    pub display_name: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Admin-controlled approval status. Defaults to `pending` at signup.
    pub approval_status: ApprovalStatus,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
    /// Last successful login time.
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Data required to create a new user at signup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Display name (optional).
    pub display_name: Option<String>,
    /// Phone number (optional).
    pub phone: Option<String>,
}

/// Membership row marking a user as an administrator.
///
/// Kept as a separate table rather than a status value so that admin-ness
/// and approval remain independent axes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdminMembership {
    /// The admin user's ID.
    pub user_id: Uuid,
    /// When admin membership was granted.
    pub granted_at: DateTime<Utc>,
    /// The admin who granted membership (None for the bootstrap admin).
    pub granted_by: Option<Uuid>,
}
