//! Signup, login, and the admin side of account approval.

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::ValidateEmail;

use lumen_auth::jwt::{IssuedToken, JwtEncoder};
use lumen_auth::password::{PasswordHasher, PasswordValidator};
use lumen_core::error::AppError;
use lumen_core::error::AppResult;
use lumen_database::repositories::admin::AdminRepository;
use lumen_database::repositories::user::UserRepository;
use lumen_entity::user::{ApprovalStatus, CreateUser, User};

use crate::context::RequestContext;

/// Data supplied when creating a new account.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    /// Email address, used to sign in.
    pub email: String,
    /// Plaintext password, validated and hashed before storage.
    pub password: String,
    /// Optional display name.
    pub display_name: Option<String>,
    /// Optional contact phone.
    pub phone: Option<String>,
}

/// A successful login: the issued token plus the account it belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    /// The access token and its expiry.
    pub token: IssuedToken,
    /// The authenticated account.
    pub user: User,
}

/// Service managing accounts and their approval.
#[derive(Debug, Clone)]
pub struct AccountService {
    user_repo: UserRepository,
    admin_repo: AdminRepository,
    hasher: PasswordHasher,
    password_validator: PasswordValidator,
    encoder: JwtEncoder,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        user_repo: UserRepository,
        admin_repo: AdminRepository,
        hasher: PasswordHasher,
        password_validator: PasswordValidator,
        encoder: JwtEncoder,
    ) -> Self {
        Self {
            user_repo,
            admin_repo,
            hasher,
            password_validator,
            encoder,
        }
    }

    /// Create a new account.
    ///
    /// New accounts start as `pending` and stay confined to the waiting
    /// surface until an admin approves them. Signing up never grants
    /// access by itself.
    pub async fn signup(&self, request: SignupRequest) -> AppResult<User> {
        let email = normalize_email(&request.email)?;
        self.password_validator.validate(&request.password)?;
        let password_hash = self.hasher.hash_password(&request.password)?;

        let user = self
            .user_repo
            .create(&CreateUser {
                email,
                password_hash,
                display_name: trimmed(request.display_name),
                phone: trimmed(request.phone),
            })
            .await?;

        info!(user_id = %user.id, "New account created, awaiting approval");

        Ok(user)
    }

    /// Authenticate with email and password.
    ///
    /// Pending and rejected accounts can still log in; what they can do
    /// afterwards is decided by the gate on every request, not here.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let email = normalize_email(email)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        self.user_repo.update_last_login(user.id).await?;
        let token = self.encoder.issue(user.id, &user.email)?;

        info!(user_id = %user.id, "User logged in");

        Ok(AuthSession { token, user })
    }

    /// Fetch the current user's own account.
    pub async fn me(&self, ctx: &RequestContext) -> AppResult<User> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Account no longer exists"))
    }

    /// List all accounts (admin only).
    pub async fn list_users(&self, ctx: &RequestContext) -> AppResult<Vec<User>> {
        ctx.require_admin()?;
        self.user_repo.list_all().await
    }

    /// Set a user's approval status (admin only).
    ///
    /// Takes effect on the target's very next request, since access is
    /// re-resolved from the store each time rather than carried in the
    /// token.
    pub async fn set_approval(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        status: ApprovalStatus,
    ) -> AppResult<User> {
        ctx.require_admin()?;

        let user = self.user_repo.update_approval_status(user_id, status).await?;

        info!(
            target_user = %user.id,
            status = %status,
            admin_id = %ctx.user_id,
            "Approval status changed"
        );

        Ok(user)
    }

    /// Grant admin membership (admin only). Idempotent.
    pub async fn grant_admin(&self, ctx: &RequestContext, user_id: Uuid) -> AppResult<()> {
        ctx.require_admin()?;

        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        self.admin_repo.grant(user_id, Some(ctx.user_id)).await?;

        info!(target_user = %user_id, admin_id = %ctx.user_id, "Admin membership granted");

        Ok(())
    }

    /// Revoke admin membership (admin only).
    ///
    /// Admins cannot revoke themselves, so the last admin can never
    /// lock everyone out.
    pub async fn revoke_admin(&self, ctx: &RequestContext, user_id: Uuid) -> AppResult<()> {
        ctx.require_admin()?;

        if user_id == ctx.user_id {
            return Err(AppError::validation(
                "You cannot revoke your own admin membership",
            ));
        }

        if !self.admin_repo.revoke(user_id).await? {
            return Err(AppError::not_found("User is not an admin"));
        }

        info!(target_user = %user_id, admin_id = %ctx.user_id, "Admin membership revoked");

        Ok(())
    }
}

fn normalize_email(email: &str) -> AppResult<String> {
    let normalized = email.trim().to_lowercase();
    if !normalized.validate_email() {
        return Err(AppError::validation("Invalid email address"));
    }
    Ok(normalized)
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emails_are_normalized_before_lookup() {
        assert_eq!(
            normalize_email("  Member@Example.COM ").unwrap(),
            "member@example.com"
        );
    }

    #[test]
    fn invalid_emails_are_rejected() {
        assert!(normalize_email("not-an-email").is_err());
        assert!(normalize_email("").is_err());
        assert!(normalize_email("a@").is_err());
    }

    #[test]
    fn optional_fields_are_trimmed_to_none() {
        assert_eq!(trimmed(Some("  ".to_string())), None);
        assert_eq!(trimmed(Some(" Alex ".to_string())), Some("Alex".to_string()));
        assert_eq!(trimmed(None), None);
    }
}
