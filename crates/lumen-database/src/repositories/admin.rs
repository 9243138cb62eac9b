//! Admin membership repository.
//!
//! Admin-ness is a membership set, not a user status value. The gate
//! reads this table on every protected request.

use sqlx::PgPool;
use uuid::Uuid;

use lumen_core::error::{AppError, ErrorKind};
use lumen_core::error::AppResult;
use lumen_entity::user::AdminMembership;

/// Repository for the `admin_users` membership table.
#[derive(Debug, Clone)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    /// Create a new admin repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Whether the given user is an admin.
    pub async fn is_admin(&self, user_id: Uuid) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM admin_users WHERE user_id = $1)",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check admin membership", e)
        })
    }

    /// Grant admin membership to a user. Idempotent.
    pub async fn grant(&self, user_id: Uuid, granted_by: Option<Uuid>) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO admin_users (user_id, granted_by) VALUES ($1, $2) \
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(granted_by)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to grant admin membership", e)
        })?;
        Ok(())
    }

    /// Revoke admin membership. Returns `true` if a row was removed.
    pub async fn revoke(&self, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM admin_users WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to revoke admin membership", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// List all admin memberships.
    pub async fn list_all(&self) -> AppResult<Vec<AdminMembership>> {
        sqlx::query_as::<_, AdminMembership>(
            "SELECT * FROM admin_users ORDER BY granted_at ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list admins", e))
    }
}
