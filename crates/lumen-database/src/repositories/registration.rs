//! Registration ledger repository.
//!
//! Uniqueness of live registrations is enforced by a partial unique
//! index on (user_id, event_id) over non-rejected rows, so the insert
//! itself is the idempotency check; there is no lookup-then-insert race.

use sqlx::PgPool;
use uuid::Uuid;

use lumen_core::error::{AppError, ErrorKind};
use lumen_core::error::AppResult;
use lumen_entity::registration::{AttendeeInfo, PaymentStatus, Registration};

/// Outcome of an idempotent registration insert.
#[derive(Debug, Clone)]
pub struct RegistrationInsert {
    /// The live registration row for this (user, event) pair.
    pub registration: Registration,
    /// Whether this call created the row (`false` = already existed).
    pub created: bool,
}

/// Repository for the `event_registrations` table.
#[derive(Debug, Clone)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    /// Create a new registration repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a registration by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Registration>> {
        sqlx::query_as::<_, Registration>("SELECT * FROM event_registrations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find registration", e)
            })
    }

    /// Find the live (non-rejected) registration for a (user, event) pair.
    pub async fn find_live(
        &self,
        user_id: Uuid,
        event_id: Uuid,
    ) -> AppResult<Option<Registration>> {
        sqlx::query_as::<_, Registration>(
            "SELECT * FROM event_registrations \
             WHERE user_id = $1 AND event_id = $2 AND payment_status <> 'rejected'",
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find live registration", e)
        })
    }

    /// Insert a registration, or return the existing live one.
    ///
    /// `ON CONFLICT DO NOTHING` against the partial unique index makes
    /// the duplicate case race-free: whichever concurrent insert loses
    /// reads the winning row back.
    pub async fn create_or_existing(
        &self,
        user_id: Uuid,
        event_id: Uuid,
        attendee: &AttendeeInfo,
    ) -> AppResult<RegistrationInsert> {
        let inserted = sqlx::query_as::<_, Registration>(
            "INSERT INTO event_registrations \
                 (user_id, event_id, attendee_name, attendee_email, attendee_phone) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (user_id, event_id) WHERE payment_status <> 'rejected' \
             DO NOTHING \
             RETURNING *",
        )
        .bind(user_id)
        .bind(event_id)
        .bind(&attendee.name)
        .bind(&attendee.email)
        .bind(&attendee.phone)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create registration", e)
        })?;

        if let Some(registration) = inserted {
            return Ok(RegistrationInsert {
                registration,
                created: true,
            });
        }

        let existing = self.find_live(user_id, event_id).await?.ok_or_else(|| {
            AppError::database("Registration conflict with no live row present")
        })?;

        Ok(RegistrationInsert {
            registration: existing,
            created: false,
        })
    }

    /// List a user's registrations, newest first.
    pub async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Registration>> {
        sqlx::query_as::<_, Registration>(
            "SELECT * FROM event_registrations WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list user registrations", e)
        })
    }

    /// List all registrations for an event, oldest first.
    pub async fn list_by_event(&self, event_id: Uuid) -> AppResult<Vec<Registration>> {
        sqlx::query_as::<_, Registration>(
            "SELECT * FROM event_registrations WHERE event_id = $1 ORDER BY created_at ASC",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list event registrations", e)
        })
    }

    /// List registrations awaiting admin review.
    pub async fn list_pending_verification(&self) -> AppResult<Vec<Registration>> {
        sqlx::query_as::<_, Registration>(
            "SELECT * FROM event_registrations \
             WHERE payment_status = 'pending_verification' \
             ORDER BY updated_at ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list pending registrations", e)
        })
    }

    /// Count live (non-rejected) registrations for an event.
    pub async fn count_live_for_event(&self, event_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM event_registrations \
             WHERE event_id = $1 AND payment_status <> 'rejected'",
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count registrations", e)
        })
    }

    /// Record submitted payment evidence and move to `pending_verification`.
    ///
    /// A single atomic write guarded on a non-terminal status; returns
    /// `None` when the row was terminal (or missing) and no transition
    /// happened.
    pub async fn record_proof_submission(
        &self,
        id: Uuid,
        transaction_ref: Option<&str>,
        proof_url: Option<&str>,
        notes: Option<&str>,
    ) -> AppResult<Option<Registration>> {
        sqlx::query_as::<_, Registration>(
            "UPDATE event_registrations SET \
                transaction_ref = COALESCE($2, transaction_ref), \
                proof_url = COALESCE($3, proof_url), \
                notes = COALESCE($4, notes), \
                payment_status = 'pending_verification', \
                updated_at = NOW() \
             WHERE id = $1 AND payment_status IN ('pending', 'pending_verification') \
             RETURNING *",
        )
        .bind(id)
        .bind(transaction_ref)
        .bind(proof_url)
        .bind(notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to record proof submission", e)
        })
    }

    /// Finalize a registration into a terminal status.
    ///
    /// The guard on the current status makes terminal states monotonic:
    /// two concurrent admin actions resolve to exactly one transition,
    /// and approve-after-reject (or the reverse) affects zero rows.
    /// Returns `None` when no transition happened.
    pub async fn finalize(
        &self,
        id: Uuid,
        status: PaymentStatus,
    ) -> AppResult<Option<Registration>> {
        sqlx::query_as::<_, Registration>(
            "UPDATE event_registrations SET \
                payment_status = $2, \
                updated_at = NOW() \
             WHERE id = $1 AND payment_status IN ('pending', 'pending_verification') \
             RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to finalize registration", e)
        })
    }

    /// Set a registration-specific QR override.
    pub async fn set_qr_override(&self, id: Uuid, qr_url: &str) -> AppResult<Registration> {
        sqlx::query_as::<_, Registration>(
            "UPDATE event_registrations SET qr_override_url = $2, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(qr_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to set QR override", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("Registration {id} not found")))
    }
}
