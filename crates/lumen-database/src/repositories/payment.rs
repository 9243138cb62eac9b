//! Card-payment repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use lumen_core::error::{AppError, ErrorKind};
use lumen_core::error::AppResult;
use lumen_entity::payment::model::CreatePayment;
use lumen_entity::payment::Payment;

/// Repository for the `payments` table (card path).
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    /// Create a new payment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a newly created payment intent.
    pub async fn create(&self, data: &CreatePayment) -> AppResult<Payment> {
        sqlx::query_as::<_, Payment>(
            "INSERT INTO payments \
                 (registration_id, event_id, user_id, amount, currency, \
                  processor_intent_id, processor_status, metadata) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING *",
        )
        .bind(data.registration_id)
        .bind(data.event_id)
        .bind(data.user_id)
        .bind(data.amount)
        .bind(&data.currency)
        .bind(&data.processor_intent_id)
        .bind(&data.processor_status)
        .bind(&data.metadata)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create payment", e))
    }

    /// Find a payment by its processor intent id.
    pub async fn find_by_intent_id(&self, intent_id: &str) -> AppResult<Option<Payment>> {
        sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE processor_intent_id = $1")
            .bind(intent_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find payment by intent", e)
            })
    }

    /// Find the most recent payment for a registration.
    pub async fn find_by_registration(
        &self,
        registration_id: Uuid,
    ) -> AppResult<Option<Payment>> {
        sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE registration_id = $1 \
             ORDER BY created_at DESC LIMIT 1",
        )
        .bind(registration_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find registration payment", e)
        })
    }

    /// Update the processor-reported status for an intent.
    pub async fn update_processor_status(
        &self,
        intent_id: &str,
        status: &str,
    ) -> AppResult<Option<Payment>> {
        sqlx::query_as::<_, Payment>(
            "UPDATE payments SET processor_status = $2, updated_at = NOW() \
             WHERE processor_intent_id = $1 RETURNING *",
        )
        .bind(intent_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update payment status", e)
        })
    }
}
