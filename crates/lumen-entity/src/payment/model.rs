//! Payment intent record (card path only).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A card-payment intent created with the external processor.
///
/// Linked to its registration so the processor-side status can be
/// reconciled with the registration's `payment_status`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Payment {
    /// Unique payment record identifier.
    pub id: Uuid,
    /// The registration this payment settles.
    pub registration_id: Uuid,
    /// The event being paid for.
    pub event_id: Uuid,
    /// The paying user.
    pub user_id: Uuid,
    /// Amount charged.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Processor-side intent identifier.
    pub processor_intent_id: String,
    /// Last processor-reported status string.
    pub processor_status: String,
    /// Opaque metadata echoed by the processor.
    pub metadata: serde_json::Value,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to record a newly created payment intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePayment {
    /// The registration being paid for.
    pub registration_id: Uuid,
    /// The event being paid for.
    pub event_id: Uuid,
    /// The paying user.
    pub user_id: Uuid,
    /// Amount charged.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Processor-side intent identifier.
    pub processor_intent_id: String,
    /// Initial processor-reported status.
    pub processor_status: String,
    /// Opaque metadata.
    pub metadata: serde_json::Value,
}
