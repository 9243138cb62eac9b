//! Card processor trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppResult;

/// Request to create a payment intent with the external processor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIntentRequest {
    /// Amount in the currency's minor unit (e.g., cents).
    pub amount_minor: i64,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Idempotency key: one intent per registration, retries included.
    pub idempotency_key: Uuid,
    /// Opaque metadata echoed back by the processor (event/user ids).
    pub metadata: serde_json::Value,
}

/// A payment intent as reported by the processor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Processor-side intent identifier.
    pub intent_id: String,
    /// Client secret the browser uses to confirm the payment.
    pub client_secret: String,
    /// Processor-side status string (e.g., "requires_payment_method").
    pub status: String,
}

/// Trait for the external card processor.
///
/// The processor's confirmed result reaches this system only through the
/// signed webhook; the client-side confirmation is a UI hint.
#[async_trait]
pub trait PaymentProcessor: Send + Sync + std::fmt::Debug + 'static {
    /// Create a payment intent for the given amount.
    async fn create_intent(&self, req: &CreateIntentRequest) -> AppResult<PaymentIntent>;
}
