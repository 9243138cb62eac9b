//! Card-payment service.
//!
//! Creates payment intents with the external processor and settles
//! registrations from its signed webhook. The client-side confirmation
//! result is never trusted: only a webhook whose signature verifies
//! against the shared secret can approve a registration.

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use lumen_core::error::AppError;
use lumen_core::error::AppResult;
use lumen_core::traits::processor::{CreateIntentRequest, PaymentProcessor};
use lumen_database::repositories::event::EventRepository;
use lumen_database::repositories::payment::PaymentRepository;
use lumen_database::repositories::registration::RegistrationRepository;
use lumen_entity::payment::model::CreatePayment;
use lumen_entity::registration::PaymentStatus;

use crate::context::RequestContext;
use crate::notification::{EventConfirmation, NotificationDispatcher};

use super::webhook::{self, EVENT_PAYMENT_FAILED, EVENT_PAYMENT_SUCCEEDED};

/// A card intent ready for browser-side confirmation.
#[derive(Debug, Clone, Serialize)]
pub struct CardIntent {
    /// Processor-side intent identifier.
    pub intent_id: String,
    /// Client secret the browser uses to confirm the payment.
    pub client_secret: String,
    /// Amount to be charged.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Processor-reported intent status.
    pub status: String,
}

/// Service for the card-payment path.
#[derive(Debug, Clone)]
pub struct PaymentService {
    registration_repo: RegistrationRepository,
    event_repo: EventRepository,
    payment_repo: PaymentRepository,
    processor: Arc<dyn PaymentProcessor>,
    dispatcher: NotificationDispatcher,
    webhook_secret: String,
}

impl PaymentService {
    /// Creates a new payment service.
    pub fn new(
        registration_repo: RegistrationRepository,
        event_repo: EventRepository,
        payment_repo: PaymentRepository,
        processor: Arc<dyn PaymentProcessor>,
        dispatcher: NotificationDispatcher,
        webhook_secret: String,
    ) -> Self {
        Self {
            registration_repo,
            event_repo,
            payment_repo,
            processor,
            dispatcher,
            webhook_secret,
        }
    }

    /// Create (or re-fetch) the card intent for a registration.
    ///
    /// The registration id doubles as the idempotency key, so retries
    /// reach the same processor-side intent instead of charging twice.
    pub async fn create_payment_intent(
        &self,
        ctx: &RequestContext,
        registration_id: Uuid,
    ) -> AppResult<CardIntent> {
        ctx.require_member()?;

        let registration = self
            .registration_repo
            .find_by_id(registration_id)
            .await?
            .ok_or_else(|| AppError::not_found("Registration not found"))?;

        if registration.user_id != ctx.user_id && !ctx.is_admin() {
            return Err(AppError::forbidden(
                "You can only pay for your own registrations",
            ));
        }

        if !registration.payment_status.accepts_card_confirmation() {
            return Err(AppError::conflict(format!(
                "Registration is already {}",
                registration.payment_status
            )));
        }

        let event = self
            .event_repo
            .find_by_id(registration.event_id)
            .await?
            .ok_or_else(|| {
                AppError::integrity(format!(
                    "Registration {} references missing event {}",
                    registration.id, registration.event_id
                ))
            })?;

        if !event.is_paid() {
            return Err(AppError::validation("This event is free of charge"));
        }

        let request = CreateIntentRequest {
            amount_minor: to_minor_units(event.price)?,
            currency: event.currency.clone(),
            idempotency_key: registration.id,
            metadata: json!({
                "registration_id": registration.id,
                "event_id": event.id,
                "user_id": registration.user_id,
            }),
        };

        let intent = self.processor.create_intent(&request).await?;

        match self.payment_repo.find_by_intent_id(&intent.intent_id).await? {
            Some(_) => {
                self.payment_repo
                    .update_processor_status(&intent.intent_id, &intent.status)
                    .await?;
            }
            None => {
                self.payment_repo
                    .create(&CreatePayment {
                        registration_id: registration.id,
                        event_id: event.id,
                        user_id: registration.user_id,
                        amount: event.price,
                        currency: event.currency.clone(),
                        processor_intent_id: intent.intent_id.clone(),
                        processor_status: intent.status.clone(),
                        metadata: request.metadata.clone(),
                    })
                    .await?;
                info!(
                    registration_id = %registration.id,
                    intent_id = %intent.intent_id,
                    "Created card payment intent"
                );
            }
        }

        Ok(CardIntent {
            intent_id: intent.intent_id,
            client_secret: intent.client_secret,
            amount: event.price,
            currency: event.currency,
            status: intent.status,
        })
    }

    /// Handle a processor webhook delivery.
    ///
    /// The signature is verified over the raw body before anything is
    /// parsed, and only a `payment_intent.succeeded` event can approve
    /// the linked registration. Redeliveries of the same event are
    /// harmless: the conditional status write affects zero rows.
    pub async fn handle_webhook(&self, raw_body: &[u8], signature: &str) -> AppResult<()> {
        webhook::verify_signature(&self.webhook_secret, raw_body, signature)?;
        let event = webhook::parse_event(raw_body)?;

        let payment = self
            .payment_repo
            .find_by_intent_id(&event.data.intent_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "No payment recorded for intent {}",
                    event.data.intent_id
                ))
            })?;

        self.payment_repo
            .update_processor_status(&event.data.intent_id, &event.data.status)
            .await?;

        match event.event_type.as_str() {
            EVENT_PAYMENT_SUCCEEDED => {
                self.settle_registration(payment.registration_id, &event.data.intent_id)
                    .await
            }
            EVENT_PAYMENT_FAILED => {
                // The registration stays where it was; the payer can retry
                // with a fresh confirmation or fall back to the QR path.
                warn!(
                    registration_id = %payment.registration_id,
                    intent_id = %event.data.intent_id,
                    "Card payment failed"
                );
                Ok(())
            }
            other => {
                info!(event_type = %other, "Ignoring unhandled webhook event type");
                Ok(())
            }
        }
    }

    async fn settle_registration(
        &self,
        registration_id: Uuid,
        intent_id: &str,
    ) -> AppResult<()> {
        let finalized = self
            .registration_repo
            .finalize(registration_id, PaymentStatus::Approved)
            .await?;

        let Some(registration) = finalized else {
            // No transition: either a redelivered webhook hit an already
            // finalized row, or the row is gone entirely.
            match self.registration_repo.find_by_id(registration_id).await? {
                Some(existing) => {
                    info!(
                        registration_id = %registration_id,
                        status = %existing.payment_status,
                        "Webhook redelivery for finalized registration"
                    );
                    return Ok(());
                }
                None => {
                    return Err(AppError::integrity(format!(
                        "Payment intent {intent_id} references missing registration {registration_id}"
                    )));
                }
            }
        };

        let event = self
            .event_repo
            .find_by_id(registration.event_id)
            .await?
            .ok_or_else(|| {
                AppError::integrity(format!(
                    "Registration {} references missing event {}",
                    registration.id, registration.event_id
                ))
            })?;

        info!(
            registration_id = %registration.id,
            intent_id = %intent_id,
            "Registration approved from processor webhook"
        );

        self.dispatcher
            .dispatch_confirmation(EventConfirmation::for_registration(&registration, &event));

        Ok(())
    }
}

/// Convert a decimal amount to the currency's minor unit.
///
/// Rejects sub-cent precision rather than silently rounding money.
pub fn to_minor_units(amount: Decimal) -> AppResult<i64> {
    let scaled = amount * Decimal::ONE_HUNDRED;
    if !scaled.fract().is_zero() {
        return Err(AppError::validation(format!(
            "Amount {amount} has sub-cent precision"
        )));
    }
    scaled
        .to_i64()
        .ok_or_else(|| AppError::validation(format!("Amount {amount} is out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn whole_amounts_convert_to_cents() {
        assert_eq!(to_minor_units(dec!(25)).unwrap(), 2500);
        assert_eq!(to_minor_units(dec!(12.50)).unwrap(), 1250);
        assert_eq!(to_minor_units(dec!(0.99)).unwrap(), 99);
    }

    #[test]
    fn zero_is_zero() {
        assert_eq!(to_minor_units(Decimal::ZERO).unwrap(), 0);
    }

    #[test]
    fn sub_cent_precision_is_rejected() {
        assert!(to_minor_units(dec!(10.005)).is_err());
    }
}
