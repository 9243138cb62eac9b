//! HTTP client for the external card processor.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use lumen_core::config::payment::PaymentConfig;
use lumen_core::error::AppError;
use lumen_core::error::AppResult;
use lumen_core::traits::processor::{CreateIntentRequest, PaymentIntent, PaymentProcessor};

/// [`PaymentProcessor`] backed by the processor's HTTP API.
pub struct HttpPaymentProcessor {
    client: reqwest::Client,
    base_url: String,
    secret_key: String,
}

impl std::fmt::Debug for HttpPaymentProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPaymentProcessor")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct IntentResponse {
    id: String,
    client_secret: String,
    status: String,
}

impl HttpPaymentProcessor {
    /// Builds a client from payment configuration.
    pub fn new(config: &PaymentConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::configuration(format!("Failed to build processor client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            secret_key: config.secret_key.clone(),
        })
    }
}

#[async_trait]
impl PaymentProcessor for HttpPaymentProcessor {
    async fn create_intent(&self, req: &CreateIntentRequest) -> AppResult<PaymentIntent> {
        let url = format!("{}/v1/payment_intents", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.secret_key)
            .header("Idempotency-Key", req.idempotency_key.to_string())
            .json(req)
            .send()
            .await
            .map_err(|e| {
                AppError::external_service(format!("Processor request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::payment(format!(
                "Processor rejected intent creation ({status}): {body}"
            )));
        }

        let intent: IntentResponse = response.json().await.map_err(|e| {
            AppError::external_service(format!("Malformed processor response: {e}"))
        })?;

        Ok(PaymentIntent {
            intent_id: intent.id,
            client_secret: intent.client_secret,
            status: intent.status,
        })
    }
}
