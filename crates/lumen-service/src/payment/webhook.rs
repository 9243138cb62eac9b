//! Webhook signature verification and payload parsing.
//!
//! The processor signs the raw request body with HMAC-SHA256 using the
//! shared webhook secret and sends the hex digest in a header. The
//! signature is checked over the exact bytes received, before any
//! parsing.

use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

use lumen_core::error::AppError;
use lumen_core::error::AppResult;

type HmacSha256 = Hmac<Sha256>;

/// Event type the processor sends when a payment succeeds.
pub const EVENT_PAYMENT_SUCCEEDED: &str = "payment_intent.succeeded";

/// Event type the processor sends when a payment fails.
pub const EVENT_PAYMENT_FAILED: &str = "payment_intent.payment_failed";

/// A parsed webhook event from the processor.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    /// Event type (e.g., `payment_intent.succeeded`).
    #[serde(rename = "type")]
    pub event_type: String,
    /// The intent the event concerns.
    pub data: WebhookIntent,
}

/// Intent details carried in a webhook event.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookIntent {
    /// Processor-side intent identifier.
    pub intent_id: String,
    /// Processor-side status string.
    pub status: String,
}

/// Verify the HMAC-SHA256 signature over the raw webhook body.
///
/// Comparison happens inside the MAC verification and is constant time.
pub fn verify_signature(secret: &str, body: &[u8], signature_hex: &str) -> AppResult<()> {
    let expected = hex::decode(signature_hex.trim())
        .map_err(|_| AppError::unauthorized("Malformed webhook signature"))?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| AppError::configuration(format!("Invalid webhook secret: {e}")))?;
    mac.update(body);

    mac.verify_slice(&expected)
        .map_err(|_| AppError::unauthorized("Webhook signature mismatch"))
}

/// Parse the raw webhook body.
pub fn parse_event(body: &[u8]) -> AppResult<WebhookEvent> {
    serde_json::from_slice(body)
        .map_err(|e| AppError::validation(format!("Malformed webhook payload: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(secret: &str, body: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(body);
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn valid_signature_passes() {
        let body = br#"{"type":"payment_intent.succeeded","data":{"intent_id":"pi_1","status":"succeeded"}}"#;
        let sig = sign("whsec_test", body);
        assert!(verify_signature("whsec_test", body, &sig).is_ok());
    }

    #[test]
    fn tampered_body_is_rejected() {
        let body = b"{\"amount\":100}";
        let sig = sign("whsec_test", body);
        assert!(verify_signature("whsec_test", b"{\"amount\":999}", &sig).is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let body = b"{}";
        let sig = sign("whsec_other", body);
        assert!(verify_signature("whsec_test", body, &sig).is_err());
    }

    #[test]
    fn non_hex_signature_is_rejected() {
        let err = verify_signature("whsec_test", b"{}", "not-hex!").unwrap_err();
        assert_eq!(err.kind, lumen_core::error::ErrorKind::Unauthorized);
    }

    #[test]
    fn parses_succeeded_event() {
        let body = br#"{"type":"payment_intent.succeeded","data":{"intent_id":"pi_42","status":"succeeded"}}"#;
        let event = parse_event(body).unwrap();
        assert_eq!(event.event_type, EVENT_PAYMENT_SUCCEEDED);
        assert_eq!(event.data.intent_id, "pi_42");
        assert_eq!(event.data.status, "succeeded");
    }

    #[test]
    fn garbage_payload_is_a_validation_error() {
        let err = parse_event(b"not json").unwrap_err();
        assert_eq!(err.kind, lumen_core::error::ErrorKind::Validation);
    }
}
