//! Registration entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::PaymentStatus;

/// A user's claim on a seat at a specific event.
///
/// At most one live (non-rejected) registration exists per (user, event)
/// pair; rejected rows are kept forever as terminal history.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Registration {
    /// Unique registration identifier.
    pub id: Uuid,
    /// The event being attended.
    pub event_id: Uuid,
    /// The registering account.
    pub user_id: Uuid,
    /// Attendee name (may differ from the account's display name).
    pub attendee_name: String,
    /// Attendee contact email.
    pub attendee_email: String,
    /// Attendee contact phone.
    pub attendee_phone: Option<String>,
    /// Payment lifecycle state.
    pub payment_status: PaymentStatus,
    /// Transaction reference submitted by the payer.
    pub transaction_ref: Option<String>,
    /// Public URL of the uploaded proof-of-payment image.
    pub proof_url: Option<String>,
    /// Free-text notes from the payer.
    pub notes: Option<String>,
    /// Registration-specific QR override. The event's default QR always
    /// wins when both are present.
    pub qr_override_url: Option<String>,
    /// When the registration was created.
    pub created_at: DateTime<Utc>,
    /// When the registration was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Registration {
    /// The QR code the payer should be shown for this registration.
    ///
    /// The event's shared default takes precedence; the per-registration
    /// override exists only as a fallback for case-by-case variation.
    pub fn payment_qr<'a>(&'a self, event_default: Option<&'a str>) -> Option<&'a str> {
        event_default.or(self.qr_override_url.as_deref())
    }
}

/// Attendee contact details supplied when registering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendeeInfo {
    /// Attendee name.
    pub name: String,
    /// Attendee contact email.
    pub email: String,
    /// Attendee contact phone (optional).
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(qr_override: Option<&str>) -> Registration {
        Registration {
            id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            attendee_name: "Alex Doe".to_string(),
            attendee_email: "alex@example.com".to_string(),
            attendee_phone: None,
            payment_status: PaymentStatus::Pending,
            transaction_ref: None,
            proof_url: None,
            notes: None,
            qr_override_url: qr_override.map(String::from),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn event_default_qr_wins_over_override() {
        let reg = registration(Some("/files/qr/override.png"));
        assert_eq!(
            reg.payment_qr(Some("/files/qr/event.png")),
            Some("/files/qr/event.png")
        );
    }

    #[test]
    fn override_is_the_fallback() {
        let reg = registration(Some("/files/qr/override.png"));
        assert_eq!(reg.payment_qr(None), Some("/files/qr/override.png"));
    }

    #[test]
    fn no_qr_at_all() {
        let reg = registration(None);
        assert_eq!(reg.payment_qr(None), None);
    }
}
