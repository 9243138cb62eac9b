//! Gated event views.
//!
//! The meeting/access URL is the sensitive field: it is revealed to
//! admins unconditionally, and to an approved member only once their
//! own registration for that event has been approved. A pending or
//! rejected account stays locked out even if it holds an approved
//! registration from before its status changed.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lumen_auth::gate::Access;
use lumen_entity::event::{Event, EventCategory};
use lumen_entity::registration::PaymentStatus;

/// An event as presented to a caller, with sensitive fields gated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventView {
    /// Event id.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Date.
    pub date: NaiveDate,
    /// Start time.
    pub time: NaiveTime,
    /// Location.
    pub location: String,
    /// Category.
    pub category: EventCategory,
    /// Capacity.
    pub capacity: i32,
    /// Price.
    pub price: Decimal,
    /// Currency.
    pub currency: String,
    /// Registration deadline.
    pub registration_deadline: Option<DateTime<Utc>>,
    /// Meeting URL, present only when unlocked for this caller.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_url: Option<String>,
    /// The caller's own registration status for this event, if any.
    pub my_registration_status: Option<PaymentStatus>,
}

impl EventView {
    /// Compose a view of `event` for a caller with the given access and
    /// own-registration status.
    pub fn compose(
        event: Event,
        access: Access,
        my_status: Option<PaymentStatus>,
    ) -> Self {
        let unlocked = access.is_admin()
            || (access.is_member() && my_status == Some(PaymentStatus::Approved));

        Self {
            id: event.id,
            title: event.title,
            description: event.description,
            date: event.date,
            time: event.time,
            location: event.location,
            category: event.category,
            capacity: event.capacity,
            price: event.price,
            currency: event.currency,
            registration_deadline: event.registration_deadline,
            meeting_url: if unlocked { event.meeting_url } else { None },
            my_registration_status: my_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event_with_meeting_url() -> Event {
        Event {
            id: Uuid::new_v4(),
            title: "Async Rust Workshop".to_string(),
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2026, 11, 12).unwrap(),
            time: NaiveTime::from_hms_opt(17, 30, 0).unwrap(),
            location: "Online".to_string(),
            category: EventCategory::Workshop,
            capacity: 25,
            price: Decimal::new(2500, 2),
            currency: "USD".to_string(),
            registration_deadline: None,
            meeting_url: Some("https://meet.example.com/abc".to_string()),
            payment_qr_url: None,
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn non_registered_member_sees_summary_only() {
        let view = EventView::compose(event_with_meeting_url(), Access::Approved, None);
        assert_eq!(view.meeting_url, None);
    }

    #[test]
    fn pending_registration_does_not_unlock() {
        for status in [PaymentStatus::Pending, PaymentStatus::PendingVerification] {
            let view =
                EventView::compose(event_with_meeting_url(), Access::Approved, Some(status));
            assert_eq!(view.meeting_url, None);
        }
    }

    #[test]
    fn approved_registration_unlocks_meeting_url() {
        let view = EventView::compose(
            event_with_meeting_url(),
            Access::Approved,
            Some(PaymentStatus::Approved),
        );
        assert_eq!(
            view.meeting_url.as_deref(),
            Some("https://meet.example.com/abc")
        );
    }

    #[test]
    fn admin_sees_meeting_url_without_registration() {
        let view = EventView::compose(event_with_meeting_url(), Access::Admin, None);
        assert!(view.meeting_url.is_some());
    }

    #[test]
    fn disabled_account_stays_locked_despite_approved_registration() {
        // The account's access level was revoked after the registration
        // was approved; the registration alone must not unlock detail.
        for access in [Access::Rejected, Access::Pending, Access::Unauthenticated] {
            let view = EventView::compose(
                event_with_meeting_url(),
                access,
                Some(PaymentStatus::Approved),
            );
            assert_eq!(view.meeting_url, None);
        }
    }

    #[test]
    fn rejected_registration_stays_locked() {
        let view = EventView::compose(
            event_with_meeting_url(),
            Access::Approved,
            Some(PaymentStatus::Rejected),
        );
        assert_eq!(view.meeting_url, None);
    }
}
