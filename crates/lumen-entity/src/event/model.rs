//! Event entity model.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::category::EventCategory;

/// A catalog event members can register for.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    /// Unique event identifier.
    pub id: Uuid,
    /// Event title.
    pub title: String,
    /// Full description.
    pub description: String,
    /// Calendar date the event takes place.
    pub date: NaiveDate,
    /// Start time.
    pub time: NaiveTime,
    /// Venue or platform description.
    pub location: String,
    /// Event category.
    pub category: EventCategory,
    /// Seat capacity. Zero means no seats available.
    pub capacity: i32,
    /// Ticket price. Zero means free.
    pub price: Decimal,
    /// ISO 4217 currency code for the price.
    pub currency: String,
    /// Last moment registrations are accepted, if bounded.
    pub registration_deadline: Option<DateTime<Utc>>,
    /// Meeting/access URL, revealed only to approved registrants and admins.
    pub meeting_url: Option<String>,
    /// Default payment QR-code image URL shown to payers.
    pub payment_qr_url: Option<String>,
    /// The admin who created this event.
    pub created_by: Option<Uuid>,
    /// When the event was created.
    pub created_at: DateTime<Utc>,
    /// When the event was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Whether the registration window is still open at `now`.
    pub fn registration_open(&self, now: DateTime<Utc>) -> bool {
        match self.registration_deadline {
            Some(deadline) => now <= deadline,
            None => true,
        }
    }

    /// Whether the event costs anything.
    pub fn is_paid(&self) -> bool {
        self.price > Decimal::ZERO
    }
}

/// Data required to create a new event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEvent {
    /// Event title.
    pub title: String,
    /// Full description.
    pub description: String,
    /// Calendar date.
    pub date: NaiveDate,
    /// Start time.
    pub time: NaiveTime,
    /// Venue or platform description.
    pub location: String,
    /// Category.
    pub category: EventCategory,
    /// Seat capacity.
    pub capacity: i32,
    /// Ticket price.
    pub price: Decimal,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Registration deadline (optional).
    pub registration_deadline: Option<DateTime<Utc>>,
    /// Meeting/access URL (optional).
    pub meeting_url: Option<String>,
    /// Creating admin's user ID.
    pub created_by: Option<Uuid>,
}

/// Partial update for an existing event. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEvent {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New date.
    pub date: Option<NaiveDate>,
    /// New start time.
    pub time: Option<NaiveTime>,
    /// New location.
    pub location: Option<String>,
    /// New category.
    pub category: Option<EventCategory>,
    /// New capacity.
    pub capacity: Option<i32>,
    /// New price.
    pub price: Option<Decimal>,
    /// New registration deadline.
    pub registration_deadline: Option<DateTime<Utc>>,
    /// New meeting URL.
    pub meeting_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event_with_deadline(deadline: Option<DateTime<Utc>>) -> Event {
        Event {
            id: Uuid::new_v4(),
            title: "Intro Workshop".to_string(),
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            location: "Online".to_string(),
            category: EventCategory::Workshop,
            capacity: 30,
            price: Decimal::new(2500, 2),
            currency: "USD".to_string(),
            registration_deadline: deadline,
            meeting_url: None,
            payment_qr_url: None,
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn no_deadline_means_always_open() {
        let event = event_with_deadline(None);
        assert!(event.registration_open(Utc::now()));
    }

    #[test]
    fn deadline_is_inclusive() {
        let deadline = Utc.with_ymd_and_hms(2026, 9, 30, 23, 59, 59).unwrap();
        let event = event_with_deadline(Some(deadline));
        assert!(event.registration_open(deadline));
        assert!(!event.registration_open(deadline + chrono::Duration::seconds(1)));
    }
}
