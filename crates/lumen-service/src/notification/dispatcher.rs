//! Event-confirmation dispatch.
//!
//! Invoked exactly once per approval transition: the verification
//! engine only calls here when its conditional status write actually
//! moved a row into `approved`.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use tracing::{error, info};

use lumen_core::error::AppResult;
use lumen_core::traits::mailer::{MailMessage, Mailer};
use lumen_entity::event::Event;
use lumen_entity::registration::Registration;

/// Details for a registration-approved confirmation message.
#[derive(Debug, Clone)]
pub struct EventConfirmation {
    /// Recipient address (the attendee's contact email).
    pub user_email: String,
    /// Attendee name for the salutation.
    pub attendee_name: String,
    /// Event title.
    pub event_title: String,
    /// Event date.
    pub event_date: NaiveDate,
    /// Event start time.
    pub event_time: NaiveTime,
    /// Event location.
    pub event_location: String,
    /// Meeting/access link, when the event has one.
    pub meeting_link: Option<String>,
}

impl EventConfirmation {
    /// Builds a confirmation for an approved registration.
    pub fn for_registration(registration: &Registration, event: &Event) -> Self {
        Self {
            user_email: registration.attendee_email.clone(),
            attendee_name: registration.attendee_name.clone(),
            event_title: event.title.clone(),
            event_date: event.date,
            event_time: event.time,
            event_location: event.location.clone(),
            meeting_link: event.meeting_url.clone(),
        }
    }
}

/// Sends confirmation messages through the configured [`Mailer`].
#[derive(Debug, Clone)]
pub struct NotificationDispatcher {
    mailer: Arc<dyn Mailer>,
}

impl NotificationDispatcher {
    /// Creates a new dispatcher.
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self { mailer }
    }

    /// Send a confirmation and wait for the mailer's result.
    pub async fn send_confirmation(&self, confirmation: EventConfirmation) -> AppResult<()> {
        let message = build_message(&confirmation);
        self.mailer.send(message).await
    }

    /// Fire-and-forget dispatch. Delivery failures are logged and never
    /// affect the already-committed approval.
    pub fn dispatch_confirmation(&self, confirmation: EventConfirmation) {
        let dispatcher = self.clone();
        let recipient = confirmation.user_email.clone();
        tokio::spawn(async move {
            match dispatcher.send_confirmation(confirmation).await {
                Ok(()) => info!(%recipient, "Event confirmation sent"),
                Err(e) => error!(%recipient, error = %e, "Failed to send event confirmation"),
            }
        });
    }
}

fn build_message(confirmation: &EventConfirmation) -> MailMessage {
    let mut body = format!(
        "Hi {name},\n\n\
         Your registration for \"{title}\" has been confirmed.\n\n\
         Date: {date}\n\
         Time: {time}\n\
         Location: {location}\n",
        name = confirmation.attendee_name,
        title = confirmation.event_title,
        date = confirmation.event_date,
        time = confirmation.event_time,
        location = confirmation.event_location,
    );

    if let Some(link) = &confirmation.meeting_link {
        body.push_str(&format!("Meeting link: {link}\n"));
    }

    body.push_str("\nSee you there!\nThe Lumen Events team\n");

    MailMessage {
        to_address: confirmation.user_email.clone(),
        to_name: Some(confirmation.attendee_name.clone()),
        subject: format!("You're confirmed: {}", confirmation.event_title),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::testing::RecordingMailer;

    fn confirmation(meeting_link: Option<&str>) -> EventConfirmation {
        EventConfirmation {
            user_email: "alex@example.com".to_string(),
            attendee_name: "Alex Doe".to_string(),
            event_title: "Async Rust Workshop".to_string(),
            event_date: NaiveDate::from_ymd_opt(2026, 11, 12).unwrap(),
            event_time: NaiveTime::from_hms_opt(17, 30, 0).unwrap(),
            event_location: "Online".to_string(),
            meeting_link: meeting_link.map(String::from),
        }
    }

    #[tokio::test]
    async fn sends_exactly_one_message_with_event_details() {
        let mailer = Arc::new(RecordingMailer::default());
        let dispatcher = NotificationDispatcher::new(mailer.clone());

        dispatcher
            .send_confirmation(confirmation(Some("https://meet.example.com/abc")))
            .await
            .unwrap();

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let message = &sent[0];
        assert_eq!(message.to_address, "alex@example.com");
        assert!(message.subject.contains("Async Rust Workshop"));
        assert!(message.body.contains("2026-11-12"));
        assert!(message.body.contains("17:30:00"));
        assert!(message.body.contains("Online"));
        assert!(message.body.contains("https://meet.example.com/abc"));
    }

    #[tokio::test]
    async fn omits_meeting_link_when_absent() {
        let mailer = Arc::new(RecordingMailer::default());
        let dispatcher = NotificationDispatcher::new(mailer.clone());

        dispatcher
            .send_confirmation(confirmation(None))
            .await
            .unwrap();

        let sent = mailer.sent.lock().unwrap();
        assert!(!sent[0].body.contains("Meeting link"));
    }
}
