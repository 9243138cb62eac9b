//! In-memory stores and recording collaborators for service tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use lumen_auth::gate::Access;
use lumen_core::error::{AppError, AppResult};
use lumen_core::traits::mailer::{MailMessage, Mailer};
use lumen_core::traits::storage::StorageProvider;
use lumen_database::repositories::registration::RegistrationInsert;
use lumen_database::store::{EventStore, RegistrationStore};
use lumen_entity::event::{Event, EventCategory};
use lumen_entity::registration::{AttendeeInfo, PaymentStatus, Registration};

use crate::context::RequestContext;

/// In-memory ledger backing both store traits for tests.
///
/// Mirrors the repositories' guarded-write semantics: live-row
/// uniqueness, COALESCE evidence updates, and conditional finalize.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    events: Mutex<HashMap<Uuid, Event>>,
    registrations: Mutex<HashMap<Uuid, Registration>>,
}

impl InMemoryStore {
    pub fn insert_event(&self, event: Event) {
        self.events.lock().unwrap().insert(event.id, event);
    }

    pub fn update_event(&self, id: Uuid, f: impl FnOnce(&mut Event)) {
        let mut events = self.events.lock().unwrap();
        f(events.get_mut(&id).unwrap());
    }

    pub fn registration(&self, id: Uuid) -> Registration {
        self.registrations.lock().unwrap()[&id].clone()
    }

    fn live_for(&self, user_id: Uuid, event_id: Uuid) -> Option<Registration> {
        self.registrations
            .lock()
            .unwrap()
            .values()
            .find(|r| {
                r.user_id == user_id
                    && r.event_id == event_id
                    && r.payment_status != PaymentStatus::Rejected
            })
            .cloned()
    }
}

#[async_trait]
impl RegistrationStore for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Registration>> {
        Ok(self.registrations.lock().unwrap().get(&id).cloned())
    }

    async fn find_live(
        &self,
        user_id: Uuid,
        event_id: Uuid,
    ) -> AppResult<Option<Registration>> {
        Ok(self.live_for(user_id, event_id))
    }

    async fn create_or_existing(
        &self,
        user_id: Uuid,
        event_id: Uuid,
        attendee: &AttendeeInfo,
    ) -> AppResult<RegistrationInsert> {
        if let Some(existing) = self.live_for(user_id, event_id) {
            return Ok(RegistrationInsert {
                registration: existing,
                created: false,
            });
        }

        let registration = Registration {
            id: Uuid::new_v4(),
            event_id,
            user_id,
            attendee_name: attendee.name.clone(),
            attendee_email: attendee.email.clone(),
            attendee_phone: attendee.phone.clone(),
            payment_status: PaymentStatus::Pending,
            transaction_ref: None,
            proof_url: None,
            notes: None,
            qr_override_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.registrations
            .lock()
            .unwrap()
            .insert(registration.id, registration.clone());
        Ok(RegistrationInsert {
            registration,
            created: true,
        })
    }

    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Registration>> {
        Ok(self
            .registrations
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_by_event(&self, event_id: Uuid) -> AppResult<Vec<Registration>> {
        Ok(self
            .registrations
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn list_pending_verification(&self) -> AppResult<Vec<Registration>> {
        Ok(self
            .registrations
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.payment_status == PaymentStatus::PendingVerification)
            .cloned()
            .collect())
    }

    async fn count_live_for_event(&self, event_id: Uuid) -> AppResult<i64> {
        Ok(self
            .registrations
            .lock()
            .unwrap()
            .values()
            .filter(|r| {
                r.event_id == event_id && r.payment_status != PaymentStatus::Rejected
            })
            .count() as i64)
    }

    async fn record_proof_submission(
        &self,
        id: Uuid,
        transaction_ref: Option<&str>,
        proof_url: Option<&str>,
        notes: Option<&str>,
    ) -> AppResult<Option<Registration>> {
        let mut registrations = self.registrations.lock().unwrap();
        match registrations.get_mut(&id) {
            Some(r) if r.payment_status.accepts_proof() => {
                if let Some(txn) = transaction_ref {
                    r.transaction_ref = Some(txn.to_string());
                }
                if let Some(url) = proof_url {
                    r.proof_url = Some(url.to_string());
                }
                if let Some(n) = notes {
                    r.notes = Some(n.to_string());
                }
                r.payment_status = PaymentStatus::PendingVerification;
                r.updated_at = Utc::now();
                Ok(Some(r.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn finalize(
        &self,
        id: Uuid,
        status: PaymentStatus,
    ) -> AppResult<Option<Registration>> {
        let mut registrations = self.registrations.lock().unwrap();
        match registrations.get_mut(&id) {
            Some(r) if r.payment_status.accepts_review() => {
                r.payment_status = status;
                r.updated_at = Utc::now();
                Ok(Some(r.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn set_qr_override(&self, id: Uuid, qr_url: &str) -> AppResult<Registration> {
        let mut registrations = self.registrations.lock().unwrap();
        let r = registrations
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Registration not found"))?;
        r.qr_override_url = Some(qr_url.to_string());
        Ok(r.clone())
    }
}

#[async_trait]
impl EventStore for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Event>> {
        Ok(self.events.lock().unwrap().get(&id).cloned())
    }

    async fn set_payment_qr(&self, id: Uuid, qr_url: &str) -> AppResult<Event> {
        let mut events = self.events.lock().unwrap();
        let event = events
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Event not found"))?;
        event.payment_qr_url = Some(qr_url.to_string());
        Ok(event.clone())
    }
}

/// Mailer that records every message instead of sending it.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<MailMessage>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: MailMessage) -> AppResult<()> {
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

/// Storage stub that accepts every write and discards the bytes.
#[derive(Debug, Default)]
pub struct StubStorage;

#[async_trait]
impl StorageProvider for StubStorage {
    fn provider_type(&self) -> &str {
        "stub"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn write(&self, _path: &str, _data: Bytes) -> AppResult<()> {
        Ok(())
    }

    async fn read(&self, path: &str) -> AppResult<Bytes> {
        Err(AppError::not_found(format!("No stored file at {path}")))
    }

    async fn delete(&self, _path: &str) -> AppResult<()> {
        Ok(())
    }

    async fn exists(&self, _path: &str) -> AppResult<bool> {
        Ok(false)
    }

    fn public_url(&self, path: &str) -> String {
        format!("/files/{path}")
    }
}

pub fn member_context() -> RequestContext {
    RequestContext::new(Uuid::new_v4(), "member@example.com".into(), Access::Approved)
}

pub fn admin_context() -> RequestContext {
    RequestContext::new(Uuid::new_v4(), "admin@example.com".into(), Access::Admin)
}

pub fn sample_event(capacity: i32) -> Event {
    Event {
        id: Uuid::new_v4(),
        title: "Async Rust Workshop".to_string(),
        description: String::new(),
        date: NaiveDate::from_ymd_opt(2026, 11, 12).unwrap(),
        time: NaiveTime::from_hms_opt(17, 30, 0).unwrap(),
        location: "Online".to_string(),
        category: EventCategory::Workshop,
        capacity,
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

pub fn sample_attendee() -> AttendeeInfo {
    AttendeeInfo {
        name: "Alex Doe".to_string(),
        email: "alex@example.com".to_string(),
        phone: None,
    }
}

/// Let fire-and-forget dispatch tasks run to completion.
pub async fn drain_spawned_tasks() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}
