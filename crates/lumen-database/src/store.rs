//! Trait seams over the repositories used by the payment flow.
//!
//! The registration and verification services take these traits instead
//! of the concrete repositories, so the ledger state machine can be
//! exercised against in-memory stores in tests. Entity-specific query
//! methods that only the catalog needs stay on the concrete structs.

use async_trait::async_trait;
use uuid::Uuid;

use lumen_core::error::AppResult;
use lumen_entity::event::Event;
use lumen_entity::registration::{AttendeeInfo, PaymentStatus, Registration};

use crate::repositories::event::EventRepository;
use crate::repositories::registration::{RegistrationInsert, RegistrationRepository};

/// Persistence operations on the registration ledger.
#[async_trait]
pub trait RegistrationStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a registration by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Registration>>;

    /// Find the live (non-rejected) registration for a (user, event) pair.
    async fn find_live(
        &self,
        user_id: Uuid,
        event_id: Uuid,
    ) -> AppResult<Option<Registration>>;

    /// Insert a registration, or return the existing live one.
    async fn create_or_existing(
        &self,
        user_id: Uuid,
        event_id: Uuid,
        attendee: &AttendeeInfo,
    ) -> AppResult<RegistrationInsert>;

    /// List a user's registrations, newest first.
    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Registration>>;

    /// List all registrations for an event, oldest first.
    async fn list_by_event(&self, event_id: Uuid) -> AppResult<Vec<Registration>>;

    /// List registrations awaiting admin review.
    async fn list_pending_verification(&self) -> AppResult<Vec<Registration>>;

    /// Count live (non-rejected) registrations for an event.
    async fn count_live_for_event(&self, event_id: Uuid) -> AppResult<i64>;

    /// Record payment evidence and move to `pending_verification`.
    /// `None` when the row was terminal (or missing).
    async fn record_proof_submission(
        &self,
        id: Uuid,
        transaction_ref: Option<&str>,
        proof_url: Option<&str>,
        notes: Option<&str>,
    ) -> AppResult<Option<Registration>>;

    /// Finalize into a terminal status; `None` when no transition
    /// happened.
    async fn finalize(
        &self,
        id: Uuid,
        status: PaymentStatus,
    ) -> AppResult<Option<Registration>>;

    /// Set a registration-specific QR override.
    async fn set_qr_override(&self, id: Uuid, qr_url: &str) -> AppResult<Registration>;
}

/// The slice of event persistence the payment flow depends on.
#[async_trait]
pub trait EventStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find an event by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Event>>;

    /// Set or replace the event's default payment QR-code URL.
    async fn set_payment_qr(&self, id: Uuid, qr_url: &str) -> AppResult<Event>;
}

#[async_trait]
impl RegistrationStore for RegistrationRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Registration>> {
        RegistrationRepository::find_by_id(self, id).await
    }

    async fn find_live(
        &self,
        user_id: Uuid,
        event_id: Uuid,
    ) -> AppResult<Option<Registration>> {
        RegistrationRepository::find_live(self, user_id, event_id).await
    }

    async fn create_or_existing(
        &self,
        user_id: Uuid,
        event_id: Uuid,
        attendee: &AttendeeInfo,
    ) -> AppResult<RegistrationInsert> {
        RegistrationRepository::create_or_existing(self, user_id, event_id, attendee).await
    }

    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Registration>> {
        RegistrationRepository::list_by_user(self, user_id).await
    }

    async fn list_by_event(&self, event_id: Uuid) -> AppResult<Vec<Registration>> {
        RegistrationRepository::list_by_event(self, event_id).await
    }

    async fn list_pending_verification(&self) -> AppResult<Vec<Registration>> {
        RegistrationRepository::list_pending_verification(self).await
    }

    async fn count_live_for_event(&self, event_id: Uuid) -> AppResult<i64> {
        RegistrationRepository::count_live_for_event(self, event_id).await
    }

    async fn record_proof_submission(
        &self,
        id: Uuid,
        transaction_ref: Option<&str>,
        proof_url: Option<&str>,
        notes: Option<&str>,
    ) -> AppResult<Option<Registration>> {
        RegistrationRepository::record_proof_submission(self, id, transaction_ref, proof_url, notes)
            .await
    }

    async fn finalize(
        &self,
        id: Uuid,
        status: PaymentStatus,
    ) -> AppResult<Option<Registration>> {
        RegistrationRepository::finalize(self, id, status).await
    }

    async fn set_qr_override(&self, id: Uuid, qr_url: &str) -> AppResult<Registration> {
        RegistrationRepository::set_qr_override(self, id, qr_url).await
    }
}

#[async_trait]
impl EventStore for EventRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Event>> {
        EventRepository::find_by_id(self, id).await
    }

    async fn set_payment_qr(&self, id: Uuid, qr_url: &str) -> AppResult<Event> {
        EventRepository::set_payment_qr(self, id, qr_url).await
    }
}
