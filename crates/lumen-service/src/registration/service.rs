//! Registration ledger operations.
//!
//! Creation is idempotent per (user, event): the partial unique index
//! in the store turns a duplicate insert into "return the existing live
//! row", so two tabs racing the same click converge on one registration.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use lumen_core::error::AppError;
use lumen_database::store::{EventStore, RegistrationStore};
use lumen_entity::registration::{AttendeeInfo, PaymentStatus, Registration};

use crate::context::RequestContext;

/// Handles registration creation and reads.
#[derive(Debug, Clone)]
pub struct RegistrationService {
    /// Registration ledger store.
    registration_store: Arc<dyn RegistrationStore>,
    /// Event store.
    event_store: Arc<dyn EventStore>,
}

impl RegistrationService {
    /// Creates a new registration service.
    pub fn new(
        registration_store: Arc<dyn RegistrationStore>,
        event_store: Arc<dyn EventStore>,
    ) -> Self {
        Self {
            registration_store,
            event_store,
        }
    }

    /// Register the current user for an event.
    ///
    /// Idempotent: if a live registration already exists for this
    /// (user, event) pair the existing one is returned unchanged. A
    /// previously rejected registration does not block re-registering;
    /// that path creates a fresh row.
    pub async fn create_registration(
        &self,
        ctx: &RequestContext,
        event_id: Uuid,
        attendee: AttendeeInfo,
    ) -> Result<Registration, AppError> {
        ctx.require_member()?;
        validate_attendee(&attendee)?;

        let event = self
            .event_store
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Event {event_id} not found")))?;

        // A repeated create must return the existing registration even
        // when the deadline has since passed or the caller's own row
        // fills the last seat, so the idempotency check comes first.
        if let Some(existing) = self
            .registration_store
            .find_live(ctx.user_id, event_id)
            .await?
        {
            return Ok(existing);
        }

        if !event.registration_open(Utc::now()) {
            return Err(AppError::validation(
                "The registration deadline for this event has passed",
            ));
        }

        // Check-then-act on capacity: the count and the insert are not
        // one atomic step, so a burst at the last seat can oversell by
        // a small margin. Accepted risk at this catalog's scale.
        let live = self
            .registration_store
            .count_live_for_event(event_id)
            .await?;
        if live >= i64::from(event.capacity) {
            return Err(AppError::conflict("This event is fully booked"));
        }

        let outcome = self
            .registration_store
            .create_or_existing(ctx.user_id, event_id, &attendee)
            .await?;

        if outcome.created {
            info!(
                registration_id = %outcome.registration.id,
                user_id = %ctx.user_id,
                %event_id,
                "Registration created"
            );
        }

        Ok(outcome.registration)
    }

    /// The caller's payment status for an event, if registered.
    pub async fn registration_status(
        &self,
        ctx: &RequestContext,
        event_id: Uuid,
    ) -> Result<Option<PaymentStatus>, AppError> {
        Ok(self
            .registration_store
            .find_live(ctx.user_id, event_id)
            .await?
            .map(|r| r.payment_status))
    }

    /// Every registration for an event, oldest first (admin only).
    pub async fn list_event_registrations(
        &self,
        ctx: &RequestContext,
        event_id: Uuid,
    ) -> Result<Vec<Registration>, AppError> {
        ctx.require_admin()?;
        self.registration_store.list_by_event(event_id).await
    }

    /// All of the caller's registrations, newest first.
    pub async fn list_my_registrations(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<Registration>, AppError> {
        self.registration_store.list_by_user(ctx.user_id).await
    }
}

fn validate_attendee(attendee: &AttendeeInfo) -> Result<(), AppError> {
    if attendee.name.trim().is_empty() {
        return Err(AppError::validation("Attendee name is required"));
    }
    if !attendee.email.contains('@') {
        return Err(AppError::validation("A valid attendee email is required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use crate::testing::{member_context, sample_attendee, sample_event, InMemoryStore};

    fn service(store: &Arc<InMemoryStore>) -> RegistrationService {
        RegistrationService::new(store.clone(), store.clone())
    }

    #[tokio::test]
    async fn duplicate_create_returns_existing_row_when_event_is_full() {
        let store = Arc::new(InMemoryStore::default());
        let event = sample_event(1);
        let event_id = event.id;
        store.insert_event(event);

        let svc = service(&store);
        let ctx = member_context();

        // The first create takes the last seat.
        let first = svc
            .create_registration(&ctx, event_id, sample_attendee())
            .await
            .unwrap();

        // Repeating the call must return the same registration, not
        // "fully booked".
        let second = svc
            .create_registration(&ctx, event_id, sample_attendee())
            .await
            .unwrap();
        assert_eq!(second.id, first.id);
    }

    #[tokio::test]
    async fn duplicate_create_survives_a_passed_deadline() {
        let store = Arc::new(InMemoryStore::default());
        let event = sample_event(10);
        let event_id = event.id;
        store.insert_event(event);

        let svc = service(&store);
        let ctx = member_context();

        let first = svc
            .create_registration(&ctx, event_id, sample_attendee())
            .await
            .unwrap();

        store.update_event(event_id, |e| {
            e.registration_deadline = Some(Utc::now() - chrono::Duration::hours(1));
        });

        let second = svc
            .create_registration(&ctx, event_id, sample_attendee())
            .await
            .unwrap();
        assert_eq!(second.id, first.id);
    }

    #[tokio::test]
    async fn full_event_refuses_a_new_registrant() {
        let store = Arc::new(InMemoryStore::default());
        let event = sample_event(1);
        let event_id = event.id;
        store.insert_event(event);

        let svc = service(&store);

        svc.create_registration(&member_context(), event_id, sample_attendee())
            .await
            .unwrap();

        let err = svc
            .create_registration(&member_context(), event_id, sample_attendee())
            .await
            .unwrap_err();
        assert_eq!(err.kind, lumen_core::error::ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn passed_deadline_refuses_a_new_registrant() {
        let store = Arc::new(InMemoryStore::default());
        let mut event = sample_event(10);
        event.registration_deadline = Some(Utc::now() - chrono::Duration::hours(1));
        let event_id = event.id;
        store.insert_event(event);

        let err = service(&store)
            .create_registration(&member_context(), event_id, sample_attendee())
            .await
            .unwrap_err();
        assert_eq!(err.kind, lumen_core::error::ErrorKind::Validation);
    }

    #[test]
    fn attendee_requires_name_and_email() {
        assert!(
            validate_attendee(&AttendeeInfo {
                name: "  ".to_string(),
                email: "a@b.c".to_string(),
                phone: None,
            })
            .is_err()
        );
        assert!(
            validate_attendee(&AttendeeInfo {
                name: "Alex".to_string(),
                email: "not-an-email".to_string(),
                phone: None,
            })
            .is_err()
        );
        assert!(
            validate_attendee(&AttendeeInfo {
                name: "Alex".to_string(),
                email: "alex@example.com".to_string(),
                phone: Some("+15550100".to_string()),
            })
            .is_ok()
        );
    }
}
