//! Evidence submission and admin review.

use std::sync::Arc;

use bytes::Bytes;
use image::ImageFormat;
use tracing::info;
use uuid::Uuid;

use lumen_core::error::AppError;
use lumen_core::error::AppResult;
use lumen_core::traits::storage::StorageProvider;
use lumen_database::store::{EventStore, RegistrationStore};
use lumen_entity::event::Event;
use lumen_entity::registration::{PaymentStatus, Registration};
use lumen_storage::paths;

use crate::context::RequestContext;
use crate::notification::{EventConfirmation, NotificationDispatcher};

/// Payment evidence supplied by the payer.
///
/// At least one of `transaction_ref` or `proof_image` must be present.
#[derive(Debug, Clone, Default)]
pub struct ProofSubmission {
    /// Bank or wallet transaction reference.
    pub transaction_ref: Option<String>,
    /// Free-text notes for the reviewer.
    pub notes: Option<String>,
    /// Raw bytes of the uploaded proof image.
    pub proof_image: Option<Bytes>,
}

/// Service driving payment verification for the manual path.
#[derive(Debug, Clone)]
pub struct VerificationService {
    registration_store: Arc<dyn RegistrationStore>,
    event_store: Arc<dyn EventStore>,
    storage: Arc<dyn StorageProvider>,
    dispatcher: NotificationDispatcher,
    max_upload_bytes: u64,
}

impl VerificationService {
    /// Creates a new verification service.
    pub fn new(
        registration_store: Arc<dyn RegistrationStore>,
        event_store: Arc<dyn EventStore>,
        storage: Arc<dyn StorageProvider>,
        dispatcher: NotificationDispatcher,
        max_upload_bytes: u64,
    ) -> Self {
        Self {
            registration_store,
            event_store,
            storage,
            dispatcher,
            max_upload_bytes,
        }
    }

    /// Submit payment evidence for a registration.
    ///
    /// The proof image (if any) is stored before the status write, so a
    /// storage failure leaves the registration untouched. Resubmission
    /// overwrites the previous file and replaces the recorded evidence.
    pub async fn submit_proof(
        &self,
        ctx: &RequestContext,
        registration_id: Uuid,
        submission: ProofSubmission,
    ) -> AppResult<Registration> {
        ctx.require_member()?;

        let registration = self
            .registration_store
            .find_by_id(registration_id)
            .await?
            .ok_or_else(|| AppError::not_found("Registration not found"))?;

        if registration.user_id != ctx.user_id {
            return Err(AppError::forbidden(
                "You can only submit payment proof for your own registrations",
            ));
        }

        if !registration.payment_status.accepts_proof() {
            return Err(AppError::conflict(format!(
                "Registration is already {}",
                registration.payment_status
            )));
        }

        let transaction_ref = submission
            .transaction_ref
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        if transaction_ref.is_none() && submission.proof_image.is_none() {
            return Err(AppError::validation(
                "Provide a transaction reference or upload a proof image",
            ));
        }

        let proof_url = match submission.proof_image {
            Some(data) => {
                let extension = self.validate_image(&data)?;
                let path = paths::proof_path(registration.id, extension);
                self.storage.write(&path, data).await?;
                Some(self.storage.public_url(&path))
            }
            None => None,
        };

        let updated = self
            .registration_store
            .record_proof_submission(
                registration.id,
                transaction_ref,
                proof_url.as_deref(),
                submission.notes.as_deref(),
            )
            .await?
            .ok_or_else(|| {
                // The row finalized between the read above and the write.
                AppError::conflict("Registration was finalized while submitting proof")
            })?;

        info!(
            registration_id = %updated.id,
            has_proof = proof_url.is_some(),
            has_txn_ref = transaction_ref.is_some(),
            "Payment evidence submitted"
        );

        Ok(updated)
    }

    /// List registrations awaiting review (admin only).
    pub async fn list_pending(&self, ctx: &RequestContext) -> AppResult<Vec<Registration>> {
        ctx.require_admin()?;
        self.registration_store.list_pending_verification().await
    }

    /// Approve a registration's payment (admin only).
    ///
    /// The confirmation email is dispatched only when this call actually
    /// performed the transition, so redundant approvals never renotify.
    pub async fn approve(
        &self,
        ctx: &RequestContext,
        registration_id: Uuid,
    ) -> AppResult<Registration> {
        ctx.require_admin()?;

        let registration = self
            .finalize(registration_id, PaymentStatus::Approved)
            .await?;

        let event = self.event_for(&registration).await?;

        info!(
            registration_id = %registration.id,
            admin_id = %ctx.user_id,
            "Registration payment approved"
        );

        self.dispatcher
            .dispatch_confirmation(EventConfirmation::for_registration(&registration, &event));

        Ok(registration)
    }

    /// Reject a registration's payment (admin only).
    ///
    /// Rejection is terminal; the user registers again with a fresh row
    /// if they want another attempt.
    pub async fn reject(
        &self,
        ctx: &RequestContext,
        registration_id: Uuid,
    ) -> AppResult<Registration> {
        ctx.require_admin()?;

        let registration = self
            .finalize(registration_id, PaymentStatus::Rejected)
            .await?;

        info!(
            registration_id = %registration.id,
            admin_id = %ctx.user_id,
            "Registration payment rejected"
        );

        Ok(registration)
    }

    /// Upload the default payment QR image for an event (admin only).
    pub async fn set_event_qr(
        &self,
        ctx: &RequestContext,
        event_id: Uuid,
        data: Bytes,
    ) -> AppResult<Event> {
        ctx.require_admin()?;

        let event = self
            .event_store
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| AppError::not_found("Event not found"))?;

        let extension = self.validate_image(&data)?;
        let path = paths::event_qr_path(event.id, extension);
        self.storage.write(&path, data).await?;

        self.event_store
            .set_payment_qr(event.id, &self.storage.public_url(&path))
            .await
    }

    /// Upload a registration-specific QR override (admin only).
    ///
    /// Shown to the payer only when the event has no default QR of its
    /// own.
    pub async fn set_registration_qr(
        &self,
        ctx: &RequestContext,
        registration_id: Uuid,
        data: Bytes,
    ) -> AppResult<Registration> {
        ctx.require_admin()?;

        let registration = self
            .registration_store
            .find_by_id(registration_id)
            .await?
            .ok_or_else(|| AppError::not_found("Registration not found"))?;

        let extension = self.validate_image(&data)?;
        let path = paths::registration_qr_path(registration.id, extension);
        self.storage.write(&path, data).await?;

        self.registration_store
            .set_qr_override(registration.id, &self.storage.public_url(&path))
            .await
    }

    /// Perform the conditional terminal write, mapping a no-op result
    /// back to the precise reason it failed.
    async fn finalize(
        &self,
        registration_id: Uuid,
        status: PaymentStatus,
    ) -> AppResult<Registration> {
        match self.registration_store.finalize(registration_id, status).await? {
            Some(registration) => Ok(registration),
            None => match self.registration_store.find_by_id(registration_id).await? {
                Some(existing) => Err(AppError::conflict(format!(
                    "Registration is already {}",
                    existing.payment_status
                ))),
                None => Err(AppError::not_found("Registration not found")),
            },
        }
    }

    async fn event_for(&self, registration: &Registration) -> AppResult<Event> {
        self.event_store
            .find_by_id(registration.event_id)
            .await?
            .ok_or_else(|| {
                AppError::integrity(format!(
                    "Registration {} references missing event {}",
                    registration.id, registration.event_id
                ))
            })
    }

    fn validate_image(&self, data: &Bytes) -> AppResult<&'static str> {
        if data.len() as u64 > self.max_upload_bytes {
            return Err(AppError::validation(format!(
                "Image exceeds the maximum upload size of {} bytes",
                self.max_upload_bytes
            )));
        }
        image_extension(data)
    }
}

/// Determine the file extension for an uploaded image.
///
/// Only PNG, JPEG, and WebP are accepted; anything else (including
/// files merely renamed to an image extension) is rejected from the
/// magic bytes.
fn image_extension(data: &[u8]) -> AppResult<&'static str> {
    if data.is_empty() {
        return Err(AppError::validation("Uploaded image is empty"));
    }
    match image::guess_format(data) {
        Ok(ImageFormat::Png) => Ok("png"),
        Ok(ImageFormat::Jpeg) => Ok("jpg"),
        Ok(ImageFormat::WebP) => Ok("webp"),
        Ok(other) => Err(AppError::validation(format!(
            "Unsupported image format: {other:?}. Use PNG, JPEG, or WebP"
        ))),
        Err(_) => Err(AppError::validation(
            "Uploaded file is not a recognizable image",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use lumen_core::error::ErrorKind;

    use crate::registration::RegistrationService;
    use crate::testing::{
        admin_context, drain_spawned_tasks, member_context, sample_attendee, sample_event,
        InMemoryStore, RecordingMailer, StubStorage,
    };

    fn verification(
        store: &Arc<InMemoryStore>,
        mailer: &Arc<RecordingMailer>,
    ) -> VerificationService {
        VerificationService::new(
            store.clone(),
            store.clone(),
            Arc::new(StubStorage),
            NotificationDispatcher::new(mailer.clone()),
            1024 * 1024,
        )
    }

    async fn registered(store: &Arc<InMemoryStore>) -> (RequestContext, Uuid) {
        let event = sample_event(10);
        let event_id = event.id;
        store.insert_event(event);

        let ctx = member_context();
        let registration = RegistrationService::new(store.clone(), store.clone())
            .create_registration(&ctx, event_id, sample_attendee())
            .await
            .unwrap();
        (ctx, registration.id)
    }

    #[tokio::test]
    async fn approval_notifies_exactly_once() {
        let store = Arc::new(InMemoryStore::default());
        let mailer = Arc::new(RecordingMailer::default());
        let svc = verification(&store, &mailer);
        let (_member, registration_id) = registered(&store).await;

        let admin = admin_context();
        svc.approve(&admin, registration_id).await.unwrap();

        // A redundant approval and a late rejection both hit a terminal
        // row: conflict, and no second email.
        let err = svc.approve(&admin, registration_id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        let err = svc.reject(&admin, registration_id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        drain_spawned_tasks().await;
        assert_eq!(mailer.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn manual_payment_path_runs_end_to_end() {
        let store = Arc::new(InMemoryStore::default());
        let mailer = Arc::new(RecordingMailer::default());
        let svc = verification(&store, &mailer);
        let (member, registration_id) = registered(&store).await;

        assert_eq!(
            store.registration(registration_id).payment_status,
            PaymentStatus::Pending
        );

        let submitted = svc
            .submit_proof(
                &member,
                registration_id,
                ProofSubmission {
                    transaction_ref: Some("TXN-2026-0042".to_string()),
                    ..ProofSubmission::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(submitted.payment_status, PaymentStatus::PendingVerification);

        let admin = admin_context();
        let pending = svc.list_pending(&admin).await.unwrap();
        assert_eq!(pending.len(), 1);

        let approved = svc.approve(&admin, registration_id).await.unwrap();
        assert_eq!(approved.payment_status, PaymentStatus::Approved);

        drain_spawned_tasks().await;
        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].subject.contains("Async Rust Workshop"));
        assert_eq!(sent[0].to_address, "alex@example.com");
    }

    #[tokio::test]
    async fn proof_submission_requires_some_evidence() {
        let store = Arc::new(InMemoryStore::default());
        let mailer = Arc::new(RecordingMailer::default());
        let svc = verification(&store, &mailer);
        let (member, registration_id) = registered(&store).await;

        let err = svc
            .submit_proof(&member, registration_id, ProofSubmission::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn png_magic_bytes_are_recognized() {
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];
        assert_eq!(image_extension(&png).unwrap(), "png");
    }

    #[test]
    fn jpeg_magic_bytes_are_recognized() {
        let jpeg = [0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0];
        assert_eq!(image_extension(&jpeg).unwrap(), "jpg");
    }

    #[test]
    fn renamed_text_file_is_rejected() {
        assert!(image_extension(b"definitely not an image").is_err());
    }

    #[test]
    fn empty_upload_is_rejected() {
        assert!(image_extension(&[]).is_err());
    }
}
