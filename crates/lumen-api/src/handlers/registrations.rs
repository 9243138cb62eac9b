//! Registration ledger handlers.

use axum::Json;
use axum::extract::{Multipart, Path, State};
use uuid::Uuid;

use lumen_core::error::AppError;
use lumen_entity::registration::{AttendeeInfo, PaymentStatus, Registration};
use lumen_service::verification::ProofSubmission;

use crate::dto::request::RegisterRequest;
use crate::dto::response::ApiResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/events/{id}/register
pub async fn register(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(event_id): Path<Uuid>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<Registration>>, AppError> {
    let registration = state
        .registration_service
        .create_registration(
            &auth,
            event_id,
            AttendeeInfo {
                name: req.attendee_name,
                email: req.attendee_email,
                phone: req.attendee_phone,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(registration)))
}

/// GET /api/events/{id}/registration
pub async fn registration_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(event_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Option<PaymentStatus>>>, AppError> {
    let status = state
        .registration_service
        .registration_status(&auth, event_id)
        .await?;
    Ok(Json(ApiResponse::ok(status)))
}

/// GET /api/registrations
pub async fn list_my_registrations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Registration>>>, AppError> {
    let registrations = state
        .registration_service
        .list_my_registrations(&auth)
        .await?;
    Ok(Json(ApiResponse::ok(registrations)))
}

/// POST /api/registrations/{id}/proof
///
/// Multipart form: optional `transaction_ref` and `notes` text fields,
/// optional `proof` image file. At least one piece of evidence is
/// required; the service enforces that.
pub async fn submit_proof(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(registration_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<Registration>>, AppError> {
    let mut submission = ProofSubmission::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "transaction_ref" => {
                submission.transaction_ref = Some(read_text(field).await?);
            }
            "notes" => {
                submission.notes = Some(read_text(field).await?);
            }
            "proof" => {
                let data = field.bytes().await.map_err(|e| {
                    AppError::validation(format!("Failed to read proof upload: {e}"))
                })?;
                submission.proof_image = Some(data);
            }
            other => {
                return Err(AppError::validation(format!(
                    "Unexpected form field: '{other}'"
                )));
            }
        }
    }

    let registration = state
        .verification_service
        .submit_proof(&auth, registration_id, submission)
        .await?;

    Ok(Json(ApiResponse::ok(registration)))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::validation(format!("Failed to read form field: {e}")))
}
