//! Admin registration review handlers.

use axum::Json;
use axum::extract::{Multipart, Path, State};
use uuid::Uuid;

use lumen_core::error::AppError;
use lumen_entity::registration::Registration;

use crate::dto::response::ApiResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/admin/registrations/pending
pub async fn list_pending(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Registration>>>, AppError> {
    let registrations = state.verification_service.list_pending(&auth).await?;
    Ok(Json(ApiResponse::ok(registrations)))
}

/// GET /api/admin/events/{id}/registrations
pub async fn list_for_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(event_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Registration>>>, AppError> {
    let registrations = state
        .registration_service
        .list_event_registrations(&auth, event_id)
        .await?;
    Ok(Json(ApiResponse::ok(registrations)))
}

/// POST /api/admin/registrations/{id}/approve
pub async fn approve(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(registration_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Registration>>, AppError> {
    let registration = state
        .verification_service
        .approve(&auth, registration_id)
        .await?;
    Ok(Json(ApiResponse::ok(registration)))
}

/// POST /api/admin/registrations/{id}/reject
pub async fn reject(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(registration_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Registration>>, AppError> {
    let registration = state
        .verification_service
        .reject(&auth, registration_id)
        .await?;
    Ok(Json(ApiResponse::ok(registration)))
}

/// POST /api/admin/registrations/{id}/qr
///
/// Multipart form with a single `qr` image file: a per-registration
/// override shown only when the event has no default QR.
pub async fn upload_registration_qr(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(registration_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<Registration>>, AppError> {
    let data = super::read_image_field(multipart, "qr").await?;
    let registration = state
        .verification_service
        .set_registration_qr(&auth, registration_id, data)
        .await?;
    Ok(Json(ApiResponse::ok(registration)))
}
