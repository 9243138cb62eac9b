//! Admin event management handlers.

use axum::Json;
use axum::extract::{Multipart, Path, State};
use uuid::Uuid;

use lumen_core::error::AppError;
use lumen_entity::event::model::{CreateEvent, UpdateEvent};
use lumen_entity::event::Event;

use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/admin/events
pub async fn create_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateEvent>,
) -> Result<Json<ApiResponse<Event>>, AppError> {
    let event = state.catalog_service.create_event(&auth, req).await?;
    Ok(Json(ApiResponse::ok(event)))
}

/// PUT /api/admin/events/{id}
pub async fn update_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(event_id): Path<Uuid>,
    Json(req): Json<UpdateEvent>,
) -> Result<Json<ApiResponse<Event>>, AppError> {
    let event = state
        .catalog_service
        .update_event(&auth, event_id, req)
        .await?;
    Ok(Json(ApiResponse::ok(event)))
}

/// DELETE /api/admin/events/{id}
pub async fn delete_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(event_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.catalog_service.delete_event(&auth, event_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Event deleted"))))
}

/// POST /api/admin/events/{id}/qr
///
/// Multipart form with a single `qr` image file. This becomes the
/// event's default payment QR, which takes precedence over any
/// per-registration override.
pub async fn upload_event_qr(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(event_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<Event>>, AppError> {
    let data = super::read_image_field(multipart, "qr").await?;
    let event = state
        .verification_service
        .set_event_qr(&auth, event_id, data)
        .await?;
    Ok(Json(ApiResponse::ok(event)))
}
