//! Card-payment handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use bytes::Bytes;
use uuid::Uuid;

use lumen_core::error::AppError;
use lumen_service::payment::CardIntent;

use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Header carrying the processor's HMAC signature over the raw body.
const SIGNATURE_HEADER: &str = "x-webhook-signature";

/// POST /api/registrations/{id}/payment-intent
pub async fn create_payment_intent(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(registration_id): Path<Uuid>,
) -> Result<Json<ApiResponse<CardIntent>>, AppError> {
    let intent = state
        .payment_service
        .create_payment_intent(&auth, registration_id)
        .await?;
    Ok(Json(ApiResponse::ok(intent)))
}

/// POST /api/payments/webhook
///
/// Unauthenticated in the session sense; the HMAC signature over the
/// raw body is the sole authentication. The body is taken as raw bytes
/// so the signature check sees exactly what was sent.
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing webhook signature header"))?;

    state.payment_service.handle_webhook(&body, signature).await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new("Webhook processed"))))
}
