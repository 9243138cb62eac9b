//! Admin account management handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use lumen_core::error::AppError;
use lumen_entity::user::{ApprovalStatus, User};

use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<User>>>, AppError> {
    let users = state.account_service.list_users(&auth).await?;
    Ok(Json(ApiResponse::ok(users)))
}

/// POST /api/admin/users/{id}/approve
pub async fn approve_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let user = state
        .account_service
        .set_approval(&auth, user_id, ApprovalStatus::Approved)
        .await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// POST /api/admin/users/{id}/reject
pub async fn reject_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let user = state
        .account_service
        .set_approval(&auth, user_id, ApprovalStatus::Rejected)
        .await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// POST /api/admin/users/{id}/admin
pub async fn grant_admin(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.account_service.grant_admin(&auth, user_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Admin membership granted",
    ))))
}

/// DELETE /api/admin/users/{id}/admin
pub async fn revoke_admin(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.account_service.revoke_admin(&auth, user_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Admin membership revoked",
    ))))
}
