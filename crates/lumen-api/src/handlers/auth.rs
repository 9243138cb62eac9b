//! Auth handlers: signup, login, me.

use axum::Json;
use axum::extract::State;

use lumen_core::error::AppError;
use lumen_entity::user::User;
use lumen_service::account::SignupRequest;

use crate::dto::request::LoginRequest;
use crate::dto::response::{ApiResponse, LoginResponse, MessageResponse, ProfileResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/signup
///
/// New accounts start pending; signing up grants no access by itself.
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let user = state.account_service.signup(req).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let session = state.account_service.login(&req.email, &req.password).await?;

    Ok(Json(ApiResponse::ok(LoginResponse {
        access_token: session.token.access_token,
        expires_at: session.token.expires_at,
        user: session.user,
    })))
}

/// POST /api/auth/logout
///
/// Access tokens are stateless, so logout is an acknowledgement; the
/// client discards its token. Requires a valid token so that a stale
/// one still gets a 401 rather than a false success.
pub async fn logout(_auth: AuthUser) -> Json<ApiResponse<MessageResponse>> {
    Json(ApiResponse::ok(MessageResponse::new("Logged out")))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<ProfileResponse>>, AppError> {
    let user = state.account_service.me(&auth).await?;
    Ok(Json(ApiResponse::ok(ProfileResponse {
        user,
        access: auth.access,
    })))
}
