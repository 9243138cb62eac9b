//! Authentication extractors.
//!
//! `AuthUser` validates the bearer token and then runs the identity &
//! approval gate against the record store, so every protected request
//! carries a freshly resolved access level. Nothing privilege-bearing
//! is trusted from the token itself.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use lumen_auth::gate::Access;
use lumen_core::error::AppError;
use lumen_service::context::RequestContext;

use crate::state::AppState;

/// Extracted authenticated request context.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Like [`AuthUser`] but tolerates a missing Authorization header.
///
/// Used on routes that serve both visitors and members, such as the
/// catalog listing. An invalid token is still rejected outright.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<RequestContext>);

impl MaybeAuthUser {
    /// The caller's access level, `Unauthenticated` for visitors.
    pub fn access(&self) -> Access {
        self.0
            .as_ref()
            .map(|ctx| ctx.access)
            .unwrap_or(Access::Unauthenticated)
    }
}

async fn resolve_context(parts: &Parts, state: &AppState) -> Result<RequestContext, AppError> {
    let auth_header = parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))?;

    let claims = state.jwt_decoder.decode(token)?;
    let decision = state.gate.resolve(claims.user_id()).await?;

    Ok(RequestContext::new(
        claims.user_id(),
        claims.email,
        decision.access,
    ))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(AuthUser(resolve_context(parts, state).await?))
    }
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if parts.headers.get("authorization").is_none() {
            return Ok(MaybeAuthUser(None));
        }
        Ok(MaybeAuthUser(Some(resolve_context(parts, state).await?)))
    }
}
