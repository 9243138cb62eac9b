//! Event catalog handlers.

use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use lumen_core::error::AppError;
use lumen_entity::event::EventFilter;
use lumen_entity::registration::PaymentStatus;
use lumen_service::catalog::EventView;

use crate::dto::response::ApiResponse;
use crate::extractors::{AuthUser, MaybeAuthUser};
use crate::state::AppState;

/// GET /api/events
///
/// Open to everyone, including visitors. Each event is composed into
/// the caller's gated view, so meeting links never leak through the
/// listing.
pub async fn list_events(
    State(state): State<AppState>,
    maybe_auth: MaybeAuthUser,
    Query(filter): Query<EventFilter>,
) -> Result<Json<ApiResponse<Vec<EventView>>>, AppError> {
    let events = state.catalog_service.list_events(&filter).await?;

    // One ledger read gives the caller's status for every event.
    let my_statuses: HashMap<Uuid, _> = match &maybe_auth.0 {
        Some(ctx) => state
            .registration_service
            .list_my_registrations(ctx)
            .await?
            .into_iter()
            .filter(|r| r.payment_status != PaymentStatus::Rejected)
            .map(|r| (r.event_id, r.payment_status))
            .collect(),
        None => HashMap::new(),
    };

    let access = maybe_auth.access();
    let views = events
        .into_iter()
        .map(|event| {
            let my_status = my_statuses.get(&event.id).copied();
            EventView::compose(event, access, my_status)
        })
        .collect();

    Ok(Json(ApiResponse::ok(views)))
}

/// GET /api/events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(event_id): Path<Uuid>,
) -> Result<Json<ApiResponse<EventView>>, AppError> {
    let view = state.catalog_service.get_event(&auth, event_id).await?;
    Ok(Json(ApiResponse::ok(view)))
}
