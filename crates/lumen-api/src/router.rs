//! Route definitions for the Lumen HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. The
//! router receives `AppState` and threads it through every handler via
//! Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes as usize;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(event_routes())
        .merge(registration_routes())
        .merge(payment_routes())
        .merge(admin_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: signup, login, me.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
}

/// Catalog endpoints: listing is public, detail is gated.
fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(handlers::events::list_events))
        .route("/events/{id}", get(handlers::events::get_event))
}

/// Registration ledger endpoints.
fn registration_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/events/{id}/register",
            post(handlers::registrations::register),
        )
        .route(
            "/events/{id}/registration",
            get(handlers::registrations::registration_status),
        )
        .route(
            "/registrations",
            get(handlers::registrations::list_my_registrations),
        )
        .route(
            "/registrations/{id}/proof",
            post(handlers::registrations::submit_proof),
        )
}

/// Card-payment endpoints. The webhook authenticates by signature.
fn payment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/registrations/{id}/payment-intent",
            post(handlers::payments::create_payment_intent),
        )
        .route("/payments/webhook", post(handlers::payments::webhook))
}

/// Admin endpoints. Every service operation re-checks admin membership.
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/events", post(handlers::admin::events::create_event))
        .route(
            "/admin/events/{id}",
            put(handlers::admin::events::update_event),
        )
        .route(
            "/admin/events/{id}",
            delete(handlers::admin::events::delete_event),
        )
        .route(
            "/admin/events/{id}/qr",
            post(handlers::admin::events::upload_event_qr),
        )
        .route(
            "/admin/events/{id}/registrations",
            get(handlers::admin::registrations::list_for_event),
        )
        .route(
            "/admin/registrations/pending",
            get(handlers::admin::registrations::list_pending),
        )
        .route(
            "/admin/registrations/{id}/approve",
            post(handlers::admin::registrations::approve),
        )
        .route(
            "/admin/registrations/{id}/reject",
            post(handlers::admin::registrations::reject),
        )
        .route(
            "/admin/registrations/{id}/qr",
            post(handlers::admin::registrations::upload_registration_qr),
        )
        .route("/admin/users", get(handlers::admin::users::list_users))
        .route(
            "/admin/users/{id}/approve",
            post(handlers::admin::users::approve_user),
        )
        .route(
            "/admin/users/{id}/reject",
            post(handlers::admin::users::reject_user),
        )
        .route(
            "/admin/users/{id}/admin",
            post(handlers::admin::users::grant_admin),
        )
        .route(
            "/admin/users/{id}/admin",
            delete(handlers::admin::users::revoke_admin),
        )
}

/// Health endpoint.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
