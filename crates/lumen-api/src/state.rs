//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use lumen_auth::gate::IdentityGate;
use lumen_auth::jwt::JwtDecoder;
use lumen_core::config::AppConfig;
use lumen_service::account::AccountService;
use lumen_service::catalog::CatalogService;
use lumen_service::payment::PaymentService;
use lumen_service::registration::RegistrationService;
use lumen_service::verification::VerificationService;

/// Application state passed to every Axum handler via `State<AppState>`.
///
/// All fields are cheaply cloneable; services carry their own
/// repository handles over the shared pool.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// JWT access-token validator.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Identity & approval gate, consulted on every protected request.
    pub gate: Arc<IdentityGate>,
    /// Account lifecycle service.
    pub account_service: Arc<AccountService>,
    /// Event catalog service.
    pub catalog_service: Arc<CatalogService>,
    /// Registration ledger service.
    pub registration_service: Arc<RegistrationService>,
    /// Payment verification engine.
    pub verification_service: Arc<VerificationService>,
    /// Card-payment service.
    pub payment_service: Arc<PaymentService>,
}
