//! Application builder, wires repositories, services, and the router
//! into a running Axum server.

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;
use tower_http::services::ServeDir;
use tracing::{info, warn};

use lumen_auth::gate::IdentityGate;
use lumen_auth::jwt::{JwtDecoder, JwtEncoder};
use lumen_auth::password::{PasswordHasher, PasswordValidator};
use lumen_core::config::AppConfig;
use lumen_core::error::AppError;
use lumen_core::traits::mailer::Mailer;
use lumen_core::traits::processor::PaymentProcessor;
use lumen_core::traits::storage::StorageProvider;
use lumen_database::repositories::admin::AdminRepository;
use lumen_database::repositories::event::EventRepository;
use lumen_database::repositories::payment::PaymentRepository;
use lumen_database::repositories::registration::RegistrationRepository;
use lumen_database::repositories::user::UserRepository;
use lumen_database::store::{EventStore, RegistrationStore};
use lumen_service::account::AccountService;
use lumen_service::catalog::CatalogService;
use lumen_service::notification::{NotificationDispatcher, SmtpMailer};
use lumen_service::payment::{HttpPaymentProcessor, PaymentService};
use lumen_service::registration::RegistrationService;
use lumen_service::verification::VerificationService;
use lumen_storage::LocalStorageProvider;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the application state from configuration and a live pool.
pub async fn build_state(config: AppConfig, db_pool: PgPool) -> Result<AppState, AppError> {
    let user_repo = UserRepository::new(db_pool.clone());
    let admin_repo = AdminRepository::new(db_pool.clone());
    let event_repo = EventRepository::new(db_pool.clone());
    let registration_repo = RegistrationRepository::new(db_pool.clone());
    let payment_repo = PaymentRepository::new(db_pool.clone());

    let hasher = PasswordHasher::new();
    let password_validator = PasswordValidator::new(&config.auth);
    let jwt_encoder = JwtEncoder::new(&config.auth);
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

    let gate = Arc::new(IdentityGate::new(
        Arc::new(user_repo.clone()),
        Arc::new(admin_repo.clone()),
        config.gate.clone(),
    ));

    let storage: Arc<dyn StorageProvider> =
        Arc::new(LocalStorageProvider::new(&config.storage).await?);
    let mailer: Arc<dyn Mailer> = Arc::new(SmtpMailer::new(&config.email)?);
    let processor: Arc<dyn PaymentProcessor> =
        Arc::new(HttpPaymentProcessor::new(&config.payment)?);

    if !config.email.enabled {
        warn!("Email delivery is disabled; confirmations will be logged only");
    }

    let dispatcher = NotificationDispatcher::new(mailer);

    let account_service = Arc::new(AccountService::new(
        user_repo.clone(),
        admin_repo,
        hasher,
        password_validator,
        jwt_encoder,
    ));
    let catalog_service = Arc::new(CatalogService::new(
        event_repo.clone(),
        registration_repo.clone(),
    ));
    let registration_store: Arc<dyn RegistrationStore> = Arc::new(registration_repo.clone());
    let event_store: Arc<dyn EventStore> = Arc::new(event_repo.clone());

    let registration_service = Arc::new(RegistrationService::new(
        registration_store.clone(),
        event_store.clone(),
    ));
    let verification_service = Arc::new(VerificationService::new(
        registration_store,
        event_store,
        storage,
        dispatcher.clone(),
        config.storage.max_upload_bytes,
    ));
    let payment_service = Arc::new(PaymentService::new(
        registration_repo,
        event_repo,
        payment_repo,
        processor,
        dispatcher,
        config.payment.webhook_secret.clone(),
    ));

    Ok(AppState {
        config: Arc::new(config),
        db_pool,
        jwt_decoder,
        gate,
        account_service,
        catalog_service,
        registration_service,
        verification_service,
        payment_service,
    })
}

/// Builds the complete Axum application: API routes plus the static
/// file tree holding uploaded proofs and QR images.
pub fn build_app(state: AppState) -> Router {
    let files = ServeDir::new(&state.config.storage.root_path);
    let public_base = state.config.storage.public_base_url.clone();

    build_router(state).nest_service(&public_base, files)
}

/// Runs the Lumen server with the given configuration and pool.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = build_state(config, db_pool).await?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("Lumen server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to install Ctrl+C handler");
    }
    info!("Shutdown signal received");
}
