//! Database migration runner.

use std::time::Instant;

use sqlx::PgPool;
use tracing::info;

use lumen_core::error::{AppError, ErrorKind};

/// Apply all pending migrations from the workspace `migrations/` tree.
///
/// Idempotent: already-applied migrations are skipped by checksum, so
/// this runs unconditionally at startup.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    let started = Instant::now();

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to run migrations: {e}"),
                e,
            )
        })?;

    info!(
        elapsed_ms = %started.elapsed().as_millis(),
        "Database migrations up to date"
    );
    Ok(())
}
