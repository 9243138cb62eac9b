//! Admin handlers. Authorization is enforced inside each service
//! operation, freshly against the record store.

pub mod events;
pub mod registrations;
pub mod users;

use axum::extract::Multipart;
use bytes::Bytes;

use lumen_core::error::AppError;

/// Pulls a single named image file out of a multipart body.
pub(crate) async fn read_image_field(
    mut multipart: Multipart,
    expected: &str,
) -> Result<Bytes, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() == Some(expected) {
            return field.bytes().await.map_err(|e| {
                AppError::validation(format!("Failed to read '{expected}' upload: {e}"))
            });
        }
    }
    Err(AppError::validation(format!(
        "Missing '{expected}' file field"
    )))
}
