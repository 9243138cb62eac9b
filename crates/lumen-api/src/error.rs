//! Maps domain `AppError` to HTTP responses.
//!
//! The `IntoResponse` impl lives in `lumen-core` alongside `AppError`
//! (the orphan rule forbids implementing it here); this module re-exports
//! the response body type and hosts the behavior tests.

pub use lumen_core::error::ApiErrorResponse;

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use lumen_core::error::AppError;

    #[test]
    fn client_errors_keep_their_message() {
        let response = AppError::validation("Capacity must not be negative").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn internal_errors_are_masked() {
        let response = AppError::database("connection refused to 10.0.0.5").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8_lossy(&body);
        assert!(!body.contains("10.0.0.5"));
        assert!(body.contains("An internal error occurred"));
    }

    #[tokio::test]
    async fn external_service_failures_carry_their_message() {
        let response = AppError::external_service("Card processor timed out").into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(String::from_utf8_lossy(&body).contains("Card processor timed out"));
    }

    #[test]
    fn integrity_errors_are_internal_but_logged() {
        let response = AppError::integrity("orphan registration").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
