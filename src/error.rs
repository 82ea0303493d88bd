//! Error types for the HTTP layer
//!
//! Maps service failures onto status codes and JSON error bodies.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;
use crate::service::ServiceError;

// == Api Error Enum ==
/// Error returned by request handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Invalid input or duplicate name
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Unknown resource
    #[error("Not found: {0}")]
    NotFound(String),

    /// Store or cache failure, reported with the operation that failed
    #[error("{context}: {cause}")]
    Internal {
        context: &'static str,
        cause: anyhow::Error,
    },
}

impl ApiError {
    /// Converts a service failure, labelling server errors with `context`.
    pub fn from_service(context: &'static str, err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(msg) | ServiceError::Conflict(msg) => ApiError::BadRequest(msg),
            ServiceError::NotFound(msg) => ApiError::NotFound(msg),
            other => ApiError::Internal {
                context,
                cause: other.into(),
            },
        }
    }
}

/// Malformed or mistyped JSON bodies are client errors like any other.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg)),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorResponse::new(msg)),
            ApiError::Internal { context, cause } => {
                error!(error = %cause, "{context}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::with_details(context, cause.to_string()),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for handlers.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheError;
    use crate::store::RepositoryError;

    #[test]
    fn test_validation_and_conflict_are_bad_requests() {
        let err = ApiError::from_service("ctx", ServiceError::Validation("blank".into()));
        assert!(matches!(err, ApiError::BadRequest(ref m) if m == "blank"));

        let err = ApiError::from_service("ctx", ServiceError::Conflict("dup".into()));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_status() {
        let err = ApiError::from_service("ctx", ServiceError::NotFound("Restaurant not found".into()));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_store_and_cache_failures_are_internal() {
        let store = ServiceError::Store(RepositoryError::QueryFailed("Database error".into()));
        let err = ApiError::from_service("Failed to create restaurant", store);
        assert_eq!(
            err.to_string(),
            "Failed to create restaurant: Query failed: Database error"
        );
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);

        let cache = ServiceError::Cache(CacheError::ConnectionFailed("refused".into()));
        let err = ApiError::from_service("Failed to fetch restaurants", cache);
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_internal_error_body_carries_context_and_details() {
        let cache = ServiceError::Cache(CacheError::ConnectionFailed("refused".into()));
        let response = ApiError::from_service("Failed to add review", cache).into_response();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "error": "Failed to add review",
                "details": "Cache connection failed: refused"
            })
        );
    }

    #[tokio::test]
    async fn test_client_error_body_has_no_details() {
        let response = ApiError::BadRequest("Restaurant name cannot be blank".into()).into_response();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Restaurant name cannot be blank" }));
    }
}
