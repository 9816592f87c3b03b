//! Unified error handling for the clinic server.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::validation::FieldError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// One or more fields failed validation.
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors
        if matches!(
            self,
            Self::Database(RepositoryError::Database(_) | RepositoryError::DataCorruption(_))
                | Self::Internal(_)
        ) {
            tracing::error!(error = %self, "Request error");
        }

        let status = match &self {
            Self::Database(RepositoryError::NotFound) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(RepositoryError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Validation failures carry the field errors; don't expose internal
        // error details for anything else
        match self {
            Self::Validation(errors) => {
                (status, Json(serde_json::json!({ "errors": errors }))).into_response()
            }
            Self::Database(RepositoryError::NotFound) => {
                (status, Json(serde_json::json!({ "message": "Not found" }))).into_response()
            }
            Self::Database(RepositoryError::Conflict(message)) => {
                (status, Json(serde_json::json!({ "message": message }))).into_response()
            }
            Self::Database(_) | Self::Internal(_) => (
                status,
                Json(serde_json::json!({ "message": "Internal server error" })),
            )
                .into_response(),
            other => (
                status,
                Json(serde_json::json!({ "message": other.to_string() })),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("Owner with ID 123 not found".to_string());
        assert_eq!(err.to_string(), "Not found: Owner with ID 123 not found");

        let err = AppError::BadRequest("ID mismatch".to_string());
        assert_eq!(err.to_string(), "Bad request: ID mismatch");
    }

    #[test]
    fn test_app_error_status_codes() {
        // Test that errors map to correct HTTP status codes
        fn get_status(err: AppError) -> StatusCode {
            let response = err.into_response();
            response.status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Database(RepositoryError::NotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Database(RepositoryError::Conflict(
                "pet name already exists".to_string()
            ))),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Validation(Vec::new())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
