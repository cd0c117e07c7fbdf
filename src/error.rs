//! Error Handling Module
//!
//! Domain errors with their HTTP status mapping. Validation failures and
//! missing records are expected outcomes turned directly into structured
//! responses; storage faults are logged server-side and surfaced as a
//! generic 500 without leaking internals.
//!
//! Wire shapes, matched by the client library:
//! - 404: `{"detail": "Loan not found"}`
//! - 422: `{"detail": [{"field": ..., "message": ...}, ...]}`
//! - 5xx: `{"detail": "..."}`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::types::FieldViolation;

/// API error type, one variant per outcome class.
#[derive(Debug, Error)]
pub enum ApiError {
    // ============ 422 Unprocessable Entity ============
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldViolation>),

    // ============ 404 Not Found ============
    #[error("{0} not found")]
    NotFound(&'static str),

    // ============ 500 Internal Server Error ============
    #[error("database error: {0}")]
    Database(String),

    #[error("internal server error")]
    Internal,
}

impl ApiError {
    /// The not-found outcome for the loan resource.
    pub fn loan_not_found() -> Self {
        ApiError::NotFound("Loan")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(violations) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(serde_json::json!({ "detail": violations })),
            )
                .into_response(),

            ApiError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "detail": format!("{resource} not found") })),
            )
                .into_response(),

            // Internals are logged, not returned to the caller.
            ApiError::Database(msg) => {
                tracing::error!(error = %msg, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "detail": "Database error occurred" })),
                )
                    .into_response()
            }
            ApiError::Internal => {
                tracing::error!("internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "detail": "An internal error occurred" })),
                )
                    .into_response()
            }
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Database(err.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        tracing::error!(error = ?err, "unhandled error");
        ApiError::Internal
    }
}
