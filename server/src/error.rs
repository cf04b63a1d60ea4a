//! Unified error handling for the server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use personas_dispatch::{DispatchError, Procedure};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Category reported for request bodies that do not match the endpoint's shape.
pub const BAD_REQUEST_CATEGORY: &str = "Solicitud inválida";

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{}: {}", .procedure.failure_category(), .source.detail())]
    Procedure {
        procedure: Procedure,
        source: DispatchError,
    },

    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl AppError {
    pub fn procedure(procedure: Procedure, source: DispatchError) -> Self {
        AppError::Procedure { procedure, source }
    }
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Fixed, human-readable error category
    pub error: String,
    /// Underlying error text
    pub details: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            AppError::Procedure { procedure, source } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                procedure.failure_category().to_string(),
                source.detail().to_string(),
            ),
            AppError::BadRequest(msg) => {
                tracing::warn!("Rejected request body: {}", msg);
                (StatusCode::BAD_REQUEST, BAD_REQUEST_CATEGORY.to_string(), msg)
            }
        };

        (status, Json(ErrorResponse { error, details })).into_response()
    }
}

/// Result type alias for handlers.
pub type Result<T> = std::result::Result<T, AppError>;
