use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use magirpc_core::CoreError;

// ==============================================================================
// Error Type
// ==============================================================================

#[derive(Debug)]
pub(crate) enum AppError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    Conflict(String),
    BadGateway(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg),
            Self::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(_) => Self::BadRequest(err.to_string()),
            CoreError::NotFound(_) => Self::NotFound(err.to_string()),
            CoreError::Conflict(_) => Self::Conflict(err.to_string()),
            CoreError::Upstream { operation, .. } => {
                tracing::warn!(%operation, error = %err, "upstream failure");
                Self::BadGateway(err.to_string())
            }
            CoreError::Config(_) => Self::Internal(err.to_string()),
        }
    }
}
