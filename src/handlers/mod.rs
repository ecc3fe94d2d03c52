// ---------------------------------------------------------------------------
// handlers/ — HTTP handlers and the shared API error type
// ---------------------------------------------------------------------------

// pub(crate) so utoipa __path_* types are reachable from the OpenApi derive in lib.rs.
pub(crate) mod system;

pub use system::{api_stats, index};
pub use system::{__path_api_stats, __path_index};

use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use uuid::Uuid;

use crate::system_monitor::CollectError;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Centralized API error type for all handlers.
/// Logs full details server-side, returns sanitized JSON to the client.
///
/// ```json
/// {
///   "error": {
///     "code": "COLLECTION_FAILED",
///     "message": "Failed to read system statistics",
///     "request_id": "uuid"
///   }
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Metrics collection failed: {0}")]
    Collection(#[from] CollectError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            ApiError::Collection(_) => "COLLECTION_FAILED",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Collection(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Never leaks paths or OS error text to the client.
    fn sanitized_message(&self) -> &'static str {
        match self {
            ApiError::Collection(_) => "Failed to read system statistics",
            ApiError::Internal(_) => "Internal server error",
        }
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let request_id = Uuid::new_v4().to_string();

        tracing::error!(
            request_id = %request_id,
            code = self.error_code(),
            "API error ({}): {}",
            status.as_u16(),
            self
        );

        let body = json!({
            "error": {
                "code": self.error_code(),
                "message": self.sanitized_message(),
                "request_id": request_id,
            }
        });
        (status, Json(body)).into_response()
    }
}
