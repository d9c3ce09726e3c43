use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracker_db::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Logical outcomes of the issue routes (missing fields, unknown ids) are
/// ordinary 200 replies and never pass through here. This type covers
/// malformed requests and storage faults that cannot be folded into a reply.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A failure reported by the issue store.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Store(err) => {
                tracing::error!(error = %err, "Storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
