use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use foodshare_core::error::CoreError;
use foodshare_db::reports::ReportFailure;
use foodshare_db::DataError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`DataError`] for database
/// failures, and adds HTTP-specific variants. Every variant becomes a JSON
/// error body; none of them takes the process down.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `foodshare_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database failure from `foodshare_db`.
    #[error(transparent)]
    Data(#[from] DataError),

    /// A catalog report that failed to run. The body carries its SQL.
    #[error(transparent)]
    Report(#[from] ReportFailure),

    /// A route parameter named something that does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Data(err) => classify_data_error(err),

            // --- Report failures ---
            AppError::Report(failure) => {
                let (status, code, message) = classify_data_error(&failure.error);
                let body = json!({
                    "error": format!("Report '{}' failed: {message}", failure.label),
                    "code": code,
                    "report": failure.slug,
                    "query": failure.query,
                });
                return (status, axum::Json(body)).into_response();
            }

            // --- HTTP-specific errors ---
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a [`DataError`] into an HTTP status, error code, and message.
///
/// - `NotFound` maps to 404.
/// - `Connection` maps to 503 so clients can tell an outage from a bug.
/// - `Statement` maps to 500 and keeps the driver's detail.
fn classify_data_error(err: &DataError) -> (StatusCode, &'static str, String) {
    match err {
        DataError::NotFound => (
            StatusCode::NOT_FOUND,
            err.code(),
            "Resource not found".to_string(),
        ),
        DataError::Connection(msg) => {
            tracing::error!(error = %msg, "Database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                err.code(),
                format!("Database unavailable: {msg}"),
            )
        }
        DataError::Statement(msg) => {
            tracing::error!(error = %msg, "Statement failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                err.code(),
                format!("Statement failed: {msg}"),
            )
        }
    }
}
