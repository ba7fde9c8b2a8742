use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use storefront_core::error::CoreError;
use storefront_db::RepoError;

use crate::services::ServiceError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for request-shape errors and [`ServiceError`] for
/// everything the service layer reports. Implements [`IntoResponse`] to
/// produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `storefront_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure reported by a service.
    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

type Classified = (StatusCode, &'static str, String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),

            AppError::Service(ServiceError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Service(ServiceError::Repository { context, source }) => {
                classify_repo_error(context, source)
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn classify_core_error(err: &CoreError) -> Classified {
    let CoreError::Validation(msg) = err;
    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
}

/// Classify a repository error into an HTTP status, error code, and message.
///
/// - `NotFound` maps to 404, `Conflict` to 409, `Timeout` to 504.
/// - `NilEntity` and rejected sort properties map to 400.
/// - Transaction and driver failures map to 500 with a sanitized message;
///   the full chain is logged with the service context.
fn classify_repo_error(context: &str, err: &RepoError) -> Classified {
    match err {
        RepoError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string()),
        RepoError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        RepoError::NilEntity => (StatusCode::BAD_REQUEST, "BAD_REQUEST", err.to_string()),
        RepoError::Core(core) => classify_core_error(core),
        RepoError::Timeout(_) => {
            tracing::warn!(context, error = %err, "Repository timeout");
            (StatusCode::GATEWAY_TIMEOUT, "TIMEOUT", err.to_string())
        }
        RepoError::Transaction(source) | RepoError::Database(source) => {
            tracing::error!(context, error = %source, "Database error");
            internal()
        }
    }
}

fn internal() -> Classified {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
