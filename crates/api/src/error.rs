use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mongovault_core::error::CoreError;
use mongovault_core::tools::ToolError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `mongovault_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A dump/restore subprocess failure.
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The concurrent dump/restore admission limit is exhausted.
    #[error("Too many concurrent dump/restore operations")]
    Busy,

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
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
                    format!("{entity} with id '{id}' not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Subprocess failures ---
            AppError::Tool(tool) => match tool {
                ToolError::Failed { exit_code, stderr } => {
                    tracing::error!(?exit_code, stderr = %stderr, "Tool exited with failure");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "TOOL_FAILED",
                        format!("Completed with error: {stderr}"),
                    )
                }
                ToolError::Spawn(err) => {
                    tracing::error!(error = %err, "Failed to start tool");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        format!("failed to start tool: {err}"),
                    )
                }
                ToolError::Io(err) => {
                    tracing::error!(error = %err, "Tool I/O error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Busy => (
                StatusCode::SERVICE_UNAVAILABLE,
                "BUSY",
                "too many concurrent dump/restore operations, retry later".to_string(),
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
