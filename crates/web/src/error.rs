use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mimamori_backend::BackendError;
use mimamori_core::error::CoreError;
use mimamori_core::validation::FieldErrors;
use serde_json::json;

use crate::views;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors, [`BackendError`] for failed backend
/// calls, and adds HTTP-specific variants. Implements [`IntoResponse`] to
/// produce consistent JSON error responses; pages wrap it in [`PageError`].
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `mimamori_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failed call to the backend.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::Core(errors.into())
    }
}

const MSG_INTERNAL: &str = "An internal error occurred";
const MSG_UNAVAILABLE: &str = "サーバーに接続できませんでした。時間をおいて再度お試しください。";
const MSG_NOT_FOUND: &str = "対象のデータが見つかりませんでした。";
const MSG_BACKEND_ERROR: &str = "サーバーでエラーが発生しました。";
const MSG_REJECTED: &str = "リクエストが受け付けられませんでした。";
const MSG_MALFORMED: &str = "サーバーから予期しない応答がありました。";

impl AppError {
    /// HTTP status, machine-readable code and user-facing message.
    ///
    /// Backend-supplied messages are preferred over generic ones; internal
    /// details are never exposed.
    pub fn classify(&self) -> (StatusCode, &'static str, String) {
        match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", MSG_NOT_FOUND.to_string())
                }
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        MSG_INTERNAL.to_string(),
                    )
                }
            },

            // --- Backend errors ---
            AppError::Backend(err) => classify_backend_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        }
    }

    /// Status and toast text for an error shown on a page.
    pub fn page_parts(&self) -> (StatusCode, String) {
        let (status, _, message) = self.classify();
        match self {
            AppError::Core(CoreError::Internal(_)) => {
                (status, MSG_BACKEND_ERROR.to_string())
            }
            _ => (status, message),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.classify();

        let body = json!({
            "success": false,
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a backend error into an HTTP status, error code, and message.
///
/// - Transport failures map to 502 `BACKEND_UNAVAILABLE`.
/// - Backend 404 maps to 404; any other non-2xx to 502.
/// - `success: false` maps to 422 with the backend's own message.
/// - Unexpected body shapes map to 502 `MALFORMED_RESPONSE`.
fn classify_backend_error(err: &BackendError) -> (StatusCode, &'static str, String) {
    let message = |fallback: &str| {
        err.backend_message()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string())
    };

    match err {
        BackendError::Request(e) => {
            tracing::error!(error = %e, "Backend unreachable");
            (
                StatusCode::BAD_GATEWAY,
                "BACKEND_UNAVAILABLE",
                MSG_UNAVAILABLE.to_string(),
            )
        }
        BackendError::Status { status: 404, .. } => {
            (StatusCode::NOT_FOUND, "NOT_FOUND", message(MSG_NOT_FOUND))
        }
        BackendError::Status { status, body, .. } => {
            tracing::error!(status, body = %body, "Backend error status");
            (
                StatusCode::BAD_GATEWAY,
                "BACKEND_ERROR",
                message(MSG_BACKEND_ERROR),
            )
        }
        BackendError::Rejected { .. } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "BACKEND_REJECTED",
            message(MSG_REJECTED),
        ),
        BackendError::Malformed(detail) => {
            tracing::error!(detail = %detail, "Malformed backend response");
            (
                StatusCode::BAD_GATEWAY,
                "MALFORMED_RESPONSE",
                MSG_MALFORMED.to_string(),
            )
        }
    }
}

/// An [`AppError`] raised while rendering a page.
///
/// Produces the same status as the JSON form, but as an HTML error page with
/// the message in a toast and a link back to the user list.
#[derive(Debug)]
pub struct PageError(pub AppError);

pub type PageResult<T> = Result<T, PageError>;

impl<E> From<E> for PageError
where
    E: Into<AppError>,
{
    fn from(err: E) -> Self {
        PageError(err.into())
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, message) = self.0.page_parts();
        (status, views::error_page(status, &message)).into_response()
    }
}
