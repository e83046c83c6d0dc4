//! Pass-through rewrites for the backend's JSON API.
//!
//! The browser-facing paths are identical to the backend's, so the request
//! is relayed as-is and the backend's status, content type and body come
//! back untouched. Only transport failures are answered locally, as a 502
//! JSON error.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};

use crate::error::AppResult;
use crate::state::AppState;

/// ANY /api/getUsers, /api/getSettings, /api/updateSettings
pub async fn forward(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Response> {
    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());

    let forwarded = state
        .backend
        .forward(method, path_and_query, content_type, body.to_vec())
        .await?;

    let status = StatusCode::from_u16(forwarded.status).unwrap_or(StatusCode::BAD_GATEWAY);
    let mut response = (status, forwarded.body).into_response();
    match forwarded
        .content_type
        .as_deref()
        .and_then(|ct| HeaderValue::from_str(ct).ok())
    {
        Some(ct) => {
            response.headers_mut().insert(CONTENT_TYPE, ct);
        }
        None => {
            response.headers_mut().remove(CONTENT_TYPE);
        }
    }
    Ok(response)
}
