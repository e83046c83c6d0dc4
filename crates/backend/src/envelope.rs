//! The backend's response envelope.
//!
//! Every backend endpoint answers with
//! `{ "success": bool, "message"?: string, "data"?: T, "users"?: [...],
//! "hospitals"?: [...], "pagination"?: {...} }`. Which payload key is present
//! depends on the endpoint.

use mimamori_core::hospital::Hospital;
use mimamori_core::pagination::Pagination;
use mimamori_core::user::User;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::BackendError;

/// Longest slice of a raw error body kept for logs.
const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
    pub users: Option<Vec<User>>,
    pub hospitals: Option<Vec<Hospital>>,
    pub pagination: Option<Pagination>,
}

impl<T> ApiEnvelope<T> {
    /// The `data` payload, which the endpoint promised to include.
    pub fn require_data(self) -> Result<T, BackendError> {
        self.data
            .ok_or_else(|| BackendError::Malformed("response is missing `data`".into()))
    }

    pub fn require_users(self) -> Result<(Vec<User>, Option<Pagination>), BackendError> {
        let users = self
            .users
            .ok_or_else(|| BackendError::Malformed("response is missing `users`".into()))?;
        Ok((users, self.pagination))
    }

    pub fn require_hospitals(self) -> Result<Vec<Hospital>, BackendError> {
        self.hospitals
            .ok_or_else(|| BackendError::Malformed("response is missing `hospitals`".into()))
    }
}

/// Classify a raw backend response.
///
/// - non-2xx status → [`BackendError::Status`], keeping the envelope
///   `message` when the error body is one
/// - body that is not an envelope → [`BackendError::Malformed`]
/// - `success: false` → [`BackendError::Rejected`]
pub fn parse_envelope<T: DeserializeOwned>(
    status: u16,
    body: &[u8],
) -> Result<ApiEnvelope<T>, BackendError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_slice::<ApiEnvelope<serde_json::Value>>(body)
            .ok()
            .and_then(|env| env.message);
        return Err(BackendError::Status {
            status,
            message,
            body: truncate(body),
        });
    }

    let envelope: ApiEnvelope<T> =
        serde_json::from_slice(body).map_err(|e| BackendError::Malformed(e.to_string()))?;

    if !envelope.success {
        return Err(BackendError::Rejected {
            message: envelope.message.unwrap_or_default(),
        });
    }

    Ok(envelope)
}

fn truncate(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    match text.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.into_owned(),
    }
}
