//! REST client for the backend's JSON endpoints.
//!
//! Wraps user CRUD, facility CRUD and per-user alert settings using
//! [`reqwest`]. Also provides [`BackendClient::forward`] for the raw
//! pass-through rewrites.

use std::time::Duration;

use mimamori_core::hospital::Hospital;
use mimamori_core::pagination::{Pagination, UserListQuery};
use mimamori_core::settings::AlertSettings;
use mimamori_core::user::User;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::envelope::{parse_envelope, ApiEnvelope};
use crate::error::BackendError;

const NO_QUERY: [(&str, &str); 0] = [];

/// HTTP client for the backend service.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

/// One page of the user list.
#[derive(Debug, Clone)]
pub struct UserPage {
    pub users: Vec<User>,
    pub pagination: Pagination,
}

/// Raw backend answer relayed by the rewrite routes.
#[derive(Debug, Clone)]
pub struct Forwarded {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserIdBody<'a> {
    user_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HospitalIdBody<'a> {
    hospital_id: &'a str,
}

/// `updateSettings` payload: the user id next to the flattened thresholds.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateSettingsBody<'a> {
    user_id: &'a str,
    #[serde(flatten)]
    settings: &'a AlertSettings,
}

impl BackendClient {
    /// Create a client for the backend at `base_url`, e.g. `http://host:8080`.
    ///
    /// A trailing `/` is stripped so paths can be appended directly.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ---- users ----

    /// `GET /api/getUsers` with paging and filters.
    ///
    /// When the backend omits `pagination`, the whole list is treated as a
    /// single page.
    pub async fn list_users(&self, query: &UserListQuery) -> Result<UserPage, BackendError> {
        let env: ApiEnvelope<serde_json::Value> = self.get("/api/getUsers", query).await?;
        let (users, pagination) = env.require_users()?;
        let pagination = pagination.unwrap_or_else(|| Pagination::single(users.len()));
        Ok(UserPage { users, pagination })
    }

    /// `GET /api/getUser?userId=`.
    pub async fn get_user(&self, user_id: &str) -> Result<User, BackendError> {
        let env: ApiEnvelope<User> = self.get("/api/getUser", &[("userId", user_id)]).await?;
        env.require_data()
    }

    /// `POST /api/createUser`. Returns the backend's message, if any.
    pub async fn create_user(&self, user: &User) -> Result<Option<String>, BackendError> {
        self.post_message("/api/createUser", user).await
    }

    /// `POST /api/updateUser`.
    pub async fn update_user(&self, user: &User) -> Result<Option<String>, BackendError> {
        self.post_message("/api/updateUser", user).await
    }

    /// `POST /api/deleteUser`.
    pub async fn delete_user(&self, user_id: &str) -> Result<Option<String>, BackendError> {
        self.post_message("/api/deleteUser", &UserIdBody { user_id })
            .await
    }

    // ---- facilities ----

    /// `GET /api/getHospitals`.
    pub async fn list_hospitals(&self) -> Result<Vec<Hospital>, BackendError> {
        let env: ApiEnvelope<serde_json::Value> = self.get("/api/getHospitals", &NO_QUERY).await?;
        env.require_hospitals()
    }

    pub async fn create_hospital(
        &self,
        hospital: &Hospital,
    ) -> Result<Option<String>, BackendError> {
        self.post_message("/api/createHospital", hospital).await
    }

    pub async fn update_hospital(
        &self,
        hospital: &Hospital,
    ) -> Result<Option<String>, BackendError> {
        self.post_message("/api/updateHospital", hospital).await
    }

    pub async fn delete_hospital(&self, hospital_id: &str) -> Result<Option<String>, BackendError> {
        self.post_message("/api/deleteHospital", &HospitalIdBody { hospital_id })
            .await
    }

    // ---- alert settings ----

    /// `GET /api/getSettings?userId=`.
    ///
    /// `Ok(None)` means the user has no stored thresholds yet.
    pub async fn get_settings(&self, user_id: &str) -> Result<Option<AlertSettings>, BackendError> {
        let env: ApiEnvelope<AlertSettings> =
            self.get("/api/getSettings", &[("userId", user_id)]).await?;
        Ok(env.data)
    }

    /// `POST /api/updateSettings` with `{ userId, ...settings }`.
    pub async fn update_settings(
        &self,
        user_id: &str,
        settings: &AlertSettings,
    ) -> Result<Option<String>, BackendError> {
        self.post_message("/api/updateSettings", &UpdateSettingsBody { user_id, settings })
            .await
    }

    // ---- raw access ----

    /// Relay a request to the same path on the backend without
    /// interpreting either side.
    ///
    /// * `path_and_query` - e.g. `/api/getUsers?page=2`.
    pub async fn forward(
        &self,
        method: reqwest::Method,
        path_and_query: &str,
        content_type: Option<&str>,
        body: Vec<u8>,
    ) -> Result<Forwarded, BackendError> {
        let url = format!("{}{}", self.base_url, path_and_query);
        tracing::debug!(%method, %url, "Forwarding request to backend");

        let mut request = self.client.request(method, url);
        if let Some(ct) = content_type {
            request = request.header(reqwest::header::CONTENT_TYPE, ct);
        }
        if !body.is_empty() {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?.to_vec();

        Ok(Forwarded {
            status,
            content_type,
            body,
        })
    }

    /// Whether the backend answers HTTP at all, whatever the status.
    pub async fn ping(&self) -> bool {
        match self.client.get(self.base_url.as_str()).send().await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Backend ping failed");
                false
            }
        }
    }

    // ---- private helpers ----

    async fn get<T, Q>(&self, path: &str, query: &Q) -> Result<ApiEnvelope<T>, BackendError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        tracing::debug!(path, "GET backend");
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .send()
            .await?;
        Self::read_envelope(path, response).await
    }

    async fn post<T, B>(&self, path: &str, body: &B) -> Result<ApiEnvelope<T>, BackendError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        tracing::debug!(path, "POST backend");
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        Self::read_envelope(path, response).await
    }

    /// POST and keep only the envelope `message`.
    async fn post_message<B>(&self, path: &str, body: &B) -> Result<Option<String>, BackendError>
    where
        B: Serialize + ?Sized,
    {
        let env: ApiEnvelope<serde_json::Value> = self.post(path, body).await?;
        Ok(env.message)
    }

    async fn read_envelope<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> Result<ApiEnvelope<T>, BackendError> {
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        parse_envelope(status, &body).inspect_err(|e| match e {
            BackendError::Rejected { .. } | BackendError::Status { .. } => {
                tracing::warn!(path, error = %e, "Backend call failed");
            }
            _ => tracing::error!(path, error = %e, "Backend call failed"),
        })
    }
}
