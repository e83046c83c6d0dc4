use std::sync::Arc;

use mimamori_backend::BackendClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Client for the backend that owns all persistence.
    pub backend: Arc<BackendClient>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
