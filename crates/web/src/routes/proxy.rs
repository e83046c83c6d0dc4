//! Rewrites that relay a few backend endpoints under the same path.

use axum::routing::any;
use axum::Router;

use crate::handlers::proxy;
use crate::state::AppState;

/// Backend paths served by [`proxy::forward`].
pub const FORWARDED_PATHS: [&str; 3] = ["/api/getUsers", "/api/getSettings", "/api/updateSettings"];

/// ```text
/// ANY /api/getUsers         -> forward
/// ANY /api/getSettings      -> forward
/// ANY /api/updateSettings   -> forward
/// ```
pub fn router() -> Router<AppState> {
    FORWARDED_PATHS
        .into_iter()
        .fold(Router::new(), |router, path| {
            router.route(path, any(proxy::forward))
        })
}
