pub mod health;
pub mod hospitals;
pub mod proxy;
pub mod users;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the page and rewrite route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                                  redirect to /users
///
/// /users                             list, create
/// /users/new                         registration form
/// /users/{id}                        detail, update
/// /users/{id}/edit                   edit form
/// /users/{id}/delete                 confirm, delete
/// /users/{id}/settings               alert settings form, save
///
/// /hospitals                         list, create
/// /hospitals/{id}                    update
/// /hospitals/{id}/edit               edit form
/// /hospitals/{id}/delete             confirm, delete
///
/// /api/getUsers                      forwarded to the backend
/// /api/getSettings                   forwarded to the backend
/// /api/updateSettings                forwarded to the backend
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::users::index))
        .nest("/users", users::router())
        .nest("/hospitals", hospitals::router())
        .merge(proxy::router())
}
