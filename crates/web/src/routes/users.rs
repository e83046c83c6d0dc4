//! Route definitions for user pages, mounted at `/users`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{settings, users};
use crate::state::AppState;

/// ```text
/// GET  /                -> list_users
/// POST /                -> create_user
/// GET  /new             -> new_user_form
/// GET  /{id}            -> show_user
/// POST /{id}            -> update_user
/// GET  /{id}/edit       -> edit_user_form
/// GET  /{id}/delete     -> confirm_delete_user
/// POST /{id}/delete     -> delete_user
/// GET  /{id}/settings   -> show_settings
/// POST /{id}/settings   -> save_settings
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route("/new", get(users::new_user_form))
        .route("/{id}", get(users::show_user).post(users::update_user))
        .route("/{id}/edit", get(users::edit_user_form))
        .route(
            "/{id}/delete",
            get(users::confirm_delete_user).post(users::delete_user),
        )
        .route(
            "/{id}/settings",
            get(settings::show_settings).post(settings::save_settings),
        )
}
