//! Route definitions for facility pages, mounted at `/hospitals`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::hospitals;
use crate::state::AppState;

/// ```text
/// GET  /              -> list_hospitals
/// POST /              -> create_hospital
/// POST /{id}          -> update_hospital
/// GET  /{id}/edit     -> edit_hospital_form
/// GET  /{id}/delete   -> confirm_delete_hospital
/// POST /{id}/delete   -> delete_hospital
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(hospitals::list_hospitals).post(hospitals::create_hospital),
        )
        .route("/{id}", post(hospitals::update_hospital))
        .route("/{id}/edit", get(hospitals::edit_hospital_form))
        .route(
            "/{id}/delete",
            get(hospitals::confirm_delete_hospital).post(hospitals::delete_hospital),
        )
}
