//! Page handlers for facility management.
//!
//! The backend exposes no single-facility lookup, so edit and delete pages
//! find the record in the full list.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Form;
use mimamori_core::error::CoreError;
use mimamori_core::hospital::{Hospital, HospitalInput};
use mimamori_core::validation::FieldErrors;

use crate::error::{AppError, PageResult};
use crate::flash::{redirect_with, Notice};
use crate::handlers::{checked_hospital_id, failure};
use crate::query::FlashParams;
use crate::state::AppState;
use crate::views::hospitals::{self as view, HospitalListView};
use crate::views::{invalid_form_toast, Toast};

async fn find_hospital(state: &AppState, hospital_id: &str) -> Result<Hospital, AppError> {
    state
        .backend
        .list_hospitals()
        .await?
        .into_iter()
        .find(|h| h.hospital_id == hospital_id)
        .ok_or_else(|| {
            CoreError::NotFound {
                entity: "Hospital",
                id: hospital_id.to_string(),
            }
            .into()
        })
}

/// List page with the registration form filled from `input`.
async fn render_list(
    state: &AppState,
    input: &HospitalInput,
    errors: &FieldErrors,
    toast: Option<Toast>,
    status: StatusCode,
) -> Response {
    let (hospitals, toast, status) = match state.backend.list_hospitals().await {
        Ok(hospitals) => (hospitals, toast, status),
        Err(e) => {
            let (load_status, load_toast) = failure(e);
            // A write failure already carries its own toast.
            match toast {
                Some(toast) => (Vec::new(), Some(toast), status),
                None => (Vec::new(), Some(load_toast), load_status),
            }
        }
    };

    let page = view::list_page(&HospitalListView {
        hospitals: &hospitals,
        input,
        errors,
        toast,
    });
    (status, page).into_response()
}

// ---------------------------------------------------------------------------
// List / create
// ---------------------------------------------------------------------------

/// GET /hospitals
pub async fn list_hospitals(
    State(state): State<AppState>,
    Query(flash): Query<FlashParams>,
) -> Response {
    render_list(
        &state,
        &HospitalInput::default(),
        &FieldErrors::new(),
        Toast::from_notice(flash.notice.as_deref()),
        StatusCode::OK,
    )
    .await
}

/// POST /hospitals
pub async fn create_hospital(
    State(state): State<AppState>,
    Form(input): Form<HospitalInput>,
) -> Response {
    let hospital = match input.validate("") {
        Ok(hospital) => hospital,
        Err(errors) => {
            return render_list(
                &state,
                &input,
                &errors,
                Some(invalid_form_toast()),
                StatusCode::UNPROCESSABLE_ENTITY,
            )
            .await;
        }
    };

    match state.backend.create_hospital(&hospital).await {
        Ok(_) => {
            tracing::info!(name = %hospital.name, "Hospital created");
            redirect_with("/hospitals", Notice::HospitalCreated).into_response()
        }
        Err(e) => {
            let (status, toast) = failure(e);
            render_list(&state, &input, &FieldErrors::new(), Some(toast), status).await
        }
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

/// GET /hospitals/{id}/edit
pub async fn edit_hospital_form(
    State(state): State<AppState>,
    Path(hospital_id): Path<String>,
) -> PageResult<Response> {
    checked_hospital_id(&hospital_id)?;
    let hospital = find_hospital(&state, &hospital_id).await?;

    Ok(view::edit_page(
        &hospital_id,
        &HospitalInput::from_hospital(&hospital),
        &FieldErrors::new(),
        None,
    )
    .into_response())
}

/// POST /hospitals/{id}
pub async fn update_hospital(
    State(state): State<AppState>,
    Path(hospital_id): Path<String>,
    Form(input): Form<HospitalInput>,
) -> PageResult<Response> {
    checked_hospital_id(&hospital_id)?;

    let hospital = match input.validate(&hospital_id) {
        Ok(hospital) => hospital,
        Err(errors) => {
            let page = view::edit_page(&hospital_id, &input, &errors, Some(&invalid_form_toast()));
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
    };

    match state.backend.update_hospital(&hospital).await {
        Ok(_) => {
            tracing::info!(hospital_id = %hospital_id, "Hospital updated");
            Ok(redirect_with("/hospitals", Notice::HospitalUpdated).into_response())
        }
        Err(e) => {
            let (status, toast) = failure(e);
            let page = view::edit_page(&hospital_id, &input, &FieldErrors::new(), Some(&toast));
            Ok((status, page).into_response())
        }
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

/// GET /hospitals/{id}/delete
pub async fn confirm_delete_hospital(
    State(state): State<AppState>,
    Path(hospital_id): Path<String>,
) -> PageResult<Response> {
    checked_hospital_id(&hospital_id)?;
    let hospital = find_hospital(&state, &hospital_id).await?;
    Ok(view::delete_page(&hospital, None).into_response())
}

/// POST /hospitals/{id}/delete
pub async fn delete_hospital(
    State(state): State<AppState>,
    Path(hospital_id): Path<String>,
) -> PageResult<Response> {
    checked_hospital_id(&hospital_id)?;

    match state.backend.delete_hospital(&hospital_id).await {
        Ok(_) => {
            tracing::info!(hospital_id = %hospital_id, "Hospital deleted");
            Ok(redirect_with("/hospitals", Notice::HospitalDeleted).into_response())
        }
        Err(e) => {
            let (status, toast) = failure(e);
            let hospital = find_hospital(&state, &hospital_id)
                .await
                .unwrap_or_else(|_| Hospital {
                    name: hospital_id.clone(),
                    hospital_id: hospital_id.clone(),
                    ..Default::default()
                });
            Ok((status, view::delete_page(&hospital, Some(&toast))).into_response())
        }
    }
}
