//! Page handlers for user management.
//!
//! Reads go straight to the backend; writes validate the form first and
//! re-render it with the submitted values when either the validation or the
//! backend call fails. Successful writes redirect with a notice code.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use mimamori_core::hospital::Hospital;
use mimamori_core::pagination::Pagination;
use mimamori_core::user::UserInput;
use mimamori_core::validation::FieldErrors;

use crate::error::{AppError, PageResult};
use crate::flash::{redirect_with, Notice};
use crate::handlers::{checked_user_id, failure};
use crate::query::{FlashParams, UserListParams};
use crate::state::AppState;
use crate::views::users::{self as view, FormMode, UserFormView, UserListView};
use crate::views::{invalid_form_toast, Toast};

/// GET /
pub async fn index() -> Redirect {
    Redirect::to("/users")
}

/// Facility choices for a form. A failure only costs the dropdown.
async fn hospitals_or_empty(state: &AppState) -> Vec<Hospital> {
    state.backend.list_hospitals().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load hospitals for user form");
        Vec::new()
    })
}

async fn render_form(
    state: &AppState,
    mode: FormMode<'_>,
    input: &UserInput,
    errors: &FieldErrors,
    toast: Toast,
    status: StatusCode,
) -> Response {
    let hospitals = hospitals_or_empty(state).await;
    let page = view::form_page(&UserFormView {
        mode,
        input,
        errors,
        hospitals: &hospitals,
        toast: Some(toast),
    });
    (status, page).into_response()
}

// ---------------------------------------------------------------------------
// List / detail
// ---------------------------------------------------------------------------

/// GET /users
///
/// Search, facility filter and paging all come from the query string. A
/// backend failure still renders the page, empty, with an error toast.
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<UserListParams>,
) -> Response {
    let query = params.to_query(state.config.users_page_size);

    let (users, hospitals) = tokio::join!(
        state.backend.list_users(&query),
        state.backend.list_hospitals()
    );

    let hospitals = hospitals.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load hospitals for user list");
        Vec::new()
    });

    let (users, pagination, toast, status) = match users {
        Ok(page) => (
            page.users,
            page.pagination,
            Toast::from_notice(params.notice.as_deref()),
            StatusCode::OK,
        ),
        Err(e) => {
            let (status, toast) = failure(e);
            (Vec::new(), Pagination::single(0), Some(toast), status)
        }
    };

    let page = view::list_page(&UserListView {
        users: &users,
        pagination,
        hospitals: &hospitals,
        query: &query,
        toast,
    });
    (status, page).into_response()
}

/// GET /users/{id}
pub async fn show_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(flash): Query<FlashParams>,
) -> PageResult<Response> {
    checked_user_id(&user_id)?;
    let user = state.backend.get_user(&user_id).await?;
    let toast = Toast::from_notice(flash.notice.as_deref());
    Ok(view::detail_page(&user, toast.as_ref()).into_response())
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// GET /users/new
pub async fn new_user_form(State(state): State<AppState>) -> Response {
    let hospitals = hospitals_or_empty(&state).await;
    view::form_page(&UserFormView {
        mode: FormMode::New,
        input: &UserInput::default(),
        errors: &FieldErrors::new(),
        hospitals: &hospitals,
        toast: None,
    })
    .into_response()
}

/// POST /users
pub async fn create_user(State(state): State<AppState>, Form(input): Form<UserInput>) -> Response {
    let user = match input.validate() {
        Ok(user) => user,
        Err(errors) => {
            return render_form(
                &state,
                FormMode::New,
                &input,
                &errors,
                invalid_form_toast(),
                StatusCode::UNPROCESSABLE_ENTITY,
            )
            .await;
        }
    };

    match state.backend.create_user(&user).await {
        Ok(_) => {
            tracing::info!(user_id = %user.user_id, "User created");
            redirect_with(&format!("/users/{}", user.user_id), Notice::UserCreated).into_response()
        }
        Err(e) => {
            let (status, toast) = failure(e);
            render_form(&state, FormMode::New, &input, &FieldErrors::new(), toast, status).await
        }
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

/// GET /users/{id}/edit
pub async fn edit_user_form(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> PageResult<Response> {
    checked_user_id(&user_id)?;

    let (user, hospitals) = tokio::join!(
        state.backend.get_user(&user_id),
        hospitals_or_empty(&state)
    );
    let user = user?;

    Ok(view::form_page(&UserFormView {
        mode: FormMode::Edit { user_id: &user_id },
        input: &UserInput::from_user(&user),
        errors: &FieldErrors::new(),
        hospitals: &hospitals,
        toast: None,
    })
    .into_response())
}

/// POST /users/{id}
///
/// The id in the path wins over whatever the form carries.
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Form(mut input): Form<UserInput>,
) -> PageResult<Response> {
    checked_user_id(&user_id)?;
    input.user_id = Some(user_id.clone());
    let mode = FormMode::Edit { user_id: &user_id };

    let user = match input.validate_edit(&user_id) {
        Ok(user) => user,
        Err(errors) => {
            return Ok(render_form(
                &state,
                mode,
                &input,
                &errors,
                invalid_form_toast(),
                StatusCode::UNPROCESSABLE_ENTITY,
            )
            .await);
        }
    };

    match state.backend.update_user(&user).await {
        Ok(_) => {
            tracing::info!(user_id = %user_id, "User updated");
            Ok(redirect_with(&format!("/users/{user_id}"), Notice::UserUpdated).into_response())
        }
        Err(e) => {
            let (status, toast) = failure(e);
            Ok(render_form(&state, mode, &input, &FieldErrors::new(), toast, status).await)
        }
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

/// GET /users/{id}/delete
pub async fn confirm_delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> PageResult<Response> {
    checked_user_id(&user_id)?;

    let name = match state.backend.get_user(&user_id).await {
        Ok(user) => Some(user.name),
        Err(e) if e.is_not_found() => return Err(AppError::from(e).into()),
        Err(e) => {
            tracing::warn!(
                user_id = %user_id,
                error = %e,
                "Failed to load user for delete confirmation"
            );
            None
        }
    };

    Ok(view::delete_page(&user_id, name.as_deref(), None).into_response())
}

/// POST /users/{id}/delete
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> PageResult<Response> {
    checked_user_id(&user_id)?;

    match state.backend.delete_user(&user_id).await {
        Ok(_) => {
            tracing::info!(user_id = %user_id, "User deleted");
            Ok(redirect_with("/users", Notice::UserDeleted).into_response())
        }
        Err(e) => {
            let (status, toast) = failure(e);
            Ok((status, view::delete_page(&user_id, None, Some(&toast))).into_response())
        }
    }
}
