//! Page handlers for per-user alert thresholds.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Form;
use mimamori_core::settings::{AlertSettings, AlertSettingsInput};
use mimamori_core::validation::FieldErrors;

use crate::error::{AppError, PageResult};
use crate::flash::{redirect_with, Notice};
use crate::handlers::{checked_user_id, failure};
use crate::query::FlashParams;
use crate::state::AppState;
use crate::views::settings::{settings_page, SettingsView};
use crate::views::{invalid_form_toast, Toast};

const MSG_DEFAULTS: &str = "アラート設定が未登録のため、初期値を表示しています";

/// GET /users/{id}/settings
///
/// Users without stored thresholds get the defaults prefilled and an info
/// toast. An unknown user is a 404 page.
pub async fn show_settings(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(flash): Query<FlashParams>,
) -> PageResult<Response> {
    checked_user_id(&user_id)?;

    let (user, settings) = tokio::join!(
        state.backend.get_user(&user_id),
        state.backend.get_settings(&user_id)
    );

    let user_name = match user {
        Ok(user) => Some(user.name),
        Err(e) if e.is_not_found() => return Err(AppError::from(e).into()),
        Err(e) => {
            tracing::warn!(user_id = %user_id, error = %e, "Failed to load user for settings page");
            None
        }
    };

    let (settings, toast) = match settings? {
        Some(settings) => (settings, Toast::from_notice(flash.notice.as_deref())),
        None => (AlertSettings::default(), Some(Toast::info(MSG_DEFAULTS))),
    };

    Ok(settings_page(&SettingsView {
        user_id: &user_id,
        user_name: user_name.as_deref(),
        input: &AlertSettingsInput::from_settings(&settings),
        errors: &FieldErrors::new(),
        toast,
    })
    .into_response())
}

/// Display name for the page title. The page still works with only the id.
async fn user_name(state: &AppState, user_id: &str) -> Option<String> {
    match state.backend.get_user(user_id).await {
        Ok(user) => Some(user.name),
        Err(e) => {
            tracing::warn!(user_id = %user_id, error = %e, "Failed to load user name");
            None
        }
    }
}

async fn rerender(
    state: &AppState,
    user_id: &str,
    input: &AlertSettingsInput,
    errors: &FieldErrors,
    toast: Toast,
    status: StatusCode,
) -> Response {
    let user_name = user_name(state, user_id).await;
    let page = settings_page(&SettingsView {
        user_id,
        user_name: user_name.as_deref(),
        input,
        errors,
        toast: Some(toast),
    });
    (status, page).into_response()
}

/// POST /users/{id}/settings
pub async fn save_settings(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Form(input): Form<AlertSettingsInput>,
) -> PageResult<Response> {
    checked_user_id(&user_id)?;

    let settings = match input.validate() {
        Ok(settings) => settings,
        Err(errors) => {
            let toast = invalid_form_toast();
            let status = StatusCode::UNPROCESSABLE_ENTITY;
            return Ok(rerender(&state, &user_id, &input, &errors, toast, status).await);
        }
    };

    match state.backend.update_settings(&user_id, &settings).await {
        Ok(_) => {
            tracing::info!(user_id = %user_id, "Alert settings saved");
            let path = format!("/users/{user_id}/settings");
            Ok(redirect_with(&path, Notice::SettingsSaved).into_response())
        }
        Err(e) => {
            let (status, toast) = failure(e);
            let errors = FieldErrors::new();
            Ok(rerender(&state, &user_id, &input, &errors, toast, status).await)
        }
    }
}
