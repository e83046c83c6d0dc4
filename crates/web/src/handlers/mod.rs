pub mod hospitals;
pub mod proxy;
pub mod settings;
pub mod users;

use axum::http::StatusCode;
use mimamori_core::error::CoreError;
use mimamori_core::hospital::is_valid_hospital_id;
use mimamori_core::user::is_valid_user_id;

use crate::error::AppError;
use crate::views::Toast;

/// Reject path ids that could never exist before they reach the backend
/// or a redirect URL.
pub(crate) fn checked_user_id(user_id: &str) -> Result<(), AppError> {
    if is_valid_user_id(user_id) {
        Ok(())
    } else {
        Err(CoreError::NotFound {
            entity: "User",
            id: user_id.to_string(),
        }
        .into())
    }
}

pub(crate) fn checked_hospital_id(hospital_id: &str) -> Result<(), AppError> {
    if is_valid_hospital_id(hospital_id) {
        Ok(())
    } else {
        Err(CoreError::NotFound {
            entity: "Hospital",
            id: hospital_id.to_string(),
        }
        .into())
    }
}

/// Status and error toast for a failed backend call made from a form.
pub(crate) fn failure(err: impl Into<AppError>) -> (StatusCode, Toast) {
    let (status, message) = err.into().page_parts();
    (status, Toast::error(message))
}
