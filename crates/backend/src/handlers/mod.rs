pub mod a001_branch;
pub mod a002_department;
pub mod a003_designation;
pub mod a004_shift;
pub mod a005_employee;
pub mod reports;
pub mod u501_import_employees;

use axum::{http::StatusCode, Json};
use serde_json::json;

use crate::domain::reference::ReferenceError;

/// Ошибка с телом `{ "error": "..." }`
pub type ApiError = (StatusCode, Json<serde_json::Value>);

pub fn api_error(status: StatusCode, message: impl std::fmt::Display) -> ApiError {
    (status, Json(json!({ "error": message.to_string() })))
}

/// Логирует причину и отдаёт 500 без подробностей
pub fn internal(context: &str, error: anyhow::Error) -> ApiError {
    tracing::error!("{}: {:#}", context, error);
    api_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

pub fn reference_error(context: &str, error: ReferenceError) -> ApiError {
    match error {
        ReferenceError::Validation(message) => api_error(StatusCode::BAD_REQUEST, message),
        ReferenceError::Storage(e) => internal(context, e),
    }
}
