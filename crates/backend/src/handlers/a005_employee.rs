use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use contracts::domain::a005_employee::aggregate::{
    ChangePasswordDto, EmployeeDetails, EmployeeFilterOptions, EmployeeListQuery, EmployeePage,
};
use serde_json::json;

use super::{api_error, internal, ApiError};
use crate::domain::a005_employee::service::{self, DirectoryError};
use crate::shared::data::db::get_connection;
use crate::system::tenant::Tenant;

fn directory_error(context: &str, error: DirectoryError) -> ApiError {
    match error {
        DirectoryError::NotFound => api_error(StatusCode::NOT_FOUND, DirectoryError::NotFound),
        DirectoryError::Validation(message) => api_error(StatusCode::UNPROCESSABLE_ENTITY, message),
        DirectoryError::Storage(e) => internal(context, e),
    }
}

/// GET /api/hr/employees
pub async fn list(
    Tenant(scope): Tenant,
    Query(query): Query<EmployeeListQuery>,
) -> Result<Json<EmployeePage>, ApiError> {
    service::list(get_connection(), &scope, &query)
        .await
        .map(Json)
        .map_err(|e| internal("Failed to list employees", e))
}

/// GET /api/hr/employees/:id
pub async fn get_by_id(
    Tenant(scope): Tenant,
    Path(id): Path<i64>,
) -> Result<Json<EmployeeDetails>, ApiError> {
    match service::get(get_connection(), &scope, id).await {
        Ok(Some(details)) => Ok(Json(details)),
        Ok(None) => Err(api_error(StatusCode::NOT_FOUND, DirectoryError::NotFound)),
        Err(e) => Err(internal("Failed to load employee", e)),
    }
}

/// DELETE /api/hr/employees/:id
pub async fn delete(Tenant(scope): Tenant, Path(id): Path<i64>) -> Result<StatusCode, ApiError> {
    service::delete(get_connection(), &scope, id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(|e| directory_error("Failed to delete employee", e))
}

/// POST /api/hr/employees/:id/toggle-status
pub async fn toggle_status(
    Tenant(scope): Tenant,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let status = service::toggle_status(get_connection(), &scope, id)
        .await
        .map_err(|e| directory_error("Failed to toggle employee status", e))?;
    Ok(Json(json!({ "status": status })))
}

/// POST /api/hr/employees/:id/change-password
pub async fn change_password(
    Tenant(scope): Tenant,
    Path(id): Path<i64>,
    Json(dto): Json<ChangePasswordDto>,
) -> Result<StatusCode, ApiError> {
    service::change_password(get_connection(), &scope, id, &dto)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(|e| directory_error("Failed to change employee password", e))
}

/// GET /api/hr/employees/options
pub async fn options(Tenant(scope): Tenant) -> Result<Json<EmployeeFilterOptions>, ApiError> {
    service::filter_options(get_connection(), &scope)
        .await
        .map(Json)
        .map_err(|e| internal("Failed to load employee filter options", e))
}
