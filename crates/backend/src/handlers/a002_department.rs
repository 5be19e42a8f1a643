use axum::{http::StatusCode, Json};
use contracts::domain::a002_department::aggregate::{Department, DepartmentDto};

use super::{internal, reference_error, ApiError};
use crate::domain::a002_department;
use crate::shared::data::db::get_connection;
use crate::system::tenant::Tenant;

/// GET /api/hr/departments
pub async fn list(Tenant(scope): Tenant) -> Result<Json<Vec<Department>>, ApiError> {
    a002_department::service::list(get_connection(), &scope)
        .await
        .map(Json)
        .map_err(|e| internal("Failed to list departments", e))
}

/// POST /api/hr/departments
pub async fn create(
    Tenant(scope): Tenant,
    Json(dto): Json<DepartmentDto>,
) -> Result<(StatusCode, Json<Department>), ApiError> {
    let created = a002_department::service::create(get_connection(), &scope, dto)
        .await
        .map_err(|e| reference_error("Failed to create department", e))?;
    Ok((StatusCode::CREATED, Json(created)))
}
