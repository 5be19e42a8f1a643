use axum::{http::StatusCode, Json};
use contracts::domain::a003_designation::aggregate::{Designation, DesignationDto};

use super::{internal, reference_error, ApiError};
use crate::domain::a003_designation;
use crate::shared::data::db::get_connection;
use crate::system::tenant::Tenant;

/// GET /api/hr/designations
pub async fn list(Tenant(scope): Tenant) -> Result<Json<Vec<Designation>>, ApiError> {
    a003_designation::service::list(get_connection(), &scope)
        .await
        .map(Json)
        .map_err(|e| internal("Failed to list designations", e))
}

/// POST /api/hr/designations
pub async fn create(
    Tenant(scope): Tenant,
    Json(dto): Json<DesignationDto>,
) -> Result<(StatusCode, Json<Designation>), ApiError> {
    let created = a003_designation::service::create(get_connection(), &scope, dto)
        .await
        .map_err(|e| reference_error("Failed to create designation", e))?;
    Ok((StatusCode::CREATED, Json(created)))
}
