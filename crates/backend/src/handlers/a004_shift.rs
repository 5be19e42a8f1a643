use axum::{http::StatusCode, Json};
use contracts::domain::a004_shift::aggregate::{Shift, ShiftDto};

use super::{internal, reference_error, ApiError};
use crate::domain::a004_shift;
use crate::shared::data::db::get_connection;
use crate::system::tenant::Tenant;

/// GET /api/hr/shifts
pub async fn list(Tenant(scope): Tenant) -> Result<Json<Vec<Shift>>, ApiError> {
    a004_shift::service::list(get_connection(), &scope)
        .await
        .map(Json)
        .map_err(|e| internal("Failed to list shifts", e))
}

/// POST /api/hr/shifts
pub async fn create(
    Tenant(scope): Tenant,
    Json(dto): Json<ShiftDto>,
) -> Result<(StatusCode, Json<Shift>), ApiError> {
    let created = a004_shift::service::create(get_connection(), &scope, dto)
        .await
        .map_err(|e| reference_error("Failed to create shift", e))?;
    Ok((StatusCode::CREATED, Json(created)))
}
