use axum::{http::StatusCode, Json};
use contracts::domain::a001_branch::aggregate::{Branch, BranchDto};

use super::{internal, reference_error, ApiError};
use crate::domain::a001_branch;
use crate::shared::data::db::get_connection;
use crate::system::tenant::Tenant;

/// GET /api/hr/branches
pub async fn list(Tenant(scope): Tenant) -> Result<Json<Vec<Branch>>, ApiError> {
    a001_branch::service::list(get_connection(), &scope)
        .await
        .map(Json)
        .map_err(|e| internal("Failed to list branches", e))
}

/// POST /api/hr/branches
pub async fn create(
    Tenant(scope): Tenant,
    Json(dto): Json<BranchDto>,
) -> Result<(StatusCode, Json<Branch>), ApiError> {
    let created = a001_branch::service::create(get_connection(), &scope, dto)
        .await
        .map_err(|e| reference_error("Failed to create branch", e))?;
    Ok((StatusCode::CREATED, Json(created)))
}
