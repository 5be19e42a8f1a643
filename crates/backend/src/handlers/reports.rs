use axum::{
    extract::{Path, Query},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use contracts::reports::options::ReportOptions;
use contracts::reports::{ReportFilters, ReportKind};

use super::{api_error, internal, ApiError};
use crate::reports;
use crate::shared::data::db::get_connection;
use crate::system::tenant::Tenant;

fn report_kind(slug: &str) -> Result<ReportKind, ApiError> {
    ReportKind::from_slug(slug)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("Unknown report: {}", slug)))
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

/// GET /api/hr/reports/options
pub async fn options(Tenant(scope): Tenant) -> Result<Json<ReportOptions>, ApiError> {
    reports::options::options(get_connection(), &scope)
        .await
        .map(Json)
        .map_err(|e| internal("Failed to load report options", e))
}

/// GET /api/hr/reports/:kind
pub async fn report(
    Tenant(scope): Tenant,
    Path(slug): Path<String>,
    Query(filters): Query<ReportFilters>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let kind = report_kind(&slug)?;
    reports::run(get_connection(), kind, &filters, &scope, today())
        .await
        .map(Json)
        .map_err(|e| internal(&format!("Failed to build {} report", kind.slug()), e))
}

/// GET /api/hr/reports/:kind/export
pub async fn export(
    Tenant(scope): Tenant,
    Path(slug): Path<String>,
    Query(filters): Query<ReportFilters>,
) -> Result<impl IntoResponse, ApiError> {
    let kind = report_kind(&slug)?;
    let file = reports::export(get_connection(), kind, &filters, &scope, today())
        .await
        .map_err(|e| internal(&format!("Failed to export {} report", kind.slug()), e))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.file_name),
            ),
        ],
        file.bytes,
    ))
}
