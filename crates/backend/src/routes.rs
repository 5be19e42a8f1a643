use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::handlers;
use crate::system::middleware::request_logger::request_logger;
use crate::system::tenant::{CREATOR_HEADER, OWNERS_HEADER};

/// Запас на multipart-обвязку вокруг файла
const MULTIPART_OVERHEAD: usize = 64 * 1024;

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
            header::HeaderName::from_static(CREATOR_HEADER),
            header::HeaderName::from_static(OWNERS_HEADER),
        ])
}

/// Конфигурация всех роутов приложения
pub fn configure_routes(max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // REFERENCE DATA
        // ========================================
        .route(
            "/api/hr/branches",
            get(handlers::a001_branch::list).post(handlers::a001_branch::create),
        )
        .route(
            "/api/hr/departments",
            get(handlers::a002_department::list).post(handlers::a002_department::create),
        )
        .route(
            "/api/hr/designations",
            get(handlers::a003_designation::list).post(handlers::a003_designation::create),
        )
        .route(
            "/api/hr/shifts",
            get(handlers::a004_shift::list).post(handlers::a004_shift::create),
        )
        // ========================================
        // EMPLOYEES
        // ========================================
        .route("/api/hr/employees", get(handlers::a005_employee::list))
        .route(
            "/api/hr/employees/options",
            get(handlers::a005_employee::options),
        )
        .route(
            "/api/hr/employees/:id",
            get(handlers::a005_employee::get_by_id).delete(handlers::a005_employee::delete),
        )
        .route(
            "/api/hr/employees/:id/toggle-status",
            post(handlers::a005_employee::toggle_status),
        )
        .route(
            "/api/hr/employees/:id/change-password",
            post(handlers::a005_employee::change_password),
        )
        // U501 Import employees
        .route(
            "/api/hr/employees/import",
            post(handlers::u501_import_employees::import).layer(DefaultBodyLimit::max(
                max_upload_bytes.saturating_add(MULTIPART_OVERHEAD),
            )),
        )
        .route(
            "/api/hr/employees/import/template",
            get(handlers::u501_import_employees::download_template),
        )
        // ========================================
        // REPORTS
        // ========================================
        .route("/api/hr/reports/options", get(handlers::reports::options))
        .route("/api/hr/reports/:kind", get(handlers::reports::report))
        .route("/api/hr/reports/:kind/export", get(handlers::reports::export))
        .layer(middleware::from_fn(request_logger))
        .layer(cors())
}
