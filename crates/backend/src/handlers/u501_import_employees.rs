use axum::{
    extract::Multipart,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use contracts::usecases::u501_import_employees::{ImportResponse, TEMPLATE_FILE_NAME};

use super::{api_error, internal, ApiError};
use crate::domain::a005_employee;
use crate::shared::config;
use crate::shared::data::db::get_connection;
use crate::system::tenant::Tenant;
use crate::usecases::u501_import_employees::{
    template, ImportExecutor, ImportRejection, SeaOrmImportStore,
};

const FILE_FIELD: &str = "file";

fn rejection(error: ImportRejection) -> ApiError {
    api_error(StatusCode::UNPROCESSABLE_ENTITY, error)
}

/// Contents of the `file` field; more than `limit` bytes is rejected
async fn read_upload(multipart: &mut Multipart, limit: usize) -> Result<Vec<u8>, ApiError> {
    let malformed = |e: axum::extract::multipart::MultipartError| api_error(e.status(), e.body_text());

    while let Some(mut field) = multipart.next_field().await.map_err(malformed)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field.chunk().await.map_err(malformed)? {
            if bytes.len() + chunk.len() > limit {
                return Err(rejection(ImportRejection::FileTooLarge { limit }));
            }
            bytes.extend_from_slice(&chunk);
        }
        return Ok(bytes);
    }

    Err(api_error(
        StatusCode::UNPROCESSABLE_ENTITY,
        "The file field is required.",
    ))
}

/// POST /api/hr/employees/import
pub async fn import(
    Tenant(scope): Tenant,
    mut multipart: Multipart,
) -> Result<Json<ImportResponse>, ApiError> {
    let config = config::current();
    let bytes = read_upload(&mut multipart, config.import.max_file_bytes).await?;
    tracing::info!(
        "Employee import upload from creator {}: {} bytes",
        scope.creator_id,
        bytes.len()
    );

    let db = get_connection();
    let quota = a005_employee::service::plan_quota(db, &scope, config.plan.max_employees)
        .await
        .map_err(|e| internal("Failed to read plan quota", e))?;

    let store = SeaOrmImportStore::new(db.clone());
    let result = ImportExecutor::new(&store)
        .execute(bytes.as_slice(), &scope, quota)
        .await
        .map_err(rejection)?;

    Ok(Json(ImportResponse::from(result)))
}

/// GET /api/hr/employees/import/template
pub async fn download_template() -> Result<impl IntoResponse, ApiError> {
    let bytes = template::render_template().map_err(|e| internal("Failed to render import template", e))?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", TEMPLATE_FILE_NAME),
            ),
        ],
        bytes,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::Request;

    const BOUNDARY: &str = "XBOUNDARYX";

    async fn multipart(parts: &[(&str, &str)]) -> Multipart {
        let mut body = String::new();
        for (name, content) in parts {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{name}.csv\"\r\nContent-Type: text/csv\r\n\r\n{content}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));

        let request = Request::builder()
            .method("POST")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        Multipart::from_request(request, &()).await.unwrap()
    }

    #[tokio::test]
    async fn reads_file_field() {
        let mut form = multipart(&[("notes", "ignored"), ("file", "employee_id,name\nE-1,Ann")]).await;
        let bytes = read_upload(&mut form, 1024).await.unwrap();
        assert_eq!(bytes, b"employee_id,name\nE-1,Ann");
    }

    #[tokio::test]
    async fn oversized_file_is_rejected() {
        let mut form = multipart(&[("file", "employee_id,name\nE-1,Ann")]).await;
        let (status, Json(body)) = read_upload(&mut form, 8).await.unwrap_err();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "The uploaded file exceeds the 8 byte limit.");
    }

    #[tokio::test]
    async fn missing_file_field() {
        let mut form = multipart(&[("other", "x")]).await;
        let (status, Json(body)) = read_upload(&mut form, 1024).await.unwrap_err();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "The file field is required.");
    }

    #[test]
    fn rejections_are_unprocessable() {
        let (status, Json(body)) = rejection(ImportRejection::QuotaExhausted);
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body["error"],
            "Employee limit exceeded. Please upgrade your plan or remove users before importing more employees."
        );
    }
}
