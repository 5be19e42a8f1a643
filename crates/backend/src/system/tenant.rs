use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use contracts::domain::common::TenantScope;

pub const CREATOR_HEADER: &str = "x-creator-id";
pub const OWNERS_HEADER: &str = "x-owner-ids";

/// Extractor for the tenant on whose behalf a request runs.
///
/// The creator comes from `X-Creator-Id`; `X-Owner-Ids` is a comma
/// separated list of additional owners whose rows are visible.
/// Usage in handlers: `async fn handler(Tenant(scope): Tenant) -> Response`
pub struct Tenant(pub TenantScope);

#[async_trait]
impl<S> FromRequestParts<S> for Tenant
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let creator_id = header_value(parts, CREATOR_HEADER)
            .and_then(|v| v.trim().parse::<i64>().ok())
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let owners = match header_value(parts, OWNERS_HEADER) {
            Some(raw) => parse_owner_ids(raw).ok_or(StatusCode::BAD_REQUEST)?,
            None => Vec::new(),
        };

        Ok(Tenant(TenantScope::new(creator_id, owners)))
    }
}

fn header_value<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|v| v.to_str().ok())
}

fn parse_owner_ids(raw: &str) -> Option<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<i64>().ok())
        .collect()
}
