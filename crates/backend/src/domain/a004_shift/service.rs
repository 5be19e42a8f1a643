use super::repository;
use crate::domain::reference::ReferenceError;
use contracts::domain::a004_shift::aggregate::{Shift, ShiftDto};
use contracts::domain::common::{AggregateRoot, TenantScope};
use sea_orm::ConnectionTrait;

pub async fn create<C: ConnectionTrait>(
    conn: &C,
    scope: &TenantScope,
    dto: ShiftDto,
) -> Result<Shift, ReferenceError> {
    dto.validate().map_err(ReferenceError::Validation)?;
    let created = repository::insert(conn, scope.creator_id, &dto).await?;
    tracing::info!(
        "{}: created #{} '{}'",
        Shift::full_name(),
        created.id(),
        created.display_name()
    );
    Ok(created)
}

pub async fn list<C: ConnectionTrait>(conn: &C, scope: &TenantScope) -> anyhow::Result<Vec<Shift>> {
    repository::list_for_scope(conn, scope).await
}
