use super::repository;
use crate::domain::reference::{self, ReferenceError, ReferenceKind};
use contracts::domain::a003_designation::aggregate::{Designation, DesignationDto};
use contracts::domain::common::{AggregateRoot, TenantScope};
use sea_orm::ConnectionTrait;

/// Создание должности; отдел, если указан, должен принадлежать тенанту
pub async fn create<C: ConnectionTrait>(
    conn: &C,
    scope: &TenantScope,
    dto: DesignationDto,
) -> Result<Designation, ReferenceError> {
    dto.validate().map_err(ReferenceError::Validation)?;

    if let Some(department_id) = dto.department_id {
        reference::find_owned(conn, ReferenceKind::Department, scope, department_id.0)
            .await?
            .ok_or_else(|| {
                ReferenceError::Validation(format!("Unknown department {}", department_id.0))
            })?;
    }

    let created = repository::insert(conn, scope.creator_id, &dto).await?;
    tracing::info!(
        "{}: created #{} '{}'",
        Designation::full_name(),
        created.id(),
        created.display_name()
    );
    Ok(created)
}

pub async fn list<C: ConnectionTrait>(conn: &C, scope: &TenantScope) -> anyhow::Result<Vec<Designation>> {
    repository::list_for_scope(conn, scope).await
}
