use super::repository;
use crate::domain::reference::{self, ReferenceError, ReferenceKind};
use contracts::domain::a002_department::aggregate::{Department, DepartmentDto};
use contracts::domain::common::{AggregateRoot, TenantScope};
use sea_orm::ConnectionTrait;

/// Создание отдела; филиал, если указан, должен принадлежать тенанту
pub async fn create<C: ConnectionTrait>(
    conn: &C,
    scope: &TenantScope,
    dto: DepartmentDto,
) -> Result<Department, ReferenceError> {
    dto.validate().map_err(ReferenceError::Validation)?;

    if let Some(branch_id) = dto.branch_id {
        reference::find_owned(conn, ReferenceKind::Branch, scope, branch_id.0)
            .await?
            .ok_or_else(|| ReferenceError::Validation(format!("Unknown branch {}", branch_id.0)))?;
    }

    let created = repository::insert(conn, scope.creator_id, &dto).await?;
    tracing::info!(
        "{}: created #{} '{}'",
        Department::full_name(),
        created.id(),
        created.display_name()
    );
    Ok(created)
}

pub async fn list<C: ConnectionTrait>(conn: &C, scope: &TenantScope) -> anyhow::Result<Vec<Department>> {
    repository::list_for_scope(conn, scope).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::test_support::temp_database;
    use contracts::domain::a001_branch::aggregate::BranchId;
    use contracts::domain::common::RecordStatus;

    #[tokio::test]
    async fn foreign_branch_is_rejected() {
        let db = temp_database().await;
        let dto = DepartmentDto {
            name: "Finance".into(),
            branch_id: Some(BranchId(999)),
            status: RecordStatus::Active,
        };
        assert!(create(&db, &TenantScope::single(1), dto).await.is_err());

        let dto = DepartmentDto {
            name: "Finance".into(),
            branch_id: None,
            status: RecordStatus::Active,
        };
        let department = create(&db, &TenantScope::single(1), dto).await.unwrap();
        assert_eq!(department.branch_id, None);
    }
}
