use super::repository;
use crate::domain::reference::ReferenceError;
use contracts::domain::a001_branch::aggregate::{Branch, BranchDto};
use contracts::domain::common::{AggregateRoot, TenantScope};
use sea_orm::ConnectionTrait;

/// Создание филиала от имени тенанта
pub async fn create<C: ConnectionTrait>(
    conn: &C,
    scope: &TenantScope,
    dto: BranchDto,
) -> Result<Branch, ReferenceError> {
    dto.validate().map_err(ReferenceError::Validation)?;
    let created = repository::insert(conn, scope.creator_id, &dto).await?;
    tracing::info!(
        "{}: created #{} '{}'",
        Branch::full_name(),
        created.id(),
        created.display_name()
    );
    Ok(created)
}

/// Филиалы, видимые тенанту
pub async fn list<C: ConnectionTrait>(conn: &C, scope: &TenantScope) -> anyhow::Result<Vec<Branch>> {
    repository::list_for_scope(conn, scope).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::test_support::temp_database;
    use contracts::domain::common::RecordStatus;

    #[tokio::test]
    async fn created_branch_is_listed_for_owner_only() {
        let db = temp_database().await;
        let dto = BranchDto {
            name: "  Head Office ".into(),
            status: RecordStatus::Active,
        };
        let branch = create(&db, &TenantScope::single(1), dto).await.unwrap();
        assert_eq!(branch.name, "Head Office");
        assert_eq!(branch.metadata.created_by, 1);

        assert_eq!(list(&db, &TenantScope::single(1)).await.unwrap().len(), 1);
        assert!(list(&db, &TenantScope::single(2)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let db = temp_database().await;
        let dto = BranchDto {
            name: " ".into(),
            status: RecordStatus::Active,
        };
        assert!(create(&db, &TenantScope::single(1), dto).await.is_err());
    }
}
