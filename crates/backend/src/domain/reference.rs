//! Resolution of reference values (branch, department, designation, shift)
//! written in an import file or a filter.

use anyhow::Result;
use contracts::domain::a001_branch::aggregate::Branch;
use contracts::domain::a002_department::aggregate::Department;
use contracts::domain::a003_designation::aggregate::Designation;
use contracts::domain::a004_shift::aggregate::Shift;
use contracts::domain::common::{AggregateRoot, TenantScope};
use contracts::shared::options::NamedOption;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

use crate::shared::data::predicate::Predicate;
use crate::shared::data::row;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Branch,
    Department,
    Designation,
    Shift,
}

impl ReferenceKind {
    pub fn table(&self) -> &'static str {
        match self {
            ReferenceKind::Branch => Branch::table_name(),
            ReferenceKind::Department => Department::table_name(),
            ReferenceKind::Designation => Designation::table_name(),
            ReferenceKind::Shift => Shift::table_name(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReferenceKind::Branch => "branch",
            ReferenceKind::Department => "department",
            ReferenceKind::Designation => "designation",
            ReferenceKind::Shift => "shift",
        }
    }
}

/// Resolve a reference value to the id of a row owned by the tenant.
///
/// A value that parses as an integer is looked up by id first. Otherwise,
/// or when no row has that id, the name is matched case-insensitively
/// (the lowest id wins when names repeat). Rows of other tenants never match.
pub async fn resolve<C: ConnectionTrait>(
    conn: &C,
    kind: ReferenceKind,
    scope: &TenantScope,
    value: &str,
) -> Result<Option<i64>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    if let Ok(id) = value.parse::<i64>() {
        if let Some(found) = find_owned(conn, kind, scope, id).await? {
            return Ok(Some(found));
        }
    }

    let wanted = value.to_lowercase();
    let candidates = list_names(conn, kind, scope).await?;
    Ok(candidates
        .into_iter()
        .filter(|c| c.name.trim().to_lowercase() == wanted)
        .map(|c| c.id)
        .min())
}

/// Id of the row when it exists and belongs to the tenant
pub async fn find_owned<C: ConnectionTrait>(
    conn: &C,
    kind: ReferenceKind,
    scope: &TenantScope,
    id: i64,
) -> Result<Option<i64>> {
    let filter = Predicate::eq("id", id)
        .and(Predicate::in_list("created_by", scope.owner_ids.iter().copied()))
        .render();
    let found = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            format!("SELECT id FROM {} WHERE {} LIMIT 1", kind.table(), filter.sql),
            filter.params,
        ))
        .await?;
    found.map(|r| row::id(&r, "id")).transpose()
}

/// Errors of reference-data writes
#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// (id, name) of every row of the kind visible to the tenant, ordered by name
pub async fn list_names<C: ConnectionTrait>(
    conn: &C,
    kind: ReferenceKind,
    scope: &TenantScope,
) -> Result<Vec<NamedOption>> {
    let filter = Predicate::in_list("created_by", scope.owner_ids.iter().copied()).render();
    let rows = conn
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            format!(
                "SELECT id, name FROM {} WHERE {} ORDER BY name, id",
                kind.table(),
                filter.sql
            ),
            filter.params,
        ))
        .await?;

    rows.iter()
        .map(|r| {
            Ok(NamedOption::new(
                row::id(r, "id")?,
                row::text(r, "name")?.unwrap_or_default(),
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::test_support::{insert, temp_database};

    async fn seed_branch(db: &sea_orm::DatabaseConnection, name: &str, owner: i64) -> i64 {
        insert(
            db,
            "INSERT INTO branches (name, status, created_by) VALUES (?, 'active', ?)",
            vec![name.into(), owner.into()],
        )
        .await
    }

    #[tokio::test]
    async fn resolves_numeric_value_by_id_within_scope() {
        let db = temp_database().await;
        let own = seed_branch(&db, "Head Office", 1).await;
        let foreign = seed_branch(&db, "Elsewhere", 2).await;
        let scope = TenantScope::single(1);

        let found = resolve(&db, ReferenceKind::Branch, &scope, &own.to_string()).await.unwrap();
        assert_eq!(found, Some(own));

        let found = resolve(&db, ReferenceKind::Branch, &scope, &foreign.to_string()).await.unwrap();
        assert_eq!(found, None);
    }

    #[tokio::test]
    async fn resolves_names_case_insensitively_lowest_id_first() {
        let db = temp_database().await;
        let first = seed_branch(&db, "Head Office", 1).await;
        seed_branch(&db, "head office", 1).await;
        seed_branch(&db, "Head Office", 2).await;
        let scope = TenantScope::single(1);

        let found = resolve(&db, ReferenceKind::Branch, &scope, "  HEAD OFFICE ").await.unwrap();
        assert_eq!(found, Some(first));

        let missing = resolve(&db, ReferenceKind::Branch, &scope, "Warehouse").await.unwrap();
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn numeric_miss_falls_back_to_name() {
        let db = temp_database().await;
        let id = seed_branch(&db, "2024", 1).await;
        let scope = TenantScope::single(1);

        let found = resolve(&db, ReferenceKind::Branch, &scope, "2024").await.unwrap();
        assert_eq!(found, Some(id));

        let missing = resolve(&db, ReferenceKind::Branch, &scope, "999").await.unwrap();
        assert_eq!(missing, None);

        // id lookups never fall back to names
        assert_eq!(find_owned(&db, ReferenceKind::Branch, &scope, 2024).await.unwrap(), None);
        assert_eq!(find_owned(&db, ReferenceKind::Branch, &scope, id).await.unwrap(), Some(id));
    }

    #[tokio::test]
    async fn owner_ids_widen_visibility() {
        let db = temp_database().await;
        let id = seed_branch(&db, "Shared", 9).await;
        let scope = TenantScope::new(1, [9]);

        let found = resolve(&db, ReferenceKind::Branch, &scope, "shared").await.unwrap();
        assert_eq!(found, Some(id));
    }
}
