//! Filter values offered by the report pages.

use contracts::domain::common::TenantScope;
use contracts::reports::options::{EmployeeOption, ReportOptions};
use contracts::reports::warning::WARNING_SEVERITIES;
use contracts::shared::options::NamedOption;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement, Value};

use crate::domain::reference::{self, ReferenceKind};
use crate::shared::data::predicate::Predicate;
use crate::shared::data::row;

fn owners(column: &str, scope: &TenantScope) -> (String, Vec<Value>) {
    let rendered = Predicate::in_list(column, scope.owner_ids.iter().copied()).render();
    (rendered.sql, rendered.params)
}

/// (id, name) of a tenant-owned lookup table, ordered by name
async fn named<C: ConnectionTrait>(
    conn: &C,
    table: &str,
    scope: &TenantScope,
) -> anyhow::Result<Vec<NamedOption>> {
    let (filter, params) = owners("created_by", scope);
    let rows = conn
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            format!("SELECT id, name FROM {table} WHERE {filter} ORDER BY name, id"),
            params,
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

/// Distinct non-empty values of a free-text column
async fn distinct_values<C: ConnectionTrait>(
    conn: &C,
    table: &str,
    column: &str,
    scope: &TenantScope,
) -> anyhow::Result<Vec<String>> {
    let (filter, params) = owners("created_by", scope);
    let rows = conn
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            format!(
                "SELECT DISTINCT {column} AS value FROM {table}
                WHERE {filter} AND {column} IS NOT NULL AND {column} <> ''
                ORDER BY {column}"
            ),
            params,
        ))
        .await?;

    rows.iter()
        .map(|r| Ok(row::text(r, "value")?.unwrap_or_default()))
        .collect()
}

/// Employee accounts of the tenant with their employee code, if any
async fn employees<C: ConnectionTrait>(
    conn: &C,
    scope: &TenantScope,
) -> anyhow::Result<Vec<EmployeeOption>> {
    let (filter, params) = owners("u.created_by", scope);
    let rows = conn
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            format!(
                "SELECT u.id, u.name, e.employee_code
                FROM users u
                LEFT JOIN employees e ON e.user_id = u.id
                WHERE u.user_type = 'employee' AND {filter}
                ORDER BY u.name, u.id"
            ),
            params,
        ))
        .await?;

    rows.iter()
        .map(|r| {
            Ok(EmployeeOption {
                id: row::id(r, "id")?,
                name: row::text(r, "name")?.unwrap_or_default(),
                code: row::text(r, "employee_code")?,
            })
        })
        .collect()
}

pub async fn options<C: ConnectionTrait>(
    conn: &C,
    scope: &TenantScope,
) -> anyhow::Result<ReportOptions> {
    Ok(ReportOptions {
        branches: reference::list_names(conn, ReferenceKind::Branch, scope).await?,
        departments: reference::list_names(conn, ReferenceKind::Department, scope).await?,
        employees: employees(conn, scope).await?,
        leave_types: named(conn, "leave_types", scope).await?,
        contract_types: named(conn, "contract_types", scope).await?,
        training_programs: named(conn, "training_programs", scope).await?,
        warning_types: distinct_values(conn, "warnings", "warning_type", scope).await?,
        termination_types: distinct_values(conn, "terminations", "termination_type", scope).await?,
        severities: WARNING_SEVERITIES.iter().map(|s| s.to_string()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::fixtures::{exec, lookup, seed};

    #[tokio::test]
    async fn options_are_tenant_scoped() {
        let f = seed().await;
        lookup(&f.db, "leave_types", "Sick", 1).await;
        lookup(&f.db, "leave_types", "Annual", 1).await;
        lookup(&f.db, "leave_types", "Foreign", 2).await;
        for (kind, owner) in [("misconduct", 1), ("misconduct", 1), ("", 1), ("other-tenant", 2)] {
            exec(
                &f.db,
                "INSERT INTO terminations (employee_id, termination_type, created_by) VALUES (?, ?, ?)",
                vec![f.bob.into(), kind.into(), Value::from(owner as i64)],
            )
            .await;
        }

        let options = options(&f.db, &f.scope).await.unwrap();

        let branches: Vec<_> = options.branches.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(branches, vec!["North", "South"]);
        let leave_types: Vec<_> = options.leave_types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(leave_types, vec!["Annual", "Sick"]);
        assert_eq!(options.termination_types, vec!["misconduct".to_string()]);
        assert!(options.warning_types.is_empty());
        assert_eq!(options.severities, vec!["verbal", "written", "final"]);

        assert_eq!(
            options.employees,
            vec![
                EmployeeOption {
                    id: f.ann,
                    name: "Ann Lee".into(),
                    code: Some("EMP-1".into()),
                },
                EmployeeOption {
                    id: f.bob,
                    name: "Bob Stone".into(),
                    code: Some("EMP-2".into()),
                },
            ]
        );
    }
}
