use anyhow::Result;
use sea_orm::{ConnectionTrait, DatabaseBackend, QueryResult, Statement, Value};

use super::common::{EMPLOYEE_COLUMNS, EMPLOYEE_JOINS};
use crate::shared::data::paging;
use crate::shared::data::predicate::Predicate;
use crate::shared::data::row;

/// Record table of a report, its extra joins, columns and order
#[derive(Debug, Clone, Copy)]
pub struct ReportSource {
    pub table: &'static str,
    pub joins: &'static str,
    pub columns: &'static str,
    pub order_by: &'static str,
}

impl ReportSource {
    fn from_clause(&self) -> String {
        format!("{} r{}{}", self.table, EMPLOYEE_JOINS, self.joins)
    }
}

fn statement(sql: String, params: Vec<Value>) -> Statement {
    Statement::from_sql_and_values(DatabaseBackend::Sqlite, sql, params)
}

async fn scalar<C: ConnectionTrait>(
    conn: &C,
    source: &ReportSource,
    expr: &str,
    filter: &Predicate,
) -> Result<Option<QueryResult>> {
    let rendered = filter.render();
    let sql = format!(
        "SELECT {} AS value FROM {} WHERE {}",
        expr,
        source.from_clause(),
        rendered.sql
    );
    Ok(conn.query_one(statement(sql, rendered.params)).await?)
}

pub async fn count<C: ConnectionTrait>(conn: &C, source: &ReportSource, filter: &Predicate) -> Result<u64> {
    count_expr(conn, source, "COUNT(*)", filter).await
}

pub async fn count_distinct<C: ConnectionTrait>(
    conn: &C,
    source: &ReportSource,
    column: &str,
    filter: &Predicate,
) -> Result<u64> {
    count_expr(conn, source, &format!("COUNT(DISTINCT {})", column), filter).await
}

async fn count_expr<C: ConnectionTrait>(
    conn: &C,
    source: &ReportSource,
    expr: &str,
    filter: &Predicate,
) -> Result<u64> {
    match scalar(conn, source, expr, filter).await? {
        Some(r) => Ok(row::id(&r, "value")?.max(0) as u64),
        None => Ok(0),
    }
}

/// Count of rows matching `filter` and `r.status = status`
pub async fn count_status<C: ConnectionTrait>(
    conn: &C,
    source: &ReportSource,
    filter: &Predicate,
    status: &str,
) -> Result<u64> {
    let narrowed = filter.clone().and(Predicate::eq("r.status", status));
    count(conn, source, &narrowed).await
}

/// Sum of a numeric expression; 0 when nothing matches
pub async fn sum<C: ConnectionTrait>(
    conn: &C,
    source: &ReportSource,
    expr: &str,
    filter: &Predicate,
) -> Result<f64> {
    match scalar(conn, source, &format!("TOTAL({})", expr), filter).await? {
        Some(r) => Ok(row::real(&r, "value")?.unwrap_or(0.0)),
        None => Ok(0.0),
    }
}

/// Average of a numeric expression; `None` when nothing matches
pub async fn average<C: ConnectionTrait>(
    conn: &C,
    source: &ReportSource,
    expr: &str,
    filter: &Predicate,
) -> Result<Option<f64>> {
    match scalar(conn, source, &format!("CAST(AVG({}) AS REAL)", expr), filter).await? {
        Some(r) => row::real(&r, "value"),
        None => Ok(None),
    }
}

/// Record rows in report order; `page` is `(page, per_page)`, `None` reads all
pub async fn fetch<C: ConnectionTrait>(
    conn: &C,
    source: &ReportSource,
    filter: &Predicate,
    page: Option<(u64, u64)>,
) -> Result<Vec<QueryResult>> {
    let rendered = filter.render();
    let mut sql = format!(
        "SELECT r.id, {}, {} FROM {} WHERE {} ORDER BY {}",
        EMPLOYEE_COLUMNS,
        source.columns,
        source.from_clause(),
        rendered.sql,
        source.order_by
    );
    let mut params = rendered.params;

    if let Some((page, per_page)) = page {
        sql.push_str(" LIMIT ? OFFSET ?");
        params.push(paging::page_limit(per_page).into());
        params.push(paging::page_offset(page, per_page).into());
    }

    Ok(conn.query_all(statement(sql, params)).await?)
}
