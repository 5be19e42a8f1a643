use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use contracts::domain::common::{RecordStatus, TenantScope};
use contracts::system::users::{UserAccount, EMPLOYEE_ACCOUNT_TYPE};
use sea_orm::{ConnectionTrait, DatabaseBackend, QueryResult, Statement};

use crate::shared::data::predicate::Predicate;
use crate::shared::data::row;

/// Учётная запись для вставки
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub user_type: String,
    pub lang: String,
    pub status: RecordStatus,
    pub created_by: i64,
}

const SELECT_COLUMNS: &str =
    "id, name, email, user_type, lang, status, created_by, created_at, updated_at";

fn parse_timestamp(value: Option<String>) -> DateTime<Utc> {
    value
        .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(Utc::now)
}

fn map_row(row: &QueryResult) -> Result<UserAccount> {
    Ok(UserAccount {
        id: row::id(row, "id")?,
        name: row::text(row, "name")?.unwrap_or_default(),
        email: row::text(row, "email")?.unwrap_or_default(),
        user_type: row::text(row, "user_type")?.unwrap_or_default(),
        lang: row::text(row, "lang")?.unwrap_or_default(),
        status: RecordStatus::from_loose(&row::text(row, "status")?.unwrap_or_default()),
        created_by: row::int(row, "created_by")?.unwrap_or_default(),
        created_at: parse_timestamp(row::text(row, "created_at")?),
        updated_at: parse_timestamp(row::text(row, "updated_at")?),
    })
}

/// Создать пользователя с хешем пароля, возвращает новый id
pub async fn insert<C: ConnectionTrait>(conn: &C, user: &NewUser) -> Result<i64> {
    let now = Utc::now().to_rfc3339();
    let result = conn
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "INSERT INTO users (name, email, password_hash, user_type, lang, status, created_by, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            [
                user.name.clone().into(),
                user.email.clone().into(),
                user.password_hash.clone().into(),
                user.user_type.clone().into(),
                user.lang.clone().into(),
                user.status.as_str().into(),
                user.created_by.into(),
                now.clone().into(),
                now.into(),
            ],
        ))
        .await
        .context("Failed to insert user")?;

    Ok(result.last_insert_id() as i64)
}

pub async fn get_by_id<C: ConnectionTrait>(conn: &C, id: i64) -> Result<Option<UserAccount>> {
    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            format!("SELECT {} FROM users WHERE id = ?", SELECT_COLUMNS),
            [id.into()],
        ))
        .await?;

    result.as_ref().map(map_row).transpose()
}

pub async fn get_password_hash<C: ConnectionTrait>(conn: &C, id: i64) -> Result<Option<String>> {
    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT password_hash FROM users WHERE id = ?",
            [id.into()],
        ))
        .await?;

    match result {
        Some(row) => row::text(&row, "password_hash"),
        None => Ok(None),
    }
}

pub async fn set_status<C: ConnectionTrait>(conn: &C, id: i64, status: RecordStatus) -> Result<bool> {
    let result = conn
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "UPDATE users SET status = ?, updated_at = ? WHERE id = ?",
            [
                status.as_str().into(),
                Utc::now().to_rfc3339().into(),
                id.into(),
            ],
        ))
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn set_password_hash<C: ConnectionTrait>(conn: &C, id: i64, password_hash: &str) -> Result<bool> {
    let result = conn
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?",
            [
                password_hash.into(),
                Utc::now().to_rfc3339().into(),
                id.into(),
            ],
        ))
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete<C: ConnectionTrait>(conn: &C, id: i64) -> Result<bool> {
    let result = conn
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "DELETE FROM users WHERE id = ?",
            [id.into()],
        ))
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Количество учётных записей сотрудников, видимых тенанту (для лимита тарифа)
pub async fn count_employee_accounts<C: ConnectionTrait>(conn: &C, scope: &TenantScope) -> Result<i64> {
    let filter = Predicate::all([
        Predicate::eq("user_type", EMPLOYEE_ACCOUNT_TYPE),
        Predicate::in_list("created_by", scope.owner_ids.iter().copied()),
    ])
    .render();

    let row = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            format!("SELECT COUNT(*) AS total FROM users WHERE {}", filter.sql),
            filter.params,
        ))
        .await?;

    match row {
        Some(row) => row::id(&row, "total"),
        None => Ok(0),
    }
}
