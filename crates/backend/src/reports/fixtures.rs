//! Seed data shared by the report tests.

use chrono::NaiveDate;
use contracts::domain::common::TenantScope;
use sea_orm::{DatabaseConnection, Value};

use crate::shared::data::test_support::{insert, temp_database};

pub struct Fixture {
    pub db: DatabaseConnection,
    pub scope: TenantScope,
    pub north: i64,
    pub south: i64,
    pub engineering: i64,
    /// North / Engineering, joined 2024-01-10
    pub ann: i64,
    /// South, no department, joined 2025-02-15
    pub bob: i64,
    /// Account of another tenant
    pub stranger: i64,
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub async fn exec(db: &DatabaseConnection, sql: &str, values: Vec<Value>) -> i64 {
    insert(db, sql, values).await
}

async fn account(db: &DatabaseConnection, name: &str, email: &str, owner: i64) -> i64 {
    exec(
        db,
        "INSERT INTO users (name, email, password_hash, user_type, lang, status, created_by, created_at, updated_at)
         VALUES (?, ?, 'x', 'employee', 'en', 'active', ?, '2024-01-01T00:00:00Z', '2024-01-01T00:00:00Z')",
        vec![name.into(), email.into(), owner.into()],
    )
    .await
}

async fn profile(
    db: &DatabaseConnection,
    user_id: i64,
    code: &str,
    branch_id: Option<i64>,
    department_id: Option<i64>,
    joined: &str,
    owner: i64,
) {
    exec(
        db,
        "INSERT INTO employees (user_id, employee_code, gender, branch_id, department_id, date_of_joining, created_by)
         VALUES (?, ?, 'other', ?, ?, ?, ?)",
        vec![
            user_id.into(),
            code.into(),
            branch_id.into(),
            department_id.into(),
            joined.into(),
            owner.into(),
        ],
    )
    .await;
}

async fn named(db: &DatabaseConnection, table: &str, name: &str, owner: i64) -> i64 {
    exec(
        db,
        &format!("INSERT INTO {table} (name, created_by) VALUES (?, ?)"),
        vec![name.into(), owner.into()],
    )
    .await
}

pub async fn seed() -> Fixture {
    let db = temp_database().await;

    let north = named(&db, "branches", "North", 1).await;
    let south = named(&db, "branches", "South", 1).await;
    let engineering = named(&db, "departments", "Engineering", 1).await;

    let ann = account(&db, "Ann Lee", "ann@example.com", 1).await;
    profile(&db, ann, "EMP-1", Some(north), Some(engineering), "2024-01-10", 1).await;

    let bob = account(&db, "Bob Stone", "bob@example.com", 1).await;
    profile(&db, bob, "EMP-2", Some(south), None, "2025-02-15", 1).await;

    let stranger = account(&db, "Eve Other", "eve@example.com", 2).await;
    profile(&db, stranger, "EMP-9", None, None, "2025-02-20", 2).await;

    Fixture {
        db,
        scope: TenantScope::single(1),
        north,
        south,
        engineering,
        ann,
        bob,
        stranger,
    }
}

pub async fn lookup(db: &DatabaseConnection, table: &str, name: &str, owner: i64) -> i64 {
    named(db, table, name, owner).await
}
