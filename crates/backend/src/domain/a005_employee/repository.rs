use chrono::{NaiveDate, Utc};
use contracts::domain::a001_branch::aggregate::BranchId;
use contracts::domain::a002_department::aggregate::DepartmentId;
use contracts::domain::a003_designation::aggregate::DesignationId;
use contracts::domain::a004_shift::aggregate::ShiftId;
use contracts::domain::a005_employee::aggregate::{
    Employee, EmployeeDetails, EmployeeId, EmployeeListItem, EmployeeListQuery, EmployeePage,
    Gender,
};
use contracts::domain::common::{EntityMetadata, RecordStatus, TenantScope};
use serde::{Deserialize, Serialize};

use sea_orm::entity::prelude::*;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseBackend, EntityTrait, NotSet,
    QueryFilter, QueryResult, Set, Statement,
};

use crate::shared::data::paging;
use crate::shared::data::predicate::Predicate;
use crate::shared::data::row;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub employee_code: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: String,
    pub phone: Option<String>,
    pub branch_id: Option<i64>,
    pub department_id: Option<i64>,
    pub designation_id: Option<i64>,
    pub shift_id: Option<i64>,
    pub date_of_joining: Option<NaiveDate>,
    pub employment_type: Option<String>,
    pub employment_status: Option<String>,
    pub national_id: Option<String>,
    pub created_by: i64,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Employee {
    fn from(m: Model) -> Self {
        Employee {
            id: EmployeeId(m.id),
            user_id: m.user_id,
            employee_code: m.employee_code,
            date_of_birth: m.date_of_birth,
            gender: Gender::from_loose(&m.gender),
            phone: m.phone,
            branch_id: m.branch_id.map(BranchId),
            department_id: m.department_id.map(DepartmentId),
            designation_id: m.designation_id.map(DesignationId),
            shift_id: m.shift_id.map(ShiftId),
            date_of_joining: m.date_of_joining,
            employment_type: m.employment_type,
            employment_status: m.employment_status,
            national_id: m.national_id,
            metadata: EntityMetadata {
                created_at: m.created_at.unwrap_or_else(Utc::now),
                updated_at: m.updated_at.unwrap_or_else(Utc::now),
                created_by: m.created_by,
            },
        }
    }
}

/// HR-профиль для вставки (учётная запись уже создана)
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub user_id: i64,
    pub employee_code: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Gender,
    pub branch_id: i64,
    pub department_id: i64,
    pub designation_id: i64,
    pub shift_id: Option<i64>,
    pub date_of_joining: Option<NaiveDate>,
    pub employment_type: Option<String>,
    pub employment_status: Option<String>,
    pub national_id: Option<String>,
    pub created_by: i64,
}

fn owned_by(scope: &TenantScope) -> sea_orm::sea_query::SimpleExpr {
    Column::CreatedBy.is_in(scope.owner_ids.clone())
}

pub async fn insert<C: ConnectionTrait>(conn: &C, new: &NewEmployee) -> anyhow::Result<Employee> {
    let now = Utc::now();
    let active = ActiveModel {
        id: NotSet,
        user_id: Set(new.user_id),
        employee_code: Set(new.employee_code.clone()),
        date_of_birth: Set(new.date_of_birth),
        gender: Set(new.gender.as_str().to_string()),
        phone: Set(None),
        branch_id: Set(Some(new.branch_id)),
        department_id: Set(Some(new.department_id)),
        designation_id: Set(Some(new.designation_id)),
        shift_id: Set(new.shift_id),
        date_of_joining: Set(new.date_of_joining),
        employment_type: Set(new.employment_type.clone()),
        employment_status: Set(new.employment_status.clone()),
        national_id: Set(new.national_id.clone()),
        created_by: Set(new.created_by),
        created_at: Set(Some(now)),
        updated_at: Set(Some(now)),
    };
    Ok(active.insert(conn).await?.into())
}

/// Есть ли у тенанта сотрудник с таким табельным номером
pub async fn exists_by_code<C: ConnectionTrait>(
    conn: &C,
    scope: &TenantScope,
    code: &str,
) -> anyhow::Result<bool> {
    let found = Entity::find()
        .filter(Column::EmployeeCode.eq(code))
        .filter(owned_by(scope))
        .one(conn)
        .await?;
    Ok(found.is_some())
}

pub async fn get_by_id<C: ConnectionTrait>(
    conn: &C,
    scope: &TenantScope,
    id: i64,
) -> anyhow::Result<Option<Employee>> {
    let found = Entity::find_by_id(id)
        .filter(owned_by(scope))
        .one(conn)
        .await?;
    Ok(found.map(Into::into))
}

pub async fn delete<C: ConnectionTrait>(conn: &C, id: i64) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id).exec(conn).await?;
    Ok(result.rows_affected > 0)
}

// ============================================================================
// Список сотрудников
// ============================================================================

const LIST_SOURCE: &str = "employees e
    JOIN users u ON u.id = e.user_id
    LEFT JOIN branches b ON b.id = e.branch_id
    LEFT JOIN departments d ON d.id = e.department_id
    LEFT JOIN designations g ON g.id = e.designation_id
    LEFT JOIN shifts s ON s.id = e.shift_id";

const LIST_COLUMNS: &str = "e.id, e.user_id, u.name, u.email, u.status, e.employee_code, e.gender,
    b.name AS branch_name, d.name AS department_name, g.name AS designation_name,
    s.name AS shift_name, e.date_of_joining, e.employment_type, e.employment_status";

/// Разрешённые колонки сортировки
fn sort_column(sort_by: Option<&str>) -> &'static str {
    match sort_by {
        Some("name") => "u.name",
        Some("email") => "u.email",
        Some("employee_code") | Some("employee_id") => "e.employee_code",
        Some("branch") => "b.name",
        Some("department") => "d.name",
        Some("designation") => "g.name",
        Some("date_of_joining") => "e.date_of_joining",
        Some("status") => "u.status",
        Some("created_at") => "e.created_at",
        _ => "e.id",
    }
}

fn list_filter(scope: &TenantScope, query: &EmployeeListQuery) -> Predicate {
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            Predicate::any([
                Predicate::like("u.name", s),
                Predicate::like("u.email", s),
                Predicate::like("e.employee_code", s),
                Predicate::like("e.phone", s),
            ])
        });

    let status = query
        .status
        .as_deref()
        .filter(|s| !s.eq_ignore_ascii_case("all"))
        .map(|s| Predicate::eq("u.status", RecordStatus::from_loose(s).as_str()));

    Predicate::all([
        Predicate::in_list("e.created_by", scope.owner_ids.iter().copied()),
        Predicate::optional(query.branch_id.map(|id| Predicate::eq("e.branch_id", id))),
        Predicate::optional(query.department_id.map(|id| Predicate::eq("e.department_id", id))),
        Predicate::optional(query.designation_id.map(|id| Predicate::eq("e.designation_id", id))),
        Predicate::optional(status),
        Predicate::optional(search),
    ])
}

fn map_list_row(r: &QueryResult) -> anyhow::Result<EmployeeListItem> {
    Ok(EmployeeListItem {
        id: row::id(r, "id")?,
        user_id: row::id(r, "user_id")?,
        name: row::text(r, "name")?.unwrap_or_default(),
        email: row::text(r, "email")?.unwrap_or_default(),
        status: RecordStatus::from_loose(&row::text(r, "status")?.unwrap_or_default()),
        employee_code: row::text(r, "employee_code")?.unwrap_or_default(),
        gender: row::text(r, "gender")?,
        branch: row::text(r, "branch_name")?,
        department: row::text(r, "department_name")?,
        designation: row::text(r, "designation_name")?,
        shift: row::text(r, "shift_name")?,
        date_of_joining: row::date(r, "date_of_joining")?,
        employment_type: row::text(r, "employment_type")?,
        employment_status: row::text(r, "employment_status")?,
    })
}

pub async fn list_page<C: ConnectionTrait>(
    conn: &C,
    scope: &TenantScope,
    query: &EmployeeListQuery,
) -> anyhow::Result<EmployeePage> {
    let page = query.page();
    let page_size = query.page_size();
    let filter = list_filter(scope, query).render();

    let count_row = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            format!("SELECT COUNT(*) AS total FROM {} WHERE {}", LIST_SOURCE, filter.sql),
            filter.params.clone(),
        ))
        .await?;
    let total = match count_row {
        Some(r) => row::id(&r, "total")? as u64,
        None => 0,
    };

    let direction = if query.sort_desc.unwrap_or(query.sort_by.is_none()) {
        "DESC"
    } else {
        "ASC"
    };
    let mut params = filter.params;
    params.push(paging::page_limit(page_size).into());
    params.push(paging::page_offset(page, page_size).into());

    let rows = conn
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            format!(
                "SELECT {} FROM {} WHERE {} ORDER BY {} {}, e.id {} LIMIT ? OFFSET ?",
                LIST_COLUMNS,
                LIST_SOURCE,
                filter.sql,
                sort_column(query.sort_by.as_deref()),
                direction,
                direction
            ),
            params,
        ))
        .await?;

    let items = rows.iter().map(map_list_row).collect::<anyhow::Result<Vec<_>>>()?;

    Ok(EmployeePage {
        items,
        total,
        page,
        page_size,
        total_pages: total.div_ceil(page_size).max(1),
    })
}

/// Карточка сотрудника с именами справочников
pub async fn get_details<C: ConnectionTrait>(
    conn: &C,
    scope: &TenantScope,
    id: i64,
) -> anyhow::Result<Option<EmployeeDetails>> {
    let Some(employee) = get_by_id(conn, scope, id).await? else {
        return Ok(None);
    };

    let r = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            format!("SELECT {} FROM {} WHERE e.id = ?", LIST_COLUMNS, LIST_SOURCE),
            [id.into()],
        ))
        .await?;
    let Some(r) = r else {
        return Ok(None);
    };
    let item = map_list_row(&r)?;

    Ok(Some(EmployeeDetails {
        employee,
        name: item.name,
        email: item.email,
        status: item.status,
        branch: item.branch,
        department: item.department,
        designation: item.designation,
        shift: item.shift,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::test_support::{insert as raw_insert, temp_database};
    use crate::system::users::repository::{self as users, NewUser};

    async fn seed_employee(
        db: &sea_orm::DatabaseConnection,
        name: &str,
        code: &str,
        owner: i64,
        branch_id: i64,
    ) -> Employee {
        let user_id = users::insert(
            db,
            &NewUser {
                name: name.into(),
                email: format!("{}@example.com", code.to_lowercase()),
                password_hash: "hash".into(),
                user_type: "employee".into(),
                lang: "en".into(),
                status: RecordStatus::Active,
                created_by: owner,
            },
        )
        .await
        .unwrap();

        insert(
            db,
            &NewEmployee {
                user_id,
                employee_code: code.into(),
                date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 12),
                gender: Gender::Male,
                branch_id,
                department_id: 1,
                designation_id: 1,
                shift_id: None,
                date_of_joining: NaiveDate::from_ymd_opt(2024, 1, 15),
                employment_type: Some("Full-time".into()),
                employment_status: Some("active".into()),
                national_id: Some("1234567890".into()),
                created_by: owner,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn code_existence_is_scoped_to_tenant() {
        let db = temp_database().await;
        seed_employee(&db, "John Doe", "EMP-1001", 1, 1).await;

        assert!(exists_by_code(&db, &TenantScope::single(1), "EMP-1001").await.unwrap());
        assert!(!exists_by_code(&db, &TenantScope::single(2), "EMP-1001").await.unwrap());
        assert!(!exists_by_code(&db, &TenantScope::single(1), "EMP-1002").await.unwrap());
    }

    #[tokio::test]
    async fn list_filters_searches_and_pages() {
        let db = temp_database().await;
        let branch = raw_insert(
            &db,
            "INSERT INTO branches (name, created_by) VALUES (?, ?)",
            vec!["Head Office".into(), 1i64.into()],
        )
        .await;
        seed_employee(&db, "John Doe", "EMP-1001", 1, branch).await;
        seed_employee(&db, "Sara Khan", "EMP-1002", 1, 999).await;
        seed_employee(&db, "Other Tenant", "EMP-2001", 2, branch).await;

        let scope = TenantScope::single(1);
        let page = list_page(&db, &scope, &EmployeeListQuery::default()).await.unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.items[0].employee_code, "EMP-1002");

        let query = EmployeeListQuery {
            search: Some("john".into()),
            ..Default::default()
        };
        let page = list_page(&db, &scope, &query).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].branch.as_deref(), Some("Head Office"));
        assert_eq!(page.items[0].date_of_joining, NaiveDate::from_ymd_opt(2024, 1, 15));

        let query = EmployeeListQuery {
            sort_by: Some("name".into()),
            page_size: Some(1),
            page: Some(2),
            ..Default::default()
        };
        let page = list_page(&db, &scope, &query).await.unwrap();
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Sara Khan");
    }

    #[tokio::test]
    async fn page_far_past_the_end_is_empty() {
        let db = temp_database().await;
        seed_employee(&db, "John Doe", "EMP-1001", 1, 1).await;

        let query = EmployeeListQuery {
            page: Some(u64::MAX),
            ..Default::default()
        };
        let page = list_page(&db, &TenantScope::single(1), &query).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.page, u64::MAX);
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn details_are_hidden_from_other_tenants() {
        let db = temp_database().await;
        let employee = seed_employee(&db, "John Doe", "EMP-1001", 1, 1).await;

        let details = get_details(&db, &TenantScope::single(1), employee.id.0).await.unwrap();
        assert_eq!(details.map(|d| d.name), Some("John Doe".to_string()));

        let hidden = get_details(&db, &TenantScope::single(2), employee.id.0).await.unwrap();
        assert!(hidden.is_none());
    }
}
