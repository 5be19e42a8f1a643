use contracts::domain::a005_employee::aggregate::{
    ChangePasswordDto, EmployeeDetails, EmployeeFilterOptions, EmployeeListQuery, EmployeePage,
};
use contracts::domain::common::{RecordStatus, TenantScope};
use contracts::usecases::u501_import_employees::PlanQuota;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use super::repository;
use crate::domain::reference::{self, ReferenceKind};
use crate::system::auth::password;
use crate::system::users::repository as users;

/// Ошибки операций справочника сотрудников
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Employee not found")]
    NotFound,
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub async fn list<C: ConnectionTrait>(
    conn: &C,
    scope: &TenantScope,
    query: &EmployeeListQuery,
) -> anyhow::Result<EmployeePage> {
    repository::list_page(conn, scope, query).await
}

pub async fn get<C: ConnectionTrait>(
    conn: &C,
    scope: &TenantScope,
    id: i64,
) -> anyhow::Result<Option<EmployeeDetails>> {
    repository::get_details(conn, scope, id).await
}

/// Переключить статус учётной записи сотрудника (active ⇄ inactive)
pub async fn toggle_status<C: ConnectionTrait>(
    conn: &C,
    scope: &TenantScope,
    id: i64,
) -> Result<RecordStatus, DirectoryError> {
    let employee = repository::get_by_id(conn, scope, id)
        .await?
        .ok_or(DirectoryError::NotFound)?;
    let account = users::get_by_id(conn, employee.user_id)
        .await?
        .ok_or(DirectoryError::NotFound)?;

    let next = account.status.toggled();
    users::set_status(conn, account.id, next).await?;
    tracing::info!(
        "Employee {} ({}) status changed to {}",
        employee.employee_code,
        account.email,
        next
    );
    Ok(next)
}

/// Смена пароля сотрудника администратором
pub async fn change_password<C: ConnectionTrait>(
    conn: &C,
    scope: &TenantScope,
    id: i64,
    dto: &ChangePasswordDto,
) -> Result<(), DirectoryError> {
    password::validate_password_strength(&dto.new_password)
        .map_err(|e| DirectoryError::Validation(e.to_string()))?;

    let employee = repository::get_by_id(conn, scope, id)
        .await?
        .ok_or(DirectoryError::NotFound)?;

    let hash = password::hash_password(&dto.new_password)?;
    if !users::set_password_hash(conn, employee.user_id, &hash).await? {
        return Err(DirectoryError::NotFound);
    }
    tracing::info!("Password changed for employee {}", employee.employee_code);
    Ok(())
}

/// Удаление сотрудника вместе с учётной записью (одна транзакция)
pub async fn delete(
    db: &DatabaseConnection,
    scope: &TenantScope,
    id: i64,
) -> Result<(), DirectoryError> {
    let employee = repository::get_by_id(db, scope, id)
        .await?
        .ok_or(DirectoryError::NotFound)?;

    let txn = db.begin().await.map_err(anyhow::Error::from)?;
    repository::delete(&txn, employee.id.0).await?;
    users::delete(&txn, employee.user_id).await?;
    txn.commit().await.map_err(anyhow::Error::from)?;

    tracing::info!("Employee {} deleted", employee.employee_code);
    Ok(())
}

/// Значения фильтров списка сотрудников
pub async fn filter_options<C: ConnectionTrait>(
    conn: &C,
    scope: &TenantScope,
) -> anyhow::Result<EmployeeFilterOptions> {
    Ok(EmployeeFilterOptions {
        branches: reference::list_names(conn, ReferenceKind::Branch, scope).await?,
        departments: reference::list_names(conn, ReferenceKind::Department, scope).await?,
        designations: reference::list_names(conn, ReferenceKind::Designation, scope).await?,
        shifts: reference::list_names(conn, ReferenceKind::Shift, scope).await?,
    })
}

/// Лимит тарифа для тенанта; `None`, если тариф безлимитный
pub async fn plan_quota<C: ConnectionTrait>(
    conn: &C,
    scope: &TenantScope,
    max_employees: Option<i64>,
) -> anyhow::Result<Option<PlanQuota>> {
    let Some(max) = max_employees else {
        return Ok(None);
    };
    let current = users::count_employee_accounts(conn, scope).await?;
    Ok(Some(PlanQuota::new(max, current)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a005_employee::repository::NewEmployee;
    use crate::shared::data::test_support::temp_database;
    use crate::system::users::repository::NewUser;
    use contracts::domain::a005_employee::aggregate::Gender;

    async fn seed(db: &DatabaseConnection, code: &str, owner: i64) -> i64 {
        let user_id = users::insert(
            db,
            &NewUser {
                name: format!("Employee {}", code),
                email: format!("{}@example.com", code.to_lowercase()),
                password_hash: password::hash_password("initial-pass").unwrap(),
                user_type: "employee".into(),
                lang: "en".into(),
                status: RecordStatus::Active,
                created_by: owner,
            },
        )
        .await
        .unwrap();
        repository::insert(
            db,
            &NewEmployee {
                user_id,
                employee_code: code.into(),
                date_of_birth: None,
                gender: Gender::Female,
                branch_id: 1,
                department_id: 1,
                designation_id: 1,
                shift_id: None,
                date_of_joining: None,
                employment_type: None,
                employment_status: None,
                national_id: None,
                created_by: owner,
            },
        )
        .await
        .unwrap()
        .id
        .0
    }

    #[tokio::test]
    async fn toggle_status_flips_account_state() {
        let db = temp_database().await;
        let id = seed(&db, "EMP-1", 1).await;
        let scope = TenantScope::single(1);

        assert_eq!(toggle_status(&db, &scope, id).await.unwrap(), RecordStatus::Inactive);
        assert_eq!(toggle_status(&db, &scope, id).await.unwrap(), RecordStatus::Active);
        assert!(matches!(
            toggle_status(&db, &TenantScope::single(2), id).await,
            Err(DirectoryError::NotFound)
        ));
    }

    #[tokio::test]
    async fn change_password_validates_and_rehashes() {
        let db = temp_database().await;
        let id = seed(&db, "EMP-1", 1).await;
        let scope = TenantScope::single(1);

        let short = ChangePasswordDto {
            new_password: "short".into(),
        };
        assert!(matches!(
            change_password(&db, &scope, id, &short).await,
            Err(DirectoryError::Validation(_))
        ));

        let dto = ChangePasswordDto {
            new_password: "a much longer one".into(),
        };
        change_password(&db, &scope, id, &dto).await.unwrap();

        let details = get(&db, &scope, id).await.unwrap().unwrap();
        let hash = users::get_password_hash(&db, details.employee.user_id)
            .await
            .unwrap()
            .unwrap();
        assert!(password::verify_password("a much longer one", &hash).unwrap());
    }

    #[tokio::test]
    async fn delete_removes_profile_and_account() {
        let db = temp_database().await;
        let id = seed(&db, "EMP-1", 1).await;
        let scope = TenantScope::single(1);
        let user_id = get(&db, &scope, id).await.unwrap().unwrap().employee.user_id;

        delete(&db, &scope, id).await.unwrap();

        assert!(get(&db, &scope, id).await.unwrap().is_none());
        assert!(users::get_by_id(&db, user_id).await.unwrap().is_none());
        assert!(matches!(
            delete(&db, &scope, id).await,
            Err(DirectoryError::NotFound)
        ));
    }

    #[tokio::test]
    async fn plan_quota_counts_existing_accounts() {
        let db = temp_database().await;
        seed(&db, "EMP-1", 1).await;
        seed(&db, "EMP-2", 1).await;
        let scope = TenantScope::single(1);

        assert_eq!(plan_quota(&db, &scope, None).await.unwrap(), None);
        let quota = plan_quota(&db, &scope, Some(5)).await.unwrap().unwrap();
        assert_eq!(quota.current, 2);
        assert_eq!(quota.remaining, 3);
    }
}
