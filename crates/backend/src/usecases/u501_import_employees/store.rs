use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use contracts::domain::a005_employee::aggregate::Gender;
use contracts::domain::common::{RecordStatus, TenantScope};
use contracts::system::users::{DEFAULT_ACCOUNT_LANG, EMPLOYEE_ACCOUNT_TYPE};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::domain::a005_employee::repository::{self as employees, NewEmployee};
use crate::domain::reference::{self, ReferenceKind};
use crate::system::auth::password;
use crate::system::users::repository::{self as users, NewUser};

/// Строка импорта после проверки и разрешения ссылок
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEmployeeDraft {
    pub employee_code: String,
    pub name: String,
    /// Если не указан, создаётся служебный адрес
    pub email: Option<String>,
    /// Если не указан, генерируется случайный
    pub password: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Gender,
    pub branch_id: i64,
    pub department_id: i64,
    pub designation_id: i64,
    pub shift_id: Option<i64>,
    pub date_of_joining: Option<NaiveDate>,
    pub employment_type: Option<String>,
    pub employment_status: Option<String>,
    pub status: RecordStatus,
    pub national_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedEmployee {
    pub employee_id: i64,
    pub user_id: i64,
    pub email: String,
}

/// Хранилище, с которым работает импорт сотрудников
#[async_trait]
pub trait EmployeeImportStore: Send + Sync {
    /// Занят ли табельный номер у тенанта
    async fn employee_code_exists(&self, scope: &TenantScope, code: &str) -> anyhow::Result<bool>;

    /// Id справочной записи тенанта по id или названию
    async fn resolve_reference(
        &self,
        kind: ReferenceKind,
        scope: &TenantScope,
        value: &str,
    ) -> anyhow::Result<Option<i64>>;

    /// Атомарно создать учётную запись и карточку сотрудника
    async fn create_employee(
        &self,
        scope: &TenantScope,
        draft: &ResolvedEmployeeDraft,
    ) -> anyhow::Result<CreatedEmployee>;
}

/// Хранилище поверх SQLite
pub struct SeaOrmImportStore {
    db: DatabaseConnection,
}

impl SeaOrmImportStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EmployeeImportStore for SeaOrmImportStore {
    async fn employee_code_exists(&self, scope: &TenantScope, code: &str) -> anyhow::Result<bool> {
        employees::exists_by_code(&self.db, scope, code).await
    }

    async fn resolve_reference(
        &self,
        kind: ReferenceKind,
        scope: &TenantScope,
        value: &str,
    ) -> anyhow::Result<Option<i64>> {
        reference::resolve(&self.db, kind, scope, value).await
    }

    async fn create_employee(
        &self,
        scope: &TenantScope,
        draft: &ResolvedEmployeeDraft,
    ) -> anyhow::Result<CreatedEmployee> {
        // Хеш считается до транзакции, чтобы не держать её открытой
        let plain = draft
            .password
            .clone()
            .unwrap_or_else(password::generate_password);
        let password_hash = password::hash_password(&plain)?;
        let email = draft
            .email
            .clone()
            .unwrap_or_else(|| placeholder_email(&draft.employee_code));

        let txn = self.db.begin().await?;

        let user_id = users::insert(
            &txn,
            &NewUser {
                name: draft.name.clone(),
                email: email.clone(),
                password_hash,
                user_type: EMPLOYEE_ACCOUNT_TYPE.to_string(),
                lang: DEFAULT_ACCOUNT_LANG.to_string(),
                status: draft.status,
                created_by: scope.creator_id,
            },
        )
        .await?;

        let employee = employees::insert(
            &txn,
            &NewEmployee {
                user_id,
                employee_code: draft.employee_code.clone(),
                date_of_birth: draft.date_of_birth,
                gender: draft.gender,
                branch_id: draft.branch_id,
                department_id: draft.department_id,
                designation_id: draft.designation_id,
                shift_id: draft.shift_id,
                date_of_joining: draft.date_of_joining,
                employment_type: draft.employment_type.clone(),
                employment_status: draft.employment_status.clone(),
                national_id: draft.national_id.clone(),
                created_by: scope.creator_id,
            },
        )
        .await
        .context("Failed to insert employee profile")?;

        txn.commit().await?;

        Ok(CreatedEmployee {
            employee_id: employee.id.0,
            user_id,
            email,
        })
    }
}

/// `<slug(code)>.<8 hex>@employees.invalid`
pub fn placeholder_email(employee_code: &str) -> String {
    let slug: String = employee_code
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    let slug = slug.trim_matches('-');
    let slug = if slug.is_empty() { "employee" } else { slug };
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{}.{}@employees.invalid", slug, &suffix[..8])
}
