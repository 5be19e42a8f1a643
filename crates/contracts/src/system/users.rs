use serde::{Deserialize, Serialize};

use crate::domain::common::RecordStatus;

/// Тип учётной записи, создаваемой при импорте сотрудников
pub const EMPLOYEE_ACCOUNT_TYPE: &str = "employee";
/// Язык интерфейса по умолчанию для новых учётных записей
pub const DEFAULT_ACCOUNT_LANG: &str = "en";
/// Минимальная длина пароля при смене администратором
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Учётная запись пользователя (без хеша пароля)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub user_type: String,
    pub lang: String,
    pub status: RecordStatus,
    pub created_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
