use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::a001_branch::aggregate::BranchId;
use crate::domain::a002_department::aggregate::DepartmentId;
use crate::domain::a003_designation::aggregate::DesignationId;
use crate::domain::a004_shift::aggregate::ShiftId;
use crate::domain::common::{AggregateRoot, EntityMetadata, RecordStatus};
use crate::shared::options::NamedOption;
use crate::shared::query::empty_string_as_none;

crate::aggregate_id!(EmployeeId);

// ============================================================================
// Value objects
// ============================================================================

/// Пол сотрудника
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }

    /// Нормализация значения из файла импорта:
    /// male|m|man → male, female|f|woman → female, иначе other
    pub fn from_loose(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "male" | "m" | "man" => Gender::Male,
            "female" | "f" | "woman" => Gender::Female,
            _ => Gender::Other,
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Сотрудник: HR-профиль, привязанный к учётной записи пользователя
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    /// Учётная запись пользователя (1:1)
    pub user_id: i64,
    /// Табельный номер, уникален в пределах тенанта
    pub employee_code: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Gender,
    pub phone: Option<String>,
    pub branch_id: Option<BranchId>,
    pub department_id: Option<DepartmentId>,
    pub designation_id: Option<DesignationId>,
    pub shift_id: Option<ShiftId>,
    pub date_of_joining: Option<NaiveDate>,
    pub employment_type: Option<String>,
    pub employment_status: Option<String>,
    pub national_id: Option<String>,
    pub metadata: EntityMetadata,
}

impl AggregateRoot for Employee {
    type Id = EmployeeId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.employee_code
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    fn aggregate_index() -> &'static str {
        "a005"
    }

    fn table_name() -> &'static str {
        "employees"
    }

    fn element_name() -> &'static str {
        "Employee"
    }

    fn list_name() -> &'static str {
        "Employees"
    }
}

// ============================================================================
// Directory DTOs
// ============================================================================

/// Строка списка сотрудников (сотрудник + учётная запись + справочники)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeListItem {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub status: RecordStatus,
    pub employee_code: String,
    pub gender: Option<String>,
    pub branch: Option<String>,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub shift: Option<String>,
    pub date_of_joining: Option<NaiveDate>,
    pub employment_type: Option<String>,
    pub employment_status: Option<String>,
}

/// Карточка сотрудника
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeDetails {
    pub employee: Employee,
    pub name: String,
    pub email: String,
    pub status: RecordStatus,
    pub branch: Option<String>,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub shift: Option<String>,
}

/// Параметры запроса списка сотрудников
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeListQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub branch_id: Option<i64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub department_id: Option<i64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub designation_id: Option<i64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub sort_by: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub sort_desc: Option<bool>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub page: Option<u64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub page_size: Option<u64>,
}

impl EmployeeListQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn page_size(&self) -> u64 {
        self.page_size.unwrap_or(10).clamp(1, 100)
    }
}

/// Страница списка сотрудников
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeePage {
    pub items: Vec<EmployeeListItem>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordDto {
    pub new_password: String,
}

/// Значения для фильтров списка сотрудников
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeFilterOptions {
    pub branches: Vec<NamedOption>,
    pub departments: Vec<NamedOption>,
    pub designations: Vec<NamedOption>,
    pub shifts: Vec<NamedOption>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_gender_spellings() {
        assert_eq!(Gender::from_loose("M"), Gender::Male);
        assert_eq!(Gender::from_loose(" man "), Gender::Male);
        assert_eq!(Gender::from_loose("Female"), Gender::Female);
        assert_eq!(Gender::from_loose("f"), Gender::Female);
        assert_eq!(Gender::from_loose("WOMAN"), Gender::Female);
        assert_eq!(Gender::from_loose("x"), Gender::Other);
        assert_eq!(Gender::from_loose("non-binary"), Gender::Other);
    }

    #[test]
    fn list_query_clamps_paging() {
        let query = EmployeeListQuery {
            page: Some(0),
            page_size: Some(500),
            ..Default::default()
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.page_size(), 100);
        assert_eq!(EmployeeListQuery::default().page_size(), 10);
    }
}
