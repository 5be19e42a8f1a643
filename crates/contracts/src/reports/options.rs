use serde::{Deserialize, Serialize};

use crate::shared::options::NamedOption;

/// Сотрудник в фильтре отчётов
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeOption {
    /// users.id
    pub id: i64,
    pub name: String,
    /// Табельный номер, если есть HR-профиль
    pub code: Option<String>,
}

/// Значения фильтров для всех HR-отчётов
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportOptions {
    pub branches: Vec<NamedOption>,
    pub departments: Vec<NamedOption>,
    pub employees: Vec<EmployeeOption>,
    pub leave_types: Vec<NamedOption>,
    pub contract_types: Vec<NamedOption>,
    pub training_programs: Vec<NamedOption>,
    pub warning_types: Vec<String>,
    pub termination_types: Vec<String>,
    pub severities: Vec<String>,
}
