use serde::{Deserialize, Serialize};

/// Сотрудник в строке отчёта (учётная запись + HR-профиль + справочники)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportEmployee {
    pub user_id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub employee_code: Option<String>,
    pub branch: Option<String>,
    pub department: Option<String>,
}
