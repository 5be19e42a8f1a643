use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ReportEmployee;

/// Дисциплинарное предупреждение
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarningReportRow {
    pub id: i64,
    pub employee: ReportEmployee,
    pub subject: Option<String>,
    pub warning_type: Option<String>,
    pub severity: Option<String>,
    pub warning_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub issued_by: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WarningStats {
    pub total_warnings: u64,
    /// Статусы draft и issued
    pub open_warnings: u64,
    pub acknowledged_warnings: u64,
    pub expired_warnings: u64,
}

/// Уровни предупреждений для фильтра
pub const WARNING_SEVERITIES: [&str; 3] = ["verbal", "written", "final"];
