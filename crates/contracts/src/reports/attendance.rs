use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ReportEmployee;

/// Запись посещаемости в отчётах об отсутствиях и опозданиях
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceReportRow {
    pub id: i64,
    pub employee: ReportEmployee,
    pub shift: Option<String>,
    /// Плановое начало смены, "HH:MM"
    pub shift_start: Option<String>,
    pub date: Option<NaiveDate>,
    pub status: Option<String>,
    pub check_in: Option<String>,
    pub late_minutes: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AbsenceStats {
    pub total_absences: u64,
    pub unique_employees: u64,
    pub avg_absences: f64,
    pub current_month: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatenessStats {
    pub total_late_days: u64,
    pub unique_employees: u64,
    pub avg_late_days: f64,
    pub current_month: u64,
}
