use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ReportEmployee;

/// Заявление об увольнении по собственному желанию
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResignationReportRow {
    pub id: i64,
    pub employee: ReportEmployee,
    pub resignation_date: Option<NaiveDate>,
    pub last_working_day: Option<NaiveDate>,
    pub notice_period: Option<i64>,
    pub reason: Option<String>,
    pub status: Option<String>,
    pub approved_by: Option<String>,
}

/// Увольнение по инициативе работодателя
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminationReportRow {
    pub id: i64,
    pub employee: ReportEmployee,
    pub termination_type: Option<String>,
    pub termination_date: Option<NaiveDate>,
    pub notice_date: Option<NaiveDate>,
    pub notice_period: Option<i64>,
    pub reason: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub approved_by: Option<String>,
}

/// Статистика отчётов об увольнениях (оба вида)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeparationStats {
    pub total: u64,
    pub pending: u64,
    pub approved: u64,
    /// Средний срок уведомления в днях, округлённый до 0.1
    pub average_notice_period: f64,
}
