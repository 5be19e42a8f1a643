use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ReportEmployee;

/// Заявка на отпуск (отчёты по отпускам и больничным)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveReportRow {
    pub id: i64,
    pub employee: ReportEmployee,
    pub leave_type: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub total_days: Option<f64>,
    pub status: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeaveStats {
    pub total_requests: u64,
    pub approved_requests: u64,
    pub pending_requests: u64,
    pub total_days: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MedicalExcuseStats {
    pub total_requests: u64,
    pub approved_requests: u64,
    pub pending_requests: u64,
}
