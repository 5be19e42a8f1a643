use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ReportEmployee;

/// Назначение сотрудника на программу обучения
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReportRow {
    pub id: i64,
    pub employee: ReportEmployee,
    pub training_program: Option<String>,
    pub assigned_date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingStats {
    pub total_assigned: u64,
    pub completed: u64,
    pub in_progress: u64,
    pub failed: u64,
}
