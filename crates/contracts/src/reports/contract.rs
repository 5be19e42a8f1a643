use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ReportEmployee;

/// Трудовой договор сотрудника
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractReportRow {
    pub id: i64,
    pub employee: ReportEmployee,
    pub contract_type: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Длительность договора в днях, если известны обе даты
    pub duration_days: Option<i64>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpiredContractStats {
    pub total_expired: u64,
    /// Договоры, истекающие в ближайшие 30 дней (без учёта фильтров)
    pub expiring_soon: u64,
    pub average_tenure_days: i64,
}
