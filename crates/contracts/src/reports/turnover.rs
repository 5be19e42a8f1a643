use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnoverStats {
    pub headcount: u64,
    pub average_headcount: f64,
    pub hires: u64,
    pub separations: u64,
    /// Процент: separations / average_headcount * 100
    pub turnover_rate: f64,
}

/// Точка помесячного ряда текучести
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnoverMonth {
    /// "Jan 2025"
    pub month: String,
    pub hires: u64,
    pub separations: u64,
    pub turnover_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnoverEventKind {
    Hire,
    Resignation,
    Termination,
}

/// Событие найма или увольнения
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnoverEvent {
    pub kind: TurnoverEventKind,
    pub name: Option<String>,
    pub email: Option<String>,
    pub branch: Option<String>,
    pub department: Option<String>,
    /// Дата найма / последний рабочий день / дата увольнения
    pub date: Option<NaiveDate>,
    /// Дата подачи заявления (только для resignation)
    pub notice_date: Option<NaiveDate>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnoverReport {
    pub stats: TurnoverStats,
    pub monthly: Vec<TurnoverMonth>,
    pub recent_hires: Vec<TurnoverEvent>,
    pub recent_separations: Vec<TurnoverEvent>,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}
