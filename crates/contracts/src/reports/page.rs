use serde::{Deserialize, Serialize};

/// Страница записей отчёта
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportPage<T> {
    pub data: Vec<T>,
    pub current_page: u64,
    pub per_page: u64,
    pub total: u64,
    pub last_page: u64,
}

impl<T> ReportPage<T> {
    pub fn new(data: Vec<T>, current_page: u64, per_page: u64, total: u64) -> Self {
        let per_page = per_page.max(1);
        Self {
            data,
            current_page,
            per_page,
            total,
            last_page: total.div_ceil(per_page).max(1),
        }
    }
}

/// Отчёт: страница записей + агрегированная статистика по всему отбору
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report<T, S> {
    pub records: ReportPage<T>,
    pub stats: S,
}
