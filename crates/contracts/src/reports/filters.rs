use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::query::empty_string_as_none;

pub const DEFAULT_PER_PAGE: u64 = 10;
pub const MIN_PER_PAGE: u64 = 5;
pub const MAX_PER_PAGE: u64 = 100;

/// Фильтры HR-отчётов (общие для всех видов; каждый отчёт берёт нужные)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportFilters {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub branch_id: Option<i64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub department_id: Option<i64>,
    /// Учётная запись сотрудника (users.id)
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub employee_id: Option<i64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub severity: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub warning_type: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub leave_type_id: Option<i64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub contract_type_id: Option<i64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub training_program_id: Option<i64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub termination_type: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub date_from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub date_to: Option<NaiveDate>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub page: Option<u64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub per_page: Option<u64>,
}

/// Значение фильтра-перечисления: пустое и "all" означают "без фильтра"
fn selected(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}

impl ReportFilters {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(MIN_PER_PAGE, MAX_PER_PAGE)
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn status_filter(&self) -> Option<&str> {
        selected(&self.status)
    }

    pub fn severity_filter(&self) -> Option<&str> {
        selected(&self.severity)
    }

    pub fn warning_type_filter(&self) -> Option<&str> {
        selected(&self.warning_type)
    }

    pub fn termination_type_filter(&self) -> Option<&str> {
        selected(&self.termination_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_page_is_clamped() {
        let mut filters = ReportFilters::default();
        assert_eq!(filters.per_page(), 10);
        filters.per_page = Some(1);
        assert_eq!(filters.per_page(), 5);
        filters.per_page = Some(1000);
        assert_eq!(filters.per_page(), 100);
    }

    #[test]
    fn all_means_no_filter() {
        let filters = ReportFilters {
            status: Some("all".into()),
            severity: Some(" major ".into()),
            search: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(filters.status_filter(), None);
        assert_eq!(filters.severity_filter(), Some("major"));
        assert_eq!(filters.search_term(), None);
    }
}
