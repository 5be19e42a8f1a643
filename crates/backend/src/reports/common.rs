//! Building blocks shared by the tabular reports.
//!
//! Every report reads one record table aliased `r` whose `employee_id`
//! points at the employee's account (`users.id`). The account, the HR
//! profile and its branch/department are joined as `u`, `e`, `b`, `d`.

use chrono::{Datelike, Months, NaiveDate};
use contracts::domain::common::TenantScope;
use contracts::reports::{ReportEmployee, ReportFilters};
use sea_orm::QueryResult;

use crate::shared::data::predicate::Predicate;
use crate::shared::data::row;

pub const EMPLOYEE_JOINS: &str = "
    LEFT JOIN users u ON u.id = r.employee_id
    LEFT JOIN employees e ON e.user_id = r.employee_id
    LEFT JOIN branches b ON b.id = e.branch_id
    LEFT JOIN departments d ON d.id = e.department_id";

pub const EMPLOYEE_COLUMNS: &str = "u.id AS employee_user_id, u.name AS employee_name,
    u.email AS employee_email, e.employee_code AS employee_code,
    b.name AS branch_name, d.name AS department_name";

pub const NOT_ASSIGNED: &str = "Not Assigned";

pub fn map_employee(r: &QueryResult) -> anyhow::Result<ReportEmployee> {
    Ok(ReportEmployee {
        user_id: row::int(r, "employee_user_id")?,
        name: row::text(r, "employee_name")?,
        email: row::text(r, "employee_email")?,
        employee_code: row::text(r, "employee_code")?,
        branch: row::text(r, "branch_name")?,
        department: row::text(r, "department_name")?,
    })
}

// ============================================================================
// Predicates
// ============================================================================

pub fn tenant(scope: &TenantScope) -> Predicate {
    Predicate::in_list("r.created_by", scope.owner_ids.iter().copied())
}

/// Record's employee, profile branch, profile department
pub fn employee_filters(filters: &ReportFilters) -> Predicate {
    Predicate::all([
        Predicate::optional(filters.employee_id.map(|id| Predicate::eq("r.employee_id", id))),
        Predicate::optional(filters.branch_id.map(|id| Predicate::eq("e.branch_id", id))),
        Predicate::optional(filters.department_id.map(|id| Predicate::eq("e.department_id", id))),
    ])
}

/// Account name or e-mail, plus report-specific columns
pub fn search(filters: &ReportFilters, extra_columns: &[&str]) -> Predicate {
    Predicate::optional(filters.search_term().map(|term| {
        Predicate::any(
            ["u.name", "u.email"]
                .iter()
                .chain(extra_columns)
                .map(|column| Predicate::like(column, term)),
        )
    }))
}

pub fn date_range(filters: &ReportFilters, column: &str) -> Predicate {
    Predicate::all([
        Predicate::optional(filters.date_from.map(|d| Predicate::date_gte(column, d))),
        Predicate::optional(filters.date_to.map(|d| Predicate::date_lte(column, d))),
    ])
}

pub fn status(filters: &ReportFilters) -> Predicate {
    Predicate::optional(filters.status_filter().map(|s| Predicate::eq("r.status", s)))
}

/// Tenant + employee filters + search
pub fn base(filters: &ReportFilters, scope: &TenantScope, extra_search: &[&str]) -> Predicate {
    Predicate::all([
        tenant(scope),
        employee_filters(filters),
        search(filters, extra_search),
    ])
}

// ============================================================================
// Dates and numbers
// ============================================================================

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn month_end(date: NaiveDate) -> NaiveDate {
    month_start(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

// ============================================================================
// CSV cells
// ============================================================================

/// Name, e-mail, branch, department
pub fn employee_cells(employee: &ReportEmployee) -> Vec<String> {
    vec![
        employee.name.clone().unwrap_or_default(),
        employee.email.clone().unwrap_or_default(),
        employee.branch.clone().unwrap_or_else(|| NOT_ASSIGNED.to_string()),
        employee.department.clone().unwrap_or_else(|| NOT_ASSIGNED.to_string()),
    ]
}

pub fn dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

pub fn date_cell(value: Option<NaiveDate>) -> String {
    value
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn ucfirst(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Capitalised status, `default` when absent
pub fn status_cell(value: Option<&str>, default: &str) -> String {
    ucfirst(value.unwrap_or(default))
}
