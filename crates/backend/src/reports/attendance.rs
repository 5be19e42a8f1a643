//! Absence and lateness reports over attendance records.

use async_trait::async_trait;
use chrono::NaiveDate;
use contracts::domain::common::TenantScope;
use contracts::reports::attendance::{AbsenceStats, AttendanceReportRow, LatenessStats};
use contracts::reports::ReportFilters;
use sea_orm::{ConnectionTrait, QueryResult};

use super::common::{self, date_cell, dash, employee_cells, month_end, month_start, round_to};
use super::query::{self, ReportSource};
use super::TabularReport;
use crate::shared::data::predicate::Predicate;
use crate::shared::data::row;

const SOURCE: ReportSource = ReportSource {
    table: "attendance_records",
    joins: "
    LEFT JOIN shifts s ON s.id = r.shift_id",
    columns: "s.name AS shift_name, s.start_time AS shift_start, r.date, r.status,
    r.check_in, r.late_minutes, r.notes",
    order_by: "r.date DESC, r.id DESC",
};

fn map_row(r: &QueryResult) -> anyhow::Result<AttendanceReportRow> {
    Ok(AttendanceReportRow {
        id: row::id(r, "id")?,
        employee: common::map_employee(r)?,
        shift: row::text(r, "shift_name")?,
        shift_start: row::text(r, "shift_start")?,
        date: row::date(r, "date")?,
        status: row::text(r, "status")?,
        check_in: row::text(r, "check_in")?,
        late_minutes: row::int(r, "late_minutes")?,
        notes: row::text(r, "notes")?,
    })
}

fn attendance_filter(filters: &ReportFilters, scope: &TenantScope, kind: Predicate) -> Predicate {
    Predicate::all([
        common::base(filters, scope, &[]),
        kind,
        common::date_range(filters, "r.date"),
    ])
}

/// (total, unique employees, average per employee, this month)
async fn attendance_stats<C: ConnectionTrait>(
    conn: &C,
    filter: &Predicate,
    today: NaiveDate,
) -> anyhow::Result<(u64, u64, f64, u64)> {
    let total = query::count(conn, &SOURCE, filter).await?;
    let unique = query::count_distinct(conn, &SOURCE, "r.employee_id", filter).await?;
    let average = if unique > 0 {
        round_to(total as f64 / unique as f64, 2)
    } else {
        0.0
    };
    let this_month = filter
        .clone()
        .and(Predicate::date_between("r.date", month_start(today), month_end(today)));
    let current_month = query::count(conn, &SOURCE, &this_month).await?;
    Ok((total, unique, average, current_month))
}

fn check_in_cell(value: Option<&str>) -> String {
    // stored either as HH:MM[:SS] or as a full datetime
    match value {
        Some(v) => v
            .rsplit(|c: char| c == ' ' || c == 'T')
            .next()
            .map(|time| time.get(..8).unwrap_or(time).to_string())
            .unwrap_or_else(|| v.to_string()),
        None => "-".to_string(),
    }
}

pub struct AbsenceReport;

#[async_trait]
impl TabularReport for AbsenceReport {
    type Row = AttendanceReportRow;
    type Stats = AbsenceStats;

    const SOURCE: ReportSource = SOURCE;
    const EXPORT_HEADER: &'static [&'static str] = &[
        "Employee Name",
        "Employee Email",
        "Branch",
        "Department",
        "Shift",
        "Date",
        "Status",
        "Notes",
    ];

    fn filter(filters: &ReportFilters, scope: &TenantScope, _today: NaiveDate) -> Predicate {
        let absent = Predicate::any([
            Predicate::raw("r.is_absent = 1", vec![]),
            Predicate::eq("r.status", "absent"),
        ]);
        attendance_filter(filters, scope, absent)
    }

    fn map_row(row: &QueryResult) -> anyhow::Result<Self::Row> {
        map_row(row)
    }

    fn export_record(row: &Self::Row) -> Vec<String> {
        let mut cells = employee_cells(&row.employee);
        cells.extend([
            dash(row.shift.as_deref()),
            date_cell(row.date),
            "Absent".to_string(),
            row.notes.clone().unwrap_or_default(),
        ]);
        cells
    }

    async fn stats<C: ConnectionTrait>(
        conn: &C,
        filter: &Predicate,
        _scope: &TenantScope,
        today: NaiveDate,
    ) -> anyhow::Result<Self::Stats> {
        let (total, unique, average, current_month) = attendance_stats(conn, filter, today).await?;
        Ok(AbsenceStats {
            total_absences: total,
            unique_employees: unique,
            avg_absences: average,
            current_month,
        })
    }
}

pub struct LatenessReport;

#[async_trait]
impl TabularReport for LatenessReport {
    type Row = AttendanceReportRow;
    type Stats = LatenessStats;

    const SOURCE: ReportSource = SOURCE;
    const EXPORT_HEADER: &'static [&'static str] = &[
        "Employee Name",
        "Employee Email",
        "Branch",
        "Department",
        "Shift",
        "Date",
        "Check In",
        "Expected Time",
        "Late Minutes",
        "Notes",
    ];

    fn filter(filters: &ReportFilters, scope: &TenantScope, _today: NaiveDate) -> Predicate {
        attendance_filter(filters, scope, Predicate::raw("r.is_late = 1", vec![]))
    }

    fn map_row(row: &QueryResult) -> anyhow::Result<Self::Row> {
        map_row(row)
    }

    fn export_record(row: &Self::Row) -> Vec<String> {
        let mut cells = employee_cells(&row.employee);
        cells.extend([
            dash(row.shift.as_deref()),
            date_cell(row.date),
            check_in_cell(row.check_in.as_deref()),
            dash(row.shift_start.as_deref()),
            row.late_minutes.unwrap_or(0).to_string(),
            row.notes.clone().unwrap_or_default(),
        ]);
        cells
    }

    async fn stats<C: ConnectionTrait>(
        conn: &C,
        filter: &Predicate,
        _scope: &TenantScope,
        today: NaiveDate,
    ) -> anyhow::Result<Self::Stats> {
        let (total, unique, average, current_month) = attendance_stats(conn, filter, today).await?;
        Ok(LatenessStats {
            total_late_days: total,
            unique_employees: unique,
            avg_late_days: average,
            current_month,
        })
    }
}
