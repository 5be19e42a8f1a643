//! Leave requests and the medical-excuse subset of them.

use async_trait::async_trait;
use chrono::NaiveDate;
use contracts::domain::common::TenantScope;
use contracts::reports::leave::{LeaveReportRow, LeaveStats, MedicalExcuseStats};
use contracts::reports::ReportFilters;
use sea_orm::{ConnectionTrait, QueryResult};

use super::common::{self, date_cell, dash, employee_cells, status_cell};
use super::query::{self, ReportSource};
use super::TabularReport;
use crate::shared::data::predicate::Predicate;
use crate::shared::data::row;

const SOURCE: ReportSource = ReportSource {
    table: "leave_applications",
    joins: "
    LEFT JOIN leave_types lt ON lt.id = r.leave_type_id",
    columns: "lt.name AS leave_type, r.start_date, r.end_date,
    CAST(r.total_days AS REAL) AS total_days, r.status, r.reason",
    order_by: "r.start_date DESC, r.id DESC",
};

const EXPORT_HEADER: &[&str] = &[
    "Employee Name",
    "Employee Email",
    "Branch",
    "Department",
    "Leave Type",
    "Start Date",
    "End Date",
    "Total Days",
    "Status",
    "Reason",
];

fn map_row(r: &QueryResult) -> anyhow::Result<LeaveReportRow> {
    Ok(LeaveReportRow {
        id: row::id(r, "id")?,
        employee: common::map_employee(r)?,
        leave_type: row::text(r, "leave_type")?,
        start_date: row::date(r, "start_date")?,
        end_date: row::date(r, "end_date")?,
        total_days: row::real(r, "total_days")?,
        status: row::text(r, "status")?,
        reason: row::text(r, "reason")?,
    })
}

fn export_record(row: &LeaveReportRow) -> Vec<String> {
    let mut cells = employee_cells(&row.employee);
    cells.extend([
        dash(row.leave_type.as_deref()),
        date_cell(row.start_date),
        date_cell(row.end_date),
        row.total_days.map(|d| d.to_string()).unwrap_or_else(|| "0".into()),
        status_cell(row.status.as_deref(), "pending"),
        row.reason.clone().unwrap_or_default(),
    ]);
    cells
}

/// Whole request inside the period: starts on/after `date_from`, ends on/before `date_to`
fn leave_dates(filters: &ReportFilters) -> Predicate {
    Predicate::all([
        Predicate::optional(filters.date_from.map(|d| Predicate::date_gte("r.start_date", d))),
        Predicate::optional(filters.date_to.map(|d| Predicate::date_lte("r.end_date", d))),
    ])
}

/// Medical, sick or health leave types, or a reason mentioning a doctor
fn medical() -> Predicate {
    Predicate::any([
        Predicate::like("lt.name", "medical"),
        Predicate::like("lt.name", "sick"),
        Predicate::like("lt.name", "health"),
        Predicate::like("r.reason", "medical"),
        Predicate::like("r.reason", "doctor"),
    ])
}

pub struct LeaveReport;

#[async_trait]
impl TabularReport for LeaveReport {
    type Row = LeaveReportRow;
    type Stats = LeaveStats;

    const SOURCE: ReportSource = SOURCE;
    const EXPORT_HEADER: &'static [&'static str] = EXPORT_HEADER;

    fn filter(filters: &ReportFilters, scope: &TenantScope, _today: NaiveDate) -> Predicate {
        Predicate::all([
            common::base(filters, scope, &[]),
            leave_dates(filters),
            common::status(filters),
            Predicate::optional(
                filters
                    .leave_type_id
                    .map(|id| Predicate::eq("r.leave_type_id", id)),
            ),
        ])
    }

    fn map_row(row: &QueryResult) -> anyhow::Result<Self::Row> {
        map_row(row)
    }

    fn export_record(row: &Self::Row) -> Vec<String> {
        export_record(row)
    }

    async fn stats<C: ConnectionTrait>(
        conn: &C,
        filter: &Predicate,
        _scope: &TenantScope,
        _today: NaiveDate,
    ) -> anyhow::Result<Self::Stats> {
        Ok(LeaveStats {
            total_requests: query::count(conn, &SOURCE, filter).await?,
            approved_requests: query::count_status(conn, &SOURCE, filter, "approved").await?,
            pending_requests: query::count_status(conn, &SOURCE, filter, "pending").await?,
            total_days: query::sum(conn, &SOURCE, "r.total_days", filter).await?,
        })
    }
}

pub struct MedicalExcuseReport;

#[async_trait]
impl TabularReport for MedicalExcuseReport {
    type Row = LeaveReportRow;
    type Stats = MedicalExcuseStats;

    const SOURCE: ReportSource = SOURCE;
    const EXPORT_HEADER: &'static [&'static str] = EXPORT_HEADER;

    fn filter(filters: &ReportFilters, scope: &TenantScope, _today: NaiveDate) -> Predicate {
        Predicate::all([
            common::base(filters, scope, &[]),
            medical(),
            leave_dates(filters),
            common::status(filters),
        ])
    }

    fn map_row(row: &QueryResult) -> anyhow::Result<Self::Row> {
        map_row(row)
    }

    fn export_record(row: &Self::Row) -> Vec<String> {
        export_record(row)
    }

    async fn stats<C: ConnectionTrait>(
        conn: &C,
        filter: &Predicate,
        _scope: &TenantScope,
        _today: NaiveDate,
    ) -> anyhow::Result<Self::Stats> {
        Ok(MedicalExcuseStats {
            total_requests: query::count(conn, &SOURCE, filter).await?,
            approved_requests: query::count_status(conn, &SOURCE, filter, "approved").await?,
            pending_requests: query::count_status(conn, &SOURCE, filter, "pending").await?,
        })
    }
}
