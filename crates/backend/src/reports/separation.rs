//! Resignations and terminations.
//!
//! Both reports share the stats shape: total, pending, approved and the
//! average notice period rounded to one decimal. The approver is joined as
//! `au`.

use async_trait::async_trait;
use chrono::NaiveDate;
use contracts::domain::common::TenantScope;
use contracts::reports::separation::{ResignationReportRow, SeparationStats, TerminationReportRow};
use contracts::reports::ReportFilters;
use sea_orm::{ConnectionTrait, QueryResult};

use super::common::{self, date_cell, dash, employee_cells, round_to, status_cell};
use super::query::{self, ReportSource};
use super::TabularReport;
use crate::shared::data::predicate::Predicate;
use crate::shared::data::row;

const APPROVER_JOIN: &str = "
    LEFT JOIN users au ON au.id = r.approved_by";

async fn separation_stats<C: ConnectionTrait>(
    conn: &C,
    source: &ReportSource,
    filter: &Predicate,
) -> anyhow::Result<SeparationStats> {
    let average = query::average(conn, source, "r.notice_period", filter).await?;
    Ok(SeparationStats {
        total: query::count(conn, source, filter).await?,
        pending: query::count_status(conn, source, filter, "pending").await?,
        approved: query::count_status(conn, source, filter, "approved").await?,
        average_notice_period: round_to(average.unwrap_or(0.0), 1),
    })
}

fn notice_cell(value: Option<i64>) -> String {
    value.unwrap_or(0).to_string()
}

pub struct ResignationReport;

#[async_trait]
impl TabularReport for ResignationReport {
    type Row = ResignationReportRow;
    type Stats = SeparationStats;

    const SOURCE: ReportSource = ReportSource {
        table: "resignations",
        joins: APPROVER_JOIN,
        columns: "r.resignation_date, r.last_working_day, r.notice_period, r.reason, r.status,
    au.name AS approved_by_name",
        order_by: "r.resignation_date DESC, r.id DESC",
    };
    const EXPORT_HEADER: &'static [&'static str] = &[
        "Employee Name",
        "Employee Email",
        "Branch",
        "Department",
        "Resignation Date",
        "Last Working Day",
        "Notice Period (Days)",
        "Reason",
        "Status",
        "Approved By",
    ];

    fn filter(filters: &ReportFilters, scope: &TenantScope, _today: NaiveDate) -> Predicate {
        Predicate::all([
            common::base(filters, scope, &[]),
            common::date_range(filters, "r.resignation_date"),
            common::status(filters),
        ])
    }

    fn map_row(r: &QueryResult) -> anyhow::Result<Self::Row> {
        Ok(ResignationReportRow {
            id: row::id(r, "id")?,
            employee: common::map_employee(r)?,
            resignation_date: row::date(r, "resignation_date")?,
            last_working_day: row::date(r, "last_working_day")?,
            notice_period: row::int(r, "notice_period")?,
            reason: row::text(r, "reason")?,
            status: row::text(r, "status")?,
            approved_by: row::text(r, "approved_by_name")?,
        })
    }

    fn export_record(row: &Self::Row) -> Vec<String> {
        let mut cells = employee_cells(&row.employee);
        cells.extend([
            date_cell(row.resignation_date),
            date_cell(row.last_working_day),
            notice_cell(row.notice_period),
            row.reason.clone().unwrap_or_default(),
            status_cell(row.status.as_deref(), "pending"),
            dash(row.approved_by.as_deref()),
        ]);
        cells
    }

    async fn stats<C: ConnectionTrait>(
        conn: &C,
        filter: &Predicate,
        _scope: &TenantScope,
        _today: NaiveDate,
    ) -> anyhow::Result<Self::Stats> {
        separation_stats(conn, &Self::SOURCE, filter).await
    }
}

pub struct TerminationReport;

#[async_trait]
impl TabularReport for TerminationReport {
    type Row = TerminationReportRow;
    type Stats = SeparationStats;

    const SOURCE: ReportSource = ReportSource {
        table: "terminations",
        joins: APPROVER_JOIN,
        columns: "r.termination_type, r.termination_date, r.notice_date, r.notice_period,
    r.reason, r.description, r.status, au.name AS approved_by_name",
        order_by: "r.termination_date DESC, r.id DESC",
    };
    const EXPORT_HEADER: &'static [&'static str] = &[
        "Employee Name",
        "Employee Email",
        "Branch",
        "Department",
        "Termination Type",
        "Termination Date",
        "Notice Date",
        "Notice Period (Days)",
        "Reason",
        "Status",
        "Approved By",
    ];

    fn filter(filters: &ReportFilters, scope: &TenantScope, _today: NaiveDate) -> Predicate {
        Predicate::all([
            common::base(
                filters,
                scope,
                &["r.termination_type", "r.reason", "r.description"],
            ),
            common::date_range(filters, "r.termination_date"),
            common::status(filters),
            Predicate::optional(
                filters
                    .termination_type_filter()
                    .map(|t| Predicate::eq("r.termination_type", t)),
            ),
        ])
    }

    fn map_row(r: &QueryResult) -> anyhow::Result<Self::Row> {
        Ok(TerminationReportRow {
            id: row::id(r, "id")?,
            employee: common::map_employee(r)?,
            termination_type: row::text(r, "termination_type")?,
            termination_date: row::date(r, "termination_date")?,
            notice_date: row::date(r, "notice_date")?,
            notice_period: row::int(r, "notice_period")?,
            reason: row::text(r, "reason")?,
            description: row::text(r, "description")?,
            status: row::text(r, "status")?,
            approved_by: row::text(r, "approved_by_name")?,
        })
    }

    fn export_record(row: &Self::Row) -> Vec<String> {
        let mut cells = employee_cells(&row.employee);
        cells.extend([
            dash(row.termination_type.as_deref()),
            date_cell(row.termination_date),
            date_cell(row.notice_date),
            notice_cell(row.notice_period),
            row.reason.clone().unwrap_or_default(),
            status_cell(row.status.as_deref(), "pending"),
            dash(row.approved_by.as_deref()),
        ]);
        cells
    }

    async fn stats<C: ConnectionTrait>(
        conn: &C,
        filter: &Predicate,
        _scope: &TenantScope,
        _today: NaiveDate,
    ) -> anyhow::Result<Self::Stats> {
        separation_stats(conn, &Self::SOURCE, filter).await
    }
}
