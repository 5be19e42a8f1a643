use async_trait::async_trait;
use chrono::NaiveDate;
use contracts::domain::common::TenantScope;
use contracts::reports::training::{TrainingReportRow, TrainingStats};
use contracts::reports::ReportFilters;
use sea_orm::{ConnectionTrait, QueryResult};

use super::common::{self, date_cell, dash, employee_cells, status_cell};
use super::query::{self, ReportSource};
use super::TabularReport;
use crate::shared::data::predicate::Predicate;
use crate::shared::data::row;

pub struct TrainingReport;

#[async_trait]
impl TabularReport for TrainingReport {
    type Row = TrainingReportRow;
    type Stats = TrainingStats;

    const SOURCE: ReportSource = ReportSource {
        table: "employee_trainings",
        joins: "
    LEFT JOIN training_programs tp ON tp.id = r.training_program_id",
        columns: "tp.name AS training_program, r.assigned_date, r.start_date, r.end_date,
    r.status, CAST(r.score AS REAL) AS score",
        order_by: "r.assigned_date DESC, r.id DESC",
    };
    const EXPORT_HEADER: &'static [&'static str] = &[
        "Employee Name",
        "Employee Email",
        "Branch",
        "Department",
        "Training Program",
        "Assigned Date",
        "Start Date",
        "End Date",
        "Status",
        "Score",
    ];

    fn filter(filters: &ReportFilters, scope: &TenantScope, _today: NaiveDate) -> Predicate {
        Predicate::all([
            common::base(filters, scope, &[]),
            common::date_range(filters, "r.assigned_date"),
            common::status(filters),
            Predicate::optional(
                filters
                    .training_program_id
                    .map(|id| Predicate::eq("r.training_program_id", id)),
            ),
        ])
    }

    fn map_row(r: &QueryResult) -> anyhow::Result<Self::Row> {
        Ok(TrainingReportRow {
            id: row::id(r, "id")?,
            employee: common::map_employee(r)?,
            training_program: row::text(r, "training_program")?,
            assigned_date: row::date(r, "assigned_date")?,
            start_date: row::date(r, "start_date")?,
            end_date: row::date(r, "end_date")?,
            status: row::text(r, "status")?,
            score: row::real(r, "score")?,
        })
    }

    fn export_record(row: &Self::Row) -> Vec<String> {
        let mut cells = employee_cells(&row.employee);
        cells.extend([
            dash(row.training_program.as_deref()),
            date_cell(row.assigned_date),
            date_cell(row.start_date),
            date_cell(row.end_date),
            status_cell(row.status.as_deref(), "assigned"),
            row.score.map(|s| s.to_string()).unwrap_or_else(|| "-".into()),
        ]);
        cells
    }

    async fn stats<C: ConnectionTrait>(
        conn: &C,
        filter: &Predicate,
        _scope: &TenantScope,
        _today: NaiveDate,
    ) -> anyhow::Result<Self::Stats> {
        let source = Self::SOURCE;
        Ok(TrainingStats {
            total_assigned: query::count(conn, &source, filter).await?,
            completed: query::count_status(conn, &source, filter, "completed").await?,
            in_progress: query::count_status(conn, &source, filter, "in_progress").await?,
            failed: query::count_status(conn, &source, filter, "failed").await?,
        })
    }
}
