//! Contracts that ended: explicitly expired or past their end date.

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use contracts::domain::common::TenantScope;
use contracts::reports::contract::{ContractReportRow, ExpiredContractStats};
use contracts::reports::ReportFilters;
use sea_orm::{ConnectionTrait, QueryResult};

use super::common::{self, date_cell, dash, employee_cells, status_cell};
use super::query::{self, ReportSource};
use super::TabularReport;
use crate::shared::data::predicate::Predicate;
use crate::shared::data::row;

/// Window of the "expiring soon" counter
const EXPIRING_WINDOW_DAYS: u64 = 30;

fn duration_days(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<i64> {
    match (start, end) {
        (Some(start), Some(end)) => Some((end - start).num_days().abs()),
        _ => None,
    }
}

pub struct ExpiredContractsReport;

#[async_trait]
impl TabularReport for ExpiredContractsReport {
    type Row = ContractReportRow;
    type Stats = ExpiredContractStats;

    const SOURCE: ReportSource = ReportSource {
        table: "employee_contracts",
        joins: "
    LEFT JOIN contract_types ct ON ct.id = r.contract_type_id",
        columns: "ct.name AS contract_type, r.start_date, r.end_date, r.status",
        order_by: "r.end_date DESC, r.id DESC",
    };
    const EXPORT_HEADER: &'static [&'static str] = &[
        "Employee Name",
        "Employee Email",
        "Branch",
        "Department",
        "Contract Type",
        "Start Date",
        "End Date",
        "Duration (Days)",
        "Status",
    ];

    fn filter(filters: &ReportFilters, scope: &TenantScope, today: NaiveDate) -> Predicate {
        Predicate::all([
            common::base(filters, scope, &[]),
            Predicate::any([
                Predicate::eq("r.status", "expired"),
                Predicate::date_lt("r.end_date", today),
            ]),
            common::date_range(filters, "r.end_date"),
            Predicate::optional(
                filters
                    .contract_type_id
                    .map(|id| Predicate::eq("r.contract_type_id", id)),
            ),
        ])
    }

    fn map_row(r: &QueryResult) -> anyhow::Result<Self::Row> {
        let start_date = row::date(r, "start_date")?;
        let end_date = row::date(r, "end_date")?;
        Ok(ContractReportRow {
            id: row::id(r, "id")?,
            employee: common::map_employee(r)?,
            contract_type: row::text(r, "contract_type")?,
            start_date,
            end_date,
            duration_days: duration_days(start_date, end_date),
            status: row::text(r, "status")?,
        })
    }

    fn export_record(row: &Self::Row) -> Vec<String> {
        let mut cells = employee_cells(&row.employee);
        cells.extend([
            dash(row.contract_type.as_deref()),
            date_cell(row.start_date),
            date_cell(row.end_date),
            row.duration_days.unwrap_or(0).to_string(),
            status_cell(row.status.as_deref(), "active"),
        ]);
        cells
    }

    async fn stats<C: ConnectionTrait>(
        conn: &C,
        filter: &Predicate,
        scope: &TenantScope,
        today: NaiveDate,
    ) -> anyhow::Result<Self::Stats> {
        let source = Self::SOURCE;
        let total_expired = query::count(conn, &source, filter).await?;

        // Not narrowed by the request filters
        let horizon = today
            .checked_add_days(Days::new(EXPIRING_WINDOW_DAYS))
            .unwrap_or(today);
        let soon = Predicate::all([
            common::tenant(scope),
            Predicate::is_not_null("r.end_date"),
            Predicate::date_between("r.end_date", today, horizon),
        ]);
        let expiring_soon = query::count(conn, &source, &soon).await?;

        // Zero-length contracts are left out of the average
        let with_dates = Predicate::all([
            filter.clone(),
            Predicate::is_not_null("r.start_date"),
            Predicate::is_not_null("r.end_date"),
            Predicate::raw("date(r.start_date) <> date(r.end_date)", vec![]),
        ]);
        let average = query::average(
            conn,
            &source,
            "ABS(julianday(date(r.end_date)) - julianday(date(r.start_date)))",
            &with_dates,
        )
        .await?;

        Ok(ExpiredContractStats {
            total_expired,
            expiring_soon,
            average_tenure_days: average.unwrap_or(0.0).round() as i64,
        })
    }
}
