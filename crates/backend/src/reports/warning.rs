use async_trait::async_trait;
use chrono::NaiveDate;
use contracts::domain::common::TenantScope;
use contracts::reports::warning::{WarningReportRow, WarningStats};
use contracts::reports::ReportFilters;
use sea_orm::{ConnectionTrait, QueryResult};

use super::common::{self, date_cell, dash, employee_cells, status_cell, ucfirst};
use super::query::{self, ReportSource};
use super::TabularReport;
use crate::shared::data::predicate::Predicate;
use crate::shared::data::row;

/// Дисциплинарные предупреждения; выдавший предупреждение - `iu`
pub struct WarningReport;

#[async_trait]
impl TabularReport for WarningReport {
    type Row = WarningReportRow;
    type Stats = WarningStats;

    const SOURCE: ReportSource = ReportSource {
        table: "warnings",
        joins: "
    LEFT JOIN users iu ON iu.id = r.issued_by",
        columns: "r.subject, r.warning_type, r.severity, r.warning_date, r.status,
    iu.name AS issued_by_name",
        order_by: "r.warning_date DESC, r.id DESC",
    };
    const EXPORT_HEADER: &'static [&'static str] = &[
        "Employee Name",
        "Employee Email",
        "Branch",
        "Department",
        "Subject",
        "Warning Type",
        "Severity",
        "Warning Date",
        "Status",
        "Issued By",
    ];

    fn filter(filters: &ReportFilters, scope: &TenantScope, _today: NaiveDate) -> Predicate {
        Predicate::all([
            common::base(filters, scope, &["r.subject", "r.warning_type"]),
            common::date_range(filters, "r.warning_date"),
            common::status(filters),
            Predicate::optional(filters.severity_filter().map(|s| Predicate::eq("r.severity", s))),
            Predicate::optional(
                filters
                    .warning_type_filter()
                    .map(|t| Predicate::eq("r.warning_type", t)),
            ),
        ])
    }

    fn map_row(r: &QueryResult) -> anyhow::Result<Self::Row> {
        Ok(WarningReportRow {
            id: row::id(r, "id")?,
            employee: common::map_employee(r)?,
            subject: row::text(r, "subject")?,
            warning_type: row::text(r, "warning_type")?,
            severity: row::text(r, "severity")?,
            warning_date: row::date(r, "warning_date")?,
            status: row::text(r, "status")?,
            issued_by: row::text(r, "issued_by_name")?,
        })
    }

    fn export_record(row: &Self::Row) -> Vec<String> {
        let mut cells = employee_cells(&row.employee);
        cells.extend([
            dash(row.subject.as_deref()),
            dash(row.warning_type.as_deref()),
            ucfirst(row.severity.as_deref().unwrap_or("-")),
            date_cell(row.warning_date),
            status_cell(row.status.as_deref(), "draft"),
            dash(row.issued_by.as_deref()),
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
        let open = filter
            .clone()
            .and(Predicate::in_list("r.status", ["draft", "issued"]));

        Ok(WarningStats {
            total_warnings: query::count(conn, &source, filter).await?,
            open_warnings: query::count(conn, &source, &open).await?,
            acknowledged_warnings: query::count_status(conn, &source, filter, "acknowledged").await?,
            expired_warnings: query::count_status(conn, &source, filter, "expired").await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::fixtures::{day, exec, seed, Fixture};
    use crate::reports::{build, export_csv};

    async fn warning(
        f: &Fixture,
        employee: i64,
        subject: &str,
        severity: Option<&str>,
        date: &str,
        status: &str,
    ) {
        exec(
            &f.db,
            "INSERT INTO warnings (employee_id, issued_by, subject, warning_type, severity, warning_date, status, created_by)
             VALUES (?, ?, ?, 'conduct', ?, ?, ?, 1)",
            vec![
                employee.into(),
                f.ann.into(),
                subject.into(),
                severity.map(str::to_string).into(),
                date.into(),
                status.into(),
            ],
        )
        .await;
    }

    #[tokio::test]
    async fn counts_by_status_group() {
        let f = seed().await;
        warning(&f, f.bob, "Late again", Some("verbal"), "2025-03-01", "draft").await;
        warning(&f, f.bob, "Dress code", Some("written"), "2025-03-02", "issued").await;
        warning(&f, f.ann, "Missed deadline", Some("final"), "2025-03-03", "acknowledged").await;
        warning(&f, f.ann, "Old matter", None, "2024-01-03", "expired").await;

        let report = build::<WarningReport, _>(&f.db, &ReportFilters::default(), &f.scope, day(2025, 3, 20))
            .await
            .unwrap();

        assert_eq!(
            report.stats,
            WarningStats {
                total_warnings: 4,
                open_warnings: 2,
                acknowledged_warnings: 1,
                expired_warnings: 1,
            }
        );
        assert_eq!(report.records.data[0].subject.as_deref(), Some("Missed deadline"));
        assert_eq!(report.records.data[0].issued_by.as_deref(), Some("Ann Lee"));
    }

    #[tokio::test]
    async fn search_covers_subject_and_severity_filters() {
        let f = seed().await;
        warning(&f, f.bob, "Late again", Some("verbal"), "2025-03-01", "draft").await;
        warning(&f, f.bob, "Dress code", Some("written"), "2025-03-02", "issued").await;

        let filters = ReportFilters {
            search: Some("dress".into()),
            ..Default::default()
        };
        let report = build::<WarningReport, _>(&f.db, &filters, &f.scope, day(2025, 3, 20))
            .await
            .unwrap();
        assert_eq!(report.records.total, 1);

        let filters = ReportFilters {
            severity: Some("verbal".into()),
            ..Default::default()
        };
        let report = build::<WarningReport, _>(&f.db, &filters, &f.scope, day(2025, 3, 20))
            .await
            .unwrap();
        assert_eq!(report.records.data.len(), 1);
        assert_eq!(report.records.data[0].subject.as_deref(), Some("Late again"));
    }

    #[tokio::test]
    async fn export_capitalises_severity_and_status() {
        let f = seed().await;
        warning(&f, f.bob, "Late again", Some("verbal"), "2025-03-01", "draft").await;

        let bytes = export_csv::<WarningReport, _>(&f.db, &ReportFilters::default(), &f.scope, day(2025, 3, 20))
            .await
            .unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert_eq!(
            text.lines().nth(1),
            Some("Bob Stone,bob@example.com,South,Not Assigned,Late again,conduct,Verbal,2025-03-01,Draft,Ann Lee")
        );
    }
}
