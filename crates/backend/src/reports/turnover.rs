//! Turnover: headcount, hires and separations over a period.
//!
//! Hires come from HR profiles (`employees.date_of_joining`), separations
//! from approved or completed resignations (by last working day) and
//! terminations (by termination date). The period defaults to the current
//! month and the five before it.

use chrono::{Datelike, Months, NaiveDate};
use contracts::domain::common::TenantScope;
use contracts::reports::separation::{ResignationReportRow, TerminationReportRow};
use contracts::reports::turnover::{
    TurnoverEvent, TurnoverEventKind, TurnoverMonth, TurnoverReport, TurnoverStats,
};
use contracts::reports::ReportFilters;
use sea_orm::{ConnectionTrait, DatabaseBackend, QueryResult, Statement};

use super::common::{self, date_cell, month_end, month_start, round_to, status_cell, NOT_ASSIGNED};
use super::export;
use super::query;
use super::separation::{ResignationReport, TerminationReport};
use super::TabularReport;
use crate::shared::data::predicate::Predicate;
use crate::shared::data::row;

const RECENT_LIMIT: usize = 8;
const DEFAULT_MONTHS_BACK: u32 = 5;
const SEPARATED_STATUSES: [&str; 2] = ["approved", "completed"];

const PROFILE_FROM: &str = "employees e
    JOIN users u ON u.id = e.user_id
    LEFT JOIN branches b ON b.id = e.branch_id
    LEFT JOIN departments d ON d.id = e.department_id";

const EXPORT_HEADER: &[&str] = &[
    "Employee Name",
    "Employee Email",
    "Branch",
    "Department",
    "Type",
    "Event Date",
    "Last Working Day",
    "Status",
];

/// Inclusive period of the report; an inverted range is swapped
pub fn resolve_range(filters: &ReportFilters, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = filters.date_from.unwrap_or_else(|| {
        month_start(today)
            .checked_sub_months(Months::new(DEFAULT_MONTHS_BACK))
            .unwrap_or(today)
    });
    let end = filters.date_to.unwrap_or_else(|| month_end(today));

    if start > end {
        (end, start)
    } else {
        (start, end)
    }
}

/// HR profiles of the tenant narrowed by the employee filters and search
fn profile_filter(filters: &ReportFilters, scope: &TenantScope) -> Predicate {
    Predicate::all([
        Predicate::in_list("e.created_by", scope.owner_ids.iter().copied()),
        Predicate::optional(filters.employee_id.map(|id| Predicate::eq("e.user_id", id))),
        Predicate::optional(filters.branch_id.map(|id| Predicate::eq("e.branch_id", id))),
        Predicate::optional(filters.department_id.map(|id| Predicate::eq("e.department_id", id))),
        Predicate::optional(filters.search_term().map(|term| {
            Predicate::any([Predicate::like("u.name", term), Predicate::like("u.email", term)])
        })),
    ])
}

async fn count_profiles<C: ConnectionTrait>(conn: &C, filter: &Predicate) -> anyhow::Result<u64> {
    let rendered = filter.render();
    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            format!("SELECT COUNT(*) AS value FROM {} WHERE {}", PROFILE_FROM, rendered.sql),
            rendered.params,
        ))
        .await?;
    match result {
        Some(r) => Ok(row::id(&r, "value")?.max(0) as u64),
        None => Ok(0),
    }
}

fn hire_event(r: &QueryResult) -> anyhow::Result<TurnoverEvent> {
    Ok(TurnoverEvent {
        kind: TurnoverEventKind::Hire,
        name: row::text(r, "name")?,
        email: row::text(r, "email")?,
        branch: row::text(r, "branch_name")?,
        department: row::text(r, "department_name")?,
        date: row::date(r, "date_of_joining")?,
        notice_date: None,
        status: None,
    })
}

/// Profiles that joined within the period, newest first
async fn hires<C: ConnectionTrait>(
    conn: &C,
    profiles: &Predicate,
    (start, end): (NaiveDate, NaiveDate),
) -> anyhow::Result<Vec<TurnoverEvent>> {
    let rendered = Predicate::all([
        profiles.clone(),
        Predicate::is_not_null("e.date_of_joining"),
        Predicate::date_between("e.date_of_joining", start, end),
    ])
    .render();

    let rows = conn
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            format!(
                "SELECT u.name, u.email, b.name AS branch_name, d.name AS department_name,
                    e.date_of_joining
                FROM {}
                WHERE {}
                ORDER BY date(e.date_of_joining) DESC, e.id DESC",
                PROFILE_FROM, rendered.sql
            ),
            rendered.params,
        ))
        .await?;

    rows.iter().map(hire_event).collect()
}

/// Approved or completed separation records whose `date_column` falls in the period
fn separation_filter(
    filters: &ReportFilters,
    scope: &TenantScope,
    date_column: &str,
    (start, end): (NaiveDate, NaiveDate),
) -> Predicate {
    Predicate::all([
        common::tenant(scope),
        Predicate::in_list("r.status", SEPARATED_STATUSES),
        common::employee_filters(filters),
        Predicate::is_not_null(date_column),
        Predicate::date_between(date_column, start, end),
    ])
}

fn resignation_event(row: &ResignationReportRow) -> TurnoverEvent {
    TurnoverEvent {
        kind: TurnoverEventKind::Resignation,
        name: row.employee.name.clone(),
        email: row.employee.email.clone(),
        branch: row.employee.branch.clone(),
        department: row.employee.department.clone(),
        date: row.last_working_day,
        notice_date: row.resignation_date,
        status: row.status.clone(),
    }
}

fn termination_event(row: &TerminationReportRow) -> TurnoverEvent {
    TurnoverEvent {
        kind: TurnoverEventKind::Termination,
        name: row.employee.name.clone(),
        email: row.employee.email.clone(),
        branch: row.employee.branch.clone(),
        department: row.employee.department.clone(),
        date: row.termination_date,
        notice_date: None,
        status: row.status.clone(),
    }
}

async fn separations<C: ConnectionTrait, R: TabularReport>(
    conn: &C,
    filter: &Predicate,
    to_event: fn(&R::Row) -> TurnoverEvent,
) -> anyhow::Result<Vec<TurnoverEvent>> {
    let rows = query::fetch(conn, &R::SOURCE, filter, None).await?;
    rows.iter()
        .map(|r| R::map_row(r).map(|row| to_event(&row)))
        .collect()
}

/// Every event of the period: hires, resignations, terminations
struct Events {
    hires: Vec<TurnoverEvent>,
    resignations: Vec<TurnoverEvent>,
    terminations: Vec<TurnoverEvent>,
}

async fn collect_events<C: ConnectionTrait>(
    conn: &C,
    filters: &ReportFilters,
    scope: &TenantScope,
    range: (NaiveDate, NaiveDate),
) -> anyhow::Result<Events> {
    let hires = hires(conn, &profile_filter(filters, scope), range).await?;
    let resignations = separations::<_, ResignationReport>(
        conn,
        &separation_filter(filters, scope, "r.last_working_day", range),
        resignation_event,
    )
    .await?;
    let terminations = separations::<_, TerminationReport>(
        conn,
        &separation_filter(filters, scope, "r.termination_date", range),
        termination_event,
    )
    .await?;

    Ok(Events {
        hires,
        resignations,
        terminations,
    })
}

fn same_month(date: Option<NaiveDate>, month: NaiveDate) -> bool {
    date.is_some_and(|d| d.year() == month.year() && d.month() == month.month())
}

/// One point per calendar month touched by the period
fn monthly_series(
    (start, end): (NaiveDate, NaiveDate),
    events: &Events,
    headcount: u64,
) -> Vec<TurnoverMonth> {
    let headcount = headcount.max(1) as f64;
    let last = month_start(end);
    let mut cursor = month_start(start);
    let mut series = Vec::new();

    while cursor <= last {
        let in_month = |list: &[TurnoverEvent]| {
            list.iter().filter(|e| same_month(e.date, cursor)).count() as u64
        };
        let hires = in_month(&events.hires);
        let separations = in_month(&events.resignations) + in_month(&events.terminations);

        series.push(TurnoverMonth {
            month: cursor.format("%b %Y").to_string(),
            hires,
            separations,
            turnover_rate: round_to(separations as f64 / headcount * 100.0, 2),
        });

        match cursor.checked_add_months(Months::new(1)) {
            Some(next) => cursor = next,
            None => break,
        }
    }

    series
}

pub async fn build<C: ConnectionTrait>(
    conn: &C,
    filters: &ReportFilters,
    scope: &TenantScope,
    today: NaiveDate,
) -> anyhow::Result<TurnoverReport> {
    let range = resolve_range(filters, today);
    let (start, end) = range;
    let profiles = profile_filter(filters, scope);

    let headcount = count_profiles(conn, &profiles).await?;
    let starting = count_profiles(
        conn,
        &profiles.clone().and(Predicate::any([
            Predicate::raw("e.date_of_joining IS NULL", vec![]),
            Predicate::date_lte("e.date_of_joining", start),
        ])),
    )
    .await?;

    let events = collect_events(conn, filters, scope, range).await?;
    let hires = events.hires.len() as u64;
    let separations = (events.resignations.len() + events.terminations.len()) as u64;

    let average_headcount = round_to((starting + headcount) as f64 / 2.0, 2).max(1.0);
    let turnover_rate = if separations > 0 {
        round_to(separations as f64 / average_headcount * 100.0, 2)
    } else {
        0.0
    };

    let monthly = monthly_series(range, &events, headcount);

    let recent_hires = events.hires.iter().take(RECENT_LIMIT).cloned().collect();
    let mut recent_separations: Vec<TurnoverEvent> = events
        .resignations
        .iter()
        .chain(&events.terminations)
        .cloned()
        .collect();
    recent_separations.sort_by(|a, b| b.date.cmp(&a.date));
    recent_separations.truncate(RECENT_LIMIT);

    Ok(TurnoverReport {
        stats: TurnoverStats {
            headcount,
            average_headcount,
            hires,
            separations,
            turnover_rate,
        },
        monthly,
        recent_hires,
        recent_separations,
        date_from: start,
        date_to: end,
    })
}

fn export_record(event: &TurnoverEvent) -> Vec<String> {
    let (label, event_date, last_working_day, status) = match event.kind {
        TurnoverEventKind::Hire => ("New Hire", event.date, None, "-".to_string()),
        TurnoverEventKind::Resignation => (
            "Resignation",
            event.notice_date,
            event.date,
            status_cell(event.status.as_deref(), "pending"),
        ),
        TurnoverEventKind::Termination => (
            "Termination",
            event.date,
            None,
            status_cell(event.status.as_deref(), "pending"),
        ),
    };

    vec![
        event.name.clone().unwrap_or_default(),
        event.email.clone().unwrap_or_default(),
        event.branch.clone().unwrap_or_else(|| NOT_ASSIGNED.to_string()),
        event.department.clone().unwrap_or_else(|| NOT_ASSIGNED.to_string()),
        label.to_string(),
        date_cell(event_date),
        date_cell(last_working_day),
        status,
    ]
}

/// Hires, then resignations, then terminations of the period
pub async fn export_csv<C: ConnectionTrait>(
    conn: &C,
    filters: &ReportFilters,
    scope: &TenantScope,
    today: NaiveDate,
) -> anyhow::Result<Vec<u8>> {
    let events = collect_events(conn, filters, scope, resolve_range(filters, today)).await?;
    let records = events
        .hires
        .iter()
        .chain(&events.resignations)
        .chain(&events.terminations)
        .map(export_record);
    export::write_csv(EXPORT_HEADER, records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::fixtures::{day, exec, seed, Fixture};

    async fn resignation(f: &Fixture, employee: i64, notice: &str, last_day: &str, status: &str) {
        exec(
            &f.db,
            "INSERT INTO resignations (employee_id, resignation_date, last_working_day, status, created_by)
             VALUES (?, ?, ?, ?, 1)",
            vec![employee.into(), notice.into(), last_day.into(), status.into()],
        )
        .await;
    }

    async fn termination(f: &Fixture, employee: i64, date: &str, status: &str) {
        exec(
            &f.db,
            "INSERT INTO terminations (employee_id, termination_date, status, created_by)
             VALUES (?, ?, ?, 1)",
            vec![employee.into(), date.into(), status.into()],
        )
        .await;
    }

    async fn sample() -> Fixture {
        let f = seed().await;
        resignation(&f, f.ann, "2025-02-28", "2025-03-15", "approved").await;
        termination(&f, f.bob, "2025-01-05", "completed").await;
        termination(&f, f.bob, "2025-02-05", "pending").await;
        termination(&f, f.bob, "2024-09-01", "approved").await;
        f
    }

    #[test]
    fn default_range_spans_six_months() {
        let filters = ReportFilters::default();
        assert_eq!(
            resolve_range(&filters, day(2025, 3, 20)),
            (day(2024, 10, 1), day(2025, 3, 31))
        );
    }

    #[test]
    fn inverted_range_is_swapped() {
        let filters = ReportFilters {
            date_from: Some(day(2025, 5, 1)),
            date_to: Some(day(2025, 1, 1)),
            ..Default::default()
        };
        assert_eq!(
            resolve_range(&filters, day(2025, 3, 20)),
            (day(2025, 1, 1), day(2025, 5, 1))
        );
    }

    #[tokio::test]
    async fn stats_over_default_period() {
        let f = sample().await;

        let report = build(&f.db, &ReportFilters::default(), &f.scope, day(2025, 3, 20))
            .await
            .unwrap();

        assert_eq!(
            report.stats,
            TurnoverStats {
                headcount: 2,
                average_headcount: 1.5,
                hires: 1,
                separations: 2,
                turnover_rate: 133.33,
            }
        );
        assert_eq!(report.date_from, day(2024, 10, 1));
        assert_eq!(report.monthly.len(), 6);
        assert_eq!(report.monthly[0].month, "Oct 2024");
        assert_eq!(
            report.monthly[3],
            TurnoverMonth {
                month: "Jan 2025".into(),
                hires: 0,
                separations: 1,
                turnover_rate: 50.0,
            }
        );
        assert_eq!(report.monthly[4].hires, 1);

        assert_eq!(report.recent_hires.len(), 1);
        assert_eq!(report.recent_hires[0].name.as_deref(), Some("Bob Stone"));
        let kinds: Vec<_> = report.recent_separations.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![TurnoverEventKind::Resignation, TurnoverEventKind::Termination]
        );
        assert_eq!(report.recent_separations[0].notice_date, Some(day(2025, 2, 28)));
    }

    #[tokio::test]
    async fn no_separations_means_zero_rate() {
        let f = seed().await;
        let filters = ReportFilters {
            branch_id: Some(f.north),
            ..Default::default()
        };

        let report = build(&f.db, &filters, &f.scope, day(2025, 3, 20)).await.unwrap();

        assert_eq!(report.stats.headcount, 1);
        assert_eq!(report.stats.hires, 0);
        assert_eq!(report.stats.average_headcount, 1.0);
        assert_eq!(report.stats.turnover_rate, 0.0);
    }

    #[tokio::test]
    async fn export_lists_hires_then_separations() {
        let f = sample().await;

        let bytes = export_csv(&f.db, &ReportFilters::default(), &f.scope, day(2025, 3, 20))
            .await
            .unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines,
            vec![
                "Employee Name,Employee Email,Branch,Department,Type,Event Date,Last Working Day,Status",
                "Bob Stone,bob@example.com,South,Not Assigned,New Hire,2025-02-15,-,-",
                "Ann Lee,ann@example.com,North,Engineering,Resignation,2025-02-28,2025-03-15,Approved",
                "Bob Stone,bob@example.com,South,Not Assigned,Termination,2025-01-05,-,Completed",
            ]
        );
    }
}
