//! HR-отчёты: страница записей со статистикой и CSV-выгрузка для каждого отчёта.

pub mod attendance;
pub mod common;
pub mod contract;
pub mod export;
pub mod leave;
pub mod options;
pub mod query;
pub mod separation;
pub mod training;
pub mod turnover;
pub mod warning;

#[cfg(test)]
mod fixtures;

use async_trait::async_trait;
use chrono::NaiveDate;
use contracts::domain::common::TenantScope;
use contracts::reports::{Report, ReportFilters, ReportKind, ReportPage};
use sea_orm::{ConnectionTrait, QueryResult};
use serde::Serialize;

use crate::shared::data::predicate::Predicate;
use export::CsvExport;
use query::ReportSource;

/// Отчёт вида "страница записей + статистика + выгрузка"
#[async_trait]
pub trait TabularReport {
    type Row: Serialize + Send;
    type Stats: Serialize + Send;

    const SOURCE: ReportSource;
    const EXPORT_HEADER: &'static [&'static str];

    /// Отбор записей по фильтрам в пределах тенанта
    fn filter(filters: &ReportFilters, scope: &TenantScope, today: NaiveDate) -> Predicate;

    fn map_row(row: &QueryResult) -> anyhow::Result<Self::Row>;

    fn export_record(row: &Self::Row) -> Vec<String>;

    /// Статистика по всему отбору (не только по странице)
    async fn stats<C: ConnectionTrait>(
        conn: &C,
        filter: &Predicate,
        scope: &TenantScope,
        today: NaiveDate,
    ) -> anyhow::Result<Self::Stats>;
}

pub async fn build<R: TabularReport, C: ConnectionTrait>(
    conn: &C,
    filters: &ReportFilters,
    scope: &TenantScope,
    today: NaiveDate,
) -> anyhow::Result<Report<R::Row, R::Stats>> {
    let filter = R::filter(filters, scope, today);
    let (page, per_page) = (filters.page(), filters.per_page());

    let total = query::count(conn, &R::SOURCE, &filter).await?;
    let rows = query::fetch(conn, &R::SOURCE, &filter, Some((page, per_page))).await?;
    let data = rows
        .iter()
        .map(R::map_row)
        .collect::<anyhow::Result<Vec<_>>>()?;
    let stats = R::stats(conn, &filter, scope, today).await?;

    Ok(Report {
        records: ReportPage::new(data, page, per_page, total),
        stats,
    })
}

pub async fn export_csv<R: TabularReport, C: ConnectionTrait>(
    conn: &C,
    filters: &ReportFilters,
    scope: &TenantScope,
    today: NaiveDate,
) -> anyhow::Result<Vec<u8>> {
    let filter = R::filter(filters, scope, today);
    let rows = query::fetch(conn, &R::SOURCE, &filter, None).await?;
    let records = rows
        .iter()
        .map(|r| R::map_row(r).map(|row| R::export_record(&row)))
        .collect::<anyhow::Result<Vec<_>>>()?;
    export::write_csv(R::EXPORT_HEADER, records)
}

/// Страница отчёта в JSON
pub async fn run<C: ConnectionTrait>(
    conn: &C,
    kind: ReportKind,
    filters: &ReportFilters,
    scope: &TenantScope,
    today: NaiveDate,
) -> anyhow::Result<serde_json::Value> {
    use ReportKind::*;

    let value = match kind {
        Absence => to_json(build::<attendance::AbsenceReport, _>(conn, filters, scope, today).await?)?,
        Lateness => to_json(build::<attendance::LatenessReport, _>(conn, filters, scope, today).await?)?,
        Leave => to_json(build::<leave::LeaveReport, _>(conn, filters, scope, today).await?)?,
        MedicalExcuse => {
            to_json(build::<leave::MedicalExcuseReport, _>(conn, filters, scope, today).await?)?
        }
        Warning => to_json(build::<warning::WarningReport, _>(conn, filters, scope, today).await?)?,
        ExpiredContracts => to_json(
            build::<contract::ExpiredContractsReport, _>(conn, filters, scope, today).await?,
        )?,
        Training => to_json(build::<training::TrainingReport, _>(conn, filters, scope, today).await?)?,
        Resignation => {
            to_json(build::<separation::ResignationReport, _>(conn, filters, scope, today).await?)?
        }
        Termination => {
            to_json(build::<separation::TerminationReport, _>(conn, filters, scope, today).await?)?
        }
        Turnover => to_json(turnover::build(conn, filters, scope, today).await?)?,
    };

    tracing::debug!("Report {} built for creator {}", kind.slug(), scope.creator_id);
    Ok(value)
}

/// Выгрузка отчёта в CSV со всеми записями отбора
pub async fn export<C: ConnectionTrait>(
    conn: &C,
    kind: ReportKind,
    filters: &ReportFilters,
    scope: &TenantScope,
    today: NaiveDate,
) -> anyhow::Result<CsvExport> {
    use ReportKind::*;

    let bytes = match kind {
        Absence => export_csv::<attendance::AbsenceReport, _>(conn, filters, scope, today).await?,
        Lateness => export_csv::<attendance::LatenessReport, _>(conn, filters, scope, today).await?,
        Leave => export_csv::<leave::LeaveReport, _>(conn, filters, scope, today).await?,
        MedicalExcuse => {
            export_csv::<leave::MedicalExcuseReport, _>(conn, filters, scope, today).await?
        }
        Warning => export_csv::<warning::WarningReport, _>(conn, filters, scope, today).await?,
        ExpiredContracts => {
            export_csv::<contract::ExpiredContractsReport, _>(conn, filters, scope, today).await?
        }
        Training => export_csv::<training::TrainingReport, _>(conn, filters, scope, today).await?,
        Resignation => {
            export_csv::<separation::ResignationReport, _>(conn, filters, scope, today).await?
        }
        Termination => {
            export_csv::<separation::TerminationReport, _>(conn, filters, scope, today).await?
        }
        Turnover => turnover::export_csv(conn, filters, scope, today).await?,
    };

    tracing::info!(
        "Report {} exported for creator {} ({} bytes)",
        kind.slug(),
        scope.creator_id,
        bytes.len()
    );

    Ok(CsvExport {
        file_name: kind.export_file_name(today),
        bytes,
    })
}

fn to_json<T: Serialize>(value: T) -> anyhow::Result<serde_json::Value> {
    Ok(serde_json::to_value(value)?)
}
