//! Typed reads from raw `QueryResult` rows.

use chrono::NaiveDate;
use sea_orm::QueryResult;

/// Optional text column
pub fn text(row: &QueryResult, column: &str) -> anyhow::Result<Option<String>> {
    Ok(row.try_get::<Option<String>>("", column)?)
}

/// Optional integer column
pub fn int(row: &QueryResult, column: &str) -> anyhow::Result<Option<i64>> {
    Ok(row.try_get::<Option<i64>>("", column)?)
}

/// Required integer column (ids, counts)
pub fn id(row: &QueryResult, column: &str) -> anyhow::Result<i64> {
    Ok(row.try_get::<i64>("", column)?)
}

/// Optional REAL column; select it with `CAST(... AS REAL)` when the
/// stored value may be an integer.
pub fn real(row: &QueryResult, column: &str) -> anyhow::Result<Option<f64>> {
    Ok(row.try_get::<Option<f64>>("", column)?)
}

/// Date column stored as `YYYY-MM-DD` (or a datetime starting with it).
/// Unparseable values read as `None`.
pub fn date(row: &QueryResult, column: &str) -> anyhow::Result<Option<NaiveDate>> {
    Ok(text(row, column)?.and_then(|s| parse_stored_date(&s)))
}

pub fn parse_stored_date(value: &str) -> Option<NaiveDate> {
    let head = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}
