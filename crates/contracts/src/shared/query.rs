//! Helpers for query-string DTOs.

use serde::{Deserialize, Deserializer};
use std::str::FromStr;

/// Treats a missing or blank query parameter (`?branch_id=`) as `None`
/// instead of failing to parse it.
pub fn empty_string_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw: Option<String> = Option::deserialize(de)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => T::from_str(s).map(Some).map_err(serde::de::Error::custom),
    }
}
