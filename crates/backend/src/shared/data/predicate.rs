//! Immutable SQL filter values.
//!
//! A `Predicate` is built from small combinators and rendered once into a
//! parameterised `WHERE` fragment. Values are never spliced into the SQL
//! text; column names always come from code, never from user input.

use chrono::NaiveDate;
use sea_orm::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Matches every row
    True,
    /// Matches no row
    False,
    /// A single SQL condition with its bound values
    Clause { sql: String, params: Vec<Value> },
    All(Vec<Predicate>),
    Any(Vec<Predicate>),
}

/// Rendered predicate: SQL fragment plus bound parameters in order
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPredicate {
    pub sql: String,
    pub params: Vec<Value>,
}

fn date_param(date: NaiveDate) -> Value {
    Value::from(date.format("%Y-%m-%d").to_string())
}

impl Predicate {
    pub fn raw(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Predicate::Clause {
            sql: sql.into(),
            params,
        }
    }

    pub fn eq(column: &str, value: impl Into<Value>) -> Self {
        Self::raw(format!("{} = ?", column), vec![value.into()])
    }

    /// `column IN (...)`; an empty list matches nothing
    pub fn in_list<V: Into<Value>>(column: &str, values: impl IntoIterator<Item = V>) -> Self {
        let params: Vec<Value> = values.into_iter().map(Into::into).collect();
        if params.is_empty() {
            return Predicate::False;
        }
        let placeholders = vec!["?"; params.len()].join(", ");
        Self::raw(format!("{} IN ({})", column, placeholders), params)
    }

    /// Substring match (`LIKE '%needle%'`)
    pub fn like(column: &str, needle: &str) -> Self {
        Self::raw(
            format!("{} LIKE ?", column),
            vec![Value::from(format!("%{}%", needle))],
        )
    }

    pub fn is_not_null(column: &str) -> Self {
        Self::raw(format!("{} IS NOT NULL", column), vec![])
    }

    pub fn date_gte(column: &str, date: NaiveDate) -> Self {
        Self::raw(format!("date({}) >= ?", column), vec![date_param(date)])
    }

    pub fn date_lte(column: &str, date: NaiveDate) -> Self {
        Self::raw(format!("date({}) <= ?", column), vec![date_param(date)])
    }

    pub fn date_lt(column: &str, date: NaiveDate) -> Self {
        Self::raw(format!("date({}) < ?", column), vec![date_param(date)])
    }

    /// Inclusive date range
    pub fn date_between(column: &str, from: NaiveDate, to: NaiveDate) -> Self {
        Self::raw(
            format!("date({}) BETWEEN ? AND ?", column),
            vec![date_param(from), date_param(to)],
        )
    }

    /// Conjunction; `True` members are dropped and nested conjunctions flattened
    pub fn all(parts: impl IntoIterator<Item = Predicate>) -> Self {
        let mut members = Vec::new();
        for part in parts {
            match part {
                Predicate::True => {}
                Predicate::False => return Predicate::False,
                Predicate::All(inner) => members.extend(inner),
                other => members.push(other),
            }
        }
        match members.len() {
            0 => Predicate::True,
            1 => members.remove(0),
            _ => Predicate::All(members),
        }
    }

    /// Disjunction; `False` members are dropped and nested disjunctions flattened
    pub fn any(parts: impl IntoIterator<Item = Predicate>) -> Self {
        let mut members = Vec::new();
        for part in parts {
            match part {
                Predicate::False => {}
                Predicate::True => return Predicate::True,
                Predicate::Any(inner) => members.extend(inner),
                other => members.push(other),
            }
        }
        match members.len() {
            0 => Predicate::False,
            1 => members.remove(0),
            _ => Predicate::Any(members),
        }
    }

    /// `Some(p)` → `p`, `None` → `True`
    pub fn optional(predicate: Option<Predicate>) -> Self {
        predicate.unwrap_or(Predicate::True)
    }

    pub fn and(self, other: Predicate) -> Self {
        Self::all([self, other])
    }

    pub fn render(&self) -> RenderedPredicate {
        let mut params = Vec::new();
        let sql = self.render_into(&mut params);
        RenderedPredicate { sql, params }
    }

    fn render_into(&self, params: &mut Vec<Value>) -> String {
        match self {
            Predicate::True => "1 = 1".to_string(),
            Predicate::False => "1 = 0".to_string(),
            Predicate::Clause { sql, params: own } => {
                params.extend(own.iter().cloned());
                sql.clone()
            }
            Predicate::All(members) => Self::join(members, " AND ", params),
            Predicate::Any(members) => Self::join(members, " OR ", params),
        }
    }

    fn join(members: &[Predicate], separator: &str, params: &mut Vec<Value>) -> String {
        members
            .iter()
            .map(|m| format!("({})", m.render_into(params)))
            .collect::<Vec<_>>()
            .join(separator)
    }
}
