//! Turns submitted (stat, operator, value) triples into a conjunctive WHERE
//! clause. Column names come from the [`StatKey`] allow-list; values are
//! always bound as parameters.

use sqlx::{QueryBuilder, Sqlite};

use crate::error::{AppError, Result};
use crate::types::{CompareOp, StatFilter, StatFilterInput, StatKey};

/// Validate one submitted filter.
pub fn validate_filter(input: &StatFilterInput) -> Result<StatFilter> {
    let stat = StatKey::parse(input.stat.trim())
        .ok_or_else(|| AppError::validation(format!("Unknown stat '{}'", input.stat)))?;

    let operator = CompareOp::parse(&input.operator).ok_or_else(|| {
        AppError::validation(format!("Unsupported operator '{}'", input.operator))
    })?;

    let value = match &input.value {
        serde_json::Value::Number(n) => n.as_f64(),
        // Form inputs arrive as strings.
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
    .ok_or_else(|| {
        AppError::validation(format!("Filter value for {stat} must be a finite number"))
    })?;

    Ok(StatFilter {
        stat,
        operator,
        value,
    })
}

pub fn validate_filters(inputs: &[StatFilterInput]) -> Result<Vec<StatFilter>> {
    inputs.iter().map(validate_filter).collect()
}

/// AND of one or more validated filters.
#[derive(Debug, Clone, Copy)]
pub struct Predicate<'a> {
    filters: &'a [StatFilter],
}

impl<'a> Predicate<'a> {
    /// An empty filter list never means "match everything".
    pub fn new(filters: &'a [StatFilter]) -> Result<Self> {
        if filters.is_empty() {
            return Err(AppError::validation("At least one stat filter is required"));
        }
        Ok(Self { filters })
    }

    /// Append ` WHERE c1 op ? AND c2 op ? ...` to `qb`, binding every value.
    pub fn push_where(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        qb.push(" WHERE ");
        for (i, f) in self.filters.iter().enumerate() {
            if i > 0 {
                qb.push(" AND ");
            }
            qb.push(f.stat.column())
                .push(" ")
                .push(f.operator.as_sql())
                .push(" ")
                .push_bind(f.value);
        }
    }
}

impl std::fmt::Display for Predicate<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, filter) in self.filters.iter().enumerate() {
            if i > 0 {
                write!(f, " AND ")?;
            }
            write!(f, "{filter}")?;
        }
        Ok(())
    }
}
