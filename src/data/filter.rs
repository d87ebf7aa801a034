// Filter engine for the merged table.
// Applies company, text query, and recency bucket as one ordered pass.

use crate::error::{LeetfindError, Result};

use super::table::{COMPANY_COLUMN, FREQUENCY_COLUMN, MergedTable};

/// Minimum `Frequency` for a row to count as asked in the last 6 months.
pub const LAST_6_MONTHS_MIN_FREQUENCY: f64 = 60.0;
/// Minimum `Frequency` for a row to count as asked in the last 3 months.
pub const LAST_3_MONTHS_MIN_FREQUENCY: f64 = 80.0;

/// Company selection; `All` disables the company step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CompanyFilter {
    #[default]
    All,
    Named(String),
}

impl CompanyFilter {
    pub fn label(&self) -> &str {
        match self {
            CompanyFilter::All => "All",
            CompanyFilter::Named(name) => name,
        }
    }
}

/// Coarse recency filter mapped onto a `Frequency` threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecencyBucket {
    #[default]
    AllTime,
    Last6Months,
    Last3Months,
}

impl RecencyBucket {
    pub fn label(&self) -> &'static str {
        match self {
            RecencyBucket::AllTime => "All Time",
            RecencyBucket::Last6Months => "Last 6 Months",
            RecencyBucket::Last3Months => "Last 3 Months",
        }
    }

    /// Minimum `Frequency` a row needs, or `None` for no restriction.
    pub fn min_frequency(&self) -> Option<f64> {
        match self {
            RecencyBucket::AllTime => None,
            RecencyBucket::Last6Months => Some(LAST_6_MONTHS_MIN_FREQUENCY),
            RecencyBucket::Last3Months => Some(LAST_3_MONTHS_MIN_FREQUENCY),
        }
    }

    pub fn next(&self) -> Self {
        match self {
            RecencyBucket::AllTime => RecencyBucket::Last6Months,
            RecencyBucket::Last6Months => RecencyBucket::Last3Months,
            RecencyBucket::Last3Months => RecencyBucket::AllTime,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            RecencyBucket::AllTime => RecencyBucket::Last3Months,
            RecencyBucket::Last6Months => RecencyBucket::AllTime,
            RecencyBucket::Last3Months => RecencyBucket::Last6Months,
        }
    }
}

/// User-supplied criteria for one filter pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub company: CompanyFilter,
    pub query: String,
    pub recency: RecencyBucket,
}

/// Narrow `table` by company, then query, then recency bucket.
///
/// Columns and row order are preserved. Fails with `MissingColumn` when a
/// requested step needs a column the table does not have.
pub fn apply_filters(table: &MergedTable, criteria: &FilterCriteria) -> Result<MergedTable> {
    let mut result = table.clone();

    if let CompanyFilter::Named(company) = &criteria.company {
        let index = require_column(&result, COMPANY_COLUMN)?;
        result = result.retain_rows(|row| row[index].as_deref() == Some(company.as_str()));
    }

    if !criteria.query.is_empty() {
        let needle = criteria.query.to_lowercase();
        result = result.retain_rows(|row| {
            row.iter()
                .any(|cell| cell.as_deref().unwrap_or("").to_lowercase().contains(&needle))
        });
    }

    if let Some(min) = criteria.recency.min_frequency() {
        let index = require_column(&result, FREQUENCY_COLUMN)?;
        result = result.retain_rows(|row| {
            row[index]
                .as_deref()
                .and_then(parse_frequency)
                .is_some_and(|frequency| frequency >= min)
        });
    }

    Ok(result)
}

fn require_column(table: &MergedTable, column: &str) -> Result<usize> {
    table
        .column_index(column)
        .ok_or_else(|| LeetfindError::MissingColumn(column.to_string()))
}

fn parse_frequency(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|f| !f.is_nan())
}
