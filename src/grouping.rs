//! Per-group evaluation over a table.
//!
//! Groups (e.g. product × partner) are evaluated independently and in
//! parallel. A failing group is reported next to the successful ones and
//! never stops its siblings.

use crate::core::{Cell, Table};
use crate::error::{ForecastError, Result};
use crate::pipeline::{baseline_forecast, seasonal_forecast, BaselineForecast, SeasonalForecast};
use crate::seasonality::SeasonalProfile;
use crate::utils::mape;
use rayon::prelude::*;
use std::fmt;
use tracing::{debug, warn};

/// One combination of grouping column values.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupKey {
    parts: Vec<(String, Cell)>,
}

impl GroupKey {
    pub fn new(parts: Vec<(String, Cell)>) -> Self {
        Self { parts }
    }

    pub fn parts(&self) -> &[(String, Cell)] {
        &self.parts
    }

    /// Value of one grouping column in this key.
    pub fn value(&self, column: &str) -> Option<&Cell> {
        self.parts
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Rows of `table` belonging to this group.
    pub fn select(&self, table: &Table) -> Result<Table> {
        let rows = table.matching_rows(
            self.parts
                .iter()
                .map(|(column, value)| (column.as_str(), value)),
        )?;
        Ok(table.take_rows(&rows))
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (column, value)) in self.parts.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{column}={value}")?;
        }
        Ok(())
    }
}

/// Distinct value combinations that occur in the table, in order of
/// first appearance. Rows with a missing grouping value are skipped.
pub fn observed_keys(table: &Table, columns: &[&str]) -> Result<Vec<GroupKey>> {
    let cells = columns
        .iter()
        .map(|c| table.column(c))
        .collect::<Result<Vec<_>>>()?;

    let mut combos: Vec<Vec<Cell>> = Vec::new();
    for row in 0..table.len() {
        let combo: Vec<Cell> = cells.iter().map(|col| col[row].clone()).collect();
        if combo.iter().any(Cell::is_missing) || combos.contains(&combo) {
            continue;
        }
        combos.push(combo);
    }

    Ok(combos
        .into_iter()
        .map(|combo| to_key(columns, combo))
        .collect())
}

/// Every combination of the distinct values of each column, whether or
/// not it occurs in the table. The last column varies fastest.
pub fn cartesian_keys(table: &Table, columns: &[&str]) -> Result<Vec<GroupKey>> {
    let mut combos: Vec<Vec<Cell>> = vec![Vec::new()];
    for column in columns {
        let values = table.unique(column)?;
        combos = combos
            .into_iter()
            .flat_map(|prefix| {
                values.iter().map(move |v| {
                    let mut next = prefix.clone();
                    next.push(v.clone());
                    next
                })
            })
            .collect();
    }
    if columns.is_empty() {
        return Ok(Vec::new());
    }

    Ok(combos
        .into_iter()
        .map(|combo| to_key(columns, combo))
        .collect())
}

fn to_key(columns: &[&str], combo: Vec<Cell>) -> GroupKey {
    GroupKey::new(
        columns
            .iter()
            .map(|c| c.to_string())
            .zip(combo)
            .collect(),
    )
}

/// Results of a grouped evaluation, in key order.
#[derive(Debug, Clone)]
pub struct GroupedOutcome<T> {
    pub successes: Vec<(GroupKey, T)>,
    pub failures: Vec<(GroupKey, ForecastError)>,
}

impl<T> GroupedOutcome<T> {
    /// Total number of groups evaluated.
    pub fn len(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether every group succeeded.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Evaluate `evaluate` on each group's rows in parallel.
///
/// Errors are collected per group alongside the successes.
pub fn evaluate_groups<T, F>(table: &Table, keys: &[GroupKey], evaluate: F) -> GroupedOutcome<T>
where
    T: Send,
    F: Fn(&Table) -> Result<T> + Sync,
{
    let outcomes: Vec<(GroupKey, Result<T>)> = keys
        .par_iter()
        .map(|key| {
            let outcome = key.select(table).and_then(|rows| evaluate(&rows));
            (key.clone(), outcome)
        })
        .collect();

    let mut successes = Vec::new();
    let mut failures = Vec::new();
    for (key, outcome) in outcomes {
        match outcome {
            Ok(value) => successes.push((key, value)),
            Err(err) => {
                warn!(group = %key, error = %err, "group evaluation failed");
                failures.push((key, err));
            }
        }
    }
    debug!(
        succeeded = successes.len(),
        failed = failures.len(),
        "evaluated groups"
    );

    GroupedOutcome {
        successes,
        failures,
    }
}

/// MAPE of `forecast_col` against `actual_col` for each observed group.
///
/// Within a group the rows are ordered by `order_by` when given.
///
/// # Errors
/// `MissingColumn` if a grouping, value or ordering column is absent.
/// Per-group failures (e.g. `NoValidPeriods`) are collected in the outcome.
pub fn mape_by_group(
    table: &Table,
    group_columns: &[&str],
    actual_col: &str,
    forecast_col: &str,
    order_by: Option<&str>,
) -> Result<GroupedOutcome<f64>> {
    table.require_columns(&[actual_col, forecast_col])?;
    if let Some(col) = order_by {
        table.require_columns(&[col])?;
    }
    let keys = observed_keys(table, group_columns)?;

    Ok(evaluate_groups(table, &keys, |rows| {
        let (actuals, forecasts) = rows.paired_series(actual_col, forecast_col, order_by)?;
        mape(&actuals, &forecasts)
    }))
}

/// Exponential smoothing of `value_col` within each observed group.
///
/// Each group's rows are put in `date_col` order and smoothed on their own,
/// so partners never share a sequence.
///
/// # Errors
/// `MissingColumn` if a grouping, date or value column is absent.
/// Per-group failures are collected in the outcome.
pub fn smoothing_by_group(
    table: &Table,
    group_columns: &[&str],
    date_col: &str,
    value_col: &str,
    alpha: f64,
) -> Result<GroupedOutcome<BaselineForecast>> {
    table.require_columns(&[date_col, value_col])?;
    let keys = observed_keys(table, group_columns)?;

    Ok(evaluate_groups(table, &keys, |rows| {
        let (_, actuals) = rows.dated_values(date_col, value_col)?;
        baseline_forecast(&actuals, alpha)
    }))
}

/// Seasonally adjusted smoothing of `value_col` within each observed group.
///
/// `profile` supplies the index for each row's date; a pooled profile
/// (e.g. one product across all partners) is applied to every group.
///
/// # Errors
/// `MissingColumn` if a grouping, date or value column is absent.
/// Per-group failures, including dates outside the profile, are collected
/// in the outcome.
pub fn seasonal_by_group(
    table: &Table,
    group_columns: &[&str],
    date_col: &str,
    value_col: &str,
    profile: &SeasonalProfile,
    alpha: f64,
) -> Result<GroupedOutcome<SeasonalForecast>> {
    table.require_columns(&[date_col, value_col])?;
    let keys = observed_keys(table, group_columns)?;

    Ok(evaluate_groups(table, &keys, |rows| {
        let (dates, actuals) = rows.dated_values(date_col, value_col)?;
        let index = profile.index_for(&dates)?;
        seasonal_forecast(&actuals, &index, alpha)
    }))
}
