//! Table-driven bullwhip measurement.
//!
//! Weekly demand and shipment rows are cleaned, summed per period
//! (e.g. calendar month) and compared by variance.

use super::ratio::{BullwhipConfig, BullwhipResult};
use crate::core::{Cell, Granularity, PeriodKey, Table};
use crate::error::{ForecastError, Result};
use crate::utils::stats::sample_variance;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Demand and shipment totals for one period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodRow {
    pub period: PeriodKey,
    pub demand: f64,
    pub shipments: f64,
}

/// Per-period totals, sorted chronologically, one row per period.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeriodTable {
    rows: Vec<PeriodRow>,
}

impl PeriodTable {
    pub fn rows(&self) -> &[PeriodRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn demand(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.demand).collect()
    }

    pub fn shipments(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.shipments).collect()
    }
}

impl fmt::Display for PeriodTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<10}  {:>14}  {:>14}", "Period", "Demand", "Shipments")?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<10}  {:>14.2}  {:>14.2}",
                row.period.to_string(),
                row.demand,
                row.shipments
            )?;
        }
        Ok(())
    }
}

/// Output of a table-driven measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct BullwhipMeasurement {
    /// Aggregated periods the variances were computed over.
    pub periods: PeriodTable,
    pub result: BullwhipResult,
}

/// A bullwhip measurement over a table.
///
/// # Example
/// ```
/// use anofox_bullwhip::bullwhip::BullwhipQuery;
/// use anofox_bullwhip::core::{Granularity, Table};
///
/// let table = Table::builder()
///     .column("Week", ["2017-01-02", "2017-01-09", "2017-02-06", "2017-03-06"])
///     .column("Wslr", ["A", "A", "A", "A"])
///     .column("Sales", [10.0, 20.0, 50.0, 40.0])
///     .column("Shipped", [0.0, 60.0, 20.0, 80.0])
///     .build()
///     .unwrap();
///
/// let m = BullwhipQuery::new("Week", "Sales", "Shipped")
///     .filter("Wslr", "A")
///     .granularity(Granularity::Month)
///     .measure(&table)
///     .unwrap();
/// assert_eq!(m.result.n_periods, 3);
/// ```
#[derive(Debug, Clone)]
pub struct BullwhipQuery {
    date_col: String,
    demand_col: String,
    shipments_col: String,
    filters: Vec<(String, Cell)>,
    granularity: Granularity,
    config: BullwhipConfig,
}

impl BullwhipQuery {
    pub fn new(date_col: &str, demand_col: &str, shipments_col: &str) -> Self {
        Self {
            date_col: date_col.to_string(),
            demand_col: demand_col.to_string(),
            shipments_col: shipments_col.to_string(),
            filters: Vec::new(),
            granularity: Granularity::default(),
            config: BullwhipConfig::default(),
        }
    }

    /// Restrict to rows where `column` equals `value`.
    pub fn filter(mut self, column: &str, value: impl Into<Cell>) -> Self {
        self.filters.push((column.to_string(), value.into()));
        self
    }

    /// Aggregation period (default: month).
    pub fn granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    pub fn config(mut self, config: BullwhipConfig) -> Self {
        self.config = config;
        self
    }

    /// Aggregate the table to periods and compute the variance ratio.
    ///
    /// Rows are filtered, then rows with an unusable date or a non-numeric
    /// demand or shipment value are dropped. The rest are summed per
    /// period, so every period has both totals.
    ///
    /// # Errors
    /// * `MissingColumn` if a named or filter column is absent
    /// * `EmptyAfterAggregation` if no period remains
    /// * `InsufficientObservations` if only one period remains
    /// * `ZeroDemandVariance` if the demand variance is zero and no floor applies
    pub fn measure(&self, table: &Table) -> Result<BullwhipMeasurement> {
        table.require_columns(&[
            self.date_col.as_str(),
            self.demand_col.as_str(),
            self.shipments_col.as_str(),
        ])?;
        let rows = table.matching_rows(
            self.filters
                .iter()
                .map(|(column, value)| (column.as_str(), value)),
        )?;

        let periods = self.aggregate(table, &rows)?;
        if periods.is_empty() {
            return Err(ForecastError::EmptyAfterAggregation);
        }

        let ddof = self.config.ddof;
        let var_demand = sample_variance(periods.demand(), ddof)?;
        let var_shipments = sample_variance(periods.shipments(), ddof)?;
        let result =
            BullwhipResult::from_variances(var_shipments, var_demand, periods.len(), &self.config)?;

        debug!(
            periods = periods.len(),
            ratio = result.ratio,
            "measured bullwhip ratio"
        );
        Ok(BullwhipMeasurement { periods, result })
    }

    fn aggregate(&self, table: &Table, rows: &[usize]) -> Result<PeriodTable> {
        let dates = table.column(&self.date_col)?;
        let demand = table.column(&self.demand_col)?;
        let shipments = table.column(&self.shipments_col)?;

        let mut bad_dates = 0usize;
        let mut bad_values = 0usize;
        let mut sums: BTreeMap<PeriodKey, (f64, f64)> = BTreeMap::new();

        for &i in rows {
            let Some(period) = dates[i].as_date().and_then(|d| self.granularity.key(d)) else {
                bad_dates += 1;
                continue;
            };
            let (Some(d), Some(s)) = (demand[i].as_number(), shipments[i].as_number()) else {
                bad_values += 1;
                continue;
            };
            let entry = sums.entry(period).or_insert((0.0, 0.0));
            entry.0 += d;
            entry.1 += s;
        }

        if bad_dates > 0 || bad_values > 0 {
            debug!(
                rows = rows.len(),
                bad_dates, bad_values, "dropped rows before aggregation"
            );
        }

        let rows = sums
            .into_iter()
            .map(|(period, (demand, shipments))| PeriodRow {
                period,
                demand,
                shipments,
            })
            .collect();

        Ok(PeriodTable { rows })
    }
}
