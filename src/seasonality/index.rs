//! Seasonal index derivation.
//!
//! A seasonal index expresses each season's level relative to the grand
//! mean of all seasons: 1.2 means 20% above an average season.

use super::adjust::{deseasonalize, reseasonalize};
use crate::core::Table;
use crate::error::{ForecastError, Result};
use crate::utils::stats::{mean, sample_variance, DEFAULT_DDOF};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use tracing::debug;

/// A validated sequence of seasonal multipliers.
///
/// Every entry is finite and strictly positive, so dividing by it is
/// always defined and never flips the sign of a series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalIndex(Vec<f64>);

impl SeasonalIndex {
    /// # Errors
    /// `NonPositiveSeasonalIndex` with the position of the first entry
    /// that is zero, negative or non-finite.
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if let Some(index) = values.iter().position(|s| !(s.is_finite() && *s > 0.0)) {
            return Err(ForecastError::NonPositiveSeasonalIndex { index });
        }
        Ok(Self(values))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }

    /// Divide `actuals` by this index.
    pub fn deseasonalize(&self, actuals: &[f64]) -> Result<Vec<f64>> {
        deseasonalize(actuals, &self.0)
    }

    /// Multiply `forecasts` by this index.
    pub fn reseasonalize(&self, forecasts: &[f64]) -> Result<Vec<f64>> {
        reseasonalize(forecasts, &self.0)
    }
}

impl AsRef<[f64]> for SeasonalIndex {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// Relative seasonal index for each aggregate: `aggregate / grand mean`.
///
/// # Errors
/// * `EmptyInput` if `aggregates` is empty
/// * `ComputationError` if the grand mean is zero or not finite
pub fn seasonal_indices(aggregates: &[f64]) -> Result<Vec<f64>> {
    if aggregates.is_empty() {
        return Err(ForecastError::EmptyInput);
    }
    let grand_mean = mean(aggregates);
    if grand_mean == 0.0 || !grand_mean.is_finite() {
        return Err(ForecastError::ComputationError(format!(
            "grand mean of seasonal aggregates is {grand_mean}"
        )));
    }
    Ok(aggregates.iter().map(|a| a / grand_mean).collect())
}

/// Season-of-year used to pool observations across years and entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SeasonOfYear {
    /// ISO week number (1..=53).
    #[default]
    Week,
    /// Calendar month (1..=12).
    Month,
}

impl SeasonOfYear {
    /// Season number of a date.
    pub fn of(&self, date: NaiveDate) -> u32 {
        match self {
            SeasonOfYear::Week => date.iso_week().week(),
            SeasonOfYear::Month => date.month(),
        }
    }
}

/// Seasonal indices derived from pooled per-season totals.
#[derive(Debug, Clone)]
pub struct SeasonalProfile {
    season: SeasonOfYear,
    seasons: Vec<u32>,
    aggregates: Vec<f64>,
    indices: Vec<f64>,
    strength: f64,
}

impl SeasonalProfile {
    /// Pool `value_col` by season of `date_col` and derive indices.
    ///
    /// Every row of the table contributes, so filter the table first to
    /// restrict the pool (e.g. one product across all partners). Rows with
    /// an unparseable date or a non-numeric value are skipped.
    ///
    /// # Errors
    /// * `MissingColumn` if either column is absent
    /// * `EmptyAfterAggregation` if no row contributes
    /// * `ComputationError` if the grand mean of the season totals is zero
    /// * `InsufficientObservations` if fewer than two seasons are present
    pub fn from_table(
        table: &Table,
        date_col: &str,
        value_col: &str,
        season: SeasonOfYear,
    ) -> Result<Self> {
        let dates = table.column(date_col)?;
        let values = table.column(value_col)?;

        let mut totals: BTreeMap<u32, f64> = BTreeMap::new();
        for (date, value) in dates.iter().zip(values) {
            if let (Some(d), Some(v)) = (date.as_date(), value.as_number()) {
                *totals.entry(season.of(d)).or_insert(0.0) += v;
            }
        }

        if totals.is_empty() {
            return Err(ForecastError::EmptyAfterAggregation);
        }

        let (seasons, aggregates): (Vec<u32>, Vec<f64>) = totals.into_iter().unzip();
        let indices = seasonal_indices(&aggregates)?;
        let strength = sample_variance(&indices, DEFAULT_DDOF)?;
        debug!(seasons = seasons.len(), strength, "derived seasonal profile");

        Ok(Self {
            season,
            seasons,
            aggregates,
            indices,
            strength,
        })
    }

    pub fn season(&self) -> SeasonOfYear {
        self.season
    }

    /// Season numbers present, ascending.
    pub fn seasons(&self) -> &[u32] {
        &self.seasons
    }

    /// Pooled total per season, aligned with [`seasons`](Self::seasons).
    pub fn aggregates(&self) -> &[f64] {
        &self.aggregates
    }

    /// Seasonal index per season, aligned with [`seasons`](Self::seasons).
    pub fn indices(&self) -> &[f64] {
        &self.indices
    }

    /// Sample variance of the indices; larger means stronger seasonality.
    pub fn strength(&self) -> f64 {
        self.strength
    }

    /// Index for a season number, if present.
    pub fn index_of(&self, season: u32) -> Option<f64> {
        self.seasons
            .binary_search(&season)
            .ok()
            .map(|i| self.indices[i])
    }

    /// Align the profile with a dated series.
    ///
    /// # Errors
    /// * `ComputationError` if a date falls in a season absent from the profile
    /// * `NonPositiveSeasonalIndex` if an aligned index is zero or negative
    pub fn index_for(&self, dates: &[NaiveDate]) -> Result<SeasonalIndex> {
        let values = dates
            .iter()
            .map(|d| {
                let s = self.season.of(*d);
                self.index_of(s).ok_or_else(|| {
                    ForecastError::ComputationError(format!(
                        "no seasonal index for season {s} ({d})"
                    ))
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        SeasonalIndex::new(values)
    }
}
