//! Forecast-and-score pipelines.
//!
//! Composes the smoothing recursion with seasonal adjustment and MAPE.
//! Period 0 is excluded from scoring because its forecast is initialised
//! to the actual value.

use crate::error::{ForecastError, Result};
use crate::models::exponential_smoothing_series;
use crate::seasonality::SeasonalIndex;
use crate::utils::mape;

/// Exponential smoothing forecasts and their in-sample MAPE.
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineForecast {
    pub forecasts: Vec<f64>,
    pub mape: f64,
}

/// Seasonally adjusted smoothing forecasts and their in-sample MAPE.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalForecast {
    /// Actuals divided by the seasonal index.
    pub deseasonalized: Vec<f64>,
    /// Smoothing forecasts on the deseasonalized scale.
    pub baseline: Vec<f64>,
    /// Baseline forecasts with the seasonal index reapplied.
    pub forecasts: Vec<f64>,
    pub mape: f64,
}

fn score(actuals: &[f64], forecasts: &[f64]) -> Result<f64> {
    if actuals.len() < 2 {
        return Err(ForecastError::NoValidPeriods);
    }
    mape(&actuals[1..], &forecasts[1..])
}

/// Smooth `actuals` and score the forecasts against them.
///
/// # Errors
/// * `EmptyInput` / `InvalidAlpha` from the smoothing recursion
/// * `NoValidPeriods` if no period after the first has a nonzero actual
pub fn baseline_forecast(actuals: &[f64], alpha: f64) -> Result<BaselineForecast> {
    let forecasts = exponential_smoothing_series(actuals, alpha)?;
    let mape = score(actuals, &forecasts)?;
    Ok(BaselineForecast { forecasts, mape })
}

/// Deseasonalize, smooth, reseasonalize, then score.
///
/// # Errors
/// * `LengthMismatch` if `index` is not aligned with `actuals`
/// * `EmptyInput` / `InvalidAlpha` from the smoothing recursion
/// * `NoValidPeriods` if no period after the first has a nonzero actual
pub fn seasonal_forecast(
    actuals: &[f64],
    index: &SeasonalIndex,
    alpha: f64,
) -> Result<SeasonalForecast> {
    let deseasonalized = index.deseasonalize(actuals)?;
    let baseline = exponential_smoothing_series(&deseasonalized, alpha)?;
    let forecasts = index.reseasonalize(&baseline)?;
    let mape = score(actuals, &forecasts)?;
    Ok(SeasonalForecast {
        deseasonalized,
        baseline,
        forecasts,
        mape,
    })
}
