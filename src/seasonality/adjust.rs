//! Multiplicative seasonal adjustment.

use crate::error::{ForecastError, Result};

fn check_lengths(values: &[f64], seasonal_index: &[f64]) -> Result<()> {
    if values.len() != seasonal_index.len() {
        return Err(ForecastError::LengthMismatch {
            expected: values.len(),
            got: seasonal_index.len(),
        });
    }
    Ok(())
}

/// Remove the seasonal component: `actual[i] / seasonal_index[i]`.
///
/// The index is not checked for zeros here; a zero entry yields an
/// infinite or NaN output. Build a [`SeasonalIndex`](super::SeasonalIndex)
/// when the index should be validated up front.
pub fn deseasonalize(actuals: &[f64], seasonal_index: &[f64]) -> Result<Vec<f64>> {
    check_lengths(actuals, seasonal_index)?;
    Ok(actuals
        .iter()
        .zip(seasonal_index.iter())
        .map(|(a, s)| a / s)
        .collect())
}

/// Reapply the seasonal component: `forecast[i] * seasonal_index[i]`.
pub fn reseasonalize(forecasts: &[f64], seasonal_index: &[f64]) -> Result<Vec<f64>> {
    check_lengths(forecasts, seasonal_index)?;
    Ok(forecasts
        .iter()
        .zip(seasonal_index.iter())
        .map(|(f, s)| f * s)
        .collect())
}
