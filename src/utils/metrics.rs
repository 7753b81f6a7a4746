//! Accuracy metrics for forecast evaluation.

use crate::error::{ForecastError, Result};

/// Mean Absolute Percentage Error, as a percentage.
///
/// Averages `|actual - forecast| / |actual|` over the periods with a
/// nonzero actual and multiplies by 100. Periods whose actual is zero are
/// skipped rather than counted as infinite error, so a series with many
/// zero actuals is scored on its remaining periods only.
///
/// # Errors
/// * `LengthMismatch` if the sequences differ in length
/// * `NoValidPeriods` if every actual is zero (or the input is empty)
///
/// # Example
/// ```
/// use anofox_bullwhip::utils::mape;
///
/// let score = mape(&[10.0, 20.0, 0.0, 30.0], &[12.0, 18.0, 5.0, 25.0]).unwrap();
/// assert!((score - 15.5556).abs() < 1e-3);
/// ```
pub fn mape(actuals: &[f64], forecasts: &[f64]) -> Result<f64> {
    if actuals.len() != forecasts.len() {
        return Err(ForecastError::LengthMismatch {
            expected: actuals.len(),
            got: forecasts.len(),
        });
    }

    let (sum, count) = actuals
        .iter()
        .zip(forecasts.iter())
        .filter(|(a, _)| **a != 0.0)
        .fold((0.0, 0usize), |(sum, count), (a, f)| {
            (sum + (a - f).abs() / a.abs(), count + 1)
        });

    if count == 0 {
        return Err(ForecastError::NoValidPeriods);
    }

    Ok(sum / count as f64 * 100.0)
}
