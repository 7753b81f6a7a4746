//! Simple exponential smoothing with a fixed smoothing coefficient.
//!
//! The recursion is:
//! `F_t = α × A_{t-1} + (1-α) × F_{t-1}`
//!
//! where α (alpha) is the smoothing coefficient in [0, 1] and the first
//! forecast equals the first actual.

use crate::error::{ForecastError, Result};

fn check_alpha(alpha: f64) -> Result<()> {
    // NaN fails the range check
    if (0.0..=1.0).contains(&alpha) {
        Ok(())
    } else {
        Err(ForecastError::InvalidAlpha(alpha))
    }
}

/// One smoothing step: the forecast for the period after `actual_prev`.
pub fn exponential_smoothing(actual_prev: f64, forecast_prev: f64, alpha: f64) -> Result<f64> {
    check_alpha(alpha)?;
    Ok(alpha * actual_prev + (1.0 - alpha) * forecast_prev)
}

/// A forecast for every period of `actuals`.
///
/// `forecast[0]` is initialised to `actuals[0]`, so period 0 carries no
/// forecast error. Each later forecast depends on all earlier ones.
///
/// # Errors
/// * `EmptyInput` if `actuals` is empty
/// * `InvalidAlpha` if alpha is outside [0, 1]
///
/// # Example
/// ```
/// use anofox_bullwhip::models::exponential::exponential_smoothing_series;
///
/// let f = exponential_smoothing_series(&[100.0, 110.0, 105.0], 0.3).unwrap();
/// assert_eq!(f.len(), 3);
/// assert!((f[2] - 103.0).abs() < 1e-10);
/// ```
pub fn exponential_smoothing_series(actuals: &[f64], alpha: f64) -> Result<Vec<f64>> {
    let Some(&first) = actuals.first() else {
        return Err(ForecastError::EmptyInput);
    };
    check_alpha(alpha)?;

    let mut forecasts = Vec::with_capacity(actuals.len());
    let mut level = first;
    forecasts.push(level);

    for &prev in &actuals[..actuals.len() - 1] {
        level = alpha * prev + (1.0 - alpha) * level;
        forecasts.push(level);
    }

    Ok(forecasts)
}
