//! Simple moving-average forecast.

use crate::error::{ForecastError, Result};

/// Forecast the next period as the mean of the last `window` observations.
///
/// # Errors
/// * `InvalidWindow` if `window` is zero
/// * `InsufficientData` if fewer than `window` observations are available
pub fn moving_average(actuals: &[f64], window: usize) -> Result<f64> {
    if window == 0 {
        return Err(ForecastError::InvalidWindow(window));
    }
    if actuals.len() < window {
        return Err(ForecastError::InsufficientData {
            needed: window,
            got: actuals.len(),
        });
    }

    let tail = &actuals[actuals.len() - window..];
    Ok(tail.iter().sum::<f64>() / window as f64)
}
