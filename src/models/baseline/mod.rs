//! Baseline forecasting models.
//!
//! Simple methods that serve as benchmarks for the smoothed forecasts.

mod sma;

pub use sma::moving_average;
