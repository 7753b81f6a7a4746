//! Forecast generators.
//!
//! Fixed-parameter recursions over an ordered sequence of observations:
//! a moving-average baseline and single exponential smoothing.

pub mod baseline;
pub mod exponential;

pub use baseline::moving_average;
pub use exponential::{exponential_smoothing, exponential_smoothing_series};
