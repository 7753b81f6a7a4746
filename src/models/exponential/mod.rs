//! Exponential smoothing.
//!
//! Single-parameter smoothing only: one step at a time, or a full series
//! of one-step-ahead forecasts.

mod ses;

pub use ses::{exponential_smoothing, exponential_smoothing_series};
