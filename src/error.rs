//! Error types for the anofox-bullwhip library.

use thiserror::Error;

/// Result type alias for forecasting and variability operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur while computing metrics, forecasts or ratios.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Paired sequences have different lengths.
    #[error("length mismatch: expected {expected}, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    /// Moving-average window must be positive.
    #[error("invalid window: {0} (must be positive)")]
    InvalidWindow(usize),

    /// Smoothing coefficient outside [0, 1].
    #[error("invalid alpha: {0} (must be between 0 and 1)")]
    InvalidAlpha(f64),

    /// Fewer data points than the operation needs.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Fewer valid observations than the degrees of freedom allow.
    #[error("insufficient observations: need at least {needed} valid values, got {got}")]
    InsufficientObservations { needed: usize, got: usize },

    /// Every period was excluded (all actuals are zero).
    #[error("no valid periods to compute MAPE")]
    NoValidPeriods,

    /// Input sequence is empty.
    #[error("empty input data")]
    EmptyInput,

    /// A named column is not present in the table.
    #[error("column not found: {0}")]
    MissingColumn(String),

    /// Nothing survived filtering, cleaning and aggregation.
    #[error("no data after filtering, cleaning and aggregation")]
    EmptyAfterAggregation,

    /// Demand variance is zero and no floor was configured.
    #[error("demand variance is zero; bullwhip ratio undefined")]
    ZeroDemandVariance,

    /// Seasonal index entry is not a positive finite multiplier.
    #[error("seasonal index at position {index} is not a positive finite number")]
    NonPositiveSeasonalIndex { index: usize },

    /// Computation error (e.g., degenerate derived quantities).
    #[error("computation error: {0}")]
    ComputationError(String),

    /// Reading or parsing tabular input failed.
    #[error("ingest error: {0}")]
    Ingest(String),
}

impl From<csv::Error> for ForecastError {
    fn from(err: csv::Error) -> Self {
        ForecastError::Ingest(err.to_string())
    }
}

impl From<std::io::Error> for ForecastError {
    fn from(err: std::io::Error) -> Self {
        ForecastError::Ingest(err.to_string())
    }
}
