//! Utility functions: accuracy metrics and dispersion estimates.

pub mod metrics;
pub mod stats;

pub use metrics::mape;
pub use stats::{
    mean, sample_variance, sample_variance_default, NumericLike, DEFAULT_DDOF,
};
