//! Seasonal adjustment.
//!
//! This module provides multiplicative seasonal tools:
//! - deseasonalize/reseasonalize transforms
//! - seasonal index derivation from pooled per-season totals

mod adjust;
mod index;

pub use adjust::{deseasonalize, reseasonalize};
pub use index::{seasonal_indices, SeasonOfYear, SeasonalIndex, SeasonalProfile};
