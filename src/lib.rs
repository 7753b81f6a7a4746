//! # anofox-bullwhip
//!
//! Forecast accuracy and supply-chain variability metrics for weekly sales
//! and shipment records.
//!
//! Provides MAPE scoring, moving-average and exponential-smoothing
//! forecasts, multiplicative seasonal adjustment, spreadsheet-style sample
//! variance and the bullwhip ratio (shipment variance over demand variance)
//! at a monthly or other aggregation level.

pub mod bullwhip;
pub mod core;
pub mod error;
pub mod grouping;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod seasonality;
pub mod utils;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::bullwhip::{bullwhip_ratio, BullwhipConfig, BullwhipQuery, BullwhipResult};
    pub use crate::core::{Cell, Granularity, Table};
    pub use crate::error::{ForecastError, Result};
    pub use crate::models::{exponential_smoothing, exponential_smoothing_series, moving_average};
    pub use crate::pipeline::{baseline_forecast, seasonal_forecast};
    pub use crate::seasonality::{deseasonalize, reseasonalize, SeasonalIndex, SeasonalProfile};
    pub use crate::utils::{mape, sample_variance};
}
