//! Bullwhip (variance amplification) measurement.
//!
//! The bullwhip ratio compares the variance of shipments with the variance
//! of the underlying demand over matched periods. A ratio above one means
//! orders amplify demand variability as they move upstream.
//!
//! - [`bullwhip_ratio`] works on sequences already reduced to one value per period
//! - [`BullwhipQuery`] cleans and aggregates a weekly [`Table`](crate::core::Table) first

mod aggregate;
mod ratio;

pub use aggregate::{BullwhipMeasurement, BullwhipQuery, PeriodRow, PeriodTable};
pub use ratio::{bullwhip_ratio, BullwhipConfig, BullwhipResult};
