//! Variance ratio between shipments and demand.

use crate::error::{ForecastError, Result};
use crate::utils::stats::{sample_variance, NumericLike, DEFAULT_DDOF};
use std::fmt;

/// Configuration for bullwhip ratio computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BullwhipConfig {
    /// Degrees-of-freedom offset for both variances.
    pub ddof: usize,
    /// Optional floor for the demand variance. When set, a demand variance
    /// below the floor is replaced by the floor before dividing.
    pub epsilon: Option<f64>,
}

impl Default for BullwhipConfig {
    fn default() -> Self {
        Self {
            ddof: DEFAULT_DDOF,
            epsilon: None,
        }
    }
}

impl BullwhipConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ddof(mut self, ddof: usize) -> Self {
        self.ddof = ddof;
        self
    }

    /// Opt in to flooring the demand variance at `epsilon`.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = Some(epsilon);
        self
    }

    /// Apply the floor (if any) and reject a zero denominator.
    fn denominator(&self, var_demand: f64) -> Result<f64> {
        let denom = match self.epsilon {
            Some(floor) if var_demand < floor => floor,
            _ => var_demand,
        };
        if denom == 0.0 {
            return Err(ForecastError::ZeroDemandVariance);
        }
        Ok(denom)
    }
}

/// Shipment-to-demand variance ratio with the quantities behind it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BullwhipResult {
    /// `var_shipments / var_demand`; above 1 means amplification upstream.
    pub ratio: f64,
    pub var_shipments: f64,
    pub var_demand: f64,
    /// Number of periods (valid demand values) used.
    pub n_periods: usize,
}

impl BullwhipResult {
    /// Compute the ratio from two variances.
    pub(crate) fn from_variances(
        var_shipments: f64,
        var_demand: f64,
        n_periods: usize,
        config: &BullwhipConfig,
    ) -> Result<Self> {
        let denom = config.denominator(var_demand)?;
        Ok(Self {
            ratio: var_shipments / denom,
            var_shipments,
            var_demand,
            n_periods,
        })
    }

    /// Whether shipments vary more than demand.
    pub fn is_amplified(&self) -> bool {
        self.ratio > 1.0
    }
}

impl fmt::Display for BullwhipResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bullwhip Ratio: {:.4}", self.ratio)?;
        writeln!(f, "Var(Shipments): {:.2}", self.var_shipments)?;
        writeln!(f, "Var(Demand): {:.2}", self.var_demand)?;
        write!(f, "Periods analyzed: {}", self.n_periods)
    }
}

/// Bullwhip ratio of pre-aggregated sequences: `var(shipments) / var(demand)`.
///
/// Both sequences are filtered like [`sample_variance`], so blanks and
/// non-numeric entries are ignored.
///
/// # Errors
/// * `InsufficientObservations` if either sequence has too few valid values
/// * `ZeroDemandVariance` if the demand variance is zero and no floor applies
///
/// # Example
/// ```
/// use anofox_bullwhip::bullwhip::{bullwhip_ratio, BullwhipConfig};
///
/// let r = bullwhip_ratio(&[50.0, 300.0, 100.0], &[100.0, 200.0, 150.0], &BullwhipConfig::default())
///     .unwrap();
/// assert!((r.ratio - 7.0).abs() < 1e-10);
/// ```
pub fn bullwhip_ratio<S, D>(shipments: S, demand: D, config: &BullwhipConfig) -> Result<BullwhipResult>
where
    S: IntoIterator,
    S::Item: NumericLike,
    D: IntoIterator,
    D::Item: NumericLike,
{
    let var_shipments = sample_variance(shipments, config.ddof)?;

    let demand: Vec<f64> = demand.into_iter().filter_map(|v| v.to_finite()).collect();
    let var_demand = sample_variance(&demand, config.ddof)?;

    BullwhipResult::from_variances(var_shipments, var_demand, demand.len(), config)
}
