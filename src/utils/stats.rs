//! Statistical utility functions.

use crate::core::Cell;
use crate::error::{ForecastError, Result};

/// Degrees-of-freedom offset for unbiased sample variance (spreadsheet `VAR.S`).
pub const DEFAULT_DDOF: usize = 1;

/// A value that may or may not represent a usable number.
///
/// Missing, non-numeric, NaN and infinite values map to `None`.
pub trait NumericLike {
    fn to_finite(&self) -> Option<f64>;
}

impl NumericLike for f64 {
    fn to_finite(&self) -> Option<f64> {
        self.is_finite().then_some(*self)
    }
}

impl NumericLike for f32 {
    fn to_finite(&self) -> Option<f64> {
        f64::from(*self).to_finite()
    }
}

macro_rules! impl_numeric_like_int {
    ($($t:ty),*) => {
        $(
            impl NumericLike for $t {
                fn to_finite(&self) -> Option<f64> {
                    Some(*self as f64)
                }
            }
        )*
    };
}

impl_numeric_like_int!(i32, i64, u32, u64, usize);

impl NumericLike for str {
    fn to_finite(&self) -> Option<f64> {
        self.trim().parse::<f64>().ok()?.to_finite()
    }
}

impl NumericLike for String {
    fn to_finite(&self) -> Option<f64> {
        self.as_str().to_finite()
    }
}

impl NumericLike for Cell {
    fn to_finite(&self) -> Option<f64> {
        self.as_number()
    }
}

impl<T: NumericLike> NumericLike for Option<T> {
    fn to_finite(&self) -> Option<f64> {
        self.as_ref().and_then(NumericLike::to_finite)
    }
}

impl<T: NumericLike + ?Sized> NumericLike for &T {
    fn to_finite(&self) -> Option<f64> {
        (**self).to_finite()
    }
}

/// Calculate the mean of a slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample variance with a degrees-of-freedom offset.
///
/// Values that are missing, non-numeric, NaN or infinite are skipped
/// without warning, so blanks and error cells behave as they do in a
/// spreadsheet. The result is `Σ(v - mean)² / (n - ddof)` over the `n`
/// remaining values.
///
/// # Errors
/// `InsufficientObservations` when `n <= ddof`.
///
/// # Example
/// ```
/// use anofox_bullwhip::utils::sample_variance;
///
/// let v = sample_variance([Some(1.0), None, Some(3.0), Some(f64::NAN)], 1).unwrap();
/// assert!((v - 2.0).abs() < 1e-12);
/// ```
pub fn sample_variance<I>(values: I, ddof: usize) -> Result<f64>
where
    I: IntoIterator,
    I::Item: NumericLike,
{
    let valid: Vec<f64> = values
        .into_iter()
        .filter_map(|v| v.to_finite())
        .collect();

    let n = valid.len();
    if n <= ddof {
        return Err(ForecastError::InsufficientObservations {
            needed: ddof + 1,
            got: n,
        });
    }

    // Shift by the first value so a constant sequence yields exactly zero
    let shift = valid[0];
    let m = valid.iter().map(|v| v - shift).sum::<f64>() / n as f64;
    let sse: f64 = valid.iter().map(|v| (v - shift - m).powi(2)).sum();
    Ok(sse / (n - ddof) as f64)
}

/// Sample variance with [`DEFAULT_DDOF`].
pub fn sample_variance_default<I>(values: I) -> Result<f64>
where
    I: IntoIterator,
    I::Item: NumericLike,
{
    sample_variance(values, DEFAULT_DDOF)
}
