//! Pure statistical reductions over time series.
//!
//! Everything here is synchronous and allocation-free; callers own the
//! series and decide what to do with the scalar.

use crate::core::types::TimeSeries;
use crate::core::{HelsaError, Result};

/// Arithmetic mean of the series values.
///
/// Errors with [`HelsaError::EmptySeries`] on zero points. `sum` deliberately
/// does not share this guard: an empty total is zero, an empty average is
/// undefined.
pub fn mean(series: &TimeSeries) -> Result<f64> {
    if series.is_empty() {
        return Err(HelsaError::EmptySeries);
    }
    Ok(sum(series) / series.len() as f64)
}

/// Sum of the series values; `0.0` for an empty series
pub fn sum(series: &TimeSeries) -> f64 {
    series.values().sum()
}

/// Pearson correlation coefficient of two aligned series of day values.
///
/// Single pass over the raw sums:
/// `r = (n·Σxy − Σx·Σy) / sqrt((n·Σx² − (Σx)²) · (n·Σy² − (Σy)²))`.
/// Returns exactly `0.0` when either side has zero variance, never NaN.
/// Unequal lengths are a caller contract violation.
pub fn pearson(x: &[f64], y: &[f64]) -> Result<f64> {
    assert_eq!(x.len(), y.len(), "series must be the same length");
    if x.is_empty() {
        return Err(HelsaError::EmptySeries);
    }

    let n = x.len() as f64;
    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_xx: f64 = x.iter().map(|v| v * v).sum();
    let sum_yy: f64 = y.iter().map(|v| v * v).sum();
    let sum_xy: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();

    let numerator = n * sum_xy - sum_x * sum_y;
    let denominator = ((n * sum_xx - sum_x * sum_x) * (n * sum_yy - sum_y * sum_y)).sqrt();
    if denominator == 0.0 {
        return Ok(0.0);
    }
    Ok(numerator / denominator)
}
