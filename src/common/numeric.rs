//! Zero-guarded arithmetic used by every ratio in the engine.
//!
//! None of these helpers ever return NaN or infinity: a zero (or non-finite)
//! denominator yields 0.0 so tier and pattern decisions stay well defined.

use super::constants::PERCENT;

/// `numerator / denominator`, or 0.0 when the denominator is zero.
#[inline]
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }
    let value = numerator / denominator;
    if value.is_finite() { value } else { 0.0 }
}

/// `(current / reference - 1) * 100`, or 0.0 when the reference is zero.
#[inline]
pub fn percentage_change(current: f64, reference: f64) -> f64 {
    if reference == 0.0 {
        return 0.0;
    }
    (safe_div(current, reference) - 1.0) * PERCENT
}

/// `part / whole * 100`, or 0.0 when the whole is zero.
#[inline]
pub fn percentage_of(part: f64, whole: f64) -> f64 {
    safe_div(part, whole) * PERCENT
}

/// Arithmetic mean, 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1). Fewer than two samples yield 0.0.
pub fn sample_stddev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let variance = values
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Linear interpolation between order statistics. `sorted` must be ascending.
pub fn interpolate_quantile(sorted: &[f64], percentile: f64) -> f64 {
    let len = sorted.len();
    if len == 0 {
        return 0.0;
    }
    let index = percentile.clamp(0.0, 1.0) * (len - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted[lower]
    } else {
        let weight = index - lower as f64;
        sorted[lower] * (1.0 - weight) + sorted[upper] * weight
    }
}
