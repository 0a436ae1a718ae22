//! Shared numeric helpers used across the pipeline stages.

use std::cmp::Ordering;

/// Round to two decimal places (currency and rating convention).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Linearly interpolated percentile, `p` in `[0, 1]`.
///
/// Matches the dataframe convention: the rank is `p * (n - 1)` over the
/// sorted values, interpolating between the two neighboring order
/// statistics when the rank is fractional. Returns 0.0 for an empty slice
/// so callers never see NaN.
pub fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let rank = p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let low = rank.floor() as usize;
    let high = rank.ceil() as usize;
    if low == high {
        sorted[low]
    } else {
        sorted[low] + (sorted[high] - sorted[low]) * (rank - low as f64)
    }
}

/// Min-max normalize into `[0, 1]`.
///
/// A series with no spread (min equals max, including a single element)
/// normalizes to 0.0 for every element.
pub fn min_max_normalize(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    if span <= 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| (v - min) / span).collect()
}

/// True when every element equals the first (and the slice is non-empty).
pub fn is_constant(values: &[f64]) -> bool {
    match values.split_first() {
        Some((first, rest)) => rest.iter().all(|v| v == first),
        None => false,
    }
}
