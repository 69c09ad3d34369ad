use argminmax::ArgMinMax;

use crate::domain::PricePoint;

/// Largest value. Caller guarantees a non-empty slice.
pub fn get_max(vec: &[f64]) -> f64 {
    let max_index: usize = vec.argmax();
    vec[max_index]
}

/// Smallest value. Caller guarantees a non-empty slice.
pub fn get_min(vec: &[f64]) -> f64 {
    let min_index: usize = vec.argmin();
    vec[min_index]
}

/// Incremental mean: the mean of `count` values (including `new_value`) given the mean of
/// the first `count - 1`.
#[inline]
pub fn running_mean(previous_mean: f64, new_value: f64, count: usize) -> f64 {
    debug_assert!(count > 0);
    previous_mean + (new_value - previous_mean) / count as f64
}

/// Exponential decay with the given half-life: 1.0 at age 0, 0.5 at `half_life`.
/// Negative ages are treated as 0.
pub fn half_life_decay(age: f64, half_life: f64) -> f64 {
    debug_assert!(half_life > 0.0);
    0.5_f64.powf(age.max(0.0) / half_life)
}

/// Simple-average true range over the last `period` bars.
/// Needs `period + 1` bars because the first true range uses the previous close.
pub fn average_true_range(points: &[PricePoint], period: usize) -> Option<f64> {
    if period == 0 || points.len() < period + 1 {
        return None;
    }
    let tail = &points[points.len() - (period + 1)..];
    let sum: f64 = tail
        .windows(2)
        .map(|pair| pair[1].true_range(pair[0].close))
        .sum();
    Some(sum / period as f64)
}
