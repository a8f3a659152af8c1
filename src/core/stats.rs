//! Pure statistical helpers.
//!
//! The helpers return `None` when the sample is too small rather than a
//! NaN, so callers must decide what an undefined statistic means for them.

/// Arithmetic mean of `values`.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median of `values`; the average of the two middle values when the
/// count is even.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Sample standard deviation (n - 1 denominator) of `values`.
///
/// Undefined for fewer than two values.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let center = mean(values)?;
    let squares: f64 = values.iter().map(|v| (v - center).powi(2)).sum();
    Some((squares / (values.len() - 1) as f64).sqrt())
}

/// Smallest length of at least `floor`, ignoring shorter ones.
pub fn min_at_least(lengths: &[usize], floor: usize) -> Option<usize> {
    lengths.iter().copied().filter(|&n| n >= floor).min()
}

/// Lossless widening of line lengths for the float helpers.
pub fn as_floats(lengths: &[usize]) -> Vec<f64> {
    lengths.iter().map(|&n| n as f64).collect()
}
