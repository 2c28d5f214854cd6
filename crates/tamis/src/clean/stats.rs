//! Order statistics for the outlier-clipping stage.

/// Percentile by linear interpolation between order statistics.
///
/// `q` is a fraction in `[0, 1]` and `values` must be sorted ascending.
/// With `rank = q * (n - 1)`, the result is
/// `values[floor(rank)] + frac(rank) * (values[floor(rank) + 1] - values[floor(rank)])`.
/// The interpolation method is an observable contract: the clipping band
/// reported in diagnostics depends on it.
///
/// Returns 0.0 for an empty slice.
pub fn percentile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let rank = q.clamp(0.0, 1.0) * (values.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;

    if lo == hi {
        values[lo]
    } else {
        values[lo] + (rank - lo as f64) * (values[hi] - values[lo])
    }
}
