//! Reductions over plain samples

/// Value at fraction `q` of the sorted samples
///
/// Sorts ascending and picks index `floor((n - 1) * q)`. NaN when there are
/// no samples.
pub fn pctile(xs: &[f64], q: f64) -> f64 {
    if xs.is_empty() {
        return f64::NAN;
    }
    let mut sorted = xs.to_vec();
    sorted.sort_by(f64::total_cmp);
    let index = ((sorted.len() - 1) as f64 * q) as usize;
    sorted[index.min(sorted.len() - 1)]
}

pub fn sum(xs: &[f64]) -> f64 {
    xs.iter().sum()
}
