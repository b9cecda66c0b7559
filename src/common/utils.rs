//! This file provides some small numeric helpers
//! shared by the losses and the split search.

/// Quantities below this value are treated as zero.
pub const EPS: f64 = 1e-9;


/// Returns `+1.0` for non-negative `x`, `-1.0` otherwise.
/// Note that `sign(0.0) == 1.0`.
#[inline(always)]
pub(crate) fn sign(x: f64) -> f64 {
    if x >= 0.0 { 1.0 } else { -1.0 }
}


/// Weighted mean of `values`.
/// Returns `0.0` if the total weight is below [`EPS`].
#[inline]
pub(crate) fn weighted_mean<I>(pairs: I) -> f64
    where I: IntoIterator<Item = (f64, f64)>
{
    let (sum, weight) = pairs.into_iter()
        .fold((0.0, 0.0), |(s, w), (v, wi)| (s + v * wi, w + wi));

    if weight < EPS { 0.0 } else { sum / weight }
}


/// Weighted median of `(value, weight)` pairs.
///
/// The pairs are sorted by value. With `S` the total weight,
/// the cursor starts at the first pair with `rest = S - w[0]`
/// and moves forward, subtracting the weight of the pair it reaches,
/// as long as `rest > S / 2`.
/// Returns `0.0` for an empty input.
pub fn weighted_median(mut pairs: Vec<(f64, f64)>) -> f64 {
    match pairs.len() {
        0 => return 0.0,
        1 => return pairs[0].0,
        _ => {},
    }

    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

    let total = pairs.iter().map(|(_, w)| w).sum::<f64>();
    let half = total / 2.0;

    let mut k = 0;
    let mut rest = total - pairs[0].1;
    while rest > half && k + 1 < pairs.len() {
        k += 1;
        rest -= pairs[k].1;
    }
    pairs[k].0
}


/// Returns `k` entries of `values` spread evenly over the slice.
/// If `values.len() <= k`, every entry is returned.
pub(crate) fn evenly_spaced<T: Copy>(values: &[T], k: usize) -> Vec<T> {
    let n = values.len();
    if n <= k {
        return values.to_vec();
    }
    (0..k).map(|i| values[i * n / k])
        .collect()
}
