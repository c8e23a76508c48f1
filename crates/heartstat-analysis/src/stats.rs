//! Descriptive statistics over plain `f64` slices.
//!
//! Functions here take the non-null values of a column. Empty input yields
//! NaN rather than an error so a single degenerate column does not abort a
//! report.
use statrs::statistics::Statistics;

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().mean()
}

/// Sample standard deviation (n - 1 denominator). NaN for fewer than two values.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    values.iter().std_dev()
}

pub fn min(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    Statistics::min(values.iter())
}

pub fn max(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    Statistics::max(values.iter())
}

/// Sort a copy of `values` in ascending order.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(|a, b| a.total_cmp(b));
    out
}

/// Quantile `p` of already sorted data by linear interpolation between order
/// statistics.
///
/// With `h = (n - 1) * p`, the result is `x[floor(h)] + (h - floor(h)) *
/// (x[floor(h) + 1] - x[floor(h)])`. This matches the default method of
/// R (type 7) and NumPy.
///
/// # Arguments
///
/// * `sorted_values` - Values in non-decreasing order.
/// * `p` - Probability in `[0, 1]`.
///
/// # Returns
///
/// NaN when `sorted_values` is empty or `p` is out of range.
pub fn quantile_sorted(sorted_values: &[f64], p: f64) -> f64 {
    let n = sorted_values.len();
    if n == 0 || !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let frac = h - h.floor();
    if lo + 1 >= n {
        return sorted_values[n - 1];
    }
    sorted_values[lo] + frac * (sorted_values[lo + 1] - sorted_values[lo])
}

pub fn quantile(values: &[f64], p: f64) -> f64 {
    quantile_sorted(&sorted(values), p)
}

pub fn median(values: &[f64]) -> f64 {
    quantile(values, 0.5)
}

/// Central moment sums `(sum d^2, sum d^3, sum d^4)` with `d = x - mean`.
fn moment_sums(values: &[f64]) -> (f64, f64, f64) {
    let m = mean(values);
    values.iter().fold((0.0, 0.0, 0.0), |(s2, s3, s4), &x| {
        let d = x - m;
        let d2 = d * d;
        (s2 + d2, s3 + d2 * d, s4 + d2 * d2)
    })
}

/// Adjusted Fisher-Pearson skewness (G1).
///
/// `G1 = n * sqrt(n - 1) / (n - 2) * S3 / S2^1.5`, where `S2` and `S3` are the
/// sums of squared and cubed deviations. NaN for fewer than three values and
/// 0 for a constant sample.
pub fn skewness(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if values.len() < 3 {
        return f64::NAN;
    }
    let (s2, s3, _) = moment_sums(values);
    if s2 == 0.0 {
        return 0.0;
    }
    (n * (n - 1.0).sqrt() / (n - 2.0)) * (s3 / s2.powf(1.5))
}

/// Bias-corrected excess kurtosis (G2).
///
/// `G2 = n(n+1)(n-1) S4 / ((n-2)(n-3) S2^2) - 3(n-1)^2 / ((n-2)(n-3))`.
/// NaN for fewer than four values and 0 for a constant sample.
pub fn kurtosis(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if values.len() < 4 {
        return f64::NAN;
    }
    let (s2, _, s4) = moment_sums(values);
    if s2 == 0.0 {
        return 0.0;
    }
    let numerator = n * (n + 1.0) * (n - 1.0) * s4;
    let denominator = (n - 2.0) * (n - 3.0) * s2 * s2;
    let adjustment = 3.0 * (n - 1.0).powi(2) / ((n - 2.0) * (n - 3.0));
    numerator / denominator - adjustment
}

/// Pearson correlation over paired values.
///
/// NaN when fewer than two pairs are given or either side has zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    assert_eq!(x.len(), y.len(), "pearson requires equal lengths");
    if x.len() < 2 {
        return f64::NAN;
    }
    let mx = mean(x);
    let my = mean(y);
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (&a, &b) in x.iter().zip(y) {
        let dx = a - mx;
        let dy = b - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }
    (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0)
}
