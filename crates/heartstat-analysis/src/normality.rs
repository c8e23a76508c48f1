//! Shapiro-Wilk normality test.
//!
//! Implements Royston's approximation (Applied Statistics algorithm AS R94,
//! 1995), valid for sample sizes 3 to 5000. Coefficients for the expected
//! normal order statistics come from a polynomial in `1/sqrt(n)`, and the
//! p-value from a normalising transformation of `ln(1 - W)`.
//!
//! Reference: Royston, P. (1995) "Remark AS R94: A remark on algorithm AS 181:
//! The W-test for normality", *Applied Statistics* 44(4), pp. 547-551.
use log::debug;
use statrs::function::erf::{erfc, erfc_inv};

use crate::config::ReportConfig;
use crate::dataset::Dataset;
use crate::error::StatsError;

/// Largest sample size supported by the approximation.
pub const MAX_SAMPLE_SIZE: usize = 5000;

const SMALL: f64 = 1e-19;

// Polynomial coefficients, lowest order first.
const G: [f64; 2] = [-2.273, 0.459];
const C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.071190, 4.434685, -2.706056];
const C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
const C3: [f64; 4] = [0.5440, -0.39978, 0.025054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
const C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
const C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normality {
    Normal,
    NonNormal,
}

impl Normality {
    pub fn label(&self) -> &'static str {
        match self {
            Normality::Normal => "normal",
            Normality::NonNormal => "non-normal",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalityResult {
    pub column: String,
    pub sample_size: usize,
    pub statistic: f64,
    pub p_value: f64,
    pub classification: Normality,
}

/// Evaluate `c[0] + c[1] x + c[2] x^2 + ...`.
fn poly(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

/// Standard normal quantile function.
fn norm_ppf(p: f64) -> f64 {
    -std::f64::consts::SQRT_2 * erfc_inv(2.0 * p)
}

fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / std::f64::consts::SQRT_2)
}

/// Half set of Shapiro-Wilk coefficients `a[0..n/2]` for the largest order
/// statistics, normalised so the full antisymmetric vector has unit length.
fn coefficients(n: usize) -> Vec<f64> {
    let half = n / 2;
    if n == 3 {
        return vec![std::f64::consts::FRAC_1_SQRT_2];
    }

    let an25 = n as f64 + 0.25;
    let m: Vec<f64> = (1..=half)
        .map(|i| -norm_ppf((i as f64 - 0.375) / an25))
        .collect();
    let summ2: f64 = 2.0 * m.iter().map(|v| v * v).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / (n as f64).sqrt();

    let a1 = poly(&C1, rsn) + m[0] / ssumm2;
    let mut a = vec![0.0; half];
    a[0] = a1;

    let (first_free, fac) = if n > 5 {
        let a2 = poly(&C2, rsn) + m[1] / ssumm2;
        a[1] = a2;
        let fac = ((summ2 - 2.0 * m[0] * m[0] - 2.0 * m[1] * m[1])
            / (1.0 - 2.0 * a1 * a1 - 2.0 * a2 * a2))
            .sqrt();
        (2, fac)
    } else {
        let fac = ((summ2 - 2.0 * m[0] * m[0]) / (1.0 - 2.0 * a1 * a1)).sqrt();
        (1, fac)
    };
    for i in first_free..half {
        a[i] = m[i] / fac;
    }
    a
}

/// Shapiro-Wilk `(W, p-value)` for `sample`.
///
/// # Arguments
///
/// * `sample` - Observations without nulls, in any order.
///
/// # Returns
///
/// `None` when the size is outside 3..=5000 or the sample holds a non-finite
/// value. A sample with zero range returns `(1.0, 1.0)`.
pub fn shapiro_wilk(sample: &[f64]) -> Option<(f64, f64)> {
    let n = sample.len();
    if !(3..=MAX_SAMPLE_SIZE).contains(&n) || sample.iter().any(|v| !v.is_finite()) {
        return None;
    }

    let mut x = sample.to_vec();
    x.sort_by(|a, b| a.total_cmp(b));
    let range = x[n - 1] - x[0];
    if range < SMALL {
        return Some((1.0, 1.0));
    }

    let a = coefficients(n);
    let mean = x.iter().sum::<f64>() / n as f64;
    let ssq: f64 = x.iter().map(|v| (v - mean).powi(2)).sum();
    let numerator: f64 = a
        .iter()
        .enumerate()
        .map(|(i, ai)| ai * (x[n - 1 - i] - x[i]))
        .sum();
    let norm_a: f64 = 2.0 * a.iter().map(|v| v * v).sum::<f64>();
    let w = (numerator * numerator / (norm_a * ssq)).min(1.0);

    Some((w, p_value(w, n)))
}

fn p_value(w: f64, n: usize) -> f64 {
    if n == 3 {
        // Exact distribution for n = 3.
        let pi6 = 6.0 / std::f64::consts::PI;
        let stqr = std::f64::consts::FRAC_PI_3;
        return (pi6 * (w.sqrt().asin() - stqr)).clamp(0.0, 1.0);
    }

    let w1 = 1.0 - w;
    if w1 <= 0.0 {
        return 1.0;
    }
    let an = n as f64;
    let mut y = w1.ln();
    let (m, s) = if n <= 11 {
        let gamma = poly(&G, an);
        if y >= gamma {
            return 1e-99;
        }
        y = -(gamma - y).ln();
        (poly(&C3, an), poly(&C4, an).exp())
    } else {
        let xx = an.ln();
        (poly(&C5, xx), poly(&C6, xx).exp())
    };

    1.0 - norm_cdf((y - m) / s)
}

/// Test one column, dropping nulls first.
///
/// Fails with `ColumnMissing` when the column is absent and with
/// `StatisticalPrecondition` when the sample size is not strictly between
/// `config.normality_min_exclusive` and `config.normality_max_exclusive`.
pub fn test_column(
    dataset: &Dataset,
    column: &str,
    config: &ReportConfig,
) -> Result<NormalityResult, StatsError> {
    let col = dataset
        .column(column)
        .ok_or_else(|| StatsError::column_missing(column))?;
    let sample = col.valid_values();
    let n = sample.len();

    if n <= config.normality_min_exclusive || n >= config.normality_max_exclusive {
        return Err(StatsError::StatisticalPrecondition {
            column: column.to_string(),
            reason: format!(
                "sample size {} outside ({}, {})",
                n, config.normality_min_exclusive, config.normality_max_exclusive
            ),
        });
    }

    let (statistic, p_value) =
        shapiro_wilk(&sample).ok_or_else(|| StatsError::StatisticalPrecondition {
            column: column.to_string(),
            reason: "sample is not testable".to_string(),
        })?;

    Ok(NormalityResult {
        column: column.to_string(),
        sample_size: n,
        statistic,
        p_value,
        classification: if p_value > config.normality_alpha {
            Normality::Normal
        } else {
            Normality::NonNormal
        },
    })
}

/// Run the test on each of `config.continuous_columns`, skipping columns that
/// are absent or outside the valid sample size range.
pub fn normality_tests(dataset: &Dataset, config: &ReportConfig) -> Vec<NormalityResult> {
    config
        .continuous_columns
        .iter()
        .filter_map(|column| match test_column(dataset, column, config) {
            Ok(result) => Some(result),
            Err(e) => {
                debug!("Skipping normality test: {}", e);
                None
            }
        })
        .collect()
}
