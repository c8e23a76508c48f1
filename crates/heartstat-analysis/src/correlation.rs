//! Pairwise Pearson correlation over the numeric columns of a dataset.
use std::cmp::Ordering;

use crate::dataset::Dataset;
use crate::error::StatsError;
use crate::math::Array2;
use crate::stats::pearson;

/// Square, symmetric correlation matrix labelled by column name.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Array2<f64>,
}

impl CorrelationMatrix {
    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        Some(self.values[(self.index_of(a)?, self.index_of(b)?)])
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Pearson correlation for every pair of numeric columns.
///
/// Each pair uses the rows where both values are present. A pair with fewer
/// than two such rows or with a constant side is NaN. The diagonal is exactly
/// 1.0 unless the column is constant.
pub fn correlation_matrix(dataset: &Dataset) -> CorrelationMatrix {
    let numeric: Vec<_> = dataset.numeric_columns().collect();
    let n = numeric.len();
    let mut values = Array2::from_elem((n, n), f64::NAN);

    for i in 0..n {
        for j in 0..=i {
            let (x, y) = complete_pairs(
                numeric[i].as_numeric().unwrap_or_default(),
                numeric[j].as_numeric().unwrap_or_default(),
            );
            let r = pearson(&x, &y);
            let r = if i == j && r.is_finite() { 1.0 } else { r };
            values[(i, j)] = r;
            values[(j, i)] = r;
        }
    }

    CorrelationMatrix {
        columns: numeric.iter().map(|c| c.name.clone()).collect(),
        values,
    }
}

fn complete_pairs(a: &[Option<f64>], b: &[Option<f64>]) -> (Vec<f64>, Vec<f64>) {
    a.iter()
        .zip(b)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .unzip()
}

/// Correlations of every other column with `target`, strongest first.
///
/// Sorting is by descending absolute value and stable, so ties keep matrix
/// column order. NaN entries go last.
pub fn target_correlations(
    matrix: &CorrelationMatrix,
    target: &str,
) -> Result<Vec<(String, f64)>, StatsError> {
    let t = matrix
        .index_of(target)
        .ok_or_else(|| StatsError::column_missing(target))?;

    let mut ranked: Vec<(String, f64)> = matrix
        .columns
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != t)
        .map(|(i, name)| (name.clone(), matrix.values[(t, i)]))
        .collect();

    ranked.sort_by(|(_, a), (_, b)| match (a.is_nan(), b.is_nan()) {
        (false, false) => b.abs().partial_cmp(&a.abs()).unwrap_or(Ordering::Equal),
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (true, true) => Ordering::Equal,
    });
    Ok(ranked)
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
