//! Column profiling: descriptive statistics, value counts and missing data checks.
//!
//! Profiling tolerates dirty data. Nulls are skipped when computing statistics,
//! and sentinel placeholders (by default -9 and -1) are counted and reported
//! but kept in the statistics.
use log::debug;

use crate::dataset::{format_number, Column, ColumnData, Dataset};
use crate::error::StatsError;
use crate::stats;

/// Descriptive statistics of one numeric column, over its non-null values.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStats {
    pub name: String,
    /// Number of non-null values.
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation.
    pub std: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub skewness: f64,
    /// Excess kurtosis.
    pub kurtosis: f64,
}

/// Compute `ColumnStats` for a single column.
///
/// Returns `None` for text columns.
pub fn column_stats(column: &Column) -> Option<ColumnStats> {
    if !column.is_numeric() {
        return None;
    }
    let values = column.valid_values();
    let sorted = stats::sorted(&values);
    Some(ColumnStats {
        name: column.name.clone(),
        count: values.len(),
        min: stats::min(&values),
        max: stats::max(&values),
        mean: stats::mean(&values),
        median: stats::quantile_sorted(&sorted, 0.5),
        std: stats::std_dev(&values),
        p25: stats::quantile_sorted(&sorted, 0.25),
        p50: stats::quantile_sorted(&sorted, 0.5),
        p75: stats::quantile_sorted(&sorted, 0.75),
        skewness: stats::skewness(&values),
        kurtosis: stats::kurtosis(&values),
    })
}

/// `ColumnStats` for every numeric column, in dataset order.
pub fn describe(dataset: &Dataset) -> Vec<ColumnStats> {
    dataset.numeric_columns().filter_map(column_stats).collect()
}

/// Occurrence counts of the distinct non-null values of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyTable {
    pub column: String,
    /// `(value, count)` pairs ordered by value.
    pub entries: Vec<(String, usize)>,
}

impl FrequencyTable {
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    pub fn count_of(&self, label: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(value, _)| value == label)
            .map(|(_, c)| *c)
    }
}

/// Count values of `column`, ordered numerically for numeric columns and
/// lexicographically for text.
pub fn frequency_table(column: &Column) -> FrequencyTable {
    let entries = match &column.data {
        ColumnData::Numeric(values) => {
            let dtype = column.dtype();
            let mut valid: Vec<f64> = values.iter().flatten().copied().collect();
            valid.sort_by(|a, b| a.total_cmp(b));
            run_lengths(&valid, |a, b| a == b)
                .into_iter()
                .map(|(v, c)| (format_number(v, dtype), c))
                .collect()
        }
        ColumnData::Text(values) => {
            let mut valid: Vec<String> = values.iter().flatten().cloned().collect();
            valid.sort();
            run_lengths(&valid, |a, b| a == b)
        }
    };
    FrequencyTable {
        column: column.name.clone(),
        entries,
    }
}

fn run_lengths<T: Clone>(sorted: &[T], same: impl Fn(&T, &T) -> bool) -> Vec<(T, usize)> {
    let mut out: Vec<(T, usize)> = Vec::new();
    for value in sorted {
        match out.last_mut() {
            Some((last, count)) if same(last, value) => *count += 1,
            _ => out.push((value.clone(), 1)),
        }
    }
    out
}

/// Frequency table for a named column, or `ColumnMissing`.
pub fn value_counts_for(dataset: &Dataset, name: &str) -> Result<FrequencyTable, StatsError> {
    dataset
        .column(name)
        .map(frequency_table)
        .ok_or_else(|| StatsError::column_missing(name))
}

/// Frequency tables for `names` in the given order. Absent columns are skipped.
pub fn value_counts(dataset: &Dataset, names: &[String]) -> Vec<FrequencyTable> {
    names
        .iter()
        .filter_map(|name| match value_counts_for(dataset, name) {
            Ok(table) => Some(table),
            Err(e) => {
                debug!("Skipping value counts: {}", e);
                None
            }
        })
        .collect()
}

/// Null and sentinel counts for one column.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingCounts {
    pub column: String,
    pub nulls: usize,
    /// Values equal to one of the sentinels. Always 0 for text columns.
    pub sentinels: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MissingSummary {
    pub rows: usize,
    pub sentinel_values: Vec<f64>,
    pub columns: Vec<MissingCounts>,
}

impl MissingSummary {
    pub fn total_nulls(&self) -> usize {
        self.columns.iter().map(|c| c.nulls).sum()
    }

    pub fn with_nulls(&self) -> impl Iterator<Item = &MissingCounts> {
        self.columns.iter().filter(|c| c.nulls > 0)
    }

    pub fn with_sentinels(&self) -> impl Iterator<Item = &MissingCounts> {
        self.columns.iter().filter(|c| c.sentinels > 0)
    }

    pub fn get(&self, column: &str) -> Option<&MissingCounts> {
        self.columns.iter().find(|c| c.column == column)
    }
}

pub fn missing_summary(dataset: &Dataset, sentinel_values: &[f64]) -> MissingSummary {
    let columns = dataset
        .columns()
        .iter()
        .map(|column| {
            let sentinels = column
                .as_numeric()
                .map(|values| {
                    values
                        .iter()
                        .flatten()
                        .filter(|&&v| sentinel_values.contains(&v))
                        .count()
                })
                .unwrap_or(0);
            MissingCounts {
                column: column.name.clone(),
                nulls: column.null_count(),
                sentinels,
            }
        })
        .collect();
    MissingSummary {
        rows: dataset.row_count(),
        sentinel_values: sentinel_values.to_vec(),
        columns,
    }
}

/// Split of an integer coded target into absence (0) and presence (> 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryTargetSplit {
    pub total: usize,
    pub no_disease: usize,
    pub disease: usize,
}

impl BinaryTargetSplit {
    pub fn no_disease_pct(&self) -> f64 {
        percent(self.no_disease, self.total)
    }

    pub fn disease_pct(&self) -> f64 {
        percent(self.disease, self.total)
    }
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        return f64::NAN;
    }
    100.0 * part as f64 / total as f64
}

pub fn binary_target_split(target: &Column) -> BinaryTargetSplit {
    let values = target.valid_values();
    BinaryTargetSplit {
        total: target.len(),
        no_disease: values.iter().filter(|&&v| v == 0.0).count(),
        disease: values.iter().filter(|&&v| v > 0.0).count(),
    }
}
