//! CSV reader producing a typed columnar `Dataset`.
use std::io::Read;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use csv::StringRecord;

use crate::dataset::{Column, Dataset, LoadedDataset, VariableInfo, VariableKind, VariableRole};

/// Configuration for reading delimited tables.
#[derive(Debug, Clone)]
pub struct CsvReaderConfig {
    pub delimiter: u8,
    /// Tokens (after trimming) read as null.
    pub na_values: Vec<String>,
    /// Column holding the outcome. When `None`, the last column is used.
    pub target_column: Option<String>,
}

impl Default for CsvReaderConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            na_values: ["", "?", "NA", "N/A", "NaN", "nan", "null"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            target_column: None,
        }
    }
}

impl CsvReaderConfig {
    fn is_na(&self, token: &str) -> bool {
        self.na_values.iter().any(|na| na == token)
    }
}

/// Read a CSV file into a `Dataset`.
pub fn read_csv_dataset<P: AsRef<Path>>(path: P, config: &CsvReaderConfig) -> Result<Dataset> {
    let reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(true)
        .from_path(&path)
        .with_context(|| format!("Failed to open CSV file: {}", path.as_ref().display()))?;
    read_records(reader, config)
}

/// Parse CSV text held in memory.
pub fn parse_csv_str(content: &str, config: &CsvReaderConfig) -> Result<Dataset> {
    let reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(true)
        .from_reader(content.as_bytes());
    read_records(reader, config)
}

/// Read a local CSV file and split it into features and target.
pub fn read_csv_experiment<P: AsRef<Path>>(
    path: P,
    config: &CsvReaderConfig,
) -> Result<LoadedDataset> {
    let dataset = read_csv_dataset(&path, config)?;
    split_target(dataset, config.target_column.as_deref(), path.as_ref().display().to_string())
}

/// Separate the target column from the features and infer variable metadata.
pub fn split_target(
    dataset: Dataset,
    target: Option<&str>,
    source: String,
) -> Result<LoadedDataset> {
    let target_name = match target {
        Some(name) => {
            if !dataset.has_column(name) {
                return Err(anyhow!("Missing target column '{}'", name));
            }
            name.to_string()
        }
        None => dataset
            .columns()
            .last()
            .map(|c| c.name.clone())
            .ok_or_else(|| anyhow!("CSV has no columns"))?,
    };

    let feature_names: Vec<String> = dataset
        .column_names()
        .into_iter()
        .filter(|name| *name != target_name)
        .collect();

    let variables = dataset
        .columns()
        .iter()
        .map(|column| infer_variable(column, column.name == target_name))
        .collect();

    Ok(LoadedDataset {
        features: dataset.select(&feature_names),
        targets: dataset.select(&[target_name]),
        variables,
        source,
    })
}

fn infer_variable(column: &Column, is_target: bool) -> VariableInfo {
    let kind = match column.dtype() {
        crate::dataset::DType::Int64 => VariableKind::Integer,
        crate::dataset::DType::Float64 => VariableKind::Continuous,
        crate::dataset::DType::Object => VariableKind::Categorical,
    };
    VariableInfo {
        name: column.name.clone(),
        role: if is_target {
            VariableRole::Target
        } else {
            VariableRole::Feature
        },
        kind,
        description: None,
        units: None,
        missing_values: Some(if column.null_count() > 0 { "yes" } else { "no" }.to_string()),
    }
}

fn read_records<R: Read>(mut reader: csv::Reader<R>, config: &CsvReaderConfig) -> Result<Dataset> {
    let headers = reader
        .headers()
        .context("Failed to read CSV header row")?
        .clone();
    if headers.is_empty() {
        return Err(anyhow!("CSV header row is empty"));
    }

    let n_cols = headers.len();
    let mut raw: Vec<Vec<Option<String>>> = vec![Vec::new(); n_cols];

    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row_idx + 1))?;
        if record.len() != n_cols {
            return Err(anyhow!(
                "Row {} has {} fields, expected {}",
                row_idx + 1,
                record.len(),
                n_cols
            ));
        }
        for (col_idx, value) in record.iter().enumerate() {
            let token = value.trim();
            raw[col_idx].push(if config.is_na(token) {
                None
            } else {
                Some(token.to_string())
            });
        }
    }

    let mut dataset = Dataset::new();
    for (idx, values) in raw.into_iter().enumerate() {
        dataset.add_column(build_column(column_name(&headers, idx), values))?;
    }
    Ok(dataset)
}

fn column_name(headers: &StringRecord, idx: usize) -> String {
    headers.get(idx).unwrap_or("").trim().to_string()
}

/// A column is numeric when every non-null token parses as a number.
fn build_column(name: String, values: Vec<Option<String>>) -> Column {
    let parsed: Option<Vec<Option<f64>>> = values
        .iter()
        .map(|v| match v {
            Some(token) => token.parse::<f64>().ok().map(Some),
            None => Some(None),
        })
        .collect();

    match parsed {
        Some(numeric) => Column::numeric(name, numeric),
        None => Column::text(name, values),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DType;

    #[test]
    fn build_column_falls_back_to_text() {
        let col = build_column(
            "x".to_string(),
            vec![Some("1".to_string()), Some("a".to_string())],
        );
        assert_eq!(col.dtype(), DType::Object);
    }

    #[test]
    fn question_mark_is_null_by_default() {
        let ds = parse_csv_str("a,b\n1,?\n2,3.5\n", &CsvReaderConfig::default()).unwrap();
        let b = ds.column("b").unwrap();
        assert_eq!(b.null_count(), 1);
        assert_eq!(b.dtype(), DType::Float64);
    }
}
