//! Columnar table and variable metadata for the loaded dataset.
//!
//! A `Dataset` is an ordered list of named columns sharing one row count.
//! Numeric columns hold `Option<f64>` (with `None` as null) and text columns
//! hold `Option<String>`. `LoadedDataset` keeps features and targets apart
//! the way the loader receives them, together with per-variable metadata.
use std::fmt;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Storage type reported in the "Data Types" section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DType {
    Int64,
    Float64,
    Object,
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DType::Int64 => "int64",
            DType::Float64 => "float64",
            DType::Object => "object",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn numeric(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Column {
            name: name.into(),
            data: ColumnData::Numeric(values),
        }
    }

    /// Numeric column without nulls.
    pub fn from_f64(name: impl Into<String>, values: &[f64]) -> Self {
        Self::numeric(name, values.iter().map(|&v| Some(v)).collect())
    }

    pub fn text(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Column {
            name: name.into(),
            data: ColumnData::Text(values),
        }
    }

    pub fn len(&self) -> usize {
        match &self.data {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.data, ColumnData::Numeric(_))
    }

    pub fn as_numeric(&self) -> Option<&[Option<f64>]> {
        match &self.data {
            ColumnData::Numeric(v) => Some(v),
            ColumnData::Text(_) => None,
        }
    }

    /// Non-null numeric values in row order. Empty for text columns.
    pub fn valid_values(&self) -> Vec<f64> {
        self.as_numeric()
            .map(|v| v.iter().flatten().copied().collect())
            .unwrap_or_default()
    }

    pub fn null_count(&self) -> usize {
        match &self.data {
            ColumnData::Numeric(v) => v.iter().filter(|x| x.is_none()).count(),
            ColumnData::Text(v) => v.iter().filter(|x| x.is_none()).count(),
        }
    }

    /// A numeric column is `int64` only when every value is integral and none is null.
    pub fn dtype(&self) -> DType {
        match &self.data {
            ColumnData::Numeric(values) => {
                let integral = values
                    .iter()
                    .all(|v| matches!(v, Some(x) if x.fract() == 0.0 && x.is_finite()));
                if integral {
                    DType::Int64
                } else {
                    DType::Float64
                }
            }
            ColumnData::Text(_) => DType::Object,
        }
    }

    /// Render the value at `row` the way the report prints it.
    pub fn display_value(&self, row: usize) -> String {
        match &self.data {
            ColumnData::Numeric(values) => match values.get(row).copied().flatten() {
                Some(v) => format_number(v, self.dtype()),
                None => "NaN".to_string(),
            },
            ColumnData::Text(values) => match values.get(row).cloned().flatten() {
                Some(s) => s,
                None => "NaN".to_string(),
            },
        }
    }
}

/// Integral dtypes print without a fractional part, float dtypes with one.
pub fn format_number(value: f64, dtype: DType) -> String {
    match dtype {
        DType::Int64 => format!("{}", value as i64),
        _ if value.is_finite() && value.fract() == 0.0 => format!("{:.1}", value),
        _ => format!("{}", value),
    }
}

/// Ordered, named columns of equal length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let mut ds = Dataset::new();
        for column in columns {
            ds.add_column(column)?;
        }
        Ok(ds)
    }

    pub fn add_column(&mut self, column: Column) -> Result<()> {
        if let Some(first) = self.columns.first() {
            if first.len() != column.len() {
                return Err(anyhow!(
                    "Column '{}' has {} rows, expected {}",
                    column.name,
                    column.len(),
                    first.len()
                ));
            }
        }
        if self.column(&column.name).is_some() {
            return Err(anyhow!("Duplicate column '{}'", column.name));
        }
        self.columns.push(column);
        Ok(())
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn numeric_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.is_numeric())
    }

    /// Keep only the named columns, in dataset order.
    pub fn select(&self, names: &[String]) -> Dataset {
        Dataset {
            columns: self
                .columns
                .iter()
                .filter(|c| names.contains(&c.name))
                .cloned()
                .collect(),
        }
    }

    /// Column-wise concatenation (features followed by targets).
    pub fn concat(&self, other: &Dataset) -> Result<Dataset> {
        let mut out = self.clone();
        for column in &other.columns {
            out.add_column(column.clone())?;
        }
        Ok(out)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariableRole {
    Feature,
    Target,
    #[serde(rename = "ID")]
    Id,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariableKind {
    Integer,
    Continuous,
    Categorical,
    #[serde(other)]
    Other,
}

/// Column semantics, as published by the UCI repository or inferred locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableInfo {
    pub name: String,
    pub role: VariableRole,
    #[serde(rename = "type")]
    pub kind: VariableKind,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub units: Option<String>,
    #[serde(default)]
    pub missing_values: Option<String>,
}

/// Dataset as returned by the loader: features and targets kept apart.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub features: Dataset,
    pub targets: Dataset,
    pub variables: Vec<VariableInfo>,
    /// Human readable origin, e.g. a URL or a file path.
    pub source: String,
}

impl LoadedDataset {
    pub fn combined(&self) -> Result<Dataset> {
        self.features.concat(&self.targets)
    }

    /// First target column name, falling back to the last combined column.
    pub fn target_column(&self) -> Option<String> {
        self.targets
            .columns()
            .first()
            .or_else(|| self.features.columns().last())
            .map(|c| c.name.clone())
    }
}
