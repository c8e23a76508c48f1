use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const UCI_HEART_DISEASE_ID: u32 = 45;
pub const UCI_API_BASE_URL: &str = "https://archive.ics.uci.edu/api/dataset";
pub const DEFAULT_OUTPUT_FILE: &str = "statistical_results.txt";

/// Where the dataset comes from.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// UCI ML Repository dataset, fetched through its public API.
    Uci { id: u32 },
    /// Local CSV file with a header row. `target` defaults to the last column.
    Csv {
        path: PathBuf,
        #[serde(default)]
        target: Option<String>,
    },
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::Uci {
            id: UCI_HEART_DISEASE_ID,
        }
    }
}

impl FromStr for DataSource {
    type Err = String;

    /// `uci:<id>` or a path to a CSV file.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(id) = s.strip_prefix("uci:") {
            let id = id
                .trim()
                .parse::<u32>()
                .map_err(|_| format!("Invalid UCI dataset id: {}", id))?;
            return Ok(DataSource::Uci { id });
        }
        if s.trim().is_empty() {
            return Err("Empty data source".to_string());
        }
        Ok(DataSource::Csv {
            path: PathBuf::from(s),
            target: None,
        })
    }
}

/// Central configuration for a report run.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct ReportConfig {
    pub source: DataSource,
    pub output_file: PathBuf,
    pub api_base_url: String,
    pub fetch_timeout_secs: u64,
    /// Columns summarised with value counts, in report order.
    pub categorical_columns: Vec<String>,
    /// Columns checked with the Shapiro-Wilk test, in report order.
    pub continuous_columns: Vec<String>,
    /// Placeholder values that stand in for missing measurements.
    pub sentinel_values: Vec<f64>,
    pub normality_alpha: f64,
    pub normality_min_exclusive: usize,
    pub normality_max_exclusive: usize,
    /// CSV tokens read as null.
    pub na_values: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            source: DataSource::default(),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            api_base_url: UCI_API_BASE_URL.to_string(),
            fetch_timeout_secs: 60,
            categorical_columns: ["sex", "cp", "fbs", "restecg", "exang", "slope", "ca", "thal"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            continuous_columns: ["age", "trestbps", "chol", "thalach", "oldpeak"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            sentinel_values: vec![-9.0, -1.0],
            normality_alpha: 0.05,
            normality_min_exclusive: 3,
            normality_max_exclusive: 5000,
            na_values: ["", "?", "NA", "N/A", "NaN", "nan", "null"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ReportConfig {
    pub fn with_source(source: DataSource) -> Self {
        Self {
            source,
            ..Self::default()
        }
    }
}

/// Load a report configuration from a JSON file. Missing keys take their defaults.
pub fn load_report_config<P: AsRef<Path>>(path: P) -> Result<ReportConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: ReportConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}
