//! Dataset loading from a local CSV file or the UCI repository.

pub mod csv_table;
pub mod uci;

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use log::info;

pub use csv_table::{
    parse_csv_str, read_csv_dataset, read_csv_experiment, split_target, CsvReaderConfig,
};
pub use uci::fetch_uci_dataset;

use crate::config::{DataSource, ReportConfig};
use crate::dataset::{Dataset, LoadedDataset};
use crate::error::StatsError;

/// Load the dataset named by `config.source`.
///
/// Every failure is reported as `StatsError::DataUnavailable`.
pub fn load_dataset(config: &ReportConfig) -> Result<LoadedDataset> {
    let loaded = match &config.source {
        DataSource::Uci { id } => fetch_uci_dataset(
            &config.api_base_url,
            *id,
            Duration::from_secs(config.fetch_timeout_secs),
        )
        .map_err(|e| StatsError::data_unavailable(format!("UCI dataset {}", id), format!("{:#}", e)))?,
        DataSource::Csv { path, target } => {
            let reader_config = CsvReaderConfig {
                na_values: config.na_values.clone(),
                target_column: target.clone(),
                ..CsvReaderConfig::default()
            };
            read_csv_experiment(path, &reader_config).map_err(|e| {
                StatsError::data_unavailable(path.display().to_string(), format!("{:#}", e))
            })?
        }
    };
    info!(
        "Loaded {} rows, {} features, {} target column(s) from {}",
        loaded.features.row_count(),
        loaded.features.column_count(),
        loaded.targets.column_count(),
        loaded.source
    );
    Ok(loaded)
}

/// Shape, column names and leading rows of a CSV file.
#[derive(Debug, Clone)]
pub struct TablePreview {
    pub rows: usize,
    pub columns: Vec<String>,
    pub head: Vec<Vec<String>>,
}

pub fn preview_csv<P: AsRef<Path>>(path: P, n_rows: usize) -> Result<TablePreview> {
    let dataset = read_csv_dataset(&path, &CsvReaderConfig::default()).map_err(|e| {
        StatsError::data_unavailable(path.as_ref().display().to_string(), format!("{:#}", e))
    })?;
    Ok(preview(&dataset, n_rows))
}

pub fn preview(dataset: &Dataset, n_rows: usize) -> TablePreview {
    let shown = n_rows.min(dataset.row_count());
    let head = (0..shown)
        .map(|row| {
            dataset
                .columns()
                .iter()
                .map(|c| c.display_value(row))
                .collect()
        })
        .collect();
    TablePreview {
        rows: dataset.row_count(),
        columns: dataset.column_names(),
        head,
    }
}
