//! Fetch datasets from the UCI Machine Learning Repository API.
//!
//! The API answers `GET {base}?id={id}` with a JSON envelope holding the
//! dataset metadata, including a `data_url` that points at a CSV export and a
//! `variables` list describing each column and its role.
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use serde::Deserialize;

use crate::dataset::{LoadedDataset, VariableInfo, VariableRole};
use crate::io::csv_table::{parse_csv_str, CsvReaderConfig};

#[derive(Debug, Deserialize)]
pub struct UciResponse {
    pub status: u16,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<UciDatasetInfo>,
}

#[derive(Debug, Deserialize)]
pub struct UciDatasetInfo {
    pub uci_id: u32,
    pub name: String,
    #[serde(default)]
    pub data_url: Option<String>,
    #[serde(default)]
    pub variables: Vec<VariableInfo>,
}

pub fn dataset_url(api_base_url: &str, id: u32) -> String {
    format!("{}?id={}", api_base_url.trim_end_matches('/'), id)
}

/// Validate the API envelope and return its dataset description.
pub fn parse_metadata(body: &str) -> Result<UciDatasetInfo> {
    let response: UciResponse =
        serde_json::from_str(body).context("Failed to parse UCI API response")?;
    if response.status != 200 {
        return Err(anyhow!(
            "UCI API returned status {}: {}",
            response.status,
            response.message.unwrap_or_default()
        ));
    }
    response
        .data
        .ok_or_else(|| anyhow!("UCI API response has no dataset metadata"))
}

/// Split the downloaded table into features and targets by variable role.
///
/// ID columns are dropped. Columns without metadata count as features.
pub fn assemble(info: &UciDatasetInfo, csv_body: &str, source: String) -> Result<LoadedDataset> {
    let dataset = parse_csv_str(csv_body, &CsvReaderConfig::default())
        .with_context(|| format!("Failed to parse data for UCI dataset {}", info.uci_id))?;

    let role_of = |name: &str| {
        info.variables
            .iter()
            .find(|v| v.name == name)
            .map(|v| v.role)
            .unwrap_or(VariableRole::Feature)
    };

    let mut features = Vec::new();
    let mut targets = Vec::new();
    for name in dataset.column_names() {
        match role_of(&name) {
            VariableRole::Target => targets.push(name),
            VariableRole::Id => {}
            _ => features.push(name),
        }
    }
    if targets.is_empty() {
        return Err(anyhow!("UCI dataset {} declares no target column", info.uci_id));
    }

    Ok(LoadedDataset {
        features: dataset.select(&features),
        targets: dataset.select(&targets),
        variables: info.variables.clone(),
        source,
    })
}

/// Download metadata and data for `id`. Blocking.
pub fn fetch_uci_dataset(api_base_url: &str, id: u32, timeout: Duration) -> Result<LoadedDataset> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to build HTTP client")?;

    let url = dataset_url(api_base_url, id);
    info!("Fetching UCI dataset {} metadata", id);
    debug!("GET {}", url);
    let body = client
        .get(&url)
        .send()
        .and_then(|r| r.text())
        .with_context(|| format!("Request to {} failed", url))?;
    let info = parse_metadata(&body)?;

    let data_url = info
        .data_url
        .clone()
        .ok_or_else(|| anyhow!("UCI dataset {} is not available for download", id))?;
    info!("Downloading '{}' from {}", info.name, data_url);
    let csv_body = client
        .get(&data_url)
        .send()
        .and_then(|r| r.error_for_status())
        .and_then(|r| r.text())
        .with_context(|| format!("Request to {} failed", data_url))?;

    assemble(&info, &csv_body, data_url)
}
