//! End-to-end report generation: load, analyse, render, write.
use anyhow::Result;
use chrono::Local;
use log::{debug, info};

use crate::config::{DataSource, ReportConfig};
use crate::correlation::{correlation_matrix, target_correlations, CorrelationMatrix};
use crate::dataset::{Dataset, LoadedDataset};
use crate::io::load_dataset;
use crate::normality::{normality_tests, NormalityResult};
use crate::profiling::{
    binary_target_split, describe, frequency_table, missing_summary, value_counts,
    BinaryTargetSplit, ColumnStats, FrequencyTable, MissingSummary,
};
use crate::report::{build_report, Report};

/// Every computed result the report is rendered from.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub dataset: Dataset,
    pub feature_count: usize,
    pub target: String,
    pub missing: MissingSummary,
    pub descriptive: Vec<ColumnStats>,
    pub target_counts: Option<FrequencyTable>,
    pub target_split: Option<BinaryTargetSplit>,
    pub categorical: Vec<FrequencyTable>,
    pub correlations: CorrelationMatrix,
    /// `None` when the target is not a numeric column.
    pub target_correlations: Option<Vec<(String, f64)>>,
    pub normality: Vec<NormalityResult>,
}

/// Compute all statistics for a loaded dataset.
pub fn analyze(loaded: &LoadedDataset, config: &ReportConfig) -> Result<Analysis> {
    let dataset = loaded.combined()?;
    let target = loaded.target_column().unwrap_or_default();

    let target_column = dataset.column(&target);
    let target_counts = target_column.map(frequency_table);
    let target_split = target_column
        .filter(|c| c.is_numeric())
        .map(binary_target_split);

    let correlations = correlation_matrix(&dataset);
    let ranked = match target_correlations(&correlations, &target) {
        Ok(ranked) => Some(ranked),
        Err(e) => {
            debug!("Omitting target correlations: {}", e);
            None
        }
    };

    Ok(Analysis {
        feature_count: loaded.features.column_count(),
        missing: missing_summary(&dataset, &config.sentinel_values),
        descriptive: describe(&dataset),
        categorical: value_counts(&dataset, &config.categorical_columns),
        normality: normality_tests(&dataset, config),
        target_counts,
        target_split,
        correlations,
        target_correlations: ranked,
        target,
        dataset,
    })
}

fn banner_lines(config: &ReportConfig) -> Vec<String> {
    let source = match &config.source {
        DataSource::Uci { id } => format!(
            "Source: UCI ML Repository - https://archive.ics.uci.edu/dataset/{}",
            id
        ),
        DataSource::Csv { path, .. } => format!("Source: local file - {}", path.display()),
    };
    vec![
        source,
        format!("Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S")),
    ]
}

/// Analyse an already loaded dataset and render the report without writing it.
pub fn render_report(loaded: &LoadedDataset, config: &ReportConfig) -> Result<Report> {
    let analysis = analyze(loaded, config)?;
    Ok(build_report(&analysis, &banner_lines(config)))
}

/// Load the configured dataset, write the report to `config.output_file`
/// and return its text.
pub fn generate_report(config: &ReportConfig) -> Result<String> {
    let loaded = load_dataset(config)?;
    let report = render_report(&loaded, config)?;
    let text = report.save_to_file(&config.output_file)?;
    info!(
        "Statistical results written to '{}'",
        config.output_file.display()
    );
    Ok(text)
}
