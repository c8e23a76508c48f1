//! Report assembly.
//!
//! `build_report` turns an [`Analysis`](crate::pipeline::Analysis) into the
//! ten numbered text sections, in a fixed order.
pub mod text;

pub use text::{Report, ReportSection, TextTable};

use crate::correlation::round_to;
use crate::dataset::{format_number, DType};
use crate::pipeline::Analysis;
use text::{fmt_fixed, series};

pub const REPORT_TITLE: &str = "HEART DISEASE DATASET - STATISTICAL ANALYSIS";

pub fn build_report(analysis: &Analysis, banner: &[String]) -> Report {
    let mut report = Report::new(REPORT_TITLE);
    for line in banner {
        report.add_banner_line(line.clone());
    }
    report.add_section(overview_section(analysis));
    report.add_section(dtypes_section(analysis));
    report.add_section(missing_section(analysis));
    report.add_section(descriptive_section(analysis));
    report.add_section(target_section(analysis));
    report.add_section(categorical_section(analysis));
    report.add_section(correlation_section(analysis));
    report.add_section(target_correlation_section(analysis));
    report.add_section(normality_section(analysis));
    report.add_section(shape_section(analysis));
    report
}

fn overview_section(analysis: &Analysis) -> ReportSection {
    let mut section = ReportSection::new("DATASET OVERVIEW");
    section.add_line(format!("Number of instances: {}", analysis.dataset.row_count()));
    section.add_line(format!("Number of features: {}", analysis.feature_count));
    section.add_line(format!("Target variable: {}", analysis.target));
    section.add_line("");
    let names: Vec<String> = analysis
        .dataset
        .column_names()
        .iter()
        .map(|n| format!("'{}'", n))
        .collect();
    section.add_line(format!("Column names: [{}]", names.join(", ")));
    section
}

fn dtypes_section(analysis: &Analysis) -> ReportSection {
    let mut section = ReportSection::new("DATA TYPES");
    let pairs: Vec<(String, String)> = analysis
        .dataset
        .columns()
        .iter()
        .map(|c| (c.name.clone(), c.dtype().to_string()))
        .collect();
    for line in series(&pairs) {
        section.add_line(line);
    }
    section
}

fn sentinel_label(values: &[f64]) -> String {
    values
        .iter()
        .map(|&v| {
            if v.fract() == 0.0 {
                format_number(v, DType::Int64)
            } else {
                format_number(v, DType::Float64)
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn missing_section(analysis: &Analysis) -> ReportSection {
    let mut section = ReportSection::new("MISSING VALUES");
    let missing = &analysis.missing;

    if missing.total_nulls() > 0 {
        let pairs: Vec<(String, String)> = missing
            .with_nulls()
            .map(|c| (c.column.clone(), c.nulls.to_string()))
            .collect();
        for line in series(&pairs) {
            section.add_line(line);
        }
    } else {
        section.add_line("No missing values detected.");
    }

    let label = sentinel_label(&missing.sentinel_values);
    for counts in missing.with_sentinels() {
        section.add_line("");
        section.add_line(format!(
            "Note: Column '{}' contains {} placeholder values ({}) often used for missing.",
            counts.column, counts.sentinels, label
        ));
    }
    section
}

fn descriptive_section(analysis: &Analysis) -> ReportSection {
    let mut section = ReportSection::new("DESCRIPTIVE STATISTICS (All Numeric Columns)");
    let header = analysis.descriptive.iter().map(|s| s.name.clone()).collect();
    let mut table = TextTable::new(header);

    let rows: [(&str, fn(&crate::profiling::ColumnStats) -> f64); 8] = [
        ("count", |s| s.count as f64),
        ("mean", |s| s.mean),
        ("std", |s| s.std),
        ("min", |s| s.min),
        ("25%", |s| s.p25),
        ("50%", |s| s.p50),
        ("75%", |s| s.p75),
        ("max", |s| s.max),
    ];
    for (label, getter) in rows {
        table.add_row(
            label,
            analysis
                .descriptive
                .iter()
                .map(|s| fmt_fixed(getter(s), 6))
                .collect(),
        );
    }
    section.add_content(&table.render());
    section
}

fn target_section(analysis: &Analysis) -> ReportSection {
    let mut section = ReportSection::new("TARGET VARIABLE DISTRIBUTION");
    if let Some(counts) = &analysis.target_counts {
        section.add_line(counts.column.clone());
        for line in series(&counts_as_pairs(counts)) {
            section.add_line(line);
        }
    }
    if let Some(split) = &analysis.target_split {
        section.add_line("");
        section.add_line("Binary interpretation (0=no disease, 1-4=presence):");
        section.add_line(format!(
            "  No heart disease (0): {} ({:.1}%)",
            split.no_disease,
            split.no_disease_pct()
        ));
        section.add_line(format!(
            "  Heart disease (1-4): {} ({:.1}%)",
            split.disease,
            split.disease_pct()
        ));
    }
    section
}

fn counts_as_pairs(table: &crate::profiling::FrequencyTable) -> Vec<(String, String)> {
    table
        .entries
        .iter()
        .map(|(value, count)| (value.clone(), count.to_string()))
        .collect()
}

fn categorical_section(analysis: &Analysis) -> ReportSection {
    let mut section = ReportSection::new("CATEGORICAL FEATURE VALUE COUNTS");
    for table in &analysis.categorical {
        section.add_line("");
        section.add_line(format!("{}:", table.column));
        for line in series(&counts_as_pairs(table)) {
            section.add_line(line);
        }
    }
    section
}

fn correlation_section(analysis: &Analysis) -> ReportSection {
    let mut section = ReportSection::new("CORRELATION MATRIX (Numeric Features)");
    let matrix = &analysis.correlations;
    let mut table = TextTable::new(matrix.columns.clone());
    for (i, name) in matrix.columns.iter().enumerate() {
        table.add_row(
            name.clone(),
            matrix
                .values
                .row_slice(i)
                .iter()
                .map(|&r| fmt_fixed(round_to(r, 3), 3))
                .collect(),
        );
    }
    section.add_content(&table.render());
    section
}

fn target_correlation_section(analysis: &Analysis) -> ReportSection {
    let mut section = ReportSection::new("FEATURE CORRELATIONS WITH TARGET");
    if let Some(ranked) = &analysis.target_correlations {
        let pairs: Vec<(String, String)> = ranked
            .iter()
            .map(|(name, r)| (name.clone(), fmt_fixed(round_to(*r, 4), 4)))
            .collect();
        for line in series(&pairs) {
            section.add_line(line);
        }
    }
    section
}

fn normality_section(analysis: &Analysis) -> ReportSection {
    let mut section =
        ReportSection::new("NORMALITY TEST (Shapiro-Wilk) - Key Continuous Features");
    for result in &analysis.normality {
        section.add_line(format!(
            "{}: statistic={:.4}, p-value={:.4} ({})",
            result.column,
            result.statistic,
            result.p_value,
            result.classification.label()
        ));
    }
    section
}

fn shape_section(analysis: &Analysis) -> ReportSection {
    let mut section = ReportSection::new("SKEWNESS AND KURTOSIS");
    let mut table = TextTable::new(vec!["skewness".to_string(), "kurtosis".to_string()]);
    for stats in &analysis.descriptive {
        table.add_row(
            stats.name.clone(),
            vec![fmt_fixed(stats.skewness, 4), fmt_fixed(stats.kurtosis, 4)],
        );
    }
    section.add_content(&table.render());
    section
}
