use std::error::Error;
use std::fmt;

/// Failures raised while building the statistical report.
///
/// `DataUnavailable` and `Io` halt the run. `ColumnMissing` and
/// `StatisticalPrecondition` are raised by per-column helpers and the report
/// builder handles them by omitting the affected line or section.
#[derive(Debug, Clone, PartialEq)]
pub enum StatsError {
    DataUnavailable { source: String, reason: String },
    ColumnMissing { column: String },
    StatisticalPrecondition { column: String, reason: String },
    Io { path: String, message: String },
}

impl StatsError {
    pub fn data_unavailable(source: impl Into<String>, reason: impl fmt::Display) -> Self {
        StatsError::DataUnavailable {
            source: source.into(),
            reason: reason.to_string(),
        }
    }

    pub fn column_missing(column: impl Into<String>) -> Self {
        StatsError::ColumnMissing {
            column: column.into(),
        }
    }

    /// Whether the run must stop on this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, StatsError::DataUnavailable { .. } | StatsError::Io { .. })
    }
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StatsError::DataUnavailable { source, reason } => {
                write!(f, "Dataset unavailable from {}: {}", source, reason)
            }
            StatsError::ColumnMissing { column } => {
                write!(f, "Column '{}' not found in dataset", column)
            }
            StatsError::StatisticalPrecondition { column, reason } => {
                write!(f, "Cannot test column '{}': {}", column, reason)
            }
            StatsError::Io { path, message } => {
                write!(f, "Failed to write report to {}: {}", path, message)
            }
        }
    }
}

impl Error for StatsError {}
