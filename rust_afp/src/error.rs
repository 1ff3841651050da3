//! Errors raised while loading configuration and tables
//!
//! Classification itself cannot fail: every string maps to a
//! verdict. Everything here belongs to the surrounding I/O.

use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Whether an error was caused by how the tool was set up
/// (wrong column name, bad config) or by reading and writing
/// the data itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Io,
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("column '{column}' not found; available columns: {}", available.join(", "))]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("unsupported table format for '{}'; expected a .csv or .parquet file", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("invalid taxonomy: {0}")]
    InvalidTaxonomy(String),

    #[error("keywords registered under more than one category: {0}")]
    KeywordCollisions(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("expected {expected} verdicts to merge into the table, found {found}")]
    RowCountMismatch { expected: usize, found: usize },

    #[error("failed to read '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{}'", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("table operation failed")]
    Polars(#[from] PolarsError),
}

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingColumn { .. }
            | Self::UnsupportedFormat { .. }
            | Self::InvalidTaxonomy(_)
            | Self::KeywordCollisions(_)
            | Self::InvalidConfig(_)
            | Self::Yaml(_)
            | Self::RowCountMismatch { .. } => ErrorKind::Configuration,
            Self::Read { .. } | Self::Write { .. } | Self::Polars(_) => ErrorKind::Io,
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn missing_column_lists_available_columns() {
        let error = AnalysisError::MissingColumn {
            column: String::from("出院诊断"),
            available: vec![String::from("id"), String::from("diagnosis")],
        };
        assert_eq!(
            error.to_string(),
            "column '出院诊断' not found; available columns: id, diagnosis"
        );
        assert_eq!(error.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn file_errors_are_io() {
        let error = AnalysisError::Read {
            path: PathBuf::from("missing.csv"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(error.kind(), ErrorKind::Io);
        assert!(std::error::Error::source(&error).is_some());
    }
}
