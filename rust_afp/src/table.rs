//! Reading and writing the patient table
//!
//! Tables are polars dataframes stored as csv (with a header
//! row) or parquet, chosen by file extension.
//!

use polars::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::batch::BatchResult;
use crate::error::{AnalysisError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Parquet,
}

impl TableFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase());
        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("parquet") => Ok(Self::Parquet),
            _ => Err(AnalysisError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Read a table from a csv or parquet file
///
/// Csv column types are inferred from every row, so a column
/// that only turns to text late in the file is read as text.
pub fn read_table(path: &Path) -> Result<DataFrame> {
    let format = TableFormat::from_path(path)?;
    let file = File::open(path).map_err(|source| AnalysisError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let df = match format {
        TableFormat::Csv => CsvReader::new(file)
            .has_header(true)
            .infer_schema(None)
            .finish()?,
        TableFormat::Parquet => ParquetReader::new(file).finish()?,
    };
    debug!(path = %path.display(), rows = df.height(), "read table");
    Ok(df)
}

/// Column names of a table, as owned strings
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(String::from)
        .collect()
}

/// Get the diagnoses from the named column, in row order
///
/// Values of a non-string column are converted to strings. An
/// empty (null) cell becomes the empty string, which classifies
/// as not indicated.
pub fn diagnoses_from(df: &DataFrame, column: &str) -> Result<Vec<String>> {
    if !df.get_column_names().contains(&column) {
        return Err(AnalysisError::MissingColumn {
            column: String::from(column),
            available: column_names(df),
        });
    }
    let series = df.column(column)?.cast(&DataType::Utf8)?;
    let values = series.utf8()?;
    let mut empty_cells = 0;
    let diagnoses: Vec<String> = values
        .into_iter()
        .map(|value| match value {
            Some(diagnosis) => String::from(diagnosis),
            None => {
                empty_cells += 1;
                String::new()
            }
        })
        .collect();
    if empty_cells > 0 {
        warn!(column, empty_cells, "empty diagnosis cells are classified as not indicated");
    }
    Ok(diagnoses)
}

/// Add the indicator and reason columns of a batch result to
/// the table. The batch must have one row per table row.
pub fn merge_verdicts(
    df: &mut DataFrame,
    batch: &BatchResult,
    indicator_column: &str,
    reason_column: &str,
) -> Result<()> {
    if batch.len() != df.height() {
        return Err(AnalysisError::RowCountMismatch {
            expected: df.height(),
            found: batch.len(),
        });
    }
    df.with_column(Series::new(indicator_column, batch.tokens()))?;
    df.with_column(Series::new(reason_column, batch.joined_reasons()))?;
    Ok(())
}

/// Where a table is written before it replaces the target
fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.partial"))
}

fn write_format(df: &mut DataFrame, path: &Path, format: TableFormat) -> Result<()> {
    let mut file = File::create(path).map_err(|source| AnalysisError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    match format {
        TableFormat::Csv => {
            CsvWriter::new(&mut file).has_header(true).finish(df)?;
        }
        TableFormat::Parquet => {
            ParquetWriter::new(file).finish(df)?;
        }
    }
    Ok(())
}

/// Write a table to a csv or parquet file, replacing any file
/// already at path. The table is written next to the target
/// first, so a failed write leaves no partial output behind.
pub fn write_table(df: &mut DataFrame, path: &Path) -> Result<()> {
    let format = TableFormat::from_path(path)?;
    let staging = staging_path(path);
    if let Err(error) = write_format(df, &staging, format) {
        let _ = fs::remove_file(&staging);
        return Err(error);
    }
    fs::rename(&staging, path).map_err(|source| {
        let _ = fs::remove_file(&staging);
        AnalysisError::Write {
            path: path.to_path_buf(),
            source,
        }
    })?;
    debug!(path = %path.display(), rows = df.height(), "wrote table");
    Ok(())
}
