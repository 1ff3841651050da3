//! Settings for analysing a table of discharge diagnoses
//!
//! The configuration can be read from a yaml file; every field
//! is optional and falls back to the defaults below.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Component, Path, PathBuf};

use crate::error::{AnalysisError, Result};

pub const DEFAULT_DIAGNOSIS_COLUMN: &str = "出院诊断";
pub const DEFAULT_INDICATOR_COLUMN: &str = "甲胎蛋白测定是否合理";
pub const DEFAULT_REASON_COLUMN: &str = "判断依据";
pub const DEFAULT_OUTPUT: &str = "afp_analysis_result.csv";
pub const DEFAULT_CHUNK_SIZE: usize = 1000;
pub const DEFAULT_SAMPLE_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// The table to analyse (.csv or .parquet)
    pub input: PathBuf,
    /// The column holding the discharge diagnoses
    pub diagnosis_column: String,
    /// Where to write the input table with the verdict columns
    /// added. An existing file is overwritten.
    pub output: PathBuf,
    /// Rows classified between progress updates
    pub chunk_size: usize,
    /// Rows of each kind shown in the report
    pub sample_size: usize,
    /// Name of the added column holding 是/否
    pub indicator_column: String,
    /// Name of the added column holding the reasons
    pub reason_column: String,
    /// A taxonomy yaml file to use instead of the built-in one
    pub taxonomy: Option<PathBuf>,
    /// Fail instead of warning when a keyword belongs to more
    /// than one category
    pub reject_keyword_collisions: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            diagnosis_column: String::from(DEFAULT_DIAGNOSIS_COLUMN),
            output: PathBuf::from(DEFAULT_OUTPUT),
            chunk_size: DEFAULT_CHUNK_SIZE,
            sample_size: DEFAULT_SAMPLE_SIZE,
            indicator_column: String::from(DEFAULT_INDICATOR_COLUMN),
            reason_column: String::from(DEFAULT_REASON_COLUMN),
            taxonomy: None,
            reject_keyword_collisions: false,
        }
    }
}

impl AnalysisConfig {
    /// Read a configuration from a yaml byte source. It is not
    /// validated, because command line options may still fill
    /// in missing values.
    pub fn from_reader<R>(reader: R) -> Result<Self>
    where
        R: Read,
    {
        Ok(serde_yaml::from_reader(reader)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| AnalysisError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    pub fn validate(&self) -> Result<()> {
        if self.input.as_os_str().is_empty() {
            return Err(invalid("no input table given"));
        }
        if self.output.as_os_str().is_empty() {
            return Err(invalid("no output path given"));
        }
        if self.chunk_size == 0 {
            return Err(invalid("chunk_size must be at least 1"));
        }
        let columns = [
            self.diagnosis_column.as_str(),
            self.indicator_column.as_str(),
            self.reason_column.as_str(),
        ];
        if columns.iter().any(|c| c.trim().is_empty()) {
            return Err(invalid("column names must not be empty"));
        }
        if columns[0] == columns[1] || columns[0] == columns[2] || columns[1] == columns[2] {
            return Err(invalid(
                "the diagnosis, indicator and reason columns must all be different",
            ));
        }
        if resolve(&self.input) == resolve(&self.output) {
            return Err(invalid("the output must not overwrite the input table"));
        }
        Ok(())
    }
}

/// Absolute form of a path that need not exist yet. Existing
/// paths are canonicalised; otherwise the parent directory is.
fn resolve(path: &Path) -> PathBuf {
    if let Ok(resolved) = path.canonicalize() {
        return resolved;
    }
    let path: PathBuf = path
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect();
    let absolute = std::env::current_dir()
        .map(|dir| dir.join(&path))
        .unwrap_or(path);
    if let (Some(parent), Some(name)) = (absolute.parent(), absolute.file_name()) {
        if let Ok(parent) = parent.canonicalize() {
            return parent.join(name);
        }
    }
    absolute
}

fn invalid(message: &str) -> AnalysisError {
    AnalysisError::InvalidConfig(String::from(message))
}
