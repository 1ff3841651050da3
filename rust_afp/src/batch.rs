//! Classify an ordered list of diagnoses into a table of verdicts
//!
//! Row i of a batch result always belongs to diagnosis i of the
//! input. Rows are classified independently, so splitting the
//! input into chunks only changes how often progress is reported.
//!

use std::fmt;

use crate::classifier::{Classifier, Verdict};

/// Joins the reasons of a verdict into one cell
pub const REASON_DELIMITER: &str = "；";

/// Whether the test is indicated, as written into the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indication {
    Indicated,
    NotIndicated,
}

impl Indication {
    /// The token written into the indicator column
    pub fn token(&self) -> &'static str {
        match self {
            Self::Indicated => "是",
            Self::NotIndicated => "否",
        }
    }

    pub fn is_indicated(&self) -> bool {
        matches!(self, Self::Indicated)
    }
}

impl fmt::Display for Indication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// One row of a batch result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRow {
    pub diagnosis: String,
    pub indication: Indication,
    /// The verdict's reasons joined by [`REASON_DELIMITER`]
    pub joined_reasons: String,
}

impl From<Verdict> for BatchRow {
    fn from(verdict: Verdict) -> Self {
        let indication = if verdict.is_indicated() {
            Indication::Indicated
        } else {
            Indication::NotIndicated
        };
        Self {
            joined_reasons: verdict.reasons().join(REASON_DELIMITER),
            diagnosis: String::from(verdict.diagnosis()),
            indication,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchResult {
    rows: Vec<BatchRow>,
}

impl BatchResult {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
        }
    }

    pub fn rows(&self) -> &[BatchRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BatchRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn indicated_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| row.indication.is_indicated())
            .count()
    }

    /// Append the rows of a later chunk
    pub fn append(&mut self, mut other: BatchResult) {
        self.rows.append(&mut other.rows);
    }

    /// The indicator column, in row order
    pub fn tokens(&self) -> Vec<&'static str> {
        self.rows.iter().map(|row| row.indication.token()).collect()
    }

    /// The reason column, in row order
    pub fn joined_reasons(&self) -> Vec<&str> {
        self.rows
            .iter()
            .map(|row| row.joined_reasons.as_str())
            .collect()
    }
}

impl FromIterator<BatchRow> for BatchResult {
    fn from_iter<I: IntoIterator<Item = BatchRow>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a BatchResult {
    type Item = &'a BatchRow;
    type IntoIter = std::slice::Iter<'a, BatchRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// How far a chunked batch has got
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub processed: usize,
    pub total: usize,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "processed {}/{} records", self.processed, self.total)
    }
}

impl<'t> Classifier<'t> {
    /// Classify each diagnosis in order
    pub fn classify_batch<S>(&self, diagnoses: &[S]) -> BatchResult
    where
        S: AsRef<str>,
    {
        diagnoses
            .iter()
            .map(|diagnosis| BatchRow::from(self.classify(diagnosis.as_ref())))
            .collect()
    }

    /// Classify the diagnoses chunk_size at a time, calling
    /// on_progress after each chunk. A chunk size of zero is
    /// treated as one.
    pub fn classify_chunked<S, F>(
        &self,
        diagnoses: &[S],
        chunk_size: usize,
        mut on_progress: F,
    ) -> BatchResult
    where
        S: AsRef<str>,
        F: FnMut(Progress),
    {
        let total = diagnoses.len();
        let mut result = BatchResult::with_capacity(total);
        for chunk in diagnoses.chunks(chunk_size.max(1)) {
            result.append(self.classify_batch(chunk));
            on_progress(Progress {
                processed: result.len(),
                total,
            });
        }
        result
    }
}
