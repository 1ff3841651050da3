//! Console reporting for a classified batch: counts, example
//! rows and processing time.

use std::fmt;
use std::time::Duration;

use crate::batch::{BatchResult, BatchRow};

/// Counts of indicated and not indicated rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub indicated: usize,
}

impl Summary {
    pub fn from_batch(batch: &BatchResult) -> Self {
        Self {
            total: batch.len(),
            indicated: batch.indicated_count(),
        }
    }

    pub fn not_indicated(&self) -> usize {
        self.total - self.indicated
    }

    /// Percentage of rows for which the test is indicated, or
    /// None for an empty batch
    pub fn indicated_percentage(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.indicated as f64 * 100.0 / self.total as f64)
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total cases: {}", self.total)?;
        writeln!(f, "Indicated cases: {}", self.indicated)?;
        writeln!(f, "Not indicated cases: {}", self.not_indicated())?;
        match self.indicated_percentage() {
            Some(percentage) => write!(f, "Indicated ratio: {percentage:.2}%"),
            None => write!(f, "Indicated ratio: n/a"),
        }
    }
}

/// The first few indicated and not indicated rows of a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Samples<'a> {
    pub indicated: Vec<&'a BatchRow>,
    pub not_indicated: Vec<&'a BatchRow>,
}

impl<'a> Samples<'a> {
    pub fn from_batch(batch: &'a BatchResult, sample_size: usize) -> Self {
        let (indicated, not_indicated): (Vec<&BatchRow>, Vec<&BatchRow>) = batch
            .iter()
            .partition(|row| row.indication.is_indicated());
        Self {
            indicated: indicated.into_iter().take(sample_size).collect(),
            not_indicated: not_indicated.into_iter().take(sample_size).collect(),
        }
    }
}

fn write_rows(f: &mut fmt::Formatter<'_>, rows: &[&BatchRow]) -> fmt::Result {
    if rows.is_empty() {
        return writeln!(f, "(none)");
    }
    for row in rows {
        writeln!(f, "Diagnosis: {}", row.diagnosis)?;
        writeln!(f, "Reason: {}", row.joined_reasons)?;
        writeln!(f)?;
    }
    Ok(())
}

impl fmt::Display for Samples<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Indicated examples:")?;
        write_rows(f, &self.indicated)?;
        writeln!(f, "Not indicated examples:")?;
        write_rows(f, &self.not_indicated)
    }
}

/// Wall-clock time taken to process a number of records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub elapsed: Duration,
    pub records: usize,
}

impl Timing {
    pub fn per_record(&self) -> Option<Duration> {
        u32::try_from(self.records)
            .ok()
            .filter(|records| *records > 0)
            .map(|records| self.elapsed / records)
    }
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total processing time: {:.2} s",
            self.elapsed.as_secs_f64()
        )?;
        if let Some(per_record) = self.per_record() {
            write!(
                f,
                "\nMean time per record: {:.4} s",
                per_record.as_secs_f64()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::classifier::Classifier;
    use crate::taxonomy::Taxonomy;

    fn example_batch() -> BatchResult {
        let taxonomy = Taxonomy::afp();
        Classifier::new(&taxonomy).classify_batch(&["原发性肝癌", "高血压", "病毒性肝炎", "糖尿病", "胃癌"])
    }

    #[test]
    fn summary_counts_rows() {
        let summary = Summary::from_batch(&example_batch());
        assert_eq!(summary.total, 5);
        assert_eq!(summary.indicated, 3);
        assert_eq!(summary.not_indicated(), 2);
        assert_eq!(summary.indicated_percentage(), Some(60.0));
        assert!(summary.to_string().ends_with("Indicated ratio: 60.00%"));
    }

    #[test]
    fn empty_summary_has_no_ratio() {
        let summary = Summary::from_batch(&BatchResult::default());
        assert_eq!(summary.indicated_percentage(), None);
        assert!(summary.to_string().ends_with("n/a"));
    }

    #[test]
    fn samples_take_first_rows_of_each_kind() {
        let batch = example_batch();
        let samples = Samples::from_batch(&batch, 2);
        let indicated: Vec<&str> = samples
            .indicated
            .iter()
            .map(|row| row.diagnosis.as_str())
            .collect();
        let not_indicated: Vec<&str> = samples
            .not_indicated
            .iter()
            .map(|row| row.diagnosis.as_str())
            .collect();
        assert_eq!(indicated, vec!["原发性肝癌", "病毒性肝炎"]);
        assert_eq!(not_indicated, vec!["高血压", "糖尿病"]);
    }

    #[test]
    fn timing_per_record() {
        let timing = Timing {
            elapsed: Duration::from_secs(2),
            records: 4,
        };
        assert_eq!(timing.per_record(), Some(Duration::from_millis(500)));
        let empty = Timing {
            elapsed: Duration::from_secs(2),
            records: 0,
        };
        assert_eq!(empty.per_record(), None);
        assert_eq!(empty.to_string(), "Total processing time: 2.00 s");
    }
}
