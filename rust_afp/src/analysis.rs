//! The whole analysis of a patient table: read it, classify
//! the diagnosis column, add the verdict columns and save it.
//!

use polars::prelude::DataFrame;
use std::time::Instant;
use tracing::info;

use crate::batch::BatchResult;
use crate::classifier::Classifier;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::report::{Samples, Summary, Timing};
use crate::table::{column_names, diagnoses_from, merge_verdicts, read_table, write_table};
use crate::taxonomy::Taxonomy;

/// The result of analysing a table
#[derive(Debug, Clone)]
pub struct Analysis {
    /// The input table with the verdict columns added, as saved
    pub table: DataFrame,
    pub batch: BatchResult,
    pub timing: Timing,
}

impl Analysis {
    pub fn summary(&self) -> Summary {
        Summary::from_batch(&self.batch)
    }

    pub fn samples(&self, sample_size: usize) -> Samples<'_> {
        Samples::from_batch(&self.batch, sample_size)
    }
}

/// Run the analysis described by config
///
/// Nothing is written unless every step before saving has
/// succeeded, so a failed analysis never leaves a partial
/// output table.
pub fn analyze_file(config: &AnalysisConfig) -> Result<Analysis> {
    config.validate()?;
    let start = Instant::now();

    let taxonomy = Taxonomy::load(config.taxonomy.as_deref(), config.reject_keyword_collisions)?;
    let classifier = Classifier::new(&taxonomy);

    info!(input = %config.input.display(), "reading table");
    let mut table = read_table(&config.input)?;
    info!(columns = ?column_names(&table), "table columns");

    let diagnoses = diagnoses_from(&table, &config.diagnosis_column)?;
    info!(records = diagnoses.len(), "read diagnoses");

    let batch = classifier.classify_chunked(&diagnoses, config.chunk_size, |progress| {
        info!("{progress}");
    });

    merge_verdicts(
        &mut table,
        &batch,
        &config.indicator_column,
        &config.reason_column,
    )?;
    write_table(&mut table, &config.output)?;
    info!(output = %config.output.display(), "saved results");

    let timing = Timing {
        elapsed: start.elapsed(),
        records: batch.len(),
    };
    Ok(Analysis {
        table,
        batch,
        timing,
    })
}
