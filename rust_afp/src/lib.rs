//! Decide whether discharge diagnoses justify ordering an
//! alpha-fetoprotein (AFP) test.
//!
//! A fixed [`Taxonomy`] of disease categories is flattened into
//! a keyword index, and a [`Classifier`] looks for the first
//! keyword occurring in each diagnosis. Tables of patient
//! records are classified a chunk at a time and saved with the
//! verdicts added as two new columns.
//!

pub mod analysis;
pub mod batch;
pub mod classifier;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod table;
pub mod taxonomy;

pub use analysis::{analyze_file, Analysis};
pub use batch::{BatchResult, BatchRow, Indication};
pub use classifier::{Classifier, Verdict};
pub use config::AnalysisConfig;
pub use error::{AnalysisError, ErrorKind};
pub use taxonomy::{Category, Taxonomy};
