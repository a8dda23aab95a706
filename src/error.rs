//! Error type shared by the loader and the runs-test pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a runs test before it produces a result.
#[derive(Debug, Error)]
pub enum RunsTestError {
    #[error("cannot read input file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed delimited data: {0}")]
    Csv(#[from] csv::Error),
    #[error("column '{column}' not found in header (available: {available})")]
    MissingColumn { column: String, available: String },
    #[error("row {row}: missing value")]
    MissingValue { row: u64 },
    #[error("row {row}: '{value}' is not a finite number")]
    NonNumeric { row: u64, value: String },
    #[error("sample too small: {n} observations, at least 2 required")]
    SampleTooSmall { n: usize },
    #[error(
        "degenerate classification: {above} above and {below} below the mean, variance is undefined"
    )]
    DegenerateClassification { above: usize, below: usize },
    #[error("run-count variance is zero, the Z statistic is undefined")]
    ZeroVariance,
}
