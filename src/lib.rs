//! Runs test above and below the mean.
//!
//! Loads one numeric column, labels each observation relative to the sample
//! mean, counts runs of identical labels, and tests the run count against its
//! distribution under the hypothesis of randomness.

pub mod classify;
pub mod error;
pub mod evaluate;
pub mod loader;
pub mod output;
pub mod runs;
pub mod sample;
pub mod special;
pub mod stats;

pub use classify::{Classification, Label, TiePolicy, classify};
pub use error::RunsTestError;
pub use evaluate::{Decision, RunsStatistics, Significance, evaluate, run_test};
pub use loader::{load_column, read_column};
pub use runs::count_runs;
pub use sample::Sample;
pub use stats::RunsTestReport;
