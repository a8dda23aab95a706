use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::classify::{Classification, TiePolicy};
use crate::evaluate::{Decision, RunsStatistics};
use crate::runs::run_lengths;

/// One flat, serializable record of a completed runs test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunsTestReport {
    pub timestamp: DateTime<Utc>,
    pub source: Option<String>,
    pub column: Option<String>,
    pub tie_policy: TiePolicy,

    // sample
    pub n: usize,
    pub mean: f64,
    pub n_above: usize,
    pub n_below: usize,
    pub ties: usize,

    // runs
    pub runs: usize,
    pub longest_run: usize,
    pub expected_runs: f64,
    pub variance: f64,
    pub z: f64,
    pub p_value: f64,

    // decision
    pub alpha: f64,
    pub critical_value: f64,
    pub decision: Decision,
    pub normal_approximation_valid: bool,
}

impl RunsTestReport {
    pub fn from_run(
        classification: &Classification,
        stats: &RunsStatistics,
        tie_policy: TiePolicy,
    ) -> Self {
        RunsTestReport {
            timestamp: Utc::now(),
            source: None,
            column: None,
            tie_policy,
            n: stats.n,
            mean: classification.mean,
            n_above: stats.n_above,
            n_below: stats.n_below,
            ties: classification.ties,
            runs: stats.runs,
            longest_run: run_lengths(&classification.labels)
                .into_iter()
                .max()
                .unwrap_or(0),
            expected_runs: stats.expected_runs,
            variance: stats.variance,
            z: stats.z,
            p_value: stats.p_value,
            alpha: stats.alpha,
            critical_value: stats.critical_value,
            decision: stats.decision,
            normal_approximation_valid: stats.normal_approximation_valid,
        }
    }

    /// Set input metadata (file and column)
    pub fn with_source(mut self, source: &str, column: &str) -> Self {
        self.source = Some(source.to_string());
        self.column = Some(column.to_string());
        self
    }

    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }
}
