//! Hypothesis evaluation for the runs test above and below the mean.
//!
//! Under the null hypothesis of randomness, with `n1` observations above the
//! mean, `n2` below and `n = n1 + n2`, the run count `R` is approximately
//! normal with
//!
//! ```text
//! μ_R  = 2·n1·n2 / n + 1
//! σ²_R = 2·n1·n2·(2·n1·n2 − n) / (n²·(n − 1))
//! ```
//!
//! and `Z = (R − μ_R) / σ_R` is compared against a two-tailed critical value.

use clap::ValueEnum;
use serde::Serialize;
use tracing::{debug, warn};

use crate::classify::{Classification, TiePolicy, classify};
use crate::error::RunsTestError;
use crate::runs::count_runs;
use crate::sample::Sample;
use crate::special::two_tailed_p_value;

/// Below this many observations on either side the normal approximation is unreliable.
pub const MIN_GROUP_SIZE: usize = 10;

/// Supported two-tailed significance levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Significance {
    #[value(name = "0.10")]
    TenPercent,
    #[default]
    #[value(name = "0.05")]
    FivePercent,
    #[value(name = "0.01")]
    OnePercent,
}

impl Significance {
    pub fn alpha(self) -> f64 {
        match self {
            Significance::TenPercent => 0.10,
            Significance::FivePercent => 0.05,
            Significance::OnePercent => 0.01,
        }
    }

    /// Two-tailed standard normal critical value for this level.
    pub fn critical_value(self) -> f64 {
        match self {
            Significance::TenPercent => 1.645,
            Significance::FivePercent => 1.96,
            Significance::OnePercent => 2.576,
        }
    }
}

/// Outcome of comparing |Z| to the critical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// |Z| ≤ critical value: no evidence against randomness.
    Accept,
    /// |Z| > critical value: the sequence is not random at this level.
    Reject,
}

/// Everything derived from the label counts and the observed run count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunsStatistics {
    pub n: usize,
    pub n_above: usize,
    pub n_below: usize,
    pub runs: usize,
    pub expected_runs: f64,
    pub variance: f64,
    pub z: f64,
    pub p_value: f64,
    pub alpha: f64,
    pub critical_value: f64,
    pub decision: Decision,
    /// False when either group is smaller than [`MIN_GROUP_SIZE`].
    pub normal_approximation_valid: bool,
}

impl RunsStatistics {
    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }

    pub fn is_random(&self) -> bool {
        self.decision == Decision::Accept
    }
}

/// Expected number of runs under randomness.
pub fn expected_runs(n_above: usize, n_below: usize) -> f64 {
    let (n1, n2) = (n_above as f64, n_below as f64);
    2.0 * n1 * n2 / (n1 + n2) + 1.0
}

/// Variance of the number of runs under randomness.
pub fn runs_variance(n_above: usize, n_below: usize) -> f64 {
    let (n1, n2) = (n_above as f64, n_below as f64);
    let n = n1 + n2;
    let product = 2.0 * n1 * n2;
    product * (product - n) / (n * n * (n - 1.0))
}

/// Evaluates the observed run count against its null distribution.
///
/// # Errors
///
/// - [`RunsTestError::SampleTooSmall`] when fewer than two labels were counted.
/// - [`RunsTestError::DegenerateClassification`] when every label is on one side.
/// - [`RunsTestError::ZeroVariance`] when `n1 = n2 = 1`.
pub fn evaluate(
    n_above: usize,
    n_below: usize,
    runs: usize,
    significance: Significance,
) -> Result<RunsStatistics, RunsTestError> {
    let n = n_above + n_below;
    if n < 2 {
        return Err(RunsTestError::SampleTooSmall { n });
    }
    if n_above == 0 || n_below == 0 {
        return Err(RunsTestError::DegenerateClassification {
            above: n_above,
            below: n_below,
        });
    }

    let expected = expected_runs(n_above, n_below);
    let variance = runs_variance(n_above, n_below);
    if variance <= 0.0 {
        return Err(RunsTestError::ZeroVariance);
    }

    let z = (runs as f64 - expected) / variance.sqrt();
    let critical_value = significance.critical_value();
    let decision = if z.abs() > critical_value {
        Decision::Reject
    } else {
        Decision::Accept
    };

    let normal_approximation_valid = n_above >= MIN_GROUP_SIZE && n_below >= MIN_GROUP_SIZE;
    if !normal_approximation_valid {
        warn!(
            n_above,
            n_below,
            min = MIN_GROUP_SIZE,
            "Group too small for the normal approximation"
        );
    }

    Ok(RunsStatistics {
        n,
        n_above,
        n_below,
        runs,
        expected_runs: expected,
        variance,
        z,
        p_value: two_tailed_p_value(z),
        alpha: significance.alpha(),
        critical_value,
        decision,
        normal_approximation_valid,
    })
}

/// Full pipeline: classify `sample`, count runs, and evaluate them.
#[tracing::instrument(skip(sample), fields(n = sample.len()))]
pub fn run_test(
    sample: &Sample,
    policy: TiePolicy,
    significance: Significance,
) -> Result<(Classification, RunsStatistics), RunsTestError> {
    let classification = classify(sample, policy);
    let runs = count_runs(&classification.labels);
    debug!(
        mean = classification.mean,
        n_above = classification.n_above,
        n_below = classification.n_below,
        ties = classification.ties,
        runs,
        "Sample classified"
    );

    let stats = evaluate(
        classification.n_above,
        classification.n_below,
        runs,
        significance,
    )?;
    Ok((classification, stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_textbook_balanced_case() {
        let stats = evaluate(10, 10, 11, Significance::FivePercent).unwrap();
        assert_eq!(stats.n, 20);
        assert!((stats.expected_runs - 11.0).abs() < EPS);
        assert!((stats.variance - 36000.0 / 7600.0).abs() < EPS);
        assert!(stats.z.abs() < EPS);
        assert_eq!(stats.decision, Decision::Accept);
        assert!(stats.normal_approximation_valid);
    }

    #[test]
    fn test_too_few_runs_rejects() {
        let stats = evaluate(10, 10, 6, Significance::FivePercent).unwrap();
        let expected_z = (6.0 - 11.0) / (36000.0_f64 / 7600.0).sqrt();
        assert!((stats.z - expected_z).abs() < EPS);
        assert!((stats.z + 2.2973).abs() < 1e-3);
        assert_eq!(stats.decision, Decision::Reject);
        assert!(stats.p_value < 0.05);
    }

    #[test]
    fn test_same_z_accepted_at_stricter_level() {
        let stats = evaluate(10, 10, 6, Significance::OnePercent).unwrap();
        assert_eq!(stats.decision, Decision::Accept);
        assert_eq!(stats.critical_value, 2.576);
        assert_eq!(stats.alpha, 0.01);
    }

    #[test]
    fn test_unbalanced_formula() {
        let stats = evaluate(12, 8, 9, Significance::default()).unwrap();
        let mu: f64 = 2.0 * 12.0 * 8.0 / 20.0 + 1.0;
        let var: f64 = 192.0 * (192.0 - 20.0) / (400.0 * 19.0);
        assert!((stats.expected_runs - mu).abs() < EPS);
        assert!((stats.variance - var).abs() < EPS);
        assert!((stats.z - (9.0 - mu) / var.sqrt()).abs() < EPS);
        assert!(!stats.normal_approximation_valid);
    }

    #[test]
    fn test_degenerate_classification() {
        let err = evaluate(5, 0, 1, Significance::default()).unwrap_err();
        assert!(matches!(
            err,
            RunsTestError::DegenerateClassification { above: 5, below: 0 }
        ));
        assert!(evaluate(0, 3, 1, Significance::default()).is_err());
    }

    #[test]
    fn test_zero_variance() {
        let err = evaluate(1, 1, 2, Significance::default()).unwrap_err();
        assert!(matches!(err, RunsTestError::ZeroVariance));
    }

    #[test]
    fn test_too_small() {
        let err = evaluate(1, 0, 1, Significance::default()).unwrap_err();
        assert!(matches!(err, RunsTestError::SampleTooSmall { n: 1 }));
    }

    #[test]
    fn test_small_groups_flag_caveat() {
        let stats = evaluate(9, 15, 10, Significance::default()).unwrap();
        assert!(!stats.normal_approximation_valid);
        assert!(stats.z.is_finite());
    }

    #[test]
    fn test_run_test_on_identical_values_is_an_error() {
        let sample = Sample::new(vec![4.0; 12]).unwrap();
        let err = run_test(&sample, TiePolicy::Above, Significance::default()).unwrap_err();
        assert!(matches!(
            err,
            RunsTestError::DegenerateClassification { above: 12, below: 0 }
        ));

        let err = run_test(&sample, TiePolicy::Exclude, Significance::default()).unwrap_err();
        assert!(matches!(err, RunsTestError::SampleTooSmall { n: 0 }));
    }

    #[test]
    fn test_run_test_ascending_sample() {
        let sample = Sample::new(vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let (c, stats) = run_test(&sample, TiePolicy::Above, Significance::default()).unwrap();
        assert_eq!(c.ties, 1);
        assert_eq!(stats.runs, 2);
        assert_eq!((stats.n_above, stats.n_below), (3, 2));

        let (_, stats) = run_test(&sample, TiePolicy::Exclude, Significance::default()).unwrap();
        assert_eq!(stats.n, 4);
        assert_eq!(stats.runs, 2);
    }

    #[test]
    fn test_run_test_alternating_sample() {
        let values: Vec<f64> = (0..20).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let sample = Sample::new(values).unwrap();
        let (_, stats) = run_test(&sample, TiePolicy::Above, Significance::default()).unwrap();
        assert_eq!(stats.runs, 20);
        assert_eq!(stats.decision, Decision::Reject);
        assert!(stats.z > 0.0);
    }

    #[test]
    fn test_run_test_with_values_near_f64_max() {
        let sample =
            Sample::new(vec![1.5e308, -1.0e308, 1.6e308, -1.1e308, 1.4e308, 1.7e308]).unwrap();
        let (c, stats) = run_test(&sample, TiePolicy::Above, Significance::default()).unwrap();
        assert!(c.mean.is_finite());
        assert_eq!((stats.n_above, stats.n_below), (4, 2));
        assert_eq!(stats.runs, 5);
        assert!(stats.z.is_finite());
    }

    #[test]
    fn test_run_test_is_deterministic() {
        let values = vec![3.1, 0.4, 2.2, 5.9, 1.0, 4.4, 2.8, 0.7, 3.3, 5.0];
        let sample = Sample::new(values).unwrap();
        let first = run_test(&sample, TiePolicy::Previous, Significance::default()).unwrap();
        let second = run_test(&sample, TiePolicy::Previous, Significance::default()).unwrap();
        assert_eq!(first, second);
    }
}
