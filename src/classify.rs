//! Above/below-mean classification.

use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

use crate::sample::Sample;

/// Position of an observation relative to the sample mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Above,
    Below,
}

/// What to do with observations exactly equal to the mean.
///
/// The choice changes both the label counts and the run count, so it is
/// fixed per evaluation and reported alongside the result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TiePolicy {
    /// Count ties as above the mean (`value >= mean`).
    #[default]
    Above,
    /// Count ties as below the mean (`value <= mean`).
    Below,
    /// Give ties the label of the preceding observation; a leading tie is above.
    Previous,
    /// Drop ties from the label sequence entirely.
    Exclude,
}

impl fmt::Display for TiePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TiePolicy::Above => "above",
            TiePolicy::Below => "below",
            TiePolicy::Previous => "previous",
            TiePolicy::Exclude => "exclude",
        };
        f.write_str(s)
    }
}

/// Result of labelling a sample against its mean.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub mean: f64,
    pub labels: Vec<Label>,
    pub n_above: usize,
    pub n_below: usize,
    /// Observations exactly equal to the mean, whatever the policy did with them.
    pub ties: usize,
}

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
///
/// When the plain sum overflows, each value is scaled by `1/n` before summing
/// so the mean of finite values stays finite.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let sum = values.iter().sum::<f64>();
    if sum.is_finite() {
        sum / n
    } else {
        values.iter().map(|v| v / n).sum()
    }
}

/// Labels every observation of `sample` as above or below its mean.
pub fn classify(sample: &Sample, policy: TiePolicy) -> Classification {
    let mean = mean(sample.values());

    let mut labels = Vec::with_capacity(sample.len());
    let mut ties = 0;

    for &value in sample.values() {
        let label = if value > mean {
            Label::Above
        } else if value < mean {
            Label::Below
        } else {
            ties += 1;
            match policy {
                TiePolicy::Above => Label::Above,
                TiePolicy::Below => Label::Below,
                TiePolicy::Previous => labels.last().copied().unwrap_or(Label::Above),
                TiePolicy::Exclude => continue,
            }
        };
        labels.push(label);
    }

    let n_above = labels.iter().filter(|&&l| l == Label::Above).count();
    let n_below = labels.len() - n_above;

    Classification {
        mean,
        labels,
        n_above,
        n_below,
        ties,
    }
}
