use crate::error::RunsTestError;

/// An ordered, immutable sequence of finite observations, at least two long.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    values: Vec<f64>,
}

impl Sample {
    /// Wraps `values`, rejecting non-finite entries and samples shorter than two.
    ///
    /// Row numbers in errors are 1-based positions within `values`.
    pub fn new(values: Vec<f64>) -> Result<Self, RunsTestError> {
        if let Some((i, v)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(RunsTestError::NonNumeric {
                row: i as u64 + 1,
                value: v.to_string(),
            });
        }
        if values.len() < 2 {
            return Err(RunsTestError::SampleTooSmall { n: values.len() });
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_two_values() {
        let sample = Sample::new(vec![1.0, 2.0]).unwrap();
        assert_eq!(sample.len(), 2);
        assert_eq!(sample.values(), &[1.0, 2.0]);
    }

    #[test]
    fn test_new_rejects_short_samples() {
        assert!(matches!(
            Sample::new(vec![]),
            Err(RunsTestError::SampleTooSmall { n: 0 })
        ));
        assert!(matches!(
            Sample::new(vec![4.2]),
            Err(RunsTestError::SampleTooSmall { n: 1 })
        ));
    }

    #[test]
    fn test_new_rejects_nan_with_position() {
        let err = Sample::new(vec![1.0, f64::NAN, 3.0]).unwrap_err();
        assert!(matches!(err, RunsTestError::NonNumeric { row: 2, .. }));
    }

    #[test]
    fn test_new_rejects_infinity() {
        assert!(Sample::new(vec![f64::INFINITY, 1.0]).is_err());
    }
}
