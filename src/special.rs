//! Error function approximations used for normal tail probabilities.

/// Abramowitz & Stegun formula 7.1.28, maximum absolute error < 1.5 × 10⁻⁷.
pub fn erf(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    let sign = if x >= 0.0 { 1.0 } else { -1.0 };
    let x = x.abs();

    const P: f64 = 0.3275911;
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;

    let t = 1.0 / (1.0 + P * x);
    let poly = t * (A1 + t * (A2 + t * (A3 + t * (A4 + t * A5))));
    sign * (1.0 - poly * (-x * x).exp())
}

/// Complementary error function erfc(x) = 1 − erf(x).
pub fn erfc(x: f64) -> f64 {
    1.0 - erf(x)
}

/// Two-tailed p-value of a standard normal statistic: P(|Z| ≥ |z|).
///
/// Inherits the ~1.5 × 10⁻⁷ absolute error of [`erf`], so far-tail values are
/// not relatively accurate. Decisions use the critical value, not this p-value.
pub fn two_tailed_p_value(z: f64) -> f64 {
    erfc(z.abs() / std::f64::consts::SQRT_2).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_erf_known_values() {
        assert!(erf(0.0).abs() < 1e-7);
        assert!((erf(1.0) - 0.8427007929).abs() < 1e-6);
        assert!((erf(-1.0) + 0.8427007929).abs() < 1e-6);
    }

    #[test]
    fn test_erfc_complements_erf() {
        for x in [-2.0, -0.5, 0.0, 0.3, 1.7, 3.0] {
            assert!((erf(x) + erfc(x) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_erf_nan() {
        assert!(erf(f64::NAN).is_nan());
    }

    #[test]
    fn test_two_tailed_p_value() {
        assert!((two_tailed_p_value(0.0) - 1.0).abs() < 1e-7);
        assert!((two_tailed_p_value(1.96) - 0.05).abs() < 1e-4);
        assert!((two_tailed_p_value(-1.96) - 0.05).abs() < 1e-4);
        assert!((two_tailed_p_value(2.576) - 0.01).abs() < 1e-4);
    }
}
