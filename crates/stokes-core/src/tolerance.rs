/// Tolerance used when comparing numerically integrated quantities.
///
/// Two values agree when their difference is below `absolute` or below
/// `relative` times the larger magnitude of the two.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Absolute tolerance, used near zero
    pub absolute: f64,
    /// Relative tolerance, used for large magnitudes
    pub relative: f64,
}

impl Tolerance {
    pub const DEFAULT_ABSOLUTE: f64 = 1e-9;
    pub const DEFAULT_RELATIVE: f64 = 1e-6;

    pub fn new(absolute: f64, relative: f64) -> Self {
        Self { absolute, relative }
    }

    pub fn default_precision() -> Self {
        Self {
            absolute: Self::DEFAULT_ABSOLUTE,
            relative: Self::DEFAULT_RELATIVE,
        }
    }

    pub fn loose() -> Self {
        Self {
            absolute: 1e-3,
            relative: 1e-2,
        }
    }

    /// Tolerance proportional to a sampling step.
    ///
    /// Riemann sums over a lattice with step `rate` are first order
    /// accurate, so both bounds scale linearly with it.
    pub fn for_rate(rate: f64) -> Self {
        let rate = rate.abs();
        Self {
            absolute: rate,
            relative: rate,
        }
    }

    /// Check if two values agree. NaN never agrees with anything.
    pub fn approx_eq(self, a: f64, b: f64) -> bool {
        let diff = (a - b).abs();
        diff <= self.absolute || diff <= self.relative * a.abs().max(b.abs())
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::default_precision()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_near_zero() {
        let tol = Tolerance::default();
        assert!(tol.approx_eq(0.0, 1e-12));
        assert!(!tol.approx_eq(0.0, 1e-3));
    }

    #[test]
    fn test_relative_for_large_values() {
        let tol = Tolerance::new(1e-12, 1e-3);
        assert!(tol.approx_eq(1000.0, 1000.5));
        assert!(!tol.approx_eq(1000.0, 1002.0));
    }

    #[test]
    fn test_nan_never_agrees() {
        let tol = Tolerance::loose();
        assert!(!tol.approx_eq(f64::NAN, 0.0));
        assert!(!tol.approx_eq(f64::NAN, f64::NAN));
    }

    #[test]
    fn test_for_rate_scales() {
        let coarse = Tolerance::for_rate(0.2);
        let fine = Tolerance::for_rate(0.02);
        assert!(coarse.approx_eq(2.0, 2.3));
        assert!(!fine.approx_eq(2.0, 2.3));
    }
}
