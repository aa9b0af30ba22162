//! One-dimensional parameter sweeps.
//!
//! Sample coordinates are computed as `min + i * step` from an integer index
//! instead of by repeatedly adding `step`, so the number of samples and their
//! positions do not depend on accumulated rounding error.

/// Slack absorbing the rounding error of `span / step`, e.g. `0.3 / 0.1`.
const STEP_SLACK: f64 = 1e-9;

/// Number of samples in the closed sweep `min, min + step, ..., <= max`.
///
/// Zero when `step` is not positive, when `max < min`, or when either bound
/// is not finite.
pub fn inclusive_count(min: f64, max: f64, step: f64) -> usize {
    if !(step > 0.0) || !(max >= min) {
        return 0;
    }
    let n = ((max - min) / step + STEP_SLACK).floor();
    if n.is_finite() {
        (n as usize).saturating_add(1)
    } else {
        0
    }
}

/// Number of cells `[min + i * step, min + (i + 1) * step)` whose start lies
/// below `max`.
pub fn half_open_count(min: f64, max: f64, step: f64) -> usize {
    if !(step > 0.0) || !(max >= min) {
        return 0;
    }
    let n = ((max - min) / step - STEP_SLACK).ceil();
    if n.is_finite() && n > 0.0 {
        n as usize
    } else {
        0
    }
}

/// Closed sweep from `min` to `max` (inclusive when `max` lands on a step).
pub fn inclusive(min: f64, max: f64, step: f64) -> impl Iterator<Item = f64> + Clone {
    (0..inclusive_count(min, max, step)).map(move |i| min + i as f64 * step)
}

/// Cell starts of the half-open sweep over `[min, max)`.
pub fn half_open(min: f64, max: f64, step: f64) -> impl Iterator<Item = f64> + Clone {
    (0..half_open_count(min, max, step)).map(move |i| min + i as f64 * step)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inclusive_lands_on_max() {
        assert_eq!(inclusive_count(0.0, 1.0, 0.1), 11);
        assert_eq!(inclusive_count(0.0, 0.3, 0.1), 4);
        assert_eq!(inclusive_count(-4.0, 4.0, 0.2), 41);
        let last = inclusive(0.0, 1.0, 0.1).last().unwrap();
        assert!((last - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_inclusive_partial_step() {
        let values: Vec<f64> = inclusive(0.0, 1.0, 0.3).collect();
        assert_eq!(values.len(), 4);
        assert!((values[3] - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_step_larger_than_span() {
        assert_eq!(inclusive(0.0, 1.0, 5.0).collect::<Vec<_>>(), vec![0.0]);
        assert_eq!(half_open_count(0.0, 1.0, 5.0), 1);
    }

    #[test]
    fn test_half_open_excludes_max() {
        assert_eq!(half_open_count(0.0, 1.0, 0.1), 10);
        assert_eq!(half_open_count(0.0, 1.0, 0.2), 5);
        assert_eq!(half_open_count(0.0, 1.0, 0.3), 4);
        assert_eq!(half_open_count(2.0, 2.0, 0.1), 0);
    }

    #[test]
    fn test_malformed_inputs_are_empty() {
        assert_eq!(inclusive_count(1.0, 0.0, 0.1), 0);
        assert_eq!(inclusive_count(0.0, 1.0, 0.0), 0);
        assert_eq!(inclusive_count(0.0, 1.0, -0.1), 0);
        assert_eq!(inclusive_count(0.0, 1.0, f64::NAN), 0);
        assert_eq!(inclusive_count(f64::NAN, 1.0, 0.1), 0);
        assert_eq!(half_open_count(1.0, 0.0, 0.1), 0);
        assert_eq!(half_open_count(0.0, f64::INFINITY, 0.1), 0);
    }

    #[test]
    fn test_degenerate_range_single_sample() {
        assert_eq!(inclusive(3.0, 3.0, 0.5).collect::<Vec<_>>(), vec![3.0]);
    }
}
