//! Streaming mean and variance.

/// Single-pass accumulator for mean and sample variance.
///
/// Keeps an exact running sum for the mean (integer-valued outcomes stay
/// exact) and Welford's update for the sum of squared deviations, which
/// avoids the cancellation of the naive `Σx² − n·x̄²` form.
///
/// Reference: Welford (1962), *Technometrics* 4(3), pp. 419–420.
///
/// # Examples
///
/// ```rust
/// use sim_core::stats::RunningMoments;
///
/// let mut acc = RunningMoments::new();
/// for x in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
///     acc.push(x);
/// }
/// assert_eq!(acc.mean(), 5.0);
/// assert!((acc.sample_variance() - 32.0 / 7.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunningMoments {
    count: u64,
    sum: f64,
    welford_mean: f64,
    m2: f64,
}

impl RunningMoments {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one sample.
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;

        let delta = value - self.welford_mean;
        self.welford_mean += delta / self.count as f64;
        self.m2 += delta * (value - self.welford_mean);
    }

    /// Number of samples seen.
    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Running sum.
    #[inline]
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Mean, or 0 with no samples.
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }

    /// Sample variance with Bessel's correction (`n − 1`); 0 for `n ≤ 1`.
    pub fn sample_variance(&self) -> f64 {
        if self.count <= 1 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    /// Sample standard deviation; 0 for `n ≤ 1`.
    pub fn sample_std_dev(&self) -> f64 {
        self.sample_variance().sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_and_single() {
        let mut acc = RunningMoments::new();
        assert_eq!(acc.mean(), 0.0);
        assert_eq!(acc.sample_std_dev(), 0.0);

        acc.push(4.0);
        assert_eq!(acc.mean(), 4.0);
        assert_eq!(acc.sample_variance(), 0.0);
        assert_eq!(acc.sample_std_dev(), 0.0);
    }

    #[test]
    fn test_bessel_correction() {
        let mut acc = RunningMoments::new();
        for x in [1.0, 2.0, 3.0, 4.0] {
            acc.push(x);
        }
        // Σ(x − 2.5)² = 5, divided by n − 1
        assert_relative_eq!(acc.sample_variance(), 5.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(acc.sample_std_dev().powi(2), 5.0 / 3.0, epsilon = 1e-12);
        assert_eq!(acc.sum(), 10.0);
        assert_eq!(acc.count(), 4);
    }

    #[test]
    fn test_large_offset_is_stable() {
        let mut acc = RunningMoments::new();
        for x in [1e9 + 4.0, 1e9 + 7.0, 1e9 + 13.0, 1e9 + 16.0] {
            acc.push(x);
        }
        assert_relative_eq!(acc.sample_variance(), 30.0, epsilon = 1e-6);
    }
}
