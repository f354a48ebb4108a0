//! Convergence series: a running statistic evaluated after every trial.

/// Value of a running statistic after a given number of trials.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ConvergencePoint {
    /// 1-based trial number.
    pub trial: u64,
    /// Statistic over the first `trial` trials.
    pub value: f64,
    /// Theoretical standard error at `trial` trials.
    pub standard_error: f64,
}

/// Running statistic per prefix of the trial sequence, with the
/// theoretical standard error at each prefix length.
///
/// `values()[i]` is the statistic over the first `i + 1` trials.
///
/// # Examples
///
/// ```rust
/// use sim_core::stats::ConvergenceSeries;
///
/// let mut series = ConvergenceSeries::new(0.5);
/// series.push(1.0, 0.5);
/// series.push(0.5, 0.25);
///
/// assert_eq!(series.last(), Some(0.5));
/// assert_eq!(series.band(2.0)[1], (0.0, 1.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ConvergenceSeries {
    expected: f64,
    values: Vec<f64>,
    standard_errors: Vec<f64>,
}

impl ConvergenceSeries {
    /// Creates an empty series converging towards `expected`.
    pub fn new(expected: f64) -> Self {
        Self {
            expected,
            values: Vec::new(),
            standard_errors: Vec::new(),
        }
    }

    /// Appends the statistic for the next prefix.
    pub fn push(&mut self, value: f64, standard_error: f64) {
        self.values.push(value);
        self.standard_errors.push(standard_error);
    }

    /// Theoretical value of the statistic.
    #[inline]
    pub fn expected(&self) -> f64 {
        self.expected
    }

    /// Statistic after each prefix.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Standard error after each prefix.
    #[inline]
    pub fn standard_errors(&self) -> &[f64] {
        &self.standard_errors
    }

    /// Number of prefixes.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether no trial has been recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Statistic over the whole sequence.
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Point after `trial` trials (1-based).
    pub fn point(&self, trial: u64) -> Option<ConvergencePoint> {
        let index = usize::try_from(trial).ok()?.checked_sub(1)?;
        Some(ConvergencePoint {
            trial,
            value: *self.values.get(index)?,
            standard_error: self.standard_errors[index],
        })
    }

    /// `(expected − k·se, expected + k·se)` for every prefix.
    pub fn band(&self, k: f64) -> Vec<(f64, f64)> {
        self.standard_errors
            .iter()
            .map(|se| (self.expected - k * se, self.expected + k * se))
            .collect()
    }

    /// Up to `count` evenly spaced points, always ending at the last trial.
    pub fn checkpoints(&self, count: usize) -> Vec<ConvergencePoint> {
        let len = self.len();
        if len == 0 || count == 0 {
            return Vec::new();
        }
        let count = count.min(len);
        (1..=count)
            .filter_map(|j| self.point((j * len).div_ceil(count) as u64))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series_of(len: usize) -> ConvergenceSeries {
        let mut series = ConvergenceSeries::new(3.5);
        for i in 1..=len {
            series.push(i as f64, 1.0 / i as f64);
        }
        series
    }

    #[test]
    fn test_point_is_one_based() {
        let series = series_of(3);
        assert_eq!(series.point(0), None);
        assert_eq!(series.point(4), None);
        let point = series.point(2).unwrap();
        assert_eq!(point.trial, 2);
        assert_eq!(point.value, 2.0);
        assert_eq!(point.standard_error, 0.5);
    }

    #[test]
    fn test_checkpoints_are_even_and_end_at_last() {
        let series = series_of(100);
        let trials: Vec<u64> = series.checkpoints(4).iter().map(|p| p.trial).collect();
        assert_eq!(trials, vec![25, 50, 75, 100]);

        let all = series_of(3).checkpoints(10);
        assert_eq!(all.len(), 3);
        assert_eq!(all.last().unwrap().trial, 3);

        assert!(ConvergenceSeries::new(0.0).checkpoints(5).is_empty());
        assert!(series.checkpoints(0).is_empty());
    }

    #[test]
    fn test_band_is_centred_on_expected() {
        let series = series_of(2);
        let band = series.band(1.0);
        assert_eq!(band[0], (2.5, 4.5));
        assert_eq!(band[1], (3.0, 4.0));
    }
}
