//! Incremental statistics over a growing trial sequence.

use crate::process::{Outcome, PiPoint, Process};
use crate::trial::TrialResult;

use super::categorical::CategoryCounts;
use super::convergence::ConvergenceSeries;
use super::moments::RunningMoments;
use super::snapshot::{CoinStats, DiceStats, PiStats, Statistics, SumDiceStats};

/// Running statistics for one process, updated in O(1) per trial.
///
/// Holds its own copy of the process so that the outcome domain and the
/// theoretical standard errors stay consistent with the parameters the
/// trials were generated under.
///
/// # Examples
///
/// ```rust
/// use sim_core::process::{Process, ProcessKind};
/// use sim_core::rng::RandomSource;
/// use sim_core::stats::StatisticsAccumulator;
///
/// let process = Process::from_kind(ProcessKind::DiceRoll);
/// let mut source = RandomSource::lattice(Some(7));
/// let mut acc = StatisticsAccumulator::new(&process);
///
/// for _ in 0..100 {
///     acc.push(&process.run_trial(&mut source));
/// }
/// assert_eq!(acc.len(), 100);
/// assert_eq!(acc.snapshot().convergence().len(), 100);
/// ```
#[derive(Clone, Debug)]
pub struct StatisticsAccumulator {
    process: Process,
    categories: CategoryCounts,
    moments: RunningMoments,
    series: ConvergenceSeries,
    inside_points: Vec<PiPoint>,
    outside_points: Vec<PiPoint>,
}

impl StatisticsAccumulator {
    /// Creates an empty accumulator for `process`.
    pub fn new(process: &Process) -> Self {
        Self {
            process: process.clone(),
            categories: CategoryCounts::new(process.category_labels()),
            moments: RunningMoments::new(),
            series: ConvergenceSeries::new(process.expected_value()),
            inside_points: Vec::new(),
            outside_points: Vec::new(),
        }
    }

    /// Feeds every trial recorded under the process id, in order.
    pub fn from_trials<'a>(
        process: &Process,
        trials: impl IntoIterator<Item = &'a TrialResult>,
    ) -> Self {
        let mut acc = Self::new(process);
        for trial in trials {
            if trial.process_id() == process.id() {
                acc.push(trial.result());
            }
        }
        acc
    }

    /// Process the statistics describe.
    #[inline]
    pub fn process(&self) -> &Process {
        &self.process
    }

    /// Number of trials counted.
    #[inline]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Returns whether nothing has been counted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Running statistic per prefix, without copying it.
    #[inline]
    pub fn convergence(&self) -> &ConvergenceSeries {
        &self.series
    }

    /// Counts one outcome.
    ///
    /// Returns `false`, leaving the state untouched, when the outcome is
    /// outside the process's outcome domain.
    pub fn push(&mut self, outcome: &Outcome) -> bool {
        let Some(index) = self.process.category_index(outcome) else {
            return false;
        };
        self.categories.record(index);
        let n = self.categories.total();

        let value = match outcome {
            // Bucket 0 is heads
            Outcome::Coin(_) => self.categories.count(0) as f64 / n as f64,
            Outcome::Integer(v) => {
                self.moments.push(f64::from(*v));
                self.moments.mean()
            }
            Outcome::Point(point) => {
                if point.inside {
                    self.inside_points.push(*point);
                } else {
                    self.outside_points.push(*point);
                }
                4.0 * (self.inside_points.len() as f64 / n as f64)
            }
        };
        self.series.push(value, self.process.standard_error(n));
        true
    }

    /// Clears every count, keeping the process.
    pub fn clear(&mut self) {
        *self = Self::new(&self.process);
    }

    /// Statistics over everything counted so far.
    pub fn snapshot(&self) -> Statistics {
        let total = self.categories.total();
        let standard_error = self.process.standard_error(total);
        let convergence = self.series.clone();

        match &self.process {
            Process::CoinFlip(coin) => Statistics::CoinFlip(CoinStats {
                heads: self.categories.count(0),
                tails: self.categories.count(1),
                total,
                heads_percentage: self.categories.percentage(0),
                tails_percentage: self.categories.percentage(1),
                proportion: self.series.last().unwrap_or(0.0),
                expected_proportion: coin.probability(),
                standard_error,
                convergence,
            }),
            Process::DiceRoll(dice) => Statistics::DiceRoll(DiceStats {
                counts: std::array::from_fn(|i| self.categories.count(i)),
                total,
                percentages: std::array::from_fn(|i| self.categories.percentage(i)),
                mean: self.moments.mean(),
                std_dev: self.moments.sample_std_dev(),
                expected_value: dice.expected_value(),
                standard_error,
                convergence,
            }),
            Process::SumDice(sum) => Statistics::SumDice(SumDiceStats {
                number_of_dice: sum.number_of_dice(),
                min_sum: sum.min_sum(),
                max_sum: sum.max_sum(),
                counts: self.categories.counts().to_vec(),
                total,
                percentages: self.categories.percentages(),
                average: self.moments.mean(),
                expected_value: sum.expected_value(),
                std_dev: self.moments.sample_std_dev(),
                expected_std_dev: sum.standard_deviation(),
                standard_error,
                convergence,
            }),
            Process::PiSimulation(pi) => {
                let inside = self.inside_points.len() as u64;
                let estimate = self.series.last().unwrap_or(0.0);
                Statistics::PiSimulation(PiStats {
                    total,
                    inside,
                    outside: total - inside,
                    inside_percentage: self.categories.percentage(0),
                    estimate,
                    error: if total == 0 {
                        0.0
                    } else {
                        (estimate - pi.expected_value()).abs()
                    },
                    standard_error,
                    convergence,
                    inside_points: self.inside_points.clone(),
                    outside_points: self.outside_points.clone(),
                })
            }
        }
    }
}
