//! Per-process statistics snapshots.

use crate::process::{PiPoint, Process, ProcessKind};
use crate::trial::TrialResult;

use super::accumulator::StatisticsAccumulator;
use super::categorical::{percentage, CategoryCount};
use super::convergence::ConvergenceSeries;

/// Coin flip statistics.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CoinStats {
    /// Number of heads.
    pub heads: u64,
    /// Number of tails.
    pub tails: u64,
    /// Number of flips.
    pub total: u64,
    /// Heads share, in percent.
    pub heads_percentage: f64,
    /// Tails share, in percent.
    pub tails_percentage: f64,
    /// Proportion of heads over all flips (0 when empty).
    pub proportion: f64,
    /// Bias of the coin.
    pub expected_proportion: f64,
    /// Standard error of the proportion at `total` flips.
    pub standard_error: f64,
    /// Running proportion of heads.
    pub convergence: ConvergenceSeries,
}

/// Single die statistics.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DiceStats {
    /// Count per face, `counts[0]` being face 1.
    pub counts: [u64; 6],
    /// Number of rolls.
    pub total: u64,
    /// Share per face, in percent.
    pub percentages: [f64; 6],
    /// Mean face value.
    pub mean: f64,
    /// Sample standard deviation.
    pub std_dev: f64,
    /// 3.5
    pub expected_value: f64,
    /// Standard error of the mean at `total` rolls.
    pub standard_error: f64,
    /// Running mean.
    pub convergence: ConvergenceSeries,
}

/// Sum-of-dice statistics.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SumDiceStats {
    /// Dice per trial.
    pub number_of_dice: usize,
    /// Smallest possible sum, `N`.
    pub min_sum: u32,
    /// Largest possible sum, `6N`.
    pub max_sum: u32,
    /// Count per sum, `counts[0]` being `min_sum`.
    pub counts: Vec<u64>,
    /// Number of trials.
    pub total: u64,
    /// Share per sum, in percent.
    pub percentages: Vec<f64>,
    /// Mean sum.
    pub average: f64,
    /// `3.5N`
    pub expected_value: f64,
    /// Sample standard deviation (Bessel-corrected).
    pub std_dev: f64,
    /// `sqrt(35N/12)`
    pub expected_std_dev: f64,
    /// Standard error of the mean at `total` trials.
    pub standard_error: f64,
    /// Running mean.
    pub convergence: ConvergenceSeries,
}

/// Monte Carlo π statistics.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PiStats {
    /// Number of points.
    pub total: u64,
    /// Points inside the quarter circle.
    pub inside: u64,
    /// Points outside the quarter circle.
    pub outside: u64,
    /// Inside share, in percent.
    pub inside_percentage: f64,
    /// `4 · inside / total` (0 when empty).
    pub estimate: f64,
    /// `|estimate − π|` (0 when empty).
    pub error: f64,
    /// Standard error of the estimate at `total` points.
    pub standard_error: f64,
    /// Running estimate.
    pub convergence: ConvergenceSeries,
    /// Scatter of inside points.
    pub inside_points: Vec<PiPoint>,
    /// Scatter of outside points.
    pub outside_points: Vec<PiPoint>,
}

/// Statistics snapshot of any process.
///
/// A pure function of the trial sequence: computing it twice over the same
/// trials yields identical values, whether incrementally or from scratch.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "process", rename_all = "kebab-case"))]
pub enum Statistics {
    /// Coin flip.
    CoinFlip(CoinStats),
    /// Single die.
    DiceRoll(DiceStats),
    /// Sum of dice.
    SumDice(SumDiceStats),
    /// Monte Carlo π.
    PiSimulation(PiStats),
}

impl Statistics {
    /// Computes the snapshot from scratch in one pass over `trials`.
    ///
    /// Trials recorded under another process id, or outside the process's
    /// current outcome domain, are skipped.
    pub fn compute<'a>(
        process: &Process,
        trials: impl IntoIterator<Item = &'a TrialResult>,
    ) -> Self {
        StatisticsAccumulator::from_trials(process, trials).snapshot()
    }

    /// Kind of process the snapshot describes.
    pub fn kind(&self) -> ProcessKind {
        match self {
            Statistics::CoinFlip(_) => ProcessKind::CoinFlip,
            Statistics::DiceRoll(_) => ProcessKind::DiceRoll,
            Statistics::SumDice(_) => ProcessKind::SumDice,
            Statistics::PiSimulation(_) => ProcessKind::PiSimulation,
        }
    }

    /// Number of trials counted.
    pub fn total(&self) -> u64 {
        match self {
            Statistics::CoinFlip(s) => s.total,
            Statistics::DiceRoll(s) => s.total,
            Statistics::SumDice(s) => s.total,
            Statistics::PiSimulation(s) => s.total,
        }
    }

    /// Standard error of the running statistic at the current count.
    pub fn standard_error(&self) -> f64 {
        match self {
            Statistics::CoinFlip(s) => s.standard_error,
            Statistics::DiceRoll(s) => s.standard_error,
            Statistics::SumDice(s) => s.standard_error,
            Statistics::PiSimulation(s) => s.standard_error,
        }
    }

    /// Running statistic per prefix.
    pub fn convergence(&self) -> &ConvergenceSeries {
        match self {
            Statistics::CoinFlip(s) => &s.convergence,
            Statistics::DiceRoll(s) => &s.convergence,
            Statistics::SumDice(s) => &s.convergence,
            Statistics::PiSimulation(s) => &s.convergence,
        }
    }

    /// Labelled histogram over the outcome domain.
    pub fn histogram(&self) -> Vec<CategoryCount> {
        match self {
            Statistics::CoinFlip(s) => vec![
                bar("heads", s.heads, s.total),
                bar("tails", s.tails, s.total),
            ],
            Statistics::DiceRoll(s) => (1..)
                .zip(s.counts.iter())
                .map(|(face, &count)| bar(face, count, s.total))
                .collect(),
            Statistics::SumDice(s) => (s.min_sum..=s.max_sum)
                .zip(s.counts.iter())
                .map(|(sum, &count)| bar(sum, count, s.total))
                .collect(),
            Statistics::PiSimulation(s) => vec![
                bar("inside", s.inside, s.total),
                bar("outside", s.outside, s.total),
            ],
        }
    }
}

fn bar(label: impl ToString, count: u64, total: u64) -> CategoryCount {
    CategoryCount {
        label: label.to_string(),
        count,
        percentage: percentage(count, total),
    }
}
