//! Sum of several dice, illustrating the Central Limit Theorem.
//!
//! With `N` dice the sum ranges over `[N, 6N]` with mean `3.5N` and
//! variance `35N/12`; its histogram approaches a normal curve as `N` grows.

use std::ops::RangeInclusive;

use super::dice_roll::{roll_die, DIE_MEAN, DIE_VARIANCE, FACES};
use super::{standard_error_of_mean, ProcessConfig};
use crate::rng::RandomSource;

/// Smallest allowed dice count.
pub const MIN_DICE: usize = 1;

/// Largest allowed dice count.
pub const MAX_DICE: usize = 20;

/// Dice count of the built-in process.
pub const DEFAULT_DICE: usize = 5;

/// Sum of `N` independent fair dice.
///
/// The dice count is always kept within `[MIN_DICE, MAX_DICE]`; out-of-range
/// requests are clamped, never rejected.
///
/// # Examples
///
/// ```rust
/// use sim_core::process::SumDice;
///
/// let mut dice = SumDice::new(3);
/// assert_eq!(dice.expected_value(), 10.5);
///
/// assert_eq!(dice.set_number_of_dice(0), 1);
/// assert_eq!(dice.set_number_of_dice(25), 20);
/// assert_eq!(dice.min_sum(), 20);
/// assert_eq!(dice.max_sum(), 120);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SumDice {
    config: ProcessConfig,
    number_of_dice: usize,
}

impl SumDice {
    /// Identifier of the built-in sum-of-dice process.
    pub const ID: &'static str = "sum-dice";

    /// Creates the process with `number_of_dice` dice (clamped).
    pub fn new(number_of_dice: usize) -> Self {
        Self {
            config: ProcessConfig::new(Self::ID, "Sum of Dice (Normal Distribution)")
                .with_description(
                    "Roll multiple dice and sum the results. Demonstrates how the \
                     Central Limit Theorem leads to a normal distribution.",
                ),
            number_of_dice: clamp_dice(number_of_dice),
        }
    }

    /// Replaces the descriptor, keeping the dice count.
    pub fn with_config(mut self, config: ProcessConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the descriptor.
    #[inline]
    pub fn config(&self) -> &ProcessConfig {
        &self.config
    }

    /// Returns the current dice count.
    #[inline]
    pub fn number_of_dice(&self) -> usize {
        self.number_of_dice
    }

    /// Sets the dice count, clamping to `[1, 20]`, and returns the effective value.
    ///
    /// A changed count changes the outcome domain, so trial history recorded
    /// under the previous count must be discarded by the caller.
    pub fn set_number_of_dice(&mut self, n: usize) -> usize {
        self.number_of_dice = clamp_dice(n);
        self.number_of_dice
    }

    /// Rolls every die once and returns the sum.
    pub fn run_trial(&self, source: &mut RandomSource) -> u32 {
        (0..self.number_of_dice).map(|_| roll_die(source)).sum()
    }

    /// Smallest possible sum, `N`.
    #[inline]
    pub fn min_sum(&self) -> u32 {
        self.number_of_dice as u32
    }

    /// Largest possible sum, `6N`.
    #[inline]
    pub fn max_sum(&self) -> u32 {
        self.number_of_dice as u32 * FACES
    }

    /// Outcome domain `N..=6N`.
    pub fn outcomes(&self) -> RangeInclusive<u32> {
        self.min_sum()..=self.max_sum()
    }

    /// Expected sum, `3.5N`.
    #[inline]
    pub fn expected_value(&self) -> f64 {
        DIE_MEAN * self.number_of_dice as f64
    }

    /// Variance of the sum, `35N/12`.
    #[inline]
    pub fn variance(&self) -> f64 {
        DIE_VARIANCE * self.number_of_dice as f64
    }

    /// Standard deviation of the sum.
    #[inline]
    pub fn standard_deviation(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Standard error of the running mean after `n` trials.
    pub fn standard_error(&self, n: u64) -> f64 {
        standard_error_of_mean(self.variance(), n)
    }

    /// Label for a trial, e.g. `Sum: 17`.
    pub fn format_result(&self, value: u32) -> String {
        format!("Sum: {}", value)
    }
}

impl Default for SumDice {
    fn default() -> Self {
        Self::new(DEFAULT_DICE)
    }
}

#[inline]
fn clamp_dice(n: usize) -> usize {
    n.clamp(MIN_DICE, MAX_DICE)
}
