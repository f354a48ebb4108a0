//! Single fair six-sided die.

use std::ops::RangeInclusive;

use super::{standard_error_of_mean, ProcessConfig};
use crate::rng::RandomSource;

/// Number of faces on a die.
pub const FACES: u32 = 6;

/// Expected value of one die.
pub const DIE_MEAN: f64 = 3.5;

/// Variance of one die: `(6^2 - 1) / 12`.
pub const DIE_VARIANCE: f64 = 35.0 / 12.0;

/// Draws one face in `1..=6` from the source.
#[inline]
pub fn roll_die(source: &mut RandomSource) -> u32 {
    // next_uniform() < 1, so the floor never reaches FACES
    (source.next_uniform() * FACES as f64).floor() as u32 + 1
}

/// Roll of a single fair die.
#[derive(Clone, Debug, PartialEq)]
pub struct DiceRoll {
    config: ProcessConfig,
}

impl DiceRoll {
    /// Identifier of the built-in die roll.
    pub const ID: &'static str = "dice-roll";

    /// Creates a die with the built-in descriptor.
    pub fn new() -> Self {
        Self {
            config: ProcessConfig::new(Self::ID, "Dice Roll")
                .with_description("Simulate rolling a fair six-sided dice"),
        }
    }

    /// Replaces the descriptor.
    pub fn with_config(mut self, config: ProcessConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the descriptor.
    #[inline]
    pub fn config(&self) -> &ProcessConfig {
        &self.config
    }

    /// Rolls once.
    #[inline]
    pub fn run_trial(&self, source: &mut RandomSource) -> u32 {
        roll_die(source)
    }

    /// Outcome domain `1..=6`.
    pub fn outcomes(&self) -> RangeInclusive<u32> {
        1..=FACES
    }

    /// Expected face value.
    #[inline]
    pub fn expected_value(&self) -> f64 {
        DIE_MEAN
    }

    /// Standard error of the running mean after `n` rolls.
    pub fn standard_error(&self, n: u64) -> f64 {
        standard_error_of_mean(DIE_VARIANCE, n)
    }

    /// Label for a roll, e.g. `⚀3`.
    pub fn format_result(&self, value: u32) -> String {
        format!("⚀{}", value)
    }
}

impl Default for DiceRoll {
    fn default() -> Self {
        Self::new()
    }
}
