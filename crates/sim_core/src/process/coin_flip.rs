//! Biased coin flip.

use std::fmt;

use super::{standard_error_of_mean, ProcessConfig};
use crate::error::{validate_probability, Result};
use crate::rng::RandomSource;

/// Default bias: a fair coin.
pub const FAIR_PROBABILITY: f64 = 0.5;

/// Face shown by a coin flip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CoinFace {
    /// Heads (drawn value below the bias).
    Heads,
    /// Tails.
    Tails,
}

impl CoinFace {
    /// Lower-case name, as used in trial logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            CoinFace::Heads => "heads",
            CoinFace::Tails => "tails",
        }
    }
}

impl fmt::Display for CoinFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coin flip with a configurable probability of heads.
///
/// # Examples
///
/// ```rust
/// use sim_core::process::{CoinFace, CoinFlip};
/// use sim_core::rng::RandomSource;
///
/// let coin = CoinFlip::with_probability(1.0).unwrap();
/// let mut source = RandomSource::lattice(Some(1));
/// assert_eq!(coin.run_trial(&mut source), CoinFace::Heads);
///
/// assert!(CoinFlip::with_probability(1.5).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CoinFlip {
    config: ProcessConfig,
    probability: f64,
}

impl CoinFlip {
    /// Identifier of the built-in coin flip.
    pub const ID: &'static str = "coin-flip";

    /// Creates a fair coin with the built-in descriptor.
    pub fn new() -> Self {
        Self {
            config: ProcessConfig::new(Self::ID, "Coin Flip")
                .with_description("Simulate flipping a fair coin"),
            probability: FAIR_PROBABILITY,
        }
    }

    /// Creates a coin with the given probability of heads.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::InvalidProbability` when `probability` is
    /// outside `[0, 1]`.
    pub fn with_probability(probability: f64) -> Result<Self> {
        let mut coin = Self::new();
        coin.set_probability(probability)?;
        Ok(coin)
    }

    /// Replaces the descriptor, keeping the bias.
    pub fn with_config(mut self, config: ProcessConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the descriptor.
    #[inline]
    pub fn config(&self) -> &ProcessConfig {
        &self.config
    }

    /// Returns the probability of heads.
    #[inline]
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Sets the probability of heads.
    ///
    /// The bias is left unchanged when the value is rejected.
    pub fn set_probability(&mut self, probability: f64) -> Result<()> {
        validate_probability(probability)?;
        self.probability = probability;
        Ok(())
    }

    /// Flips once: heads when the drawn value is below the bias.
    #[inline]
    pub fn run_trial(&self, source: &mut RandomSource) -> CoinFace {
        if source.next_uniform() < self.probability {
            CoinFace::Heads
        } else {
            CoinFace::Tails
        }
    }

    /// Outcome domain, in histogram order.
    pub fn outcomes(&self) -> [CoinFace; 2] {
        [CoinFace::Heads, CoinFace::Tails]
    }

    /// Expected proportion of heads.
    #[inline]
    pub fn expected_value(&self) -> f64 {
        self.probability
    }

    /// Standard error of the heads proportion after `n` flips.
    ///
    /// `sqrt(p(1-p)) / sqrt(n)`, which is `0.5 / sqrt(n)` for a fair coin.
    pub fn standard_error(&self, n: u64) -> f64 {
        standard_error_of_mean(self.probability * (1.0 - self.probability), n)
    }

    /// Short label for a flip: `H` or `T`.
    pub fn format_result(&self, face: CoinFace) -> String {
        match face {
            CoinFace::Heads => "H".to_string(),
            CoinFace::Tails => "T".to_string(),
        }
    }
}

impl Default for CoinFlip {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimulationError;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_default_is_fair() {
        let coin = CoinFlip::new();
        assert_eq!(coin.probability(), 0.5);
        assert_eq!(coin.config().id(), "coin-flip");
        assert_eq!(coin.expected_value(), 0.5);
    }

    #[test]
    fn test_rejects_out_of_range_probability() {
        assert_eq!(
            CoinFlip::with_probability(-0.1),
            Err(SimulationError::InvalidProbability(-0.1))
        );

        let mut coin = CoinFlip::with_probability(0.3).unwrap();
        assert!(coin.set_probability(2.0).is_err());
        assert_eq!(coin.probability(), 0.3);
    }

    #[test]
    fn test_extreme_biases_are_deterministic() {
        let mut source = RandomSource::lattice(Some(2024));
        let always = CoinFlip::with_probability(1.0).unwrap();
        let never = CoinFlip::with_probability(0.0).unwrap();

        for _ in 0..200 {
            assert_eq!(always.run_trial(&mut source), CoinFace::Heads);
            assert_eq!(never.run_trial(&mut source), CoinFace::Tails);
        }
    }

    #[test]
    fn test_seeded_thousand_flips() {
        // Lattice seed 42: 487 heads in the first 1000 fair flips
        let coin = CoinFlip::new();
        let mut source = RandomSource::lattice(Some(42));
        let heads = (0..1000)
            .filter(|_| coin.run_trial(&mut source) == CoinFace::Heads)
            .count();

        assert_eq!(heads, 487);
    }

    #[test]
    fn test_proportion_converges_with_platform_source() {
        let coin = CoinFlip::new();
        let mut source = RandomSource::platform();
        let heads = (0..1000)
            .filter(|_| coin.run_trial(&mut source) == CoinFace::Heads)
            .count();
        let proportion = heads as f64 / 1000.0;

        assert!(
            proportion > 0.4 && proportion < 0.6,
            "proportion {}",
            proportion
        );
    }

    #[test]
    fn test_standard_error() {
        let coin = CoinFlip::new();
        assert_abs_diff_eq!(coin.standard_error(100), 0.05, epsilon = 1e-12);
        assert_abs_diff_eq!(coin.standard_error(1), 0.5, epsilon = 1e-12);
        assert_eq!(coin.standard_error(0), 0.0);

        let biased = CoinFlip::with_probability(0.2).unwrap();
        assert_abs_diff_eq!(biased.standard_error(100), 0.04, epsilon = 1e-12);
    }

    #[test]
    fn test_format_result() {
        let coin = CoinFlip::new();
        assert_eq!(coin.format_result(CoinFace::Heads), "H");
        assert_eq!(coin.format_result(CoinFace::Tails), "T");
        assert_eq!(CoinFace::Tails.to_string(), "tails");
    }
}
