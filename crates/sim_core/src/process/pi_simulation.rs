//! Monte Carlo estimation of π.
//!
//! Points are drawn uniformly in the unit square. The quarter circle of
//! radius 1 centred at the origin covers `π/4` of the square, so
//! `π ≈ 4 · inside / total`.

use std::f64::consts::PI;
use std::fmt;

use super::{standard_error_of_mean, ProcessConfig};
use crate::rng::RandomSource;

/// Probability that a uniform point lands inside the quarter circle.
pub const INSIDE_PROBABILITY: f64 = PI / 4.0;

/// One sampled point.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PiPoint {
    /// Horizontal coordinate in `[0, 1)`.
    pub x: f64,
    /// Vertical coordinate in `[0, 1)`.
    pub y: f64,
    /// Whether `x² + y² ≤ 1`.
    pub inside: bool,
}

impl PiPoint {
    /// Builds a point and classifies it against the unit circle.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            inside: x * x + y * y <= 1.0,
        }
    }
}

impl fmt::Display for PiPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = if self.inside { "in" } else { "out" };
        write!(f, "({:.3}, {:.3}) {}", self.x, self.y, side)
    }
}

/// Estimates π from sampled points: `0` for no points, else `4 · inside / total`.
///
/// # Examples
///
/// ```rust
/// use sim_core::process::{estimate_pi, PiPoint};
///
/// assert_eq!(estimate_pi(&[]), 0.0);
///
/// let half = [PiPoint::new(0.1, 0.1), PiPoint::new(0.9, 0.9)];
/// assert_eq!(estimate_pi(&half), 2.0);
/// ```
pub fn estimate_pi(results: &[PiPoint]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let inside = results.iter().filter(|p| p.inside).count();
    4.0 * (inside as f64 / results.len() as f64)
}

/// Point-in-quarter-circle process.
#[derive(Clone, Debug, PartialEq)]
pub struct PiSimulation {
    config: ProcessConfig,
}

impl PiSimulation {
    /// Identifier of the built-in π simulation.
    pub const ID: &'static str = "pi-simulation";

    /// Creates the process with the built-in descriptor.
    pub fn new() -> Self {
        Self {
            config: ProcessConfig::new(Self::ID, "π Simulation")
                .with_description("Monte Carlo method to estimate π using random points")
                .with_icon("🎯"),
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

    /// Draws `x` then `y` independently and classifies the point.
    #[inline]
    pub fn run_trial(&self, source: &mut RandomSource) -> PiPoint {
        let x = source.next_uniform();
        let y = source.next_uniform();
        PiPoint::new(x, y)
    }

    /// The quantity being estimated.
    #[inline]
    pub fn expected_value(&self) -> f64 {
        PI
    }

    /// Standard error of the π estimate after `n` points.
    ///
    /// Binomial standard error of the inside proportion at its theoretical
    /// value `π/4`, scaled by 4.
    pub fn standard_error(&self, n: u64) -> f64 {
        4.0 * standard_error_of_mean(INSIDE_PROBABILITY * (1.0 - INSIDE_PROBABILITY), n)
    }

    /// Label for a point.
    pub fn format_result(&self, point: &PiPoint) -> String {
        point.to_string()
    }
}

impl Default for PiSimulation {
    fn default() -> Self {
        Self::new()
    }
}
