//! Statistics over trial sequences.
//!
//! # Architecture
//!
//! ```text
//! Outcome ──► StatisticsAccumulator ──► Statistics (per-process snapshot)
//!               ├── CategoryCounts       histogram over the outcome domain
//!               ├── RunningMoments       running sum + Welford M2
//!               └── ConvergenceSeries    statistic and SE after each prefix
//! ```
//!
//! The accumulator is updated once per trial. [`Statistics::compute`]
//! replays a whole sequence through a fresh accumulator and yields exactly
//! the same snapshot, which is what sessions use to cross-check the
//! incremental path.

mod accumulator;
mod categorical;
mod convergence;
mod moments;
mod snapshot;

pub use accumulator::StatisticsAccumulator;
pub use categorical::{percentage, CategoryCount, CategoryCounts};
pub use convergence::{ConvergencePoint, ConvergenceSeries};
pub use moments::RunningMoments;
pub use snapshot::{CoinStats, DiceStats, PiStats, Statistics, SumDiceStats};
