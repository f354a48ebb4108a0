//! Stochastic processes that produce one outcome per trial.
//!
//! # Architecture
//!
//! ```text
//! Process (closed enum, static dispatch)
//! ├── CoinFlip      → CoinFace        (biased by p, default 0.5)
//! ├── DiceRoll      → u32 in 1..=6
//! ├── SumDice       → u32 in N..=6N   (N clamped to [1, 20])
//! └── PiSimulation  → PiPoint {x, y, inside}
//! ```
//!
//! Each variant carries its own parameters and [`ProcessConfig`]; the
//! enum wraps every concrete outcome into an [`Outcome`] so that trials of
//! any process can share one log.
//!
//! # Examples
//!
//! ```rust
//! use sim_core::process::{Outcome, Process, ProcessKind};
//! use sim_core::rng::RandomSource;
//!
//! let process = Process::from_kind(ProcessKind::DiceRoll);
//! let mut source = RandomSource::lattice(Some(42));
//!
//! match process.run_trial(&mut source) {
//!     Outcome::Integer(face) => assert!((1..=6).contains(&face)),
//!     other => panic!("unexpected outcome {:?}", other),
//! }
//! ```

pub mod coin_flip;
pub mod dice_roll;
pub mod pi_simulation;
pub mod sum_dice;

use std::fmt;
use std::str::FromStr;

use crate::error::SimulationError;
use crate::rng::RandomSource;

pub use coin_flip::{CoinFace, CoinFlip, FAIR_PROBABILITY};
pub use dice_roll::{roll_die, DiceRoll, DIE_MEAN, DIE_VARIANCE, FACES};
pub use pi_simulation::{estimate_pi, PiPoint, PiSimulation, INSIDE_PROBABILITY};
pub use sum_dice::{SumDice, DEFAULT_DICE, MAX_DICE, MIN_DICE};

/// Standard error of a running mean: `sqrt(variance / n)`, or 0 for `n = 0`.
#[inline]
pub fn standard_error_of_mean(variance: f64, n: u64) -> f64 {
    if n == 0 {
        return 0.0;
    }
    (variance / n as f64).sqrt()
}

/// Immutable descriptor of a process.
///
/// # Examples
///
/// ```rust
/// use sim_core::process::ProcessConfig;
///
/// let config = ProcessConfig::new("loaded-coin", "Loaded Coin")
///     .with_description("Heads 70% of the time");
/// assert_eq!(config.id(), "loaded-coin");
/// assert_eq!(config.icon(), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProcessConfig {
    id: String,
    name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    description: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    icon: Option<String>,
}

impl ProcessConfig {
    /// Creates a descriptor with an id and display name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            icon: None,
        }
    }

    /// Adds a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds an icon.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Unique registry key.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optional description.
    #[inline]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Optional icon.
    #[inline]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }
}

/// Tag of a process variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ProcessKind {
    /// Biased coin.
    CoinFlip,
    /// Single die.
    DiceRoll,
    /// Sum of N dice.
    SumDice,
    /// Monte Carlo π.
    PiSimulation,
}

impl ProcessKind {
    /// All kinds, in built-in registration order.
    pub const ALL: [ProcessKind; 4] = [
        ProcessKind::CoinFlip,
        ProcessKind::DiceRoll,
        ProcessKind::SumDice,
        ProcessKind::PiSimulation,
    ];

    /// Id of the built-in process of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessKind::CoinFlip => CoinFlip::ID,
            ProcessKind::DiceRoll => DiceRoll::ID,
            ProcessKind::SumDice => SumDice::ID,
            ProcessKind::PiSimulation => PiSimulation::ID,
        }
    }
}

impl FromStr for ProcessKind {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "coin-flip" | "coin" => Ok(ProcessKind::CoinFlip),
            "dice-roll" | "dice" | "die" => Ok(ProcessKind::DiceRoll),
            "sum-dice" | "sum" => Ok(ProcessKind::SumDice),
            "pi-simulation" | "pi" => Ok(ProcessKind::PiSimulation),
            _ => Err(SimulationError::UnknownProcessKind(s.to_string())),
        }
    }
}

impl fmt::Display for ProcessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one trial of any process.
///
/// Serialises untagged, so a log entry's `result` is `"heads"`, a bare
/// integer or an `{x, y, inside}` object.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Outcome {
    /// Coin face.
    Coin(CoinFace),
    /// Die face or dice sum.
    Integer(u32),
    /// Sampled point of the π simulation.
    Point(PiPoint),
}

impl From<CoinFace> for Outcome {
    fn from(face: CoinFace) -> Self {
        Outcome::Coin(face)
    }
}

impl From<u32> for Outcome {
    fn from(value: u32) -> Self {
        Outcome::Integer(value)
    }
}

impl From<PiPoint> for Outcome {
    fn from(point: PiPoint) -> Self {
        Outcome::Point(point)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Coin(face) => write!(f, "{}", face),
            Outcome::Integer(value) => write!(f, "{}", value),
            Outcome::Point(point) => write!(f, "{}", point),
        }
    }
}

/// A registered stochastic experiment.
#[derive(Clone, Debug, PartialEq)]
pub enum Process {
    /// Biased coin flip.
    CoinFlip(CoinFlip),
    /// Single die roll.
    DiceRoll(DiceRoll),
    /// Sum of N dice.
    SumDice(SumDice),
    /// Monte Carlo π estimation.
    PiSimulation(PiSimulation),
}

impl Process {
    /// Built-in process of the given kind, with default parameters.
    pub fn from_kind(kind: ProcessKind) -> Self {
        match kind {
            ProcessKind::CoinFlip => Process::CoinFlip(CoinFlip::new()),
            ProcessKind::DiceRoll => Process::DiceRoll(DiceRoll::new()),
            ProcessKind::SumDice => Process::SumDice(SumDice::default()),
            ProcessKind::PiSimulation => Process::PiSimulation(PiSimulation::new()),
        }
    }

    /// Returns the variant tag.
    pub fn kind(&self) -> ProcessKind {
        match self {
            Process::CoinFlip(_) => ProcessKind::CoinFlip,
            Process::DiceRoll(_) => ProcessKind::DiceRoll,
            Process::SumDice(_) => ProcessKind::SumDice,
            Process::PiSimulation(_) => ProcessKind::PiSimulation,
        }
    }

    /// Returns the descriptor.
    pub fn config(&self) -> &ProcessConfig {
        match self {
            Process::CoinFlip(p) => p.config(),
            Process::DiceRoll(p) => p.config(),
            Process::SumDice(p) => p.config(),
            Process::PiSimulation(p) => p.config(),
        }
    }

    /// Shorthand for `config().id()`.
    #[inline]
    pub fn id(&self) -> &str {
        self.config().id()
    }

    /// Runs one trial against the source.
    pub fn run_trial(&self, source: &mut RandomSource) -> Outcome {
        match self {
            Process::CoinFlip(p) => Outcome::Coin(p.run_trial(source)),
            Process::DiceRoll(p) => Outcome::Integer(p.run_trial(source)),
            Process::SumDice(p) => Outcome::Integer(p.run_trial(source)),
            Process::PiSimulation(p) => Outcome::Point(p.run_trial(source)),
        }
    }

    /// Theoretical value the running statistic converges to.
    pub fn expected_value(&self) -> f64 {
        match self {
            Process::CoinFlip(p) => p.expected_value(),
            Process::DiceRoll(p) => p.expected_value(),
            Process::SumDice(p) => p.expected_value(),
            Process::PiSimulation(p) => p.expected_value(),
        }
    }

    /// Standard error of the running statistic after `n` trials.
    pub fn standard_error(&self, n: u64) -> f64 {
        match self {
            Process::CoinFlip(p) => p.standard_error(n),
            Process::DiceRoll(p) => p.standard_error(n),
            Process::SumDice(p) => p.standard_error(n),
            Process::PiSimulation(p) => p.standard_error(n),
        }
    }

    /// Histogram labels of the outcome domain.
    pub fn category_labels(&self) -> Vec<String> {
        match self {
            Process::CoinFlip(p) => p.outcomes().iter().map(|f| f.to_string()).collect(),
            Process::DiceRoll(p) => p.outcomes().map(|v| v.to_string()).collect(),
            Process::SumDice(p) => p.outcomes().map(|v| v.to_string()).collect(),
            Process::PiSimulation(_) => vec!["inside".to_string(), "outside".to_string()],
        }
    }

    /// Histogram bucket of an outcome, or `None` when it is outside the
    /// current domain (wrong shape, or a sum recorded under another dice count).
    pub fn category_index(&self, outcome: &Outcome) -> Option<usize> {
        match (self, outcome) {
            (Process::CoinFlip(_), Outcome::Coin(CoinFace::Heads)) => Some(0),
            (Process::CoinFlip(_), Outcome::Coin(CoinFace::Tails)) => Some(1),
            (Process::DiceRoll(p), Outcome::Integer(v)) if p.outcomes().contains(v) => {
                Some((*v - 1) as usize)
            }
            (Process::SumDice(p), Outcome::Integer(v)) if p.outcomes().contains(v) => {
                Some((*v - p.min_sum()) as usize)
            }
            (Process::PiSimulation(_), Outcome::Point(point)) => {
                Some(if point.inside { 0 } else { 1 })
            }
            _ => None,
        }
    }

    /// Display label of an outcome using the variant's own formatting.
    pub fn format_result(&self, outcome: &Outcome) -> String {
        match (self, outcome) {
            (Process::CoinFlip(p), Outcome::Coin(face)) => p.format_result(*face),
            (Process::DiceRoll(p), Outcome::Integer(v)) => p.format_result(*v),
            (Process::SumDice(p), Outcome::Integer(v)) => p.format_result(*v),
            (Process::PiSimulation(p), Outcome::Point(point)) => p.format_result(point),
            (_, other) => other.to_string(),
        }
    }

    /// Returns the coin when this is a coin flip.
    pub fn as_coin_flip_mut(&mut self) -> Option<&mut CoinFlip> {
        match self {
            Process::CoinFlip(p) => Some(p),
            _ => None,
        }
    }

    /// Returns the dice sum when this is a sum-of-dice process.
    pub fn as_sum_dice_mut(&mut self) -> Option<&mut SumDice> {
        match self {
            Process::SumDice(p) => Some(p),
            _ => None,
        }
    }
}

impl From<CoinFlip> for Process {
    fn from(p: CoinFlip) -> Self {
        Process::CoinFlip(p)
    }
}

impl From<DiceRoll> for Process {
    fn from(p: DiceRoll) -> Self {
        Process::DiceRoll(p)
    }
}

impl From<SumDice> for Process {
    fn from(p: SumDice) -> Self {
        Process::SumDice(p)
    }
}

impl From<PiSimulation> for Process {
    fn from(p: PiSimulation) -> Self {
        Process::PiSimulation(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in ProcessKind::ALL {
            let process = Process::from_kind(kind);
            assert_eq!(process.kind(), kind);
            assert_eq!(process.id(), kind.as_str());
            assert_eq!(kind.as_str().parse::<ProcessKind>().unwrap(), kind);
        }
        assert_eq!(
            "PI".parse::<ProcessKind>().unwrap(),
            ProcessKind::PiSimulation
        );
        assert_eq!(
            "sum_dice".parse::<ProcessKind>().unwrap(),
            ProcessKind::SumDice
        );
        assert!("roulette".parse::<ProcessKind>().is_err());
    }

    #[test]
    fn test_run_trial_matches_variant_shape() {
        let mut source = RandomSource::lattice(Some(17));
        for kind in ProcessKind::ALL {
            let process = Process::from_kind(kind);
            let outcome = process.run_trial(&mut source);
            assert!(
                process.category_index(&outcome).is_some(),
                "{:?} produced out-of-domain {:?}",
                kind,
                outcome
            );
        }
    }

    #[test]
    fn test_category_index_rejects_foreign_outcomes() {
        let dice = Process::from_kind(ProcessKind::DiceRoll);
        assert_eq!(dice.category_index(&Outcome::Integer(7)), None);
        assert_eq!(dice.category_index(&Outcome::Integer(0)), None);
        assert_eq!(dice.category_index(&Outcome::Coin(CoinFace::Heads)), None);
        assert_eq!(dice.category_index(&Outcome::Integer(6)), Some(5));

        let sum = Process::from(SumDice::new(2));
        assert_eq!(sum.category_index(&Outcome::Integer(2)), Some(0));
        assert_eq!(sum.category_index(&Outcome::Integer(12)), Some(10));
        assert_eq!(sum.category_index(&Outcome::Integer(13)), None);
    }

    #[test]
    fn test_category_labels() {
        let coin = Process::from_kind(ProcessKind::CoinFlip);
        assert_eq!(coin.category_labels(), vec!["heads", "tails"]);

        let sum = Process::from(SumDice::new(2));
        assert_eq!(sum.category_labels().len(), 11);
        assert_eq!(sum.category_labels()[0], "2");
    }

    #[test]
    fn test_format_result_dispatch() {
        let coin = Process::from_kind(ProcessKind::CoinFlip);
        assert_eq!(coin.format_result(&CoinFace::Heads.into()), "H");

        let sum = Process::from_kind(ProcessKind::SumDice);
        assert_eq!(sum.format_result(&Outcome::Integer(12)), "Sum: 12");

        // Foreign outcomes fall back to their plain rendering
        assert_eq!(coin.format_result(&Outcome::Integer(3)), "3");
    }

    #[test]
    fn test_standard_error_of_mean() {
        assert_eq!(standard_error_of_mean(4.0, 0), 0.0);
        assert_eq!(standard_error_of_mean(4.0, 4), 1.0);
    }
}
