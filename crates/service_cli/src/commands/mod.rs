//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Shared here: the
//! simulation flags and their merge with the resolved configuration.

pub mod batch;
pub mod check;
pub mod list;
pub mod run;

use clap::Args;
use sim_core::error::{validate_probability, validate_trial_count};
use sim_core::{GeneratorKind, ProcessKind, ProcessRegistry};

use crate::config::{CliConfig, OutputFormat};
use crate::{CliError, Result};

/// Flags shared by `run` and `batch`
#[derive(Args, Debug, Clone)]
pub struct SimulationArgs {
    /// Process id or alias (coin, dice, sum, pi)
    #[arg(short, long)]
    pub process: Option<String>,

    /// Number of trials, 1 to 10000
    #[arg(short = 'n', long, default_value = "1000")]
    pub count: usize,

    /// Coin bias in [0, 1]
    #[arg(long)]
    pub probability: Option<f64>,

    /// Dice per trial for sum-dice (clamped to [1, 20])
    #[arg(short, long)]
    pub dice: Option<usize>,

    /// Random source (platform, lattice)
    #[arg(short, long)]
    pub generator: Option<GeneratorKind>,

    /// Seed for the lattice generator
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Output format
    #[arg(short, long)]
    pub format: Option<OutputFormat>,
}

/// Flags of `list`
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long)]
    pub format: Option<OutputFormat>,
}

/// Flags of `run`
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub simulation: SimulationArgs,

    /// Number of convergence rows to print
    #[arg(short = 'k', long)]
    pub checkpoints: Option<usize>,
}

/// Simulation parameters after merging flags over configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Process id or alias, not yet resolved against the registry
    pub process: String,
    /// Trials to run, already checked against the request limit
    pub count: usize,
    /// Coin bias, already checked to lie in [0, 1]
    pub probability: f64,
    /// Dice per sum-dice trial, clamped by the process itself
    pub number_of_dice: usize,
    /// Random source backing the run
    pub generator: GeneratorKind,
    /// Lattice seed; `None` seeds from the wall clock
    pub seed: Option<u64>,
    /// Output format of the command
    pub format: OutputFormat,
}

impl Settings {
    /// Merge flags over configuration and reject invalid request parameters.
    pub fn resolve(config: &CliConfig, args: &SimulationArgs) -> Result<Self> {
        let settings = Self {
            process: args
                .process
                .clone()
                .unwrap_or_else(|| config.default_process.clone()),
            count: args.count,
            probability: args.probability.unwrap_or(config.probability),
            number_of_dice: args.dice.unwrap_or(config.number_of_dice),
            generator: args.generator.unwrap_or(config.generator),
            seed: args.seed.or(config.seed),
            format: args.format.unwrap_or(config.format),
        };

        validate_trial_count(settings.count)?;
        validate_probability(settings.probability)?;
        Ok(settings)
    }
}

/// Map a user-supplied name to a registered process id.
///
/// Registered ids match exactly; otherwise built-in aliases such as `pi`
/// or `dice` are tried.
pub fn resolve_process_id(registry: &ProcessRegistry, name: &str) -> Result<String> {
    if registry.contains(name) {
        return Ok(name.to_string());
    }
    name.parse::<ProcessKind>()
        .ok()
        .map(|kind| kind.as_str())
        .filter(|id| registry.contains(id))
        .map(str::to_string)
        .ok_or_else(|| {
            let known: Vec<&str> = registry.list_configs().iter().map(|c| c.id()).collect();
            CliError::InvalidArgument(format!(
                "Unknown process '{}'. Registered: {}",
                name,
                known.join(", ")
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> SimulationArgs {
        SimulationArgs {
            process: None,
            count: 100,
            probability: None,
            dice: None,
            generator: None,
            seed: None,
            format: None,
        }
    }

    #[test]
    fn test_flags_override_config() {
        let config = CliConfig {
            seed: Some(1),
            generator: GeneratorKind::Lattice,
            ..CliConfig::default()
        };
        let settings = Settings::resolve(
            &config,
            &SimulationArgs {
                process: Some("pi".to_string()),
                seed: Some(9),
                ..args()
            },
        )
        .unwrap();

        assert_eq!(settings.process, "pi");
        assert_eq!(settings.seed, Some(9));
        assert_eq!(settings.generator, GeneratorKind::Lattice);
        assert_eq!(settings.number_of_dice, 5);
    }

    #[test]
    fn test_invalid_request_is_rejected() {
        let config = CliConfig::default();
        let zero = SimulationArgs { count: 0, ..args() };
        assert!(matches!(
            Settings::resolve(&config, &zero),
            Err(CliError::Simulation(_))
        ));

        let biased = SimulationArgs {
            probability: Some(-1.0),
            ..args()
        };
        assert!(Settings::resolve(&config, &biased).is_err());
    }

    #[test]
    fn test_resolve_process_aliases() {
        let registry = ProcessRegistry::with_builtin_processes();
        assert_eq!(
            resolve_process_id(&registry, "dice-roll").unwrap(),
            "dice-roll"
        );
        assert_eq!(
            resolve_process_id(&registry, "pi").unwrap(),
            "pi-simulation"
        );
        assert_eq!(resolve_process_id(&registry, "SUM").unwrap(), "sum-dice");
        assert!(matches!(
            resolve_process_id(&registry, "roulette"),
            Err(CliError::InvalidArgument(msg)) if msg.contains("coin-flip")
        ));
    }
}
