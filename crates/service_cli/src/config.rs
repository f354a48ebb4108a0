//! CLI configuration management
//!
//! Values are resolved in increasing precedence: built-in defaults, the
//! TOML file, `CONVERGENCE_*` environment variables, command-line flags.

use serde::{Deserialize, Serialize};
use sim_core::process::{CoinFlip, DEFAULT_DICE, FAIR_PROBABILITY};
use sim_core::GeneratorKind;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Default configuration file, skipped silently when absent.
pub const DEFAULT_CONFIG_FILE: &str = "convergence.toml";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Cannot read {path}: {message}")]
    Io {
        /// File path
        path: String,
        /// Underlying error
        message: String,
    },

    /// Config file is not valid TOML for this schema
    #[error("Parse error: {0}")]
    Parse(String),

    /// Environment variable holds an unusable value
    #[error("Environment variable {name}: {message}")]
    Env {
        /// Variable name
        name: &'static str,
        /// What was wrong
        message: String,
    },

    /// Resolved values failed validation
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable tables
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "unknown format '{}', expected table or json",
                other
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Resolved CLI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,
    /// Random source
    #[serde(deserialize_with = "deserialize_generator")]
    pub generator: GeneratorKind,
    /// Seed for the lattice generator; time-based when absent
    pub seed: Option<u64>,
    /// Process used when `--process` is omitted
    pub default_process: String,
    /// Dice per trial for sum-dice (clamped by the engine)
    pub number_of_dice: usize,
    /// Coin bias
    pub probability: f64,
    /// Convergence rows printed by `run`
    pub checkpoints: usize,
    /// Output format
    pub format: OutputFormat,
}

fn deserialize_generator<'de, D>(deserializer: D) -> Result<GeneratorKind, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    GeneratorKind::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            generator: GeneratorKind::Platform,
            seed: None,
            default_process: CoinFlip::ID.to_string(),
            number_of_dice: DEFAULT_DICE,
            probability: FAIR_PROBABILITY,
            checkpoints: 10,
            format: OutputFormat::Table,
        }
    }
}

impl CliConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a file.
    ///
    /// With no explicit path the default file is read when it exists and
    /// defaults are used otherwise; an explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, explicit) = match path {
            Some(path) => (path, true),
            None => (Path::new(DEFAULT_CONFIG_FILE), false),
        };
        if !explicit && !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Apply `CONVERGENCE_*` environment variable overrides
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("CONVERGENCE_LOG_LEVEL") {
            self.log_level = level;
        }
        if let Some(generator) = lookup("CONVERGENCE_GENERATOR") {
            self.generator = parse_env("CONVERGENCE_GENERATOR", &generator)?;
        }
        if let Some(seed) = lookup("CONVERGENCE_SEED") {
            self.seed = Some(parse_env("CONVERGENCE_SEED", &seed)?);
        }
        if let Some(process) = lookup("CONVERGENCE_PROCESS") {
            self.default_process = process;
        }
        if let Some(dice) = lookup("CONVERGENCE_DICE") {
            self.number_of_dice = parse_env("CONVERGENCE_DICE", &dice)?;
        }
        if let Some(probability) = lookup("CONVERGENCE_PROBABILITY") {
            self.probability = parse_env("CONVERGENCE_PROBABILITY", &probability)?;
        }
        if let Some(format) = lookup("CONVERGENCE_FORMAT") {
            self.format = parse_env("CONVERGENCE_FORMAT", &format)?;
        }
        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, LOG_LEVELS
            ));
        }

        if !(0.0..=1.0).contains(&self.probability) {
            errors.push(format!(
                "Invalid probability {}. Must be in range [0, 1]",
                self.probability
            ));
        }

        if self.checkpoints == 0 {
            errors.push("checkpoints must be greater than 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

fn parse_env<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Env {
        name,
        message: format!("'{}': {}", value, e),
    })
}
