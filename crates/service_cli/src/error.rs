//! Error types for the CLI.

use sim_core::SimulationError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Rejected simulation request
    #[error("Simulation error: {0}")]
    Simulation(#[from] SimulationError),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Output serialisation error
    #[error("Serialisation error: {0}")]
    Serialisation(#[from] serde_json::Error),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_error_converts() {
        let err: CliError = SimulationError::InvalidTrialCount(0).into();
        assert!(matches!(err, CliError::Simulation(_)));
        assert!(err.to_string().contains("Invalid trial count 0"));
    }
}
