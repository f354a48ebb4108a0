//! Error types for the simulation engine.
//!
//! Only request-level parameters are rejected. Out-of-range configuration
//! (such as the dice count) is clamped by the process itself, and unknown
//! process ids surface as `None` from lookups rather than as errors.

use thiserror::Error;

/// Maximum number of trials a single request may run.
pub const MAX_TRIALS_PER_REQUEST: usize = 10_000;

/// Errors raised when a simulation request is rejected.
///
/// Every variant is raised before any trial executes, so a rejected request
/// never leaves partial state behind.
///
/// # Examples
///
/// ```rust
/// use sim_core::error::SimulationError;
///
/// let err = SimulationError::InvalidTrialCount(0);
/// assert_eq!(
///     err.to_string(),
///     "Invalid trial count 0: must be in range [1, 10000]"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Trial count outside `[1, MAX_TRIALS_PER_REQUEST]`.
    #[error("Invalid trial count {0}: must be in range [1, 10000]")]
    InvalidTrialCount(usize),

    /// Coin bias outside `[0, 1]` (or NaN).
    #[error("Invalid probability {0}: must be in range [0, 1]")]
    InvalidProbability(f64),

    /// Generator name that does not map to a known random source.
    #[error("Unknown generator '{0}'. Supported: platform, lattice")]
    UnknownGenerator(String),

    /// Process kind name that does not map to a built-in variant.
    #[error("Unknown process kind '{0}'. Supported: coin-flip, dice-roll, sum-dice, pi-simulation")]
    UnknownProcessKind(String),
}

/// Result alias for simulation operations.
pub type Result<T> = std::result::Result<T, SimulationError>;

/// Checks a requested trial count against `[1, MAX_TRIALS_PER_REQUEST]`.
pub fn validate_trial_count(count: usize) -> Result<()> {
    if count == 0 || count > MAX_TRIALS_PER_REQUEST {
        return Err(SimulationError::InvalidTrialCount(count));
    }
    Ok(())
}

/// Checks a coin bias against `[0, 1]`.
pub fn validate_probability(probability: f64) -> Result<()> {
    // NaN fails both comparisons, so test for containment instead of exclusion
    if !(0.0..=1.0).contains(&probability) {
        return Err(SimulationError::InvalidProbability(probability));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trial_count_bounds() {
        assert!(validate_trial_count(1).is_ok());
        assert!(validate_trial_count(MAX_TRIALS_PER_REQUEST).is_ok());
        assert_eq!(
            validate_trial_count(0),
            Err(SimulationError::InvalidTrialCount(0))
        );
        assert_eq!(
            validate_trial_count(10_001),
            Err(SimulationError::InvalidTrialCount(10_001))
        );
    }

    #[test]
    fn test_probability_bounds() {
        assert!(validate_probability(0.0).is_ok());
        assert!(validate_probability(1.0).is_ok());
        assert!(validate_probability(0.37).is_ok());
        assert!(validate_probability(-0.01).is_err());
        assert!(validate_probability(1.01).is_err());
        assert!(validate_probability(f64::NAN).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = SimulationError::InvalidProbability(1.5);
        assert!(err.to_string().contains("Invalid probability 1.5"));

        let err = SimulationError::UnknownGenerator("mersenne".to_string());
        assert!(err.to_string().contains("mersenne"));
    }
}
