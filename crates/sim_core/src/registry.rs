//! Registry mapping process ids to process instances.
//!
//! The registry is an ordinary owned value, built once and handed to
//! whatever needs lookups (usually a [`Session`](crate::session::Session)).
//! Registration order is preserved for display.

use crate::process::{
    CoinFlip, DiceRoll, PiSimulation, Process, ProcessConfig, SumDice, DEFAULT_DICE,
};

/// Ordered map from process id to [`Process`].
///
/// # Examples
///
/// ```rust
/// use sim_core::process::{CoinFlip, ProcessConfig};
/// use sim_core::registry::ProcessRegistry;
///
/// let mut registry = ProcessRegistry::with_builtin_processes();
/// assert!(registry.get("roulette").is_none());
///
/// let loaded = CoinFlip::with_probability(0.7)
///     .unwrap()
///     .with_config(ProcessConfig::new("loaded-coin", "Loaded Coin"));
/// registry.register(loaded);
/// assert_eq!(registry.list_configs().last().unwrap().id(), "loaded-coin");
/// ```
#[derive(Clone, Debug, Default)]
pub struct ProcessRegistry {
    processes: Vec<Process>,
}

impl ProcessRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the four built-in processes:
    /// `coin-flip`, `dice-roll`, `sum-dice` (5 dice) and `pi-simulation`.
    pub fn with_builtin_processes() -> Self {
        let mut registry = Self::new();
        registry.register(CoinFlip::new());
        registry.register(DiceRoll::new());
        registry.register(SumDice::new(DEFAULT_DICE));
        registry.register(PiSimulation::new());
        registry
    }

    /// Inserts a process under its config id.
    ///
    /// An existing entry with the same id is replaced in place, keeping its
    /// original position; the replaced process is returned.
    pub fn register(&mut self, process: impl Into<Process>) -> Option<Process> {
        let process = process.into();
        match self.position(process.id()) {
            Some(index) => Some(std::mem::replace(&mut self.processes[index], process)),
            None => {
                self.processes.push(process);
                None
            }
        }
    }

    /// Looks up a process by id.
    pub fn get(&self, id: &str) -> Option<&Process> {
        self.processes.iter().find(|p| p.id() == id)
    }

    /// Looks up a process by id for reconfiguration.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Process> {
        self.processes.iter_mut().find(|p| p.id() == id)
    }

    /// Returns whether a process with this id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Descriptors of every registered process, in registration order.
    pub fn list_configs(&self) -> Vec<&ProcessConfig> {
        self.processes.iter().map(Process::config).collect()
    }

    /// Iterates over the registered processes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Process> {
        self.processes.iter()
    }

    /// Number of registered processes.
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Returns whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.processes.iter().position(|p| p.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ProcessKind;

    #[test]
    fn test_builtin_order() {
        let registry = ProcessRegistry::with_builtin_processes();
        let ids: Vec<&str> = registry.list_configs().iter().map(|c| c.id()).collect();
        assert_eq!(
            ids,
            vec!["coin-flip", "dice-roll", "sum-dice", "pi-simulation"]
        );
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_missing_id_is_absent() {
        let registry = ProcessRegistry::with_builtin_processes();
        assert!(registry.get("unknown").is_none());
        assert!(!registry.contains("unknown"));
        assert!(ProcessRegistry::new().is_empty());
    }

    #[test]
    fn test_register_overwrites_in_place() {
        let mut registry = ProcessRegistry::with_builtin_processes();

        let replaced = registry.register(SumDice::new(12));
        assert_eq!(replaced.map(|p| p.kind()), Some(ProcessKind::SumDice));
        assert_eq!(registry.len(), 4);

        match registry.get("sum-dice") {
            Some(Process::SumDice(dice)) => assert_eq!(dice.number_of_dice(), 12),
            other => panic!("expected sum-dice, got {:?}", other),
        }

        // Position is unchanged by overwriting
        assert_eq!(registry.list_configs()[2].id(), "sum-dice");
    }

    #[test]
    fn test_overwrite_may_change_variant() {
        let mut registry = ProcessRegistry::new();
        registry.register(CoinFlip::new());
        registry.register(
            DiceRoll::new().with_config(ProcessConfig::new("coin-flip", "Not a coin")),
        );

        let process = registry.get("coin-flip").unwrap();
        assert_eq!(process.kind(), ProcessKind::DiceRoll);
        assert_eq!(process.config().name(), "Not a coin");
    }

    #[test]
    fn test_get_mut_reconfigures() {
        let mut registry = ProcessRegistry::with_builtin_processes();
        if let Some(dice) = registry
            .get_mut("sum-dice")
            .and_then(Process::as_sum_dice_mut)
        {
            dice.set_number_of_dice(30);
        }

        match registry.get("sum-dice") {
            Some(Process::SumDice(dice)) => assert_eq!(dice.number_of_dice(), 20),
            other => panic!("expected sum-dice, got {:?}", other),
        }
    }
}
