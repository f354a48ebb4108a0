//! Simulation session: the owned context that ties a registry, a random
//! source and a trial log together.
//!
//! Each session owns its random source and process parameters outright, so
//! independent sessions never share mutable state and can be moved to
//! different threads freely.

use std::time::Instant;

use tracing::{debug, trace};

use crate::error::{validate_probability, validate_trial_count, Result};
use crate::process::Process;
use crate::registry::ProcessRegistry;
use crate::rng::{GeneratorKind, RandomSource};
use crate::stats::{Statistics, StatisticsAccumulator};
use crate::trial::{TrialLog, TrialResult};

/// One user's simulation state.
///
/// # Examples
///
/// ```rust
/// use sim_core::rng::RandomSource;
/// use sim_core::session::Session;
///
/// let mut session = Session::with_builtin_processes(RandomSource::lattice(Some(42)));
/// assert!(session.select_process("coin-flip"));
///
/// let trials = session.run_trials(100).unwrap();
/// assert_eq!(trials.len(), 100);
///
/// let stats = session.statistics().unwrap();
/// assert_eq!(stats.total(), 100);
/// assert_eq!(Some(stats), session.recompute_statistics());
/// ```
#[derive(Debug)]
pub struct Session {
    registry: ProcessRegistry,
    source: RandomSource,
    log: TrialLog,
    active: Option<String>,
    accumulator: Option<StatisticsAccumulator>,
    origin: Instant,
}

impl Session {
    /// Creates a session with no active process.
    pub fn new(registry: ProcessRegistry, source: RandomSource) -> Self {
        Self {
            registry,
            source,
            log: TrialLog::new(),
            active: None,
            accumulator: None,
            origin: Instant::now(),
        }
    }

    /// Creates a session over the built-in processes.
    pub fn with_builtin_processes(source: RandomSource) -> Self {
        Self::new(ProcessRegistry::with_builtin_processes(), source)
    }

    /// Registered processes.
    pub fn registry(&self) -> &ProcessRegistry {
        &self.registry
    }

    /// Current random source.
    pub fn source(&self) -> &RandomSource {
        &self.source
    }

    /// Id of the active process.
    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// The active process with its current parameters.
    pub fn active_process(&self) -> Option<&Process> {
        self.registry.get(self.active.as_deref()?)
    }

    /// Makes `id` the active process.
    ///
    /// Switching to a different process clears the log; reselecting the
    /// active one keeps it. Returns `false` and changes nothing when the id
    /// is not registered.
    pub fn select_process(&mut self, id: &str) -> bool {
        let Some(process) = self.registry.get(id) else {
            debug!(process = id, "Ignoring selection of unregistered process");
            return false;
        };
        if self.active.as_deref() == Some(id) {
            return true;
        }

        debug!(process = id, "Selecting process");
        self.accumulator = Some(StatisticsAccumulator::new(process));
        self.active = Some(id.to_string());
        self.log.clear();
        true
    }

    /// Replaces the random source. The log is kept.
    pub fn set_generator(&mut self, kind: GeneratorKind, seed: Option<u64>) {
        self.source = RandomSource::new(kind, seed);
        debug!(generator = %kind, seed = ?self.source.seed(), "Random source reset");
    }

    /// Sets the dice count of the active sum-of-dice process.
    ///
    /// The count is clamped to `[1, 20]`. When the effective count changes
    /// the log is cleared, since earlier sums belong to another domain.
    /// Returns the effective count, or 0 when the active process is not a
    /// sum of dice.
    pub fn set_number_of_dice(&mut self, n: usize) -> usize {
        let Some(dice) = self
            .active
            .as_deref()
            .and_then(|id| self.registry.get_mut(id))
            .and_then(Process::as_sum_dice_mut)
        else {
            return 0;
        };

        let previous = dice.number_of_dice();
        let effective = dice.set_number_of_dice(n);
        if effective != n {
            debug!(requested = n, effective, "Dice count clamped");
        }
        if effective != previous {
            debug!(previous, effective, "Dice count changed, clearing trials");
            self.log.clear();
            self.rebuild_accumulator();
        }
        effective
    }

    /// Sets the bias of the active coin. History is kept.
    ///
    /// A probability outside `[0, 1]` is rejected without mutation. Does
    /// nothing when the active process is not a coin.
    pub fn set_coin_probability(&mut self, probability: f64) -> Result<()> {
        validate_probability(probability)?;

        let Some(coin) = self
            .active
            .as_deref()
            .and_then(|id| self.registry.get_mut(id))
            .and_then(Process::as_coin_flip_mut)
        else {
            return Ok(());
        };
        coin.set_probability(probability)?;
        self.rebuild_accumulator();
        Ok(())
    }

    /// Runs one trial of the active process; `None` without one.
    pub fn run_trial(&mut self) -> Option<&TrialResult> {
        if self.record_trial() {
            self.log.last()
        } else {
            None
        }
    }

    /// Runs `count` trials of the active process.
    ///
    /// The count is validated before anything runs. Returns the new
    /// trials, which is empty when no process is active.
    pub fn run_trials(&mut self, count: usize) -> Result<&[TrialResult]> {
        validate_trial_count(count)?;

        let start = self.log.len();
        if self.active.is_some() {
            for _ in 0..count {
                self.record_trial();
            }
            trace!(process = ?self.active, count, total = self.log.len(), "Ran batch");
        }
        Ok(self.log.entries_since(start))
    }

    /// Clears the log; the next trial id is 1.
    pub fn reset(&mut self) {
        debug!(cleared = self.log.len(), "Clearing trials");
        self.log.clear();
        if let Some(acc) = self.accumulator.as_mut() {
            acc.clear();
        }
    }

    /// All trials, oldest first.
    pub fn trials(&self) -> &[TrialResult] {
        self.log.entries()
    }

    /// The most recent `n` trials, newest first.
    pub fn recent_trials(&self, n: usize) -> impl Iterator<Item = &TrialResult> {
        self.log.recent(n)
    }

    /// Running statistics of the active process, borrowed in place.
    ///
    /// Reading the convergence series through here copies nothing, unlike
    /// [`Session::statistics`].
    pub fn accumulator(&self) -> Option<&StatisticsAccumulator> {
        self.accumulator.as_ref()
    }

    /// Snapshot of the incrementally maintained statistics.
    pub fn statistics(&self) -> Option<Statistics> {
        self.accumulator().map(StatisticsAccumulator::snapshot)
    }

    /// Statistics of the active process recomputed from the whole log.
    pub fn recompute_statistics(&self) -> Option<Statistics> {
        let process = self.active_process()?;
        Some(Statistics::compute(process, self.log.entries()))
    }

    fn record_trial(&mut self) -> bool {
        let Some(id) = self.active.as_deref() else {
            return false;
        };
        let Some(process) = self.registry.get(id) else {
            return false;
        };

        let outcome = process.run_trial(&mut self.source);
        if let Some(acc) = self.accumulator.as_mut() {
            acc.push(&outcome);
        }
        self.log.append(id, outcome, self.origin.elapsed());
        true
    }

    fn rebuild_accumulator(&mut self) {
        let rebuilt = self
            .active_process()
            .map(|process| StatisticsAccumulator::from_trials(process, self.log.entries()));
        self.accumulator = rebuilt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimulationError;
    use crate::process::Outcome;

    fn seeded() -> Session {
        Session::with_builtin_processes(RandomSource::lattice(Some(42)))
    }

    #[test]
    fn test_no_active_process_is_noop() {
        let mut session = seeded();
        assert!(session.run_trial().is_none());
        assert!(session.run_trials(10).unwrap().is_empty());
        assert!(session.statistics().is_none());
        assert!(session.recompute_statistics().is_none());
        assert_eq!(session.set_number_of_dice(3), 0);
        assert!(session.set_coin_probability(0.3).is_ok());
    }

    #[test]
    fn test_unknown_process_keeps_state() {
        let mut session = seeded();
        assert!(session.select_process("dice-roll"));
        session.run_trials(5).unwrap();

        assert!(!session.select_process("roulette"));
        assert_eq!(session.active_id(), Some("dice-roll"));
        assert_eq!(session.trials().len(), 5);
    }

    #[test]
    fn test_switching_process_clears_log() {
        let mut session = seeded();
        session.select_process("coin-flip");
        session.run_trials(10).unwrap();

        // Same id keeps history
        assert!(session.select_process("coin-flip"));
        assert_eq!(session.trials().len(), 10);

        session.select_process("pi-simulation");
        assert!(session.trials().is_empty());
        let trial = session.run_trial().unwrap();
        assert_eq!(trial.id(), 1);
        assert!(matches!(trial.result(), Outcome::Point(_)));
    }

    #[test]
    fn test_invalid_count_runs_nothing() {
        let mut session = seeded();
        session.select_process("dice-roll");
        assert_eq!(
            session.run_trials(0).unwrap_err(),
            SimulationError::InvalidTrialCount(0)
        );
        assert!(session.run_trials(10_001).is_err());
        assert!(session.trials().is_empty());
    }

    #[test]
    fn test_dice_count_change_clears_log() {
        let mut session = seeded();
        session.select_process("sum-dice");
        session.run_trials(20).unwrap();

        // Clamped to the current count: nothing changes
        assert_eq!(session.set_number_of_dice(5), 5);
        assert_eq!(session.trials().len(), 20);

        assert_eq!(session.set_number_of_dice(0), 1);
        assert!(session.trials().is_empty());

        session.run_trials(50).unwrap();
        for trial in session.trials() {
            assert!(matches!(trial.result(), Outcome::Integer(1..=6)));
        }
        assert_eq!(session.set_number_of_dice(25), 20);
    }

    #[test]
    fn test_invalid_probability_is_rejected_without_mutation() {
        let mut session = seeded();
        session.select_process("coin-flip");
        session.run_trials(10).unwrap();

        assert!(session.set_coin_probability(1.5).is_err());
        assert!(session.set_coin_probability(f64::NAN).is_err());
        match session.active_process() {
            Some(Process::CoinFlip(coin)) => assert_eq!(coin.probability(), 0.5),
            other => panic!("expected coin, got {:?}", other),
        }

        session.set_coin_probability(0.8).unwrap();
        assert_eq!(session.trials().len(), 10);
        assert_eq!(session.statistics(), session.recompute_statistics());
    }

    #[test]
    fn test_reset_restarts_ids_and_statistics() {
        let mut session = seeded();
        session.select_process("dice-roll");
        session.run_trials(30).unwrap();
        session.reset();

        assert!(session.trials().is_empty());
        assert_eq!(session.statistics().map(|s| s.total()), Some(0));
        assert_eq!(session.run_trial().map(TrialResult::id), Some(1));
    }

    #[test]
    fn test_generator_switch_is_reproducible() {
        let mut a = seeded();
        let mut b = Session::with_builtin_processes(RandomSource::platform());
        b.set_generator(GeneratorKind::Lattice, Some(42));

        for session in [&mut a, &mut b] {
            session.select_process("dice-roll");
            session.run_trials(25).unwrap();
        }
        let results = |s: &Session| s.trials().iter().map(|t| *t.result()).collect::<Vec<_>>();
        assert_eq!(results(&a), results(&b));
    }

    #[test]
    fn test_accumulator_follows_every_trial() {
        let mut session = seeded();
        assert!(session.accumulator().is_none());
        session.select_process("pi-simulation");

        for n in 1..=500 {
            session.run_trial();
            let acc = session.accumulator().unwrap();
            assert_eq!(acc.len(), n);
            assert_eq!(acc.convergence().len(), n);
        }
        let acc = session.accumulator().unwrap();
        assert_eq!(Some(acc.snapshot()), session.recompute_statistics());
    }

    #[test]
    fn test_recent_trials_newest_first() {
        let mut session = seeded();
        session.select_process("coin-flip");
        session.run_trials(8).unwrap();
        let ids: Vec<u64> = session.recent_trials(3).map(TrialResult::id).collect();
        assert_eq!(ids, vec![8, 7, 6]);
    }
}
