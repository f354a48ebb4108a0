//! Stateless "run K trials of process P" requests.
//!
//! This is the operation a transport layer exposes: parameters are checked
//! up front, the registered process is copied and reconfigured for the
//! request, and the raw outcomes come back together with their histogram.
//! The registry itself is never modified.

use tracing::trace;

use crate::error::{validate_probability, validate_trial_count, Result};
use crate::process::{Outcome, Process};
use crate::registry::ProcessRegistry;
use crate::rng::RandomSource;
use crate::stats::{CategoryCount, CategoryCounts};

/// Parameters of a batch run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BatchRequest {
    /// Registered process id.
    pub process_id: String,
    /// Number of trials, in `[1, 10_000]`.
    pub count: usize,
    /// Coin bias override, in `[0, 1]`. Ignored by other processes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub probability: Option<f64>,
    /// Dice count override, clamped to `[1, 20]`. Ignored by other processes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub number_of_dice: Option<usize>,
}

impl BatchRequest {
    /// Request for `count` trials of `process_id` with registered parameters.
    pub fn new(process_id: impl Into<String>, count: usize) -> Self {
        Self {
            process_id: process_id.into(),
            count,
            probability: None,
            number_of_dice: None,
        }
    }

    /// Overrides the coin bias.
    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = Some(probability);
        self
    }

    /// Overrides the dice count.
    pub fn with_number_of_dice(mut self, number_of_dice: usize) -> Self {
        self.number_of_dice = Some(number_of_dice);
        self
    }

    /// Checks the count and probability.
    pub fn validate(&self) -> Result<()> {
        validate_trial_count(self.count)?;
        if let Some(probability) = self.probability {
            validate_probability(probability)?;
        }
        Ok(())
    }
}

/// Outcomes of a batch run with their aggregate counts.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BatchReport {
    /// Process the trials ran against.
    pub process_id: String,
    /// Raw outcomes, in draw order.
    pub results: Vec<Outcome>,
    /// Histogram over the process's outcome domain.
    pub counts: Vec<CategoryCount>,
    /// Number of outcomes.
    pub total: u64,
}

/// Runs a batch request.
///
/// Invalid parameters are rejected before anything runs. An unregistered
/// process id yields `Ok(None)`.
///
/// # Examples
///
/// ```rust
/// use sim_core::batch::{run_batch, BatchRequest};
/// use sim_core::registry::ProcessRegistry;
/// use sim_core::rng::RandomSource;
///
/// let registry = ProcessRegistry::with_builtin_processes();
/// let mut source = RandomSource::lattice(Some(1));
///
/// let request = BatchRequest::new("coin-flip", 50).with_probability(0.9);
/// let report = run_batch(&registry, &mut source, &request).unwrap().unwrap();
/// assert_eq!(report.results.len(), 50);
/// assert_eq!(report.counts.iter().map(|c| c.count).sum::<u64>(), 50);
///
/// let missing = BatchRequest::new("roulette", 50);
/// assert!(run_batch(&registry, &mut source, &missing).unwrap().is_none());
/// ```
pub fn run_batch(
    registry: &ProcessRegistry,
    source: &mut RandomSource,
    request: &BatchRequest,
) -> Result<Option<BatchReport>> {
    request.validate()?;

    let Some(registered) = registry.get(&request.process_id) else {
        return Ok(None);
    };
    let process = configure(registered, request)?;

    let mut counts = CategoryCounts::new(process.category_labels());
    let results: Vec<Outcome> = (0..request.count)
        .map(|_| {
            let outcome = process.run_trial(source);
            if let Some(index) = process.category_index(&outcome) {
                counts.record(index);
            }
            outcome
        })
        .collect();

    trace!(process = %request.process_id, count = request.count, "Batch complete");

    Ok(Some(BatchReport {
        process_id: request.process_id.clone(),
        results,
        counts: counts.buckets(),
        total: counts.total(),
    }))
}

fn configure(registered: &Process, request: &BatchRequest) -> Result<Process> {
    let mut process = registered.clone();
    if let (Some(probability), Some(coin)) = (request.probability, process.as_coin_flip_mut()) {
        coin.set_probability(probability)?;
    }
    if let (Some(n), Some(dice)) = (request.number_of_dice, process.as_sum_dice_mut()) {
        dice.set_number_of_dice(n);
    }
    Ok(process)
}
