//! Trial results and the in-memory trial log.

use std::time::Duration;

use crate::process::Outcome;

/// One recorded trial.
///
/// Immutable once created; only the log hands out new results.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TrialResult {
    id: u64,
    process_id: String,
    result: Outcome,
    timestamp: Duration,
}

impl TrialResult {
    /// Sequential id, starting at 1 after every clear.
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Id of the process that produced the outcome.
    #[inline]
    pub fn process_id(&self) -> &str {
        &self.process_id
    }

    /// The outcome.
    #[inline]
    pub fn result(&self) -> &Outcome {
        &self.result
    }

    /// Monotonic clock reading, relative to the owning session's start.
    #[inline]
    pub fn timestamp(&self) -> Duration {
        self.timestamp
    }
}

/// Ordered, append-only sequence of trial results.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use sim_core::process::Outcome;
/// use sim_core::trial::TrialLog;
///
/// let mut log = TrialLog::new();
/// log.append("dice-roll", Outcome::Integer(4), Duration::ZERO);
/// log.append("dice-roll", Outcome::Integer(2), Duration::from_millis(3));
/// assert_eq!(log.len(), 2);
/// assert_eq!(log.last().unwrap().id(), 2);
///
/// log.clear();
/// let first = log.append("dice-roll", Outcome::Integer(6), Duration::ZERO);
/// assert_eq!(first.id(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TrialLog {
    entries: Vec<TrialResult>,
}

impl TrialLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an outcome and returns the stored result.
    pub fn append(
        &mut self,
        process_id: impl Into<String>,
        result: Outcome,
        timestamp: Duration,
    ) -> &TrialResult {
        let id = self.entries.len() as u64 + 1;
        self.entries.push(TrialResult {
            id,
            process_id: process_id.into(),
            result,
            timestamp,
        });
        &self.entries[self.entries.len() - 1]
    }

    /// Removes every entry; the next id is 1 again.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// All entries, oldest first.
    #[inline]
    pub fn entries(&self) -> &[TrialResult] {
        &self.entries
    }

    /// Entries from index `start` onwards.
    pub fn entries_since(&self, start: usize) -> &[TrialResult] {
        &self.entries[start.min(self.entries.len())..]
    }

    /// The most recent `n` entries, newest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &TrialResult> {
        self.entries.iter().rev().take(n)
    }

    /// The latest entry.
    pub fn last(&self) -> Option<&TrialResult> {
        self.entries.last()
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the log is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
