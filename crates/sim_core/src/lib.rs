//! # Convergence Engine (Core Layer)
//!
//! Repeated random trials and the statistics that show them converging to
//! their theoretical values.
//!
//! ## Components
//!
//! - [`rng`]: uniform random sources (platform generator or a seeded
//!   32-bit linear congruential generator)
//! - [`process`]: coin flip, dice roll, sum of dice and Monte Carlo π
//! - [`registry`]: id → process lookup
//! - [`trial`]: sequential trial results and the in-memory log
//! - [`stats`]: histograms, running moments, convergence series and
//!   per-process snapshots, maintained incrementally
//! - [`session`]: the owned context a caller drives
//! - [`batch`]: stateless "run K trials" requests
//!
//! ## Usage Example
//!
//! ```rust
//! use sim_core::rng::RandomSource;
//! use sim_core::session::Session;
//! use sim_core::stats::Statistics;
//!
//! let mut session = Session::with_builtin_processes(RandomSource::lattice(Some(12345)));
//! session.select_process("pi-simulation");
//! session.run_trials(5_000).unwrap();
//!
//! if let Some(Statistics::PiSimulation(pi)) = session.statistics() {
//!     assert!((pi.estimate - std::f64::consts::PI).abs() < 0.2);
//!     assert_eq!(pi.inside + pi.outside, 5_000);
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for trial results, snapshots and
//!   batch reports (camelCase field names)

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![allow(unknown_lints)]

pub mod batch;
pub mod error;
pub mod process;
pub mod registry;
pub mod rng;
pub mod session;
pub mod stats;
pub mod trial;

// Re-export commonly used items for convenience
pub use batch::{run_batch, BatchReport, BatchRequest};
pub use error::{Result, SimulationError, MAX_TRIALS_PER_REQUEST};
pub use process::{Outcome, Process, ProcessConfig, ProcessKind};
pub use registry::ProcessRegistry;
pub use rng::{GeneratorKind, RandomSource};
pub use session::Session;
pub use stats::{ConvergenceSeries, Statistics, StatisticsAccumulator};
pub use trial::{TrialLog, TrialResult};
