//! # Uniform Random Sources
//!
//! Every process draws its randomness from a [`RandomSource`], a uniform
//! generator over `[0, 1)` selected at runtime:
//!
//! - **Platform**: `rand::thread_rng`, not reproducible, no state of its own
//! - **Lattice**: a 32-bit linear congruential generator ([`LatticeRng`])
//!   with `a = 1664525`, `c = 1013904223`, `m = 2^32`
//!
//! ## Reproducibility
//!
//! The lattice generator is deterministic for a given seed. Reseeding
//! without a seed draws one from the wall clock, so consecutive unseeded
//! resets yield different sequences.
//!
//! ## Usage Example
//!
//! ```rust
//! use sim_core::rng::{GeneratorKind, RandomSource};
//!
//! let mut a = RandomSource::new(GeneratorKind::Lattice, Some(12345));
//! let mut b = RandomSource::new(GeneratorKind::Lattice, Some(12345));
//! assert_eq!(a.next_uniform(), b.next_uniform());
//!
//! // Batch generation into a pre-allocated buffer
//! let mut buffer = vec![0.0; 128];
//! a.fill_uniform(&mut buffer);
//! ```
//!
//! ## Statistical Quality
//!
//! Neither source is suitable for cryptographic use. The lattice source has
//! the usual weaknesses of a power-of-two modulus LCG in its low-order bits,
//! which is acceptable for illustrating convergence.

mod lattice;
mod source;

pub use lattice::{
    time_seed, LatticeRng, LATTICE_INCREMENT, LATTICE_MODULUS, LATTICE_MULTIPLIER,
};
pub use source::{GeneratorKind, RandomSource};
