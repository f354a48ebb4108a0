//! Linear congruential ("lattice") generator with explicit, owned state.
//!
//! This module provides [`LatticeRng`], a 32-bit-modulus LCG using the
//! Numerical Recipes constants. It is reproducible for a given seed and is
//! intended for illustrative simulations only: the low-order bits of a
//! power-of-two modulus LCG are known to be weak.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// LCG multiplier `a`.
pub const LATTICE_MULTIPLIER: u64 = 1_664_525;

/// LCG increment `c`.
pub const LATTICE_INCREMENT: u64 = 1_013_904_223;

/// LCG modulus `m = 2^32`.
pub const LATTICE_MODULUS: u64 = 1 << 32;

/// Distinguishes time-based seeds drawn within the same clock tick.
static TIME_SEED_SALT: AtomicU64 = AtomicU64::new(0);

/// Returns a seed derived from the wall clock.
///
/// Two calls never return the same value modulo `2^32` within one process,
/// even when the clock has not advanced between them.
pub fn time_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos() as u64);
    let salt = TIME_SEED_SALT.fetch_add(1, Ordering::Relaxed);
    // Odd multiplier is a bijection mod 2^32, so distinct salts stay distinct
    nanos.wrapping_add(salt.wrapping_mul(0x9E37_79B9))
}

/// Seeded linear congruential generator.
///
/// Transition: `state' = (a * state + c) mod m`, output `state' / m`.
/// Each instance owns its state, so independent generators never share a
/// sequence.
///
/// # Examples
///
/// ```rust
/// use sim_core::rng::LatticeRng;
///
/// let mut a = LatticeRng::from_seed(12345);
/// let mut b = LatticeRng::from_seed(12345);
///
/// // Same seed produces identical sequences
/// assert_eq!(a.next_uniform(), b.next_uniform());
/// assert_eq!(a.state(), 87_628_868);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LatticeRng {
    /// Current LCG state, always below `LATTICE_MODULUS`.
    state: u64,
    /// Seed used for the most recent initialisation.
    seed: u64,
}

impl LatticeRng {
    /// Creates a generator initialised with the given seed.
    ///
    /// Seeds are reduced modulo `2^32`, so `s` and `s + 2^32` produce the
    /// same sequence.
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            state: seed % LATTICE_MODULUS,
            seed,
        }
    }

    /// Creates a generator seeded from the wall clock.
    pub fn from_time() -> Self {
        Self::from_seed(time_seed())
    }

    /// Reinitialises the state.
    ///
    /// With `None` the seed is taken from the wall clock, so the new
    /// sequence differs from the previous one.
    pub fn reset(&mut self, seed: Option<u64>) {
        *self = Self::from_seed(seed.unwrap_or_else(time_seed));
    }

    /// Returns the seed used for the most recent initialisation.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the current raw state.
    #[inline]
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Advances the state and returns a value in `[0, 1)`.
    #[inline]
    pub fn next_uniform(&mut self) -> f64 {
        // state < 2^32 and a < 2^21, so the product cannot overflow u64
        self.state = (LATTICE_MULTIPLIER * self.state + LATTICE_INCREMENT) % LATTICE_MODULUS;
        self.state as f64 / LATTICE_MODULUS as f64
    }

    /// Fills the buffer with values in `[0, 1)`.
    #[inline]
    pub fn fill_uniform(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = self.next_uniform();
        }
    }
}
