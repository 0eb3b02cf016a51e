//! Seeded randomness and the decisions derived from it.
//!
//! All randomness in a simulation flows through one [`Decisions`] instance
//! seeded at construction, consumed in a fixed sequence of call sites, so
//! a run is fully reproducible from its seed. Cloning a simulator clones
//! the generator state, and the two copies evolve independently.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::event::ComputerId;

/// The simulator's random decision maker.
#[derive(Debug, Clone)]
pub struct Decisions {
    rng: ChaCha8Rng,
    num_computers: usize,
}

impl Decisions {
    /// Create a decision maker for a network of `num_computers` machines.
    ///
    /// Caller must have validated `num_computers >= 2`;
    /// [`random_computer`](Self::random_computer) cannot exclude a machine
    /// from a one-machine draw.
    pub fn new(seed: u64, num_computers: usize) -> Self {
        debug_assert!(num_computers >= 2);
        Decisions {
            rng: ChaCha8Rng::seed_from_u64(seed),
            num_computers,
        }
    }

    /// Bernoulli draw: succeeds with probability `percent`/100.
    ///
    /// `percent = 0` never succeeds and `percent = 100` always does.
    pub fn attempt(&mut self, percent: u32) -> bool {
        self.rng.gen_range(0u32..100) < percent
    }

    /// Uniform draw from `0..num_computers`, excluding `excluding`.
    ///
    /// Redraws until the result differs from the excluded machine; with at
    /// least two computers this terminates with probability one.
    pub fn random_computer(&mut self, excluding: Option<ComputerId>) -> ComputerId {
        loop {
            let draw = self.rng.gen_range(0..self.num_computers);
            if Some(draw) != excluding {
                return draw;
            }
        }
    }
}
