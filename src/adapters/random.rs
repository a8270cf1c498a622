//! Random source adapters for interval fuzz.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::scheduler::RandomSource;

/// Production random source backed by the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn unit(&mut self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Seeded random source for reproducible tests.
#[derive(Debug)]
pub struct SeededRandom(StdRng);

impl SeededRandom {
    /// Creates a source with a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededRandom {
    fn unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}
