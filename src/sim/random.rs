//! Random source for seeding and bounce jitter

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Supplies uniform floats in an inclusive range.
///
/// Injected into seeding and the step so tests can script or seed it.
pub trait RandomSource {
    /// Uniform sample in `[lo, hi]`. Returns `lo` when the range is empty or
    /// not finite.
    fn uniform(&mut self, lo: f32, hi: f32) -> f32;
}

/// Seeded PCG generator
#[derive(Debug, Clone)]
pub struct SimRng {
    seed: u64,
    rng: Pcg32,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed this generator was created with (for reproducing a run)
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SimRng {
    fn uniform(&mut self, lo: f32, hi: f32) -> f32 {
        if !(lo.is_finite() && hi.is_finite()) || lo >= hi {
            return lo;
        }
        self.rng.random_range(lo..=hi)
    }
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn uniform(&mut self, lo: f32, hi: f32) -> f32 {
        (**self).uniform(lo, hi)
    }
}
