//! Injectable random source for the weather simulation.
//!
//! Every random draw in the simulation goes through [`RandomSource`] so that
//! a seeded [`SimRng`] reproduces identical clouds, strikes and rain.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Default seed used when no explicit seed is provided.
pub const DEFAULT_SEED: u64 = 42;

/// Source of uniform samples in `[0, 1)`.
pub trait RandomSource {
    /// Next uniform sample in `[0, 1)`.
    fn next_f32(&mut self) -> f32;

    /// Uniform sample in `[min, max)`.
    fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Uniform sample in `[-half_extent, +half_extent)`.
    fn signed(&mut self, half_extent: f32) -> f32 {
        (self.next_f32() - 0.5) * half_extent * 2.0
    }
}

/// Deterministic simulation RNG backed by `ChaCha8Rng`.
#[derive(Clone, Debug)]
pub struct SimRng(pub ChaCha8Rng);

impl Default for SimRng {
    fn default() -> Self {
        Self::from_seed_u64(DEFAULT_SEED)
    }
}

impl SimRng {
    /// Create a new `SimRng` seeded from the given `u64` value.
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl RandomSource for SimRng {
    #[inline]
    fn next_f32(&mut self) -> f32 {
        self.0.r#gen::<f32>()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    #[inline]
    fn next_f32(&mut self) -> f32 {
        (**self).next_f32()
    }
}

/// Replays a fixed list of samples, cycling when exhausted. Test helper.
#[cfg(test)]
pub(crate) struct ScriptedRng {
    values: Vec<f32>,
    cursor: usize,
    pub draws: usize,
}

#[cfg(test)]
impl ScriptedRng {
    pub(crate) fn new(values: &[f32]) -> Self {
        assert!(!values.is_empty());
        Self { values: values.to_vec(), cursor: 0, draws: 0 }
    }

    /// Source that always returns the same value.
    pub(crate) fn constant(value: f32) -> Self {
        Self::new(&[value])
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRng {
    fn next_f32(&mut self) -> f32 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        self.draws += 1;
        v
    }
}
