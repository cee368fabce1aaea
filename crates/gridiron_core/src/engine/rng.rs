//! Random source for every probabilistic decision in the engine.
//!
//! Nothing in the simulation may call a platform RNG. Resolvers and the coach
//! AI receive a `&mut` [`RandomSource`] and pull uniform values in [0, 1) from
//! it in a fixed order, so a fixed sequence of draws reproduces a fixed game.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{EngineError, Result};

/// Pull-based generator of uniform values in [0, 1).
pub trait RandomSource {
    fn next(&mut self) -> Result<f64>;

    /// Number of values handed out so far.
    fn consumed(&self) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next(&mut self) -> Result<f64> {
        (**self).next()
    }

    fn consumed(&self) -> usize {
        (**self).consumed()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next(&mut self) -> Result<f64> {
        (**self).next()
    }

    fn consumed(&self) -> usize {
        (**self).consumed()
    }
}

/// Seeded ChaCha8 stream. Same seed, same game.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: u64,
    rng: ChaCha8Rng,
    consumed: usize,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self { seed, rng: ChaCha8Rng::seed_from_u64(seed), consumed: 0 }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn next(&mut self) -> Result<f64> {
        self.consumed += 1;
        Ok(self.rng.gen::<f64>())
    }

    fn consumed(&self) -> usize {
        self.consumed
    }
}

/// Fixed sequence of draws for golden and replay tests.
///
/// Running past the end is fatal: a scripted game that needs more randomness
/// than it was given is a broken fixture, not something to paper over.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    values: VecDeque<f64>,
    consumed: usize,
}

impl ScriptedRandom {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self { values: values.into_iter().collect(), consumed: 0 }
    }

    /// Draws that map onto the given die faces via `floor(v * 6) + 1`.
    pub fn from_dice(faces: impl IntoIterator<Item = u8>) -> Self {
        Self::new(faces.into_iter().map(|f| (f64::from(f.clamp(1, 6)) - 0.5) / 6.0))
    }

    pub fn push(&mut self, value: f64) {
        self.values.push_back(value);
    }

    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn next(&mut self) -> Result<f64> {
        let value = self
            .values
            .pop_front()
            .ok_or(EngineError::RandomExhausted { consumed: self.consumed })?;
        if !(0.0..1.0).contains(&value) {
            return Err(EngineError::invalid_state(format!(
                "scripted draw #{} is {value}, outside [0, 1)",
                self.consumed
            )));
        }
        self.consumed += 1;
        Ok(value)
    }

    fn consumed(&self) -> usize {
        self.consumed
    }
}

/// Adapts a closure (e.g. a host-provided generator) into a [`RandomSource`].
pub struct FnRandom<F> {
    f: F,
    consumed: usize,
}

impl<F: FnMut() -> f64> FnRandom<F> {
    pub fn new(f: F) -> Self {
        Self { f, consumed: 0 }
    }
}

impl<F: FnMut() -> f64> RandomSource for FnRandom<F> {
    fn next(&mut self) -> Result<f64> {
        let value = (self.f)();
        if !(0.0..1.0).contains(&value) {
            return Err(EngineError::invalid_state(format!(
                "random function returned {value}, outside [0, 1)"
            )));
        }
        self.consumed += 1;
        Ok(value)
    }

    fn consumed(&self) -> usize {
        self.consumed
    }
}
