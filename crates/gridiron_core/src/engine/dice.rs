//! Tabletop dice built on top of [`RandomSource`] draws.

use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use crate::error::Result;

/// Two six-sided dice rolled together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    pub first: u8,
    pub second: u8,
}

impl DiceRoll {
    /// 2..=12, triangular distribution peaking at 7.
    pub fn sum(&self) -> u8 {
        self.first + self.second
    }
}

/// One draw mapped onto a die face: `floor(next * 6) + 1`.
pub fn roll_die<R: RandomSource + ?Sized>(rng: &mut R) -> Result<u8> {
    let v = rng.next()?;
    Ok(((v * 6.0).floor() as u8).min(5) + 1)
}

/// Two draws, first die then second die.
pub fn roll_two_dice<R: RandomSource + ?Sized>(rng: &mut R) -> Result<DiceRoll> {
    let first = roll_die(rng)?;
    let second = roll_die(rng)?;
    Ok(DiceRoll { first, second })
}

/// One draw; true when it lands below `probability`.
pub fn chance<R: RandomSource + ?Sized>(rng: &mut R, probability: f64) -> Result<bool> {
    Ok(rng.next()? < probability)
}

/// One draw mapped uniformly onto `0..len`. `len` must be non-zero.
pub fn pick_index<R: RandomSource + ?Sized>(rng: &mut R, len: usize) -> Result<usize> {
    let v = rng.next()?;
    Ok(((v * len as f64).floor() as usize).min(len.saturating_sub(1)))
}
