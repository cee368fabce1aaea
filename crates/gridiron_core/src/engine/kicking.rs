//! Kicking resolution: PATs, field goals and kickoff recovery.

use serde::{Deserialize, Serialize};

use super::config::{RulesConfig, FIELD_GOAL_SNAP_YARDS};
use super::dice::{chance, roll_two_dice};
use super::rng::RandomSource;
use crate::data::KickingTable;
use crate::error::Result;
use crate::models::{KickoffDecision, KickoffKind};

/// Kick distance from a line of scrimmage `ball_spot` yards from the
/// kicker's own goal line.
pub fn field_goal_distance(ball_spot: u8) -> u8 {
    100u8.saturating_sub(ball_spot).saturating_add(FIELD_GOAL_SNAP_YARDS)
}

/// Two dice against the PAT sub-table.
pub fn attempt_pat<R: RandomSource + ?Sized>(table: &KickingTable, rng: &mut R) -> Result<bool> {
    let roll = roll_two_dice(rng)?.sum();
    let good = table.pat(roll)?;
    tracing::debug!(roll, good, "extra point");
    Ok(good)
}

/// Two dice against the band covering `distance`. Out of range is a miss
/// and leaves the random source untouched.
pub fn attempt_field_goal<R: RandomSource + ?Sized>(
    table: &KickingTable,
    rng: &mut R,
    distance: u8,
) -> Result<bool> {
    if !table.in_range(distance) {
        tracing::debug!(distance, max = table.max_distance(), "field goal out of range");
        return Ok(false);
    }
    let roll = roll_two_dice(rng)?.sum();
    let good = table.field_goal(distance, roll)?;
    tracing::debug!(distance, roll, good, "field goal");
    Ok(good)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KickoffResult {
    pub kind: KickoffKind,
    /// Kicking team kept the ball (onside only).
    pub recovered: bool,
}

/// Normal kickoffs are touchbacks and draw nothing; onside kicks draw once
/// for recovery.
pub fn resolve_kickoff<R: RandomSource + ?Sized>(
    decision: KickoffDecision,
    rules: &RulesConfig,
    rng: &mut R,
) -> Result<KickoffResult> {
    let recovered = match decision.kick_type {
        KickoffKind::Normal => false,
        KickoffKind::Onside => chance(rng, rules.onside_recovery)?,
    };
    Ok(KickoffResult { kind: decision.kick_type, recovered })
}
