//! Situational decisions.
//!
//! Every decision is a pure function of the game state, the coach profile,
//! the policy and the random source, and consumes a fixed number of draws
//! in a fixed order whatever the situation. Replays depend on that.

use super::profile::CoachProfile;
use crate::data::{KickingTable, PlayCatalog};
use crate::engine::config::{CoachPolicy, FOURTH_DOWN_TERRITORY};
use crate::engine::dice::pick_index;
use crate::engine::kicking::field_goal_distance;
use crate::engine::rng::RandomSource;
use crate::engine::state::{GameState, Phase, Quarter};
use crate::error::{EngineError, Result};
use crate::models::{
    ConversionKind, DefenseCall, FourthDownChoice, KickoffDecision, PlayDefinition, PlayFamily, RiskProfile, Side,
};

// ========== Situation helpers ==========

/// Points `side` is behind by; zero when level or ahead.
fn deficit(state: &GameState, side: Side) -> u32 {
    (-state.score.margin(side)).max(0) as u32
}

fn fourth_quarter_within(state: &GameState, seconds: u32) -> bool {
    state.quarter == Quarter::Fourth && state.clock <= seconds
}

fn trailing_late(state: &GameState, side: Side, policy: &CoachPolicy) -> bool {
    fourth_quarter_within(state, policy.desperation_window_seconds) && deficit(state, side) > 0
}

fn leading_late(state: &GameState, side: Side, policy: &CoachPolicy) -> bool {
    fourth_quarter_within(state, policy.desperation_window_seconds) && state.score.margin(side) > 0
}

// ========== Kickoff ==========

/// Chance the kicking side tries an onside kick.
///
/// Non-zero only in a tight fourth-quarter finish (two minutes or less, down
/// by one score) or a desperate one (four minutes or less, down by two scores
/// or more).
pub fn onside_probability(state: &GameState, coach: &CoachProfile, policy: &CoachPolicy) -> Result<f64> {
    let kicking = match state.phase {
        Phase::Kickoff { kicking } => kicking,
        other => return Err(EngineError::invalid_state(format!("kickoff decision during {other:?}"))),
    };
    let behind = deficit(state, kicking);
    let tight = fourth_quarter_within(state, policy.tight_window_seconds)
        && (1..=policy.tight_max_deficit).contains(&behind);
    let desperate = fourth_quarter_within(state, policy.desperation_window_seconds)
        && behind >= policy.desperation_min_deficit;

    Ok(match (tight || desperate, coach.onside_aggressive) {
        (false, _) => policy.onside_base,
        (true, true) => policy.onside_desperate_aggressive,
        (true, false) => policy.onside_desperate,
    })
}

/// One draw, always; onside when it falls under [`onside_probability`].
pub fn choose_kickoff<R: RandomSource + ?Sized>(
    state: &GameState,
    coach: &CoachProfile,
    policy: &CoachPolicy,
    rng: &mut R,
) -> Result<KickoffDecision> {
    let p = onside_probability(state, coach, policy)?;
    let draw = rng.next()?;
    let decision = if draw < p { KickoffDecision::onside() } else { KickoffDecision::normal() };
    tracing::debug!(coach = %coach.name, p, kind = ?decision.kick_type, "kickoff decision");
    Ok(decision)
}

// ========== Try after touchdown ==========

/// Kick or go for two. Second-half margins on the chart go for two with the
/// policy's probability; everything else kicks. One draw, always.
pub fn choose_conversion<R: RandomSource + ?Sized>(
    state: &GameState,
    coach: &CoachProfile,
    policy: &CoachPolicy,
    rng: &mut R,
) -> Result<ConversionKind> {
    let side = match state.phase {
        Phase::Conversion { side } => side,
        other => return Err(EngineError::invalid_state(format!("conversion decision during {other:?}"))),
    };
    let on_chart =
        state.quarter.is_second_half() && policy.two_point_margins.contains(&state.score.margin(side));
    let p = match (on_chart, coach.two_point_aggressive) {
        (false, _) => 0.0,
        (true, true) => policy.two_point_chart_aggressive,
        (true, false) => policy.two_point_chart,
    };
    let draw = rng.next()?;
    Ok(if draw < p { ConversionKind::TwoPoint } else { ConversionKind::Kick })
}

// ========== Fourth down ==========

/// Go for it, kick or punt. One draw, always.
pub fn choose_fourth_down<R: RandomSource + ?Sized>(
    state: &GameState,
    coach: &CoachProfile,
    policy: &CoachPolicy,
    kicking: &KickingTable,
    rng: &mut R,
) -> Result<FourthDownChoice> {
    if state.phase != Phase::Scrimmage || state.down != 4 {
        return Err(EngineError::invalid_state(format!(
            "fourth-down decision on down {} during {:?}",
            state.down, state.phase
        )));
    }
    let offense = state.possession;
    let short_in_territory =
        state.distance <= policy.fourth_down_short_yards && state.ball_spot >= FOURTH_DOWN_TERRITORY;
    let p = match (short_in_territory || trailing_late(state, offense, policy), coach.fourth_down_aggressive) {
        (false, _) => 0.0,
        (true, true) => policy.fourth_down_go_aggressive,
        (true, false) => policy.fourth_down_go,
    };
    let draw = rng.next()?;

    let choice = if draw < p {
        FourthDownChoice::GoForIt
    } else if kicking.in_range(field_goal_distance(state.ball_spot)) {
        FourthDownChoice::FieldGoal
    } else {
        FourthDownChoice::Punt
    };
    tracing::debug!(coach = %coach.name, p, ?choice, "fourth down");
    Ok(choice)
}

// ========== Play calling ==========

/// Pass tendency after situational shifts, clamped to [0, 1].
pub fn pass_probability(state: &GameState, coach: &CoachProfile, policy: &CoachPolicy) -> f64 {
    let mut p = coach.pass_tendency;
    if state.distance >= 7 {
        p += policy.long_yardage_pass_shift;
    }
    if state.distance <= 2 {
        p -= policy.short_yardage_run_shift;
    }
    if trailing_late(state, state.possession, policy) {
        p += policy.long_yardage_pass_shift;
    }
    p.clamp(0.0, 1.0)
}

/// Two draws: air or ground, then a uniform pick within the family. High-risk
/// plays are off the card while protecting a late lead.
pub fn choose_play<'a, R: RandomSource + ?Sized>(
    state: &GameState,
    coach: &CoachProfile,
    policy: &CoachPolicy,
    catalog: &'a PlayCatalog,
    rng: &mut R,
) -> Result<&'a PlayDefinition> {
    let family = if rng.next()? < pass_probability(state, coach, policy) { PlayFamily::Air } else { PlayFamily::Ground };

    let all = catalog.plays_in(family);
    let safe: Vec<&PlayDefinition> = if leading_late(state, state.possession, policy) {
        all.iter().copied().filter(|p| p.risk != RiskProfile::High).collect()
    } else {
        Vec::new()
    };
    let card = if safe.is_empty() { all } else { safe };
    if card.is_empty() {
        return Err(EngineError::gap("plays", format!("{family:?} plays")));
    }
    Ok(card[pick_index(rng, card.len())?])
}

// ========== Defense ==========

/// Weights in `DefenseCall::ALL` order: run stop, pass coverage, blitz, prevent.
const BASE_WEIGHTS: [f64; 4] = [0.30, 0.35, 0.20, 0.15];
const SHORT_YARDAGE_WEIGHTS: [f64; 4] = [0.55, 0.20, 0.20, 0.05];
const LONG_YARDAGE_WEIGHTS: [f64; 4] = [0.15, 0.40, 0.25, 0.20];
const PROTECT_LEAD_WEIGHTS: [f64; 4] = [0.10, 0.35, 0.05, 0.50];

/// One draw against the weights for the situation.
pub fn choose_defense<R: RandomSource + ?Sized>(
    state: &GameState,
    policy: &CoachPolicy,
    rng: &mut R,
) -> Result<DefenseCall> {
    let weights = if leading_late(state, state.defense(), policy) {
        PROTECT_LEAD_WEIGHTS
    } else if state.distance <= 2 {
        SHORT_YARDAGE_WEIGHTS
    } else if state.distance >= 7 {
        LONG_YARDAGE_WEIGHTS
    } else {
        BASE_WEIGHTS
    };

    let draw = rng.next()?;
    let mut cumulative = 0.0;
    for (call, weight) in DefenseCall::ALL.iter().zip(weights) {
        cumulative += weight;
        if draw < cumulative {
            return Ok(*call);
        }
    }
    Ok(DefenseCall::Prevent)
}
