//! Flags: whether one was thrown, on whom, and how it is enforced.

use super::config::PenaltyConfig;
use super::dice::{chance, pick_index};
use super::rng::RandomSource;
use super::state::FieldState;
use crate::data::{PenaltyRow, PenaltyTable};
use crate::error::{EngineError, Result};
use crate::models::{Outcome, PenaltyEffect, PenaltyResult, PenaltySide};

/// Possibly attaches a penalty to `outcome`.
///
/// Draw order is fixed: occurrence, then side, then the row within that side.
/// When no flag is thrown exactly one draw is consumed and the outcome comes
/// back unchanged.
pub fn maybe_penalty<R: RandomSource + ?Sized>(
    outcome: Outcome,
    field: FieldState,
    table: &PenaltyTable,
    config: &PenaltyConfig,
    rng: &mut R,
) -> Result<Outcome> {
    if !chance(rng, config.occurrence)? {
        return Ok(outcome);
    }
    let side = if chance(rng, config.offense_share)? { PenaltySide::Offense } else { PenaltySide::Defense };
    let rows = table.rows_for(side);
    if rows.is_empty() {
        return Err(EngineError::gap(
            "penalty",
            format!("{} rows", match side {
                PenaltySide::Offense => "offense",
                PenaltySide::Defense => "defense",
            }),
        ));
    }
    let row = rows[pick_index(rng, rows.len())?];

    let enforced = enforce(outcome, field, row);
    if let Some(penalty) = &enforced.penalty {
        tracing::debug!(index = penalty.index, label = %penalty.label, yards = penalty.yards, "flag thrown");
    }
    Ok(enforced)
}

/// Applies `row` to a resolved play.
pub fn enforce(outcome: Outcome, field: FieldState, row: &PenaltyRow) -> Outcome {
    let effect = row.effect();
    let start = i32::from(field.ball_spot);

    match (row.side, effect, outcome.turnover) {
        // Offensive foul on a play the defense already won: declined.
        (PenaltySide::Offense, e, true) if e != PenaltyEffect::ReplayDown => {
            let penalty = penalty_result(row, 0);
            Outcome { penalty: Some(penalty), ..outcome }
        }
        // Replayed downs, and defensive fouls that wipe out a turnover, are
        // enforced from the previous spot with the play voided.
        (_, PenaltyEffect::ReplayDown, _) | (PenaltySide::Defense, _, true) => {
            let yards = limit_yards(row, start);
            let end = (start + yards).clamp(0, 100);
            let net = end - start;
            Outcome {
                yards: net,
                touchdown: false,
                turnover: false,
                safety: end <= 0,
                out_of_bounds: false,
                first_down: row.side == PenaltySide::Defense
                    && (effect == PenaltyEffect::AutoFirstDown || net >= i32::from(field.distance)),
                penalty: Some(penalty_result(row, net)),
                ..outcome
            }
        }
        _ => {
            let play_end = start + outcome.yards;
            let yards = limit_yards(row, play_end);
            let end = (play_end + yards).clamp(0, 100);
            let net = end - start;
            let touchdown = end >= 100;
            Outcome {
                yards: net,
                touchdown,
                safety: end <= 0,
                first_down: touchdown
                    || (row.side == PenaltySide::Defense && effect == PenaltyEffect::AutoFirstDown)
                    || net >= i32::from(field.distance),
                penalty: Some(penalty_result(row, end - play_end)),
                ..outcome
            }
        }
    }
}

/// Defensive yardage never exceeds half the distance to the goal, so a
/// defensive foul cannot score on its own.
fn limit_yards(row: &PenaltyRow, from_spot: i32) -> i32 {
    match row.side {
        PenaltySide::Offense => row.yards,
        PenaltySide::Defense => row.yards.min((100 - from_spot).max(0) / 2),
    }
}

fn penalty_result(row: &PenaltyRow, yards: i32) -> PenaltyResult {
    PenaltyResult {
        index: row.index,
        label: row.label.clone(),
        side: row.side,
        table_yards: row.yards,
        yards,
        effect: row.effect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{embedded_tables, Table};
    use crate::engine::play_resolver::derive_outcome;
    use crate::engine::rng::ScriptedRandom;
    use crate::models::MatchupResult;

    const FIELD: FieldState = FieldState { down: 2, distance: 8, ball_spot: 40 };

    fn gain(yards: i32) -> Outcome {
        derive_outcome(MatchupResult::Gain { yards, out_of_bounds: false }, 7, FIELD)
    }

    #[test]
    fn test_no_flag_consumes_one_draw() {
        let tables = embedded_tables().unwrap();
        let mut rng = ScriptedRandom::new([0.5, 0.0, 0.0]);
        let out = maybe_penalty(gain(4), FIELD, &tables.penalty, &PenaltyConfig::default(), &mut rng).unwrap();
        assert_eq!(out, gain(4));
        assert_eq!(rng.consumed(), 1);
    }

    #[test]
    fn test_flag_draw_order() {
        let tables = embedded_tables().unwrap();
        // flag, offense, first offense row (false start, replay)
        let mut rng = ScriptedRandom::new([0.05, 0.2, 0.0]);
        let out = maybe_penalty(gain(4), FIELD, &tables.penalty, &PenaltyConfig::default(), &mut rng).unwrap();
        let penalty = out.penalty.clone().unwrap();
        assert_eq!(penalty.index, 1);
        assert_eq!(penalty.effect, PenaltyEffect::ReplayDown);
        assert_eq!(out.yards, -5);
        assert!(!out.first_down);
        assert_eq!(rng.consumed(), 3);
    }

    #[test]
    fn test_defensive_flag_picks_from_defense_rows() {
        let tables = embedded_tables().unwrap();
        // flag, defense, last defense row
        let mut rng = ScriptedRandom::new([0.0, 0.9, 0.99]);
        let out = maybe_penalty(gain(2), FIELD, &tables.penalty, &PenaltyConfig::default(), &mut rng).unwrap();
        assert_eq!(out.penalty.unwrap().side, PenaltySide::Defense);
    }

    #[test]
    fn test_replay_voids_play() {
        let tables = embedded_tables().unwrap();
        let offside = tables.penalty.entry(8).unwrap();
        let out = enforce(gain(30), FIELD, offside);
        assert_eq!(out.yards, 5);
        assert!(!out.touchdown);
        assert!(!out.first_down);
    }

    #[test]
    fn test_holding_adds_to_play_and_gives_first_down() {
        let tables = embedded_tables().unwrap();
        let holding = tables.penalty.entry(10).unwrap();
        let out = enforce(gain(1), FIELD, holding);
        assert_eq!(out.yards, 6);
        assert!(out.first_down);
        assert_eq!(out.penalty_effect(), PenaltyEffect::AutoFirstDown);
    }

    #[test]
    fn test_half_distance_near_goal() {
        let tables = embedded_tables().unwrap();
        let dpi = tables.penalty.entry(13).unwrap();
        let near_goal = FieldState { down: 1, distance: 6, ball_spot: 94 };
        let out = enforce(
            derive_outcome(MatchupResult::Incomplete, 6, near_goal),
            near_goal,
            dpi,
        );
        assert_eq!(out.penalty.as_ref().unwrap().yards, 3);
        assert_eq!(out.yards, 3);
        assert!(!out.touchdown);
    }

    #[test]
    fn test_offensive_foul_in_own_end_zone_is_safety() {
        let tables = embedded_tables().unwrap();
        let holding = tables.penalty.entry(3).unwrap();
        let backed_up = FieldState { down: 1, distance: 10, ball_spot: 6 };
        let out = enforce(
            derive_outcome(MatchupResult::Gain { yards: 1, out_of_bounds: false }, 5, backed_up),
            backed_up,
            holding,
        );
        assert!(out.safety);
        assert_eq!(out.yards, -6);
    }

    #[test]
    fn test_defensive_foul_wipes_out_interception() {
        let tables = embedded_tables().unwrap();
        let roughing = tables.penalty.entry(12).unwrap();
        let pick = derive_outcome(MatchupResult::Interception { yards: 10 }, 2, FIELD);
        let out = enforce(pick, FIELD, roughing);
        assert!(!out.turnover);
        assert_eq!(out.yards, 15);
        assert!(out.first_down);
    }

    #[test]
    fn test_offensive_foul_on_interception_declined() {
        let tables = embedded_tables().unwrap();
        let holding = tables.penalty.entry(3).unwrap();
        let pick = derive_outcome(MatchupResult::Interception { yards: 10 }, 2, FIELD);
        let out = enforce(pick.clone(), FIELD, holding);
        assert!(out.turnover);
        assert_eq!(out.yards, pick.yards);
        assert_eq!(out.penalty.unwrap().yards, 0);
    }

    #[test]
    fn test_missing_side_is_table_gap() {
        let yaml = "version: 1\nentries:\n  - { index: 1, label: Hold, side: offense, yards: -10 }\n";
        let table = PenaltyTable::from_yaml_str(yaml).unwrap();
        let mut rng = ScriptedRandom::new([0.0, 0.9, 0.0]);
        let err = maybe_penalty(gain(3), FIELD, &table, &PenaltyConfig::default(), &mut rng).unwrap_err();
        assert!(matches!(err, EngineError::TableGap { .. }));
    }
}
