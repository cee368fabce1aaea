//! Scrimmage play resolution: one 2d6 roll against the matchup table.

use super::dice::roll_two_dice;
use super::rng::RandomSource;
use super::state::FieldState;
use crate::data::MatchupTable;
use crate::error::Result;
use crate::models::{DefenseCall, MatchupResult, Outcome, PlayDefinition};

/// Rolls 2d6, looks up `(play type, defense, sum)` and derives the outcome
/// flags from where the ball ends up.
///
/// Consumes exactly two draws. Yardage comes from the table unchanged; only
/// the resulting spot is clamped to the field.
pub fn resolve_play<R: RandomSource + ?Sized>(
    table: &MatchupTable,
    play: &PlayDefinition,
    defense: DefenseCall,
    field: FieldState,
    rng: &mut R,
) -> Result<Outcome> {
    let roll = roll_two_dice(rng)?.sum();
    let result = table.lookup(play.play_type, defense, roll)?;
    let outcome = derive_outcome(result, roll, field);

    tracing::debug!(
        play = %play.id,
        defense = defense.name(),
        roll,
        result = outcome.result.label(),
        yards = outcome.yards,
        "play resolved"
    );
    Ok(outcome)
}

/// Outcome flags for a table result applied at `field`.
pub fn derive_outcome(result: MatchupResult, roll: u8, field: FieldState) -> Outcome {
    let start = i32::from(field.ball_spot);
    let end = (start + result.yards()).clamp(0, 100);
    let yards = end - start;
    let turnover = result.is_turnover();
    let out_of_bounds = matches!(result, MatchupResult::Gain { out_of_bounds: true, .. });

    let (touchdown, safety) = if turnover {
        // Defense scores when the ball ends in the offense's end zone; a
        // turnover in the defense's own end zone is a touchback.
        (end <= 0, false)
    } else {
        (end >= 100, end <= 0)
    };

    Outcome {
        result,
        roll,
        yards,
        touchdown,
        turnover,
        safety,
        out_of_bounds,
        first_down: !turnover && yards >= i32::from(field.distance),
        penalty: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::embedded_tables;
    use crate::engine::rng::ScriptedRandom;
    use crate::error::EngineError;
    use crate::models::PlayType;

    fn field(down: u8, distance: u8, ball_spot: u8) -> FieldState {
        FieldState { down, distance, ball_spot }
    }

    #[test]
    fn test_run_into_run_stop_on_seven() {
        let tables = embedded_tables().unwrap();
        let play = tables.catalog.get("inside_zone").unwrap().clone();
        let mut rng = ScriptedRandom::from_dice([3, 4]);
        let outcome =
            resolve_play(&tables.matchup, &play, DefenseCall::RunStop, field(1, 10, 25), &mut rng).unwrap();
        assert_eq!(outcome.roll, 7);
        assert_eq!(outcome.yards, 2);
        assert!(!outcome.first_down);
        assert!(!outcome.stops_clock());
        assert_eq!(rng.consumed(), 2);
    }

    /// Every (play type, defense, roll) cell resolves to exactly its table
    /// entry, with only the yardage clamped to the field.
    #[test]
    fn test_every_cell_resolves_to_its_entry() {
        let tables = embedded_tables().unwrap();
        for play_type in PlayType::ALL {
            let play = tables.catalog.plays().iter().find(|p| p.play_type == play_type).unwrap().clone();
            for defense in DefenseCall::ALL {
                for roll in 2u8..=12 {
                    let first = roll.saturating_sub(6).max(1);
                    let entry = tables.matchup.lookup(play_type, defense, roll).unwrap();
                    for spot in [5u8, 50, 95] {
                        let mut rng = ScriptedRandom::from_dice([first, roll - first]);
                        let outcome =
                            resolve_play(&tables.matchup, &play, defense, field(1, 10, spot), &mut rng).unwrap();
                        let start = i32::from(spot);
                        assert_eq!(outcome.roll, roll);
                        assert_eq!(outcome.result, entry, "{play_type:?} vs {defense:?} on {roll}");
                        assert_eq!(outcome.yards, (start + entry.yards()).clamp(0, 100) - start);
                        assert_eq!(rng.consumed(), 2);
                    }
                }
            }
        }
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let tables = embedded_tables().unwrap();
        let play = tables.catalog.get("curl_flat").unwrap().clone();
        let run = || {
            let mut rng = ScriptedRandom::from_dice([5, 6]);
            resolve_play(&tables.matchup, &play, DefenseCall::Prevent, field(2, 7, 40), &mut rng).unwrap()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_touchdown_clamps_spot() {
        let outcome = derive_outcome(MatchupResult::Gain { yards: 30, out_of_bounds: false }, 12, field(1, 10, 85));
        assert!(outcome.touchdown);
        assert_eq!(outcome.yards, 15);
        assert!(outcome.first_down);
        assert!(outcome.stops_clock());
    }

    #[test]
    fn test_sack_in_end_zone_is_safety() {
        let outcome = derive_outcome(MatchupResult::Sack { yards: -8 }, 3, field(3, 10, 4));
        assert!(outcome.safety);
        assert!(!outcome.touchdown);
        assert_eq!(outcome.yards, -4);
    }

    #[test]
    fn test_turnover_scoring_by_spot() {
        let pick_six = derive_outcome(MatchupResult::Interception { yards: -30 }, 2, field(1, 10, 20));
        assert!(pick_six.touchdown && pick_six.turnover);
        assert!(!pick_six.first_down);

        let touchback = derive_outcome(MatchupResult::Interception { yards: 40 }, 2, field(1, 10, 70));
        assert!(touchback.turnover && !touchback.touchdown && !touchback.safety);
    }

    #[test]
    fn test_exhausted_source_propagates() {
        let tables = embedded_tables().unwrap();
        let play = tables.catalog.get("inside_zone").unwrap().clone();
        let mut rng = ScriptedRandom::from_dice([3]);
        let err = resolve_play(&tables.matchup, &play, DefenseCall::Blitz, field(1, 10, 25), &mut rng).unwrap_err();
        assert_eq!(err, EngineError::RandomExhausted { consumed: 1 });
    }
}
