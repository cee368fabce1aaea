//! Pure state transitions.
//!
//! Each `apply_*` function takes the current state and a resolved result,
//! and returns the next state plus the events it produced. Nothing here
//! draws randomness; the resolvers already did.

use super::config::{
    EngineConfig, CONVERSION_SPOT, KICKOFF_SPOT, KICKOFF_TOUCHBACK_SPOT, ONSIDE_KICK_YARDS, TOUCHBACK_SPOT,
};
use super::kicking::KickoffResult;
use super::state::{GameState, Phase, Quarter};
use crate::error::{EngineError, Result};
use crate::models::{
    ConversionKind, GameEvent, KickoffKind, Outcome, PenaltyEffect, PenaltySide, ScoringPlay, Side,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: GameState,
    pub events: Vec<GameEvent>,
}

impl Transition {
    fn begin(state: &GameState) -> Self {
        Self { state: state.clone(), events: Vec::new() }
    }

    fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    fn down_update(&mut self) {
        let s = &self.state;
        self.events.push(GameEvent::DownUpdate {
            possession: s.possession,
            down: s.down,
            distance: s.distance,
            ball_spot: s.ball_spot,
        });
    }

    /// Adds points. Returns `true` when the score ended the game (sudden death).
    fn score(&mut self, side: Side, play: ScoringPlay) -> bool {
        self.state.score.add(side, play.points());
        let score = self.state.score;
        tracing::info!(side = side.name(), ?play, home = score.home, away = score.away, "score");
        self.push(GameEvent::ScoreUpdate { scoring: side, play, home: score.home, away: score.away });
        if self.state.quarter == Quarter::Overtime {
            self.game_over();
            return true;
        }
        false
    }

    fn game_over(&mut self) {
        self.state.phase = Phase::GameOver;
        let score = self.state.score;
        tracing::info!(home = score.home, away = score.away, "game over");
        self.push(GameEvent::GameOver { home: score.home, away: score.away, winner: score.leader() });
    }

    /// Runs the clock and ends the period when it hits zero. A pending try
    /// after a touchdown is always played first.
    fn tick(&mut self, seconds: u32, config: &EngineConfig) {
        if self.state.is_over() {
            return;
        }
        if seconds > 0 {
            self.state.clock = self.state.clock.saturating_sub(seconds);
            self.push(GameEvent::ClockUpdate { quarter: self.state.quarter, clock: self.state.clock });
        }
        if self.state.clock == 0 && !matches!(self.state.phase, Phase::Conversion { .. }) {
            self.end_period(config);
        }
    }

    fn end_period(&mut self, config: &EngineConfig) {
        let ended = self.state.quarter;
        tracing::info!(quarter = ended.label(), "end of period");
        self.push(GameEvent::QuarterEnd { quarter: ended });

        let (next, clock) = match ended {
            Quarter::First | Quarter::Third => (ended.next(), config.clock.quarter_seconds),
            Quarter::Second => {
                self.state.prepare_kickoff(self.state.opening_receiver);
                (Some(Quarter::Third), config.clock.quarter_seconds)
            }
            Quarter::Fourth if self.state.score.is_tied() && config.rules.overtime => {
                self.state.prepare_kickoff(self.state.opening_receiver);
                (Some(Quarter::Overtime), config.clock.overtime_seconds)
            }
            Quarter::Fourth | Quarter::Overtime => (None, 0),
        };

        match next {
            Some(quarter) => {
                self.state.quarter = quarter;
                self.state.clock = clock;
                self.push(GameEvent::ClockUpdate { quarter, clock });
            }
            None => self.game_over(),
        }
    }

    fn finish(self) -> Result<Self> {
        self.state.check_invariants()?;
        Ok(self)
    }
}

fn expect_scrimmage(state: &GameState, operation: &str) -> Result<()> {
    state.expect_phase(operation, |p| matches!(p, Phase::Scrimmage))
}

/// Applies a resolved scrimmage play.
pub fn apply_outcome(state: &GameState, outcome: &Outcome, config: &EngineConfig) -> Result<Transition> {
    expect_scrimmage(state, "apply_outcome")?;
    let mut t = Transition::begin(state);
    let offense = state.possession;
    let defense = offense.other();

    if let Some(penalty) = &outcome.penalty {
        let against = match penalty.side {
            PenaltySide::Offense => offense,
            PenaltySide::Defense => defense,
        };
        t.push(GameEvent::Penalty { against, penalty: penalty.clone() });
    }

    let end = i32::from(state.ball_spot) + outcome.yards;
    if !(0..=100).contains(&end) {
        return Err(EngineError::invalid_state(format!(
            "outcome moves the ball to {end} from spot {}",
            state.ball_spot
        )));
    }
    let end = end as u8;

    if outcome.safety {
        if !t.score(defense, ScoringPlay::Safety) {
            // The team scored upon kicks off.
            t.state.prepare_kickoff(offense);
        }
    } else if outcome.touchdown {
        let scorer = if outcome.turnover { defense } else { offense };
        if outcome.turnover {
            t.push(GameEvent::Turnover { to: defense, ball_spot: 100 - end, on_downs: false });
        }
        if !t.score(scorer, ScoringPlay::Touchdown) {
            t.state.possession = scorer;
            t.state.ball_spot = CONVERSION_SPOT;
            t.state.down = 1;
            t.state.distance = 100 - CONVERSION_SPOT;
            t.state.phase = Phase::Conversion { side: scorer };
        }
    } else if outcome.turnover {
        let spot = if end >= 100 { TOUCHBACK_SPOT } else { 100 - end };
        t.state.first_and_ten(defense, spot);
        t.push(GameEvent::Turnover { to: defense, ball_spot: spot, on_downs: false });
        t.down_update();
    } else {
        advance_downs(&mut t, state, outcome, end);
    }

    let seconds = if outcome.stops_clock() { config.clock.stopped_play } else { config.clock.running_play };
    t.tick(seconds, config);
    t.finish()
}

fn advance_downs(t: &mut Transition, before: &GameState, outcome: &Outcome, end: u8) {
    let offense = before.possession;
    let effect = outcome.penalty_effect();
    let remaining = i32::from(before.distance) - outcome.yards;
    let to_goal = i32::from(100 - end);

    if effect == PenaltyEffect::ReplayDown {
        if remaining <= 0 {
            t.state.first_and_ten(offense, end);
        } else {
            t.state.ball_spot = end;
            t.state.distance = remaining.min(to_goal) as u8;
        }
    } else if outcome.first_down || remaining <= 0 {
        t.state.first_and_ten(offense, end);
    } else {
        let extra = u8::from(effect == PenaltyEffect::LossOfDown);
        let next_down = before.down + 1 + extra;
        if next_down > 4 {
            let spot = 100 - end;
            tracing::debug!(side = offense.other().name(), spot, "turnover on downs");
            t.state.first_and_ten(offense.other(), spot);
            t.push(GameEvent::Turnover { to: offense.other(), ball_spot: spot, on_downs: true });
        } else {
            t.state.down = next_down;
            t.state.ball_spot = end;
            t.state.distance = remaining.min(to_goal) as u8;
        }
    }
    t.down_update();
}

/// Applies a resolved kickoff. Normal kicks are touchbacks; onside kicks
/// travel ten yards and belong to whoever recovered them.
pub fn apply_kickoff(state: &GameState, result: KickoffResult, config: &EngineConfig) -> Result<Transition> {
    let kicking = match state.phase {
        Phase::Kickoff { kicking } => kicking,
        other => return Err(EngineError::invalid_state(format!("apply_kickoff called during {other:?}"))),
    };
    let receiving = kicking.other();
    let onside_spot = KICKOFF_SPOT + ONSIDE_KICK_YARDS;
    let (side, spot) = match (result.kind, result.recovered) {
        (KickoffKind::Normal, _) => (receiving, KICKOFF_TOUCHBACK_SPOT),
        (KickoffKind::Onside, true) => (kicking, onside_spot),
        (KickoffKind::Onside, false) => (receiving, 100 - onside_spot),
    };

    let mut t = Transition::begin(state);
    t.state.first_and_ten(side, spot);
    t.push(GameEvent::Kickoff { kicking, kind: result.kind, recovered_by: side, ball_spot: spot });
    t.down_update();
    t.tick(config.clock.kickoff, config);
    t.finish()
}

/// Applies a field goal attempt of `distance` yards.
pub fn apply_field_goal(state: &GameState, distance: u8, good: bool, config: &EngineConfig) -> Result<Transition> {
    expect_scrimmage(state, "apply_field_goal")?;
    let offense = state.possession;
    let mut t = Transition::begin(state);
    t.push(GameEvent::FieldGoal { side: offense, distance, good });

    if good {
        if !t.score(offense, ScoringPlay::FieldGoal) {
            t.state.prepare_kickoff(offense);
        }
    } else {
        // Defense takes over at the spot of the kick, never inside its 20.
        let spot = (107 - i32::from(state.ball_spot)).clamp(i32::from(TOUCHBACK_SPOT), 99) as u8;
        t.state.first_and_ten(offense.other(), spot);
        t.down_update();
    }
    t.tick(config.clock.field_goal, config);
    t.finish()
}

/// Punts for the configured net yardage; reaching the end zone is a touchback.
pub fn apply_punt(state: &GameState, config: &EngineConfig) -> Result<Transition> {
    expect_scrimmage(state, "apply_punt")?;
    let offense = state.possession;
    let landing = u16::from(state.ball_spot) + u16::from(config.rules.punt_net_yards);
    let (touchback, spot) = if landing >= 100 { (true, TOUCHBACK_SPOT) } else { (false, (100 - landing) as u8) };

    let mut t = Transition::begin(state);
    t.state.first_and_ten(offense.other(), spot);
    t.push(GameEvent::Punt { side: offense, receiving_spot: spot, touchback });
    t.down_update();
    t.tick(config.clock.punt, config);
    t.finish()
}

/// Applies the try after a touchdown, then sets up the scoring side's kickoff.
pub fn apply_conversion(
    state: &GameState,
    kind: ConversionKind,
    good: bool,
    config: &EngineConfig,
) -> Result<Transition> {
    let side = match state.phase {
        Phase::Conversion { side } => side,
        other => return Err(EngineError::invalid_state(format!("apply_conversion called during {other:?}"))),
    };
    let mut t = Transition::begin(state);
    t.push(GameEvent::Conversion { side, kind, good });
    if good {
        let play = match kind {
            ConversionKind::Kick => ScoringPlay::ExtraPoint,
            ConversionKind::TwoPoint => ScoringPlay::TwoPoint,
        };
        t.score(side, play);
    }
    t.state.prepare_kickoff(side);
    t.tick(0, config);
    t.finish()
}
