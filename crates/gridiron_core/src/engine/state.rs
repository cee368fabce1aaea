//! Game state: quarter, clock, down and distance, ball position, possession,
//! score, and the decision point the machine is waiting on.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::config::{ClockConfig, FIRST_DOWN_DISTANCE, KICKOFF_SPOT};
use crate::error::{EngineError, Result};
use crate::models::{Score, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Quarter {
    First,
    Second,
    Third,
    Fourth,
    Overtime,
}

impl Quarter {
    pub fn number(self) -> u8 {
        match self {
            Quarter::First => 1,
            Quarter::Second => 2,
            Quarter::Third => 3,
            Quarter::Fourth => 4,
            Quarter::Overtime => 5,
        }
    }

    /// Regulation successor. Overtime is entered explicitly, never by `next`.
    pub fn next(self) -> Option<Quarter> {
        match self {
            Quarter::First => Some(Quarter::Second),
            Quarter::Second => Some(Quarter::Third),
            Quarter::Third => Some(Quarter::Fourth),
            Quarter::Fourth | Quarter::Overtime => None,
        }
    }

    pub fn is_second_half(self) -> bool {
        matches!(self, Quarter::Third | Quarter::Fourth | Quarter::Overtime)
    }

    pub fn label(self) -> &'static str {
        match self {
            Quarter::First => "Q1",
            Quarter::Second => "Q2",
            Quarter::Third => "Q3",
            Quarter::Fourth => "Q4",
            Quarter::Overtime => "OT",
        }
    }
}

/// Decision point the state machine is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    Kickoff { kicking: Side },
    Scrimmage,
    /// Try after a touchdown by `side`.
    Conversion { side: Side },
    GameOver,
}

/// Down, distance and spot for the offense, as the resolvers see them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldState {
    pub down: u8,
    pub distance: u8,
    /// Yards from the offense's own goal line (0) toward the opponent's (100).
    pub ball_spot: u8,
}

impl FieldState {
    pub fn yards_to_goal(&self) -> u8 {
        100u8.saturating_sub(self.ball_spot)
    }

    pub fn is_goal_to_go(&self) -> bool {
        u16::from(self.distance) >= u16::from(self.yards_to_goal())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GameState {
    pub quarter: Quarter,
    /// Seconds left in the current period.
    pub clock: u32,
    pub down: u8,
    pub distance: u8,
    /// Yards from `possession`'s own goal line.
    pub ball_spot: u8,
    pub possession: Side,
    pub score: Score,
    pub phase: Phase,
    /// Side that received the opening kickoff; it kicks to start the second half.
    pub opening_receiver: Side,
}

impl GameState {
    /// Opening kickoff by the away side.
    pub fn new(clock: &ClockConfig) -> Self {
        Self {
            quarter: Quarter::First,
            clock: clock.quarter_seconds,
            down: 1,
            distance: FIRST_DOWN_DISTANCE,
            ball_spot: KICKOFF_SPOT,
            possession: Side::Away,
            score: Score::default(),
            phase: Phase::Kickoff { kicking: Side::Away },
            opening_receiver: Side::Home,
        }
    }

    pub fn initial() -> Self {
        Self::new(&ClockConfig::default())
    }

    pub fn field(&self) -> FieldState {
        FieldState { down: self.down, distance: self.distance, ball_spot: self.ball_spot }
    }

    pub fn defense(&self) -> Side {
        self.possession.other()
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Fresh set of downs for `side` at `ball_spot`.
    pub fn first_and_ten(&mut self, side: Side, ball_spot: u8) {
        self.possession = side;
        self.ball_spot = ball_spot;
        self.down = 1;
        self.distance = first_down_distance(ball_spot);
        self.phase = Phase::Scrimmage;
    }

    /// Sets up a kickoff by `kicking` from its own kickoff spot.
    pub fn prepare_kickoff(&mut self, kicking: Side) {
        self.possession = kicking;
        self.ball_spot = KICKOFF_SPOT;
        self.down = 1;
        self.distance = FIRST_DOWN_DISTANCE;
        self.phase = Phase::Kickoff { kicking };
    }

    pub fn expect_phase(&self, operation: &str, expected: fn(&Phase) -> bool) -> Result<()> {
        if expected(&self.phase) {
            Ok(())
        } else {
            Err(EngineError::invalid_state(format!(
                "{operation} called during {:?}",
                self.phase
            )))
        }
    }

    /// Structural checks run after every transition.
    pub fn check_invariants(&self) -> Result<()> {
        if !(1..=4).contains(&self.down) {
            return Err(EngineError::invalid_state(format!("down {} outside 1..=4", self.down)));
        }
        if self.ball_spot > 100 {
            return Err(EngineError::invalid_state(format!(
                "ball spot {} outside 0..=100",
                self.ball_spot
            )));
        }
        match self.phase {
            Phase::Scrimmage => {
                if self.ball_spot == 0 || self.ball_spot == 100 {
                    return Err(EngineError::invalid_state(format!(
                        "scrimmage snap from a goal line (spot {})",
                        self.ball_spot
                    )));
                }
                if self.distance == 0 {
                    return Err(EngineError::invalid_state("distance to go is zero"));
                }
                if self.distance > 100 - self.ball_spot {
                    return Err(EngineError::invalid_state(format!(
                        "distance {} runs past the goal line from spot {}",
                        self.distance, self.ball_spot
                    )));
                }
            }
            Phase::Kickoff { kicking } if kicking != self.possession => {
                return Err(EngineError::invalid_state("kickoff phase with the receiver in possession"));
            }
            Phase::Conversion { side } if side != self.possession => {
                return Err(EngineError::invalid_state("conversion phase with the defense in possession"));
            }
            _ => {}
        }
        Ok(())
    }
}

/// Ten yards, or goal to go when the goal line is closer.
pub fn first_down_distance(ball_spot: u8) -> u8 {
    FIRST_DOWN_DISTANCE.min(100u8.saturating_sub(ball_spot)).max(1)
}
