//! Outbound domain events.
//!
//! The engine only produces these; presentation, narration and any bus
//! transport live outside the core and consume them in order.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::decision::{ConversionKind, KickoffKind};
use super::outcome::{Outcome, PenaltyResult};
use super::play::DefenseCall;
use super::side::Side;
use crate::engine::state::Quarter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScoringPlay {
    Touchdown,
    FieldGoal,
    Safety,
    ExtraPoint,
    TwoPoint,
}

impl ScoringPlay {
    pub fn points(self) -> u32 {
        match self {
            ScoringPlay::Touchdown => 6,
            ScoringPlay::FieldGoal => 3,
            ScoringPlay::Safety | ScoringPlay::TwoPoint => 2,
            ScoringPlay::ExtraPoint => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    Log {
        message: String,
    },
    /// Plays available to the side that just gained possession.
    HandUpdate {
        side: Side,
        plays: Vec<String>,
    },
    Kickoff {
        kicking: Side,
        kind: KickoffKind,
        recovered_by: Side,
        ball_spot: u8,
    },
    PlayResolved {
        offense: Side,
        play: String,
        defense: DefenseCall,
        outcome: Outcome,
    },
    Penalty {
        against: Side,
        penalty: PenaltyResult,
    },
    Turnover {
        to: Side,
        ball_spot: u8,
        on_downs: bool,
    },
    FieldGoal {
        side: Side,
        distance: u8,
        good: bool,
    },
    Punt {
        side: Side,
        receiving_spot: u8,
        touchback: bool,
    },
    Conversion {
        side: Side,
        kind: ConversionKind,
        good: bool,
    },
    ScoreUpdate {
        scoring: Side,
        play: ScoringPlay,
        home: u32,
        away: u32,
    },
    DownUpdate {
        possession: Side,
        down: u8,
        distance: u8,
        ball_spot: u8,
    },
    ClockUpdate {
        quarter: Quarter,
        clock: u32,
    },
    QuarterEnd {
        quarter: Quarter,
    },
    GameOver {
        home: u32,
        away: u32,
        winner: Option<Side>,
    },
}

impl GameEvent {
    pub fn log(message: impl Into<String>) -> Self {
        GameEvent::Log { message: message.into() }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::Log { .. } => "log",
            GameEvent::HandUpdate { .. } => "hand_update",
            GameEvent::Kickoff { .. } => "kickoff",
            GameEvent::PlayResolved { .. } => "play_resolved",
            GameEvent::Penalty { .. } => "penalty",
            GameEvent::Turnover { .. } => "turnover",
            GameEvent::FieldGoal { .. } => "field_goal",
            GameEvent::Punt { .. } => "punt",
            GameEvent::Conversion { .. } => "conversion",
            GameEvent::ScoreUpdate { .. } => "score_update",
            GameEvent::DownUpdate { .. } => "down_update",
            GameEvent::ClockUpdate { .. } => "clock_update",
            GameEvent::QuarterEnd { .. } => "quarter_end",
            GameEvent::GameOver { .. } => "game_over",
        }
    }
}
