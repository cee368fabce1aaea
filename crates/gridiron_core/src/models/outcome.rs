//! Transient results produced by the resolvers and consumed by the state machine.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single cell of the matchup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum MatchupResult {
    /// Ball carrier gains (or loses) yards.
    Gain {
        yards: i32,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        out_of_bounds: bool,
    },
    Incomplete,
    /// Quarterback sacked; yards are never positive.
    Sack { yards: i32 },
    /// Pass intercepted `yards` past the line of scrimmage.
    Interception { yards: i32 },
    /// Ball carrier fumbles after `yards`, defense recovers.
    Fumble { yards: i32 },
}

impl MatchupResult {
    pub fn yards(&self) -> i32 {
        match *self {
            MatchupResult::Gain { yards, .. }
            | MatchupResult::Sack { yards }
            | MatchupResult::Interception { yards }
            | MatchupResult::Fumble { yards } => yards,
            MatchupResult::Incomplete => 0,
        }
    }

    pub fn is_turnover(&self) -> bool {
        matches!(self, MatchupResult::Interception { .. } | MatchupResult::Fumble { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchupResult::Gain { .. } => "gain",
            MatchupResult::Incomplete => "incomplete",
            MatchupResult::Sack { .. } => "sack",
            MatchupResult::Interception { .. } => "interception",
            MatchupResult::Fumble { .. } => "fumble",
        }
    }
}

/// Which unit committed a penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PenaltySide {
    Offense,
    Defense,
}

/// Down/distance rule a penalty enforces on top of its yardage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyEffect {
    None,
    LossOfDown,
    ReplayDown,
    AutoFirstDown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PenaltyResult {
    pub index: u32,
    pub label: String,
    pub side: PenaltySide,
    /// Table yardage before enforcement limits.
    pub table_yards: i32,
    /// Yardage actually enforced (half-the-distance applied).
    pub yards: i32,
    pub effect: PenaltyEffect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Outcome {
    pub result: MatchupResult,
    pub roll: u8,
    /// Net yards from the line of scrimmage, clamped to the field.
    pub yards: i32,
    pub touchdown: bool,
    pub turnover: bool,
    pub safety: bool,
    pub out_of_bounds: bool,
    pub first_down: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penalty: Option<PenaltyResult>,
}

impl Outcome {
    pub fn penalty_effect(&self) -> PenaltyEffect {
        self.penalty.as_ref().map(|p| p.effect).unwrap_or(PenaltyEffect::None)
    }

    pub fn stops_clock(&self) -> bool {
        self.out_of_bounds
            || self.turnover
            || self.touchdown
            || self.safety
            || matches!(self.result, MatchupResult::Incomplete)
            || self.penalty.is_some()
    }
}
