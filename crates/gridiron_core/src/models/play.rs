//! Play catalog types: what the offense calls and what the defense calls.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PlayType {
    Run,
    Pass,
    PlayAction,
    Trick,
}

impl PlayType {
    pub const ALL: [PlayType; 4] =
        [PlayType::Run, PlayType::Pass, PlayType::PlayAction, PlayType::Trick];

    pub fn name(self) -> &'static str {
        match self {
            PlayType::Run => "run",
            PlayType::Pass => "pass",
            PlayType::PlayAction => "play_action",
            PlayType::Trick => "trick",
        }
    }

    /// Coarse grouping the coach AI uses for run/pass tendencies.
    pub fn family(self) -> PlayFamily {
        match self {
            PlayType::Run | PlayType::Trick => PlayFamily::Ground,
            PlayType::Pass | PlayType::PlayAction => PlayFamily::Air,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayFamily {
    Ground,
    Air,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Depth {
    Short,
    Mid,
    Deep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RiskProfile {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DefenseCall {
    RunStop,
    PassCoverage,
    Blitz,
    Prevent,
}

impl DefenseCall {
    pub const ALL: [DefenseCall; 4] =
        [DefenseCall::RunStop, DefenseCall::PassCoverage, DefenseCall::Blitz, DefenseCall::Prevent];

    pub fn name(self) -> &'static str {
        match self {
            DefenseCall::RunStop => "run_stop",
            DefenseCall::PassCoverage => "pass_coverage",
            DefenseCall::Blitz => "blitz",
            DefenseCall::Prevent => "prevent",
        }
    }
}

/// Immutable catalog entry for an offensive play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PlayDefinition {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub play_type: PlayType,
    pub depth: Depth,
    pub risk: RiskProfile,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub perimeter: bool,
}
