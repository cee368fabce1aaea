//! Discrete choices made at decision points, either by a caller or the coach AI.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum KickoffKind {
    Normal,
    Onside,
}

/// `{ "kind": "kickoff", "type": "normal" | "onside" }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename = "kickoff")]
pub struct KickoffDecision {
    #[serde(rename = "type")]
    pub kick_type: KickoffKind,
}

impl KickoffDecision {
    pub fn normal() -> Self {
        Self { kick_type: KickoffKind::Normal }
    }

    pub fn onside() -> Self {
        Self { kick_type: KickoffKind::Onside }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConversionKind {
    Kick,
    TwoPoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FourthDownChoice {
    GoForIt,
    FieldGoal,
    Punt,
}
