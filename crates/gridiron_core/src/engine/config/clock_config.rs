//! Game clock: period lengths and seconds consumed per snap.

use serde::{Deserialize, Serialize};
use validator::Validate;

pub const QUARTER_SECONDS: u32 = 15 * 60;
pub const OVERTIME_SECONDS: u32 = 10 * 60;

/// Play that ends in bounds with the clock running.
pub const RUNNING_PLAY_SECONDS: u32 = 40;
/// Incomplete pass, out of bounds, change of possession, score or flag.
pub const STOPPED_PLAY_SECONDS: u32 = 8;
pub const KICKOFF_SECONDS: u32 = 6;
pub const PUNT_SECONDS: u32 = 10;
pub const FIELD_GOAL_SECONDS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ClockConfig {
    #[validate(range(min = 1))]
    pub quarter_seconds: u32,
    #[validate(range(min = 1))]
    pub overtime_seconds: u32,
    pub running_play: u32,
    pub stopped_play: u32,
    pub kickoff: u32,
    pub punt: u32,
    pub field_goal: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            quarter_seconds: QUARTER_SECONDS,
            overtime_seconds: OVERTIME_SECONDS,
            running_play: RUNNING_PLAY_SECONDS,
            stopped_play: STOPPED_PLAY_SECONDS,
            kickoff: KICKOFF_SECONDS,
            punt: PUNT_SECONDS,
            field_goal: FIELD_GOAL_SECONDS,
        }
    }
}
