//! Field geometry and rule constants.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Yards needed for a new set of downs.
pub const FIRST_DOWN_DISTANCE: u8 = 10;
/// Receiving team's spot after a kickoff touchback.
pub const KICKOFF_TOUCHBACK_SPOT: u8 = 25;
/// Spot after a touchback on a punt or turnover in the end zone.
pub const TOUCHBACK_SPOT: u8 = 20;
/// Kicking team's own yard line on kickoffs.
pub const KICKOFF_SPOT: u8 = 35;
/// An onside kick must travel ten yards.
pub const ONSIDE_KICK_YARDS: u8 = 10;
/// Chance the kicking team recovers an onside kick.
pub const ONSIDE_RECOVERY: f64 = 0.15;
pub const PUNT_NET_YARDS: u8 = 40;
/// End zone depth plus snap distance added to the line of scrimmage.
pub const FIELD_GOAL_SNAP_YARDS: u8 = 17;
/// Line of scrimmage for the try after a touchdown (two-point attempts).
pub const CONVERSION_SPOT: u8 = 98;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RulesConfig {
    /// Tied games after the fourth quarter go to sudden-death overtime.
    pub overtime: bool,
    #[validate(range(min = 0.0, max = 1.0))]
    pub onside_recovery: f64,
    #[validate(range(min = 1, max = 99))]
    pub punt_net_yards: u8,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self { overtime: true, onside_recovery: ONSIDE_RECOVERY, punt_net_yards: PUNT_NET_YARDS }
    }
}
