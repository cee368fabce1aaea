//! Penalty occurrence policy.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Chance that any given scrimmage play draws a flag.
pub const PENALTY_OCCURRENCE: f64 = 0.10;

/// Share of flags thrown on the offense; the rest go against the defense.
pub const PENALTY_OFFENSE_SHARE: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PenaltyConfig {
    /// Flag probability per scrimmage play (default: 0.10)
    #[validate(range(min = 0.0, max = 1.0))]
    pub occurrence: f64,
    /// Offense share of flags (default: 0.5)
    #[validate(range(min = 0.0, max = 1.0))]
    pub offense_share: f64,
}

impl Default for PenaltyConfig {
    fn default() -> Self {
        Self { occurrence: PENALTY_OCCURRENCE, offense_share: PENALTY_OFFENSE_SHARE }
    }
}

impl PenaltyConfig {
    pub fn disabled() -> Self {
        Self { occurrence: 0.0, ..Self::default() }
    }
}
