//! Probabilities behind the coach AI's situational decisions.

use serde::{Deserialize, Serialize};
use validator::Validate;

// ========== Onside kicks ==========

/// No desperation: always kick deep.
pub const ONSIDE_BASE: f64 = 0.0;
/// Desperate, conservative coach.
pub const ONSIDE_DESPERATE: f64 = 0.3;
/// Desperate, aggressive coach.
pub const ONSIDE_DESPERATE_AGGRESSIVE: f64 = 0.7;

/// Tight finish: fourth quarter, this many seconds or fewer, one-score deficit.
pub const TIGHT_WINDOW_SECONDS: u32 = 120;
pub const TIGHT_MAX_DEFICIT: u32 = 8;
/// Desperation: fourth quarter, this many seconds or fewer, two-score deficit.
pub const DESPERATION_WINDOW_SECONDS: u32 = 240;
pub const DESPERATION_MIN_DEFICIT: u32 = 9;

// ========== Two-point tries ==========

pub const TWO_POINT_CHART: f64 = 0.45;
pub const TWO_POINT_CHART_AGGRESSIVE: f64 = 0.8;

// ========== Fourth down ==========

pub const FOURTH_DOWN_GO: f64 = 0.35;
pub const FOURTH_DOWN_GO_AGGRESSIVE: f64 = 0.75;
/// Short yardage for fourth-down aggression.
pub const FOURTH_DOWN_SHORT_YARDS: u8 = 2;
/// Ball spot from which the offense counts as "in opponent territory".
pub const FOURTH_DOWN_TERRITORY: u8 = 50;

// ========== Play calling ==========

/// Pass tendency shift on long yardage (7+) and when trailing late.
pub const LONG_YARDAGE_PASS_SHIFT: f64 = 0.2;
/// Pass tendency shift on short yardage (2 or less); applied negatively.
pub const SHORT_YARDAGE_RUN_SHIFT: f64 = 0.2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CoachPolicy {
    #[validate(range(min = 0.0, max = 1.0))]
    pub onside_base: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub onside_desperate: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub onside_desperate_aggressive: f64,
    pub tight_window_seconds: u32,
    pub tight_max_deficit: u32,
    pub desperation_window_seconds: u32,
    pub desperation_min_deficit: u32,

    #[validate(range(min = 0.0, max = 1.0))]
    pub two_point_chart: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub two_point_chart_aggressive: f64,
    /// Post-touchdown margins (scoring side minus opponent) where going for
    /// two is on the chart.
    pub two_point_margins: Vec<i32>,

    #[validate(range(min = 0.0, max = 1.0))]
    pub fourth_down_go: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub fourth_down_go_aggressive: f64,
    pub fourth_down_short_yards: u8,

    #[validate(range(min = 0.0, max = 1.0))]
    pub long_yardage_pass_shift: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub short_yardage_run_shift: f64,
}

impl Default for CoachPolicy {
    fn default() -> Self {
        Self {
            onside_base: ONSIDE_BASE,
            onside_desperate: ONSIDE_DESPERATE,
            onside_desperate_aggressive: ONSIDE_DESPERATE_AGGRESSIVE,
            tight_window_seconds: TIGHT_WINDOW_SECONDS,
            tight_max_deficit: TIGHT_MAX_DEFICIT,
            desperation_window_seconds: DESPERATION_WINDOW_SECONDS,
            desperation_min_deficit: DESPERATION_MIN_DEFICIT,
            two_point_chart: TWO_POINT_CHART,
            two_point_chart_aggressive: TWO_POINT_CHART_AGGRESSIVE,
            two_point_margins: vec![-10, -5, -2, 1, 5],
            fourth_down_go: FOURTH_DOWN_GO,
            fourth_down_go_aggressive: FOURTH_DOWN_GO_AGGRESSIVE,
            fourth_down_short_yards: FOURTH_DOWN_SHORT_YARDS,
            long_yardage_pass_shift: LONG_YARDAGE_PASS_SHIFT,
            short_yardage_run_shift: SHORT_YARDAGE_RUN_SHIFT,
        }
    }
}
