//! # Engine Configuration
//!
//! Every tuning constant the engine uses lives here, grouped by concern.
//! Defaults come from named constants in the sub-modules; presets cover the
//! common variations.
//!
//! ```rust
//! use gridiron_core::engine::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! assert!(config.validate().is_ok());
//! let arcade = EngineConfig::arcade();
//! assert!(arcade.penalty.occurrence < config.penalty.occurrence);
//! ```

mod clock_config;
mod coach_policy;
mod penalty_config;
mod rules_config;

pub use clock_config::*;
pub use coach_policy::*;
pub use penalty_config::*;
pub use rules_config::*;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{EngineError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, Validate)]
#[serde(default)]
pub struct EngineConfig {
    #[validate]
    pub penalty: PenaltyConfig,
    #[validate]
    pub clock: ClockConfig,
    /// Coach AI decision probabilities
    #[validate]
    pub coach: CoachPolicy,
    #[validate]
    pub rules: RulesConfig,
}

impl EngineConfig {
    /// Standard rules (default)
    pub fn realistic() -> Self {
        Self::default()
    }

    /// Flags never thrown. Useful for isolating play and kick outcomes.
    pub fn no_penalties() -> Self {
        Self { penalty: PenaltyConfig::disabled(), ..Self::default() }
    }

    /// Fewer flags, shorter quarters, bolder coaches.
    pub fn arcade() -> Self {
        let mut cfg = Self::default();
        cfg.penalty.occurrence = 0.04;
        cfg.clock.quarter_seconds = 5 * 60;
        cfg.clock.running_play = 25;
        cfg.coach.fourth_down_go = 0.5;
        cfg.coach.fourth_down_go_aggressive = 0.9;
        cfg.coach.two_point_chart = 0.6;
        cfg.rules.onside_recovery = 0.25;
        cfg
    }

    /// Checks every probability and duration, reporting the first problem as
    /// [`EngineError::Config`].
    pub fn validate(&self) -> Result<()> {
        Validate::validate(self).map_err(|e| EngineError::Config(e.to_string()))?;
        if self.coach.tight_window_seconds > self.coach.desperation_window_seconds {
            return Err(EngineError::Config(format!(
                "coach.tight_window_seconds ({}) exceeds coach.desperation_window_seconds ({})",
                self.coach.tight_window_seconds, self.coach.desperation_window_seconds
            )));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json).map_err(|e| EngineError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(yaml).map_err(|e| EngineError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

// ========== Tests ==========

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = EngineConfig::default();
        assert!((cfg.penalty.occurrence - 0.10).abs() < 1e-9);
        assert!((cfg.coach.onside_desperate_aggressive - 0.7).abs() < 1e-9);
        assert!((cfg.coach.onside_desperate - 0.3).abs() < 1e-9);
        assert_eq!(cfg.clock.quarter_seconds, 900);
        assert!(cfg.rules.overtime);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_presets_validate() {
        assert!(EngineConfig::realistic().validate().is_ok());
        assert!(EngineConfig::no_penalties().validate().is_ok());
        assert!(EngineConfig::arcade().validate().is_ok());
        assert_eq!(EngineConfig::no_penalties().penalty.occurrence, 0.0);
    }

    #[test]
    fn test_arcade_is_shorter_and_bolder() {
        let realistic = EngineConfig::realistic();
        let arcade = EngineConfig::arcade();
        assert!(arcade.clock.quarter_seconds < realistic.clock.quarter_seconds);
        assert!(arcade.coach.fourth_down_go > realistic.coach.fourth_down_go);
        assert!(arcade.penalty.occurrence < realistic.penalty.occurrence);
    }

    #[test]
    fn test_probability_out_of_range_rejected() {
        let mut cfg = EngineConfig::default();
        cfg.penalty.occurrence = 1.5;
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, EngineError::Config(ref msg) if msg.contains("occurrence")));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_inverted_windows_rejected() {
        let mut cfg = EngineConfig::default();
        cfg.coach.tight_window_seconds = 300;
        assert!(matches!(cfg.validate(), Err(EngineError::Config(_))));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg = EngineConfig::from_json_str(r#"{"penalty": {"occurrence": 0.2}}"#).unwrap();
        assert!((cfg.penalty.occurrence - 0.2).abs() < 1e-9);
        assert!((cfg.penalty.offense_share - 0.5).abs() < 1e-9);
        assert_eq!(cfg.clock, ClockConfig::default());
    }

    #[test]
    fn test_yaml_overtime_toggle() {
        let cfg = EngineConfig::from_yaml_str("rules:\n  overtime: false\n").unwrap();
        assert!(!cfg.rules.overtime);
        assert!(matches!(
            EngineConfig::from_yaml_str("penalty: [1, 2]"),
            Err(EngineError::Config(_))
        ));
    }
}
