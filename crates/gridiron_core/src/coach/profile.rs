//! Coach profiles: a name plus the tendencies the AI consults.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{EngineError, Result};

pub const AGGRESSIVE_YAML: &str = include_str!("../../../../data/coaches/aggressive.yaml");
pub const CONSERVATIVE_YAML: &str = include_str!("../../../../data/coaches/conservative.yaml");

/// Unknown keys in a profile document are ignored so profiles written for
/// richer front ends still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(default)]
pub struct CoachProfile {
    pub name: String,
    pub onside_aggressive: bool,
    pub two_point_aggressive: bool,
    pub fourth_down_aggressive: bool,
    /// Base probability of calling a pass (default: 0.5)
    #[validate(range(min = 0.0, max = 1.0))]
    pub pass_tendency: f64,
}

impl Default for CoachProfile {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            onside_aggressive: false,
            two_point_aggressive: false,
            fourth_down_aggressive: false,
            pass_tendency: 0.5,
        }
    }
}

impl CoachProfile {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let profile: Self = serde_yaml::from_str(yaml).map_err(|e| EngineError::Config(e.to_string()))?;
        profile.checked()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let profile: Self = serde_json::from_str(json).map_err(|e| EngineError::Config(e.to_string()))?;
        profile.checked()
    }

    pub fn checked(self) -> Result<Self> {
        self.validate().map_err(|e| EngineError::Config(format!("coach `{}`: {e}", self.name)))?;
        Ok(self)
    }

    /// Built-in profiles by name: `aggressive` or `conservative`.
    pub fn builtin(name: &str) -> Result<Self> {
        match name {
            "aggressive" => Self::from_yaml_str(AGGRESSIVE_YAML),
            "conservative" => Self::from_yaml_str(CONSERVATIVE_YAML),
            other => Err(EngineError::Config(format!("unknown built-in coach `{other}`"))),
        }
    }
}
