//! Single-game JSON entry point.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::coach::CoachProfile;
use crate::data::{embedded_tables, TableStore, SCHEMA_VERSION};
use crate::engine::{EngineConfig, GameEngine, Quarter};
use crate::error::{EngineError, Result};
use crate::models::{GameEvent, Side};

/// Decision points allowed when a request does not set `max_plays`.
pub const DEFAULT_MAX_STEPS: usize = 5_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRequest {
    pub schema_version: u32,
    pub seed: u64,
    #[serde(default)]
    pub home_coach: Option<CoachProfile>,
    #[serde(default)]
    pub away_coach: Option<CoachProfile>,
    #[serde(default)]
    pub config: Option<EngineConfig>,
    /// Cap on decision points; a capped game reports `completed: false`.
    #[serde(default)]
    pub max_plays: Option<usize>,
}

impl GameRequest {
    pub fn new(seed: u64) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            seed,
            home_coach: None,
            away_coach: None,
            config: None,
            max_plays: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResponse {
    pub schema_version: u32,
    pub seed: u64,
    pub home_score: u32,
    pub away_score: u32,
    pub winner: Option<Side>,
    pub overtime: bool,
    pub completed: bool,
    /// Scrimmage snaps run.
    pub plays: usize,
    /// SHA-256 of the serialized event stream.
    pub fingerprint: String,
    pub events: Vec<GameEvent>,
}

/// Hex SHA-256 of the JSON-serialized events. Equal fingerprints mean the
/// games played out identically.
pub fn fingerprint(events: &[GameEvent]) -> Result<String> {
    let bytes = serde_json::to_vec(events)
        .map_err(|e| EngineError::invalid_state(format!("event serialization failed: {e}")))?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let digest = hasher.finalize();
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    Ok(out)
}

pub fn simulate_game(request: &GameRequest, tables: Arc<TableStore>) -> Result<GameResponse> {
    if request.schema_version != SCHEMA_VERSION {
        return Err(EngineError::Config(format!(
            "unsupported schema version {} (expected {SCHEMA_VERSION})",
            request.schema_version
        )));
    }
    let home = request.home_coach.clone().unwrap_or_default().checked()?;
    let away = request.away_coach.clone().unwrap_or_default().checked()?;
    let config = request.config.clone().unwrap_or_default();

    let mut engine = GameEngine::with_seed(tables, home, away, config, request.seed)?;
    engine.play_to_completion(request.max_plays.unwrap_or(DEFAULT_MAX_STEPS))?;

    let events = engine.drain_events();
    let state = engine.state();
    tracing::info!(
        seed = request.seed,
        home = state.score.home,
        away = state.score.away,
        events = events.len(),
        "game simulated"
    );
    Ok(GameResponse {
        schema_version: SCHEMA_VERSION,
        seed: request.seed,
        home_score: state.score.home,
        away_score: state.score.away,
        winner: state.score.leader(),
        overtime: state.quarter == Quarter::Overtime,
        completed: state.is_over(),
        plays: engine.snaps(),
        fingerprint: fingerprint(&events)?,
        events,
    })
}

/// Parses a [`GameRequest`], plays the game on the embedded tables and
/// returns the [`GameResponse`] as JSON.
pub fn simulate_game_json(request_json: &str) -> Result<String> {
    let request: GameRequest = serde_json::from_str(request_json)
        .map_err(|e| EngineError::Config(format!("invalid JSON request: {e}")))?;
    if let Some(config) = &request.config {
        config.validate()?;
    }
    let response = simulate_game(&request, embedded_tables()?)?;
    serde_json::to_string(&response).map_err(|e| EngineError::invalid_state(format!("response serialization failed: {e}")))
}
