//! JSON API and batch simulation.

pub mod batch;
pub mod json_api;

pub use batch::{simulate_batch, summarize, BatchReport, GameSummary};
pub use json_api::{fingerprint, simulate_game, simulate_game_json, GameRequest, GameResponse, DEFAULT_MAX_STEPS};
