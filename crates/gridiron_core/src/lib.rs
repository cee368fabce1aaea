//! # gridiron_core - Deterministic Dice-Table American Football Engine
//!
//! Plays, penalties and kicks are resolved by 2d6 rolls against versioned
//! probability tables; a down/clock/possession state machine advances the
//! game and a coach AI makes the situational calls.
//!
//! ## Features
//! - 100% deterministic simulation (same seed = same event stream)
//! - Schema-validated YAML/JSON tables, embedded defaults included
//! - Typed event outbox for presentation layers
//! - JSON API and parallel batch simulation
//!
//! ```rust
//! use gridiron_core::{CoachProfile, EngineConfig, GameEngine, TableStore};
//!
//! let mut game = GameEngine::with_seed(
//!     TableStore::embedded().unwrap(),
//!     CoachProfile::default(),
//!     CoachProfile::default(),
//!     EngineConfig::default(),
//!     7,
//! )
//! .unwrap();
//! game.play_to_completion(5_000).unwrap();
//! assert!(game.state().is_over());
//! ```

pub mod api;
pub mod coach;
pub mod data;
pub mod engine;
pub mod error;
pub mod models;

pub use api::{simulate_batch, simulate_game, simulate_game_json, GameRequest, GameResponse, GameSummary};
pub use coach::CoachProfile;
pub use data::{embedded_tables, schema_json, Table, TableStore, SCHEMA_VERSION};
pub use engine::{EngineConfig, GameEngine, GameState, Phase, Quarter, RandomSource, ScriptedRandom, SeededRandom};
pub use error::{EngineError, Result};
pub use models::{GameEvent, Outcome, Score, Side};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
