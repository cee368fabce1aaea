//! Simulation engine: random source, resolvers, the down/clock/possession
//! state machine and the full-game driver.

pub mod config;
pub mod dice;
pub mod game;
pub mod kicking;
pub mod penalty_resolver;
pub mod play_resolver;
pub mod rng;
pub mod state;
pub mod transition;

#[cfg(test)]
mod replay_tests;

pub use config::EngineConfig;
pub use dice::{chance, pick_index, roll_die, roll_two_dice, DiceRoll};
pub use game::{Coaches, GameEngine};
pub use kicking::{attempt_field_goal, attempt_pat, field_goal_distance, resolve_kickoff, KickoffResult};
pub use penalty_resolver::maybe_penalty;
pub use play_resolver::resolve_play;
pub use rng::{FnRandom, RandomSource, ScriptedRandom, SeededRandom};
pub use state::{FieldState, GameState, Phase, Quarter};
pub use transition::{apply_conversion, apply_field_goal, apply_kickoff, apply_outcome, apply_punt, Transition};
