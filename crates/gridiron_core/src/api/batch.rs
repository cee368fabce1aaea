//! Independent seeded games on a rayon pool sharing one table store.

use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::json_api::{fingerprint, DEFAULT_MAX_STEPS};
use crate::coach::CoachProfile;
use crate::data::TableStore;
use crate::engine::{EngineConfig, GameEngine, Quarter};
use crate::error::Result;
use crate::models::Side;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub seed: u64,
    pub home_score: u32,
    pub away_score: u32,
    pub winner: Option<Side>,
    pub overtime: bool,
    pub plays: usize,
    pub fingerprint: String,
}

/// Plays one game per seed. Results come back in seed order regardless of
/// scheduling.
pub fn simulate_batch(
    seeds: &[u64],
    tables: Arc<TableStore>,
    home: &CoachProfile,
    away: &CoachProfile,
    config: &EngineConfig,
) -> Result<Vec<GameSummary>> {
    config.validate()?;
    seeds
        .par_iter()
        .map(|&seed| -> Result<GameSummary> {
            let mut engine =
                GameEngine::with_seed(Arc::clone(&tables), home.clone(), away.clone(), config.clone(), seed)?;
            engine.play_to_completion(DEFAULT_MAX_STEPS)?;
            let events = engine.drain_events();
            let state = engine.state();
            Ok(GameSummary {
                seed,
                home_score: state.score.home,
                away_score: state.score.away,
                winner: state.score.leader(),
                overtime: state.quarter == Quarter::Overtime,
                plays: engine.snaps(),
                fingerprint: fingerprint(&events)?,
            })
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub games: usize,
    pub home_wins: usize,
    pub away_wins: usize,
    pub ties: usize,
    pub overtime_games: usize,
    pub avg_home_score: f64,
    pub avg_away_score: f64,
    pub avg_plays: f64,
}

pub fn summarize(games: &[GameSummary]) -> BatchReport {
    if games.is_empty() {
        return BatchReport::default();
    }
    let n = games.len() as f64;
    let mut report = BatchReport { games: games.len(), ..BatchReport::default() };
    for g in games {
        match g.winner {
            Some(Side::Home) => report.home_wins += 1,
            Some(Side::Away) => report.away_wins += 1,
            None => report.ties += 1,
        }
        if g.overtime {
            report.overtime_games += 1;
        }
    }
    report.avg_home_score = games.iter().map(|g| f64::from(g.home_score)).sum::<f64>() / n;
    report.avg_away_score = games.iter().map(|g| f64::from(g.away_score)).sum::<f64>() / n;
    report.avg_plays = games.iter().map(|g| g.plays as f64).sum::<f64>() / n;
    report
}
