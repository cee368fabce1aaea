//! Full-game driver.
//!
//! [`GameEngine`] owns the state, shared tables, both coaches, config, the
//! random source and an outbox of events. Callers either drive each decision
//! point themselves (`kickoff`, `run_play`, `attempt_field_goal`, `punt`,
//! `convert`) or let the coach AI do it (`step`, `play_to_completion`).

use std::sync::Arc;

use super::config::EngineConfig;
use super::kicking::{self, field_goal_distance, resolve_kickoff};
use super::penalty_resolver::maybe_penalty;
use super::play_resolver::resolve_play;
use super::rng::{RandomSource, SeededRandom};
use super::state::{GameState, Phase};
use super::transition::{
    apply_conversion, apply_field_goal, apply_kickoff, apply_outcome, apply_punt, Transition,
};
use crate::coach::{self, CoachProfile};
use crate::data::TableStore;
use crate::error::{EngineError, Result};
use crate::models::{ConversionKind, DefenseCall, FourthDownChoice, GameEvent, KickoffDecision, Outcome, Side};

#[derive(Debug, Clone)]
pub struct Coaches {
    pub home: CoachProfile,
    pub away: CoachProfile,
}

impl Coaches {
    pub fn get(&self, side: Side) -> &CoachProfile {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }
}

pub struct GameEngine<R: RandomSource = SeededRandom> {
    state: GameState,
    tables: Arc<TableStore>,
    coaches: Coaches,
    config: EngineConfig,
    rng: R,
    outbox: Vec<GameEvent>,
    /// Offense that last received its play card.
    carded: Option<Side>,
    snaps: usize,
}

impl GameEngine<SeededRandom> {
    pub fn with_seed(
        tables: Arc<TableStore>,
        home: CoachProfile,
        away: CoachProfile,
        config: EngineConfig,
        seed: u64,
    ) -> Result<Self> {
        Self::new(tables, home, away, config, SeededRandom::new(seed))
    }
}

impl<R: RandomSource> GameEngine<R> {
    pub fn new(
        tables: Arc<TableStore>,
        home: CoachProfile,
        away: CoachProfile,
        config: EngineConfig,
        rng: R,
    ) -> Result<Self> {
        config.validate()?;
        let state = GameState::new(&config.clock);
        Ok(Self {
            state,
            tables,
            coaches: Coaches { home, away },
            config,
            rng,
            outbox: Vec::new(),
            carded: None,
            snaps: 0,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn coaches(&self) -> &Coaches {
        &self.coaches
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Scrimmage plays run so far, two-point tries excluded.
    pub fn snaps(&self) -> usize {
        self.snaps
    }

    /// Events not yet handed out, in production order.
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.outbox
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.outbox)
    }

    fn commit(&mut self, transition: Transition) {
        self.outbox.extend(transition.events);
        self.state = transition.state;
        if self.state.phase == Phase::Scrimmage && self.carded != Some(self.state.possession) {
            let side = self.state.possession;
            self.carded = Some(side);
            self.outbox.push(GameEvent::HandUpdate { side, plays: self.tables.catalog.ids() });
        }
    }

    fn expect_scrimmage(&self, operation: &str) -> Result<()> {
        self.state.expect_phase(operation, |p| matches!(p, Phase::Scrimmage))
    }

    // ========== Caller-driven decisions ==========

    pub fn kickoff(&mut self, decision: KickoffDecision) -> Result<()> {
        self.state.expect_phase("kickoff", |p| matches!(p, Phase::Kickoff { .. }))?;
        let result = resolve_kickoff(decision, &self.config.rules, &mut self.rng)?;
        let t = apply_kickoff(&self.state, result, &self.config)?;
        self.commit(t);
        Ok(())
    }

    /// Resolves `play_id` against `defense`, rolls for a flag and advances
    /// the state. Returns the final outcome.
    pub fn run_play(&mut self, play_id: &str, defense: DefenseCall) -> Result<Outcome> {
        self.expect_scrimmage("run_play")?;
        let play = self.tables.catalog.get(play_id)?.clone();
        let field = self.state.field();
        let outcome = resolve_play(&self.tables.matchup, &play, defense, field, &mut self.rng)?;
        let outcome = maybe_penalty(outcome, field, &self.tables.penalty, &self.config.penalty, &mut self.rng)?;

        self.outbox.push(GameEvent::PlayResolved {
            offense: self.state.possession,
            play: play.id,
            defense,
            outcome: outcome.clone(),
        });
        let t = apply_outcome(&self.state, &outcome, &self.config)?;
        self.commit(t);
        self.snaps += 1;
        Ok(outcome)
    }

    pub fn attempt_field_goal(&mut self) -> Result<bool> {
        self.expect_scrimmage("attempt_field_goal")?;
        let distance = field_goal_distance(self.state.ball_spot);
        let good = kicking::attempt_field_goal(&self.tables.kicking, &mut self.rng, distance)?;
        let t = apply_field_goal(&self.state, distance, good, &self.config)?;
        self.commit(t);
        Ok(good)
    }

    pub fn punt(&mut self) -> Result<()> {
        self.expect_scrimmage("punt")?;
        let t = apply_punt(&self.state, &self.config)?;
        self.commit(t);
        Ok(())
    }

    /// Tries the conversion. A kick rolls the PAT table; a two-point try
    /// runs one scrimmage play from the 2, called by both coaches (play
    /// draws, then defense draw, then the roll), with no flags.
    pub fn convert(&mut self, kind: ConversionKind) -> Result<bool> {
        let side = match self.state.phase {
            Phase::Conversion { side } => side,
            other => return Err(EngineError::invalid_state(format!("convert called during {other:?}"))),
        };
        let good = match kind {
            ConversionKind::Kick => kicking::attempt_pat(&self.tables.kicking, &mut self.rng)?,
            ConversionKind::TwoPoint => {
                let play = coach::choose_play(
                    &self.state,
                    self.coaches.get(side),
                    &self.config.coach,
                    &self.tables.catalog,
                    &mut self.rng,
                )?
                .clone();
                let defense = coach::choose_defense(&self.state, &self.config.coach, &mut self.rng)?;
                let field = self.state.field();
                let outcome = resolve_play(&self.tables.matchup, &play, defense, field, &mut self.rng)?;
                self.outbox.push(GameEvent::PlayResolved {
                    offense: side,
                    play: play.id,
                    defense,
                    outcome: outcome.clone(),
                });
                outcome.touchdown && !outcome.turnover
            }
        };
        let t = apply_conversion(&self.state, kind, good, &self.config)?;
        self.commit(t);
        Ok(good)
    }

    // ========== Coach-driven ==========

    /// Lets the coach AI make the pending decision. Returns `false` once the
    /// game is over.
    pub fn step(&mut self) -> Result<bool> {
        match self.state.phase {
            Phase::GameOver => return Ok(false),
            Phase::Kickoff { kicking } => {
                let decision =
                    coach::choose_kickoff(&self.state, self.coaches.get(kicking), &self.config.coach, &mut self.rng)?;
                self.kickoff(decision)?;
            }
            Phase::Conversion { side } => {
                let kind =
                    coach::choose_conversion(&self.state, self.coaches.get(side), &self.config.coach, &mut self.rng)?;
                self.convert(kind)?;
            }
            Phase::Scrimmage if self.state.down == 4 => {
                let choice = coach::choose_fourth_down(
                    &self.state,
                    self.coaches.get(self.state.possession),
                    &self.config.coach,
                    &self.tables.kicking,
                    &mut self.rng,
                )?;
                match choice {
                    FourthDownChoice::GoForIt => self.called_play()?,
                    FourthDownChoice::FieldGoal => {
                        self.attempt_field_goal()?;
                    }
                    FourthDownChoice::Punt => self.punt()?,
                }
            }
            Phase::Scrimmage => self.called_play()?,
        }
        Ok(!self.state.is_over())
    }

    fn called_play(&mut self) -> Result<()> {
        let offense = self.state.possession;
        let play_id = coach::choose_play(
            &self.state,
            self.coaches.get(offense),
            &self.config.coach,
            &self.tables.catalog,
            &mut self.rng,
        )?
        .id
        .clone();
        let defense = coach::choose_defense(&self.state, &self.config.coach, &mut self.rng)?;
        self.run_play(&play_id, defense)?;
        Ok(())
    }

    /// Steps until the game ends or `max_steps` decisions have been made.
    /// Returns the number of steps taken.
    pub fn play_to_completion(&mut self, max_steps: usize) -> Result<usize> {
        let mut steps = 0;
        while steps < max_steps && !self.state.is_over() {
            self.step()?;
            steps += 1;
        }
        tracing::debug!(steps, over = self.state.is_over(), draws = self.rng.consumed(), "game loop stopped");
        Ok(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::embedded_tables;
    use crate::engine::rng::ScriptedRandom;
    use crate::models::KickoffKind;

    fn engine_with(rng: ScriptedRandom) -> GameEngine<ScriptedRandom> {
        GameEngine::new(
            embedded_tables().unwrap(),
            CoachProfile::default(),
            CoachProfile::default(),
            EngineConfig::no_penalties(),
            rng,
        )
        .unwrap()
    }

    #[test]
    fn test_opening_kickoff_emits_hand_update() {
        let mut engine = engine_with(ScriptedRandom::default());
        engine.kickoff(KickoffDecision::normal()).unwrap();
        let events = engine.drain_events();
        assert!(matches!(events[0], GameEvent::Kickoff { kind: KickoffKind::Normal, recovered_by: Side::Home, .. }));
        assert!(matches!(events.last(), Some(GameEvent::HandUpdate { side: Side::Home, plays }) if plays.len() == 12));
        assert!(engine.drain_events().is_empty());
        assert_eq!(engine.rng().consumed(), 0);
    }

    #[test]
    fn test_run_play_scripted() {
        // roll 3+4 (inside zone vs run stop: +2), then no flag
        let mut engine = engine_with(ScriptedRandom::from_dice([3, 4]));
        engine.rng.push(0.99);
        engine.kickoff(KickoffDecision::normal()).unwrap();
        let outcome = engine.run_play("inside_zone", DefenseCall::RunStop).unwrap();
        assert_eq!(outcome.yards, 2);
        assert_eq!((engine.state().down, engine.state().distance, engine.state().ball_spot), (2, 8, 27));
        assert_eq!(engine.snaps(), 1);
    }

    #[test]
    fn test_out_of_order_calls_rejected() {
        let mut engine = engine_with(ScriptedRandom::default());
        assert!(matches!(engine.punt(), Err(EngineError::InvalidState(_))));
        assert!(matches!(engine.convert(ConversionKind::Kick), Err(EngineError::InvalidState(_))));
        assert!(matches!(
            engine.run_play("inside_zone", DefenseCall::Blitz),
            Err(EngineError::InvalidState(_))
        ));
    }

    #[test]
    fn test_unknown_play_is_table_gap() {
        let mut engine = engine_with(ScriptedRandom::default());
        engine.kickoff(KickoffDecision::normal()).unwrap();
        assert!(matches!(engine.run_play("hail_mary", DefenseCall::Prevent), Err(EngineError::TableGap { .. })));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = EngineConfig::default();
        config.rules.onside_recovery = -0.1;
        let result = GameEngine::with_seed(
            embedded_tables().unwrap(),
            CoachProfile::default(),
            CoachProfile::default(),
            config,
            1,
        );
        assert!(matches!(result, Err(EngineError::Config(_))));
    }

    #[test]
    fn test_full_game_finishes() {
        let mut engine = GameEngine::with_seed(
            embedded_tables().unwrap(),
            CoachProfile::builtin("aggressive").unwrap(),
            CoachProfile::builtin("conservative").unwrap(),
            EngineConfig::default(),
            2024,
        )
        .unwrap();
        engine.play_to_completion(5_000).unwrap();
        assert!(engine.state().is_over());
        let events = engine.drain_events();
        assert!(matches!(events.last(), Some(GameEvent::GameOver { .. })));
        assert!(engine.snaps() > 50);
    }
}
