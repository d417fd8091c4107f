//! Session controller
//!
//! Drives the phase machine around the [`Engine`]:
//!
//! ```text
//! Menu --start--> Playing <--pause/resume--> Paused
//!                    |                          |
//!                    +--end / terminal tick-----+--> GameOver
//! any --reset--> Menu        any --start--> Playing (fresh run)
//! ```
//!
//! The high score and coin balance are loaded once from the store and saved
//! whenever a run changes them. Storage failures are logged and never
//! interrupt play.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::consts::SCORE_PER_COIN;
use crate::highscores::HighScore;
use crate::persistence::{KeyValueStore, Persisted};
use crate::sim::{Clock, EndReason, Engine, GamePhase, GameState, TickOutcome, Viewport};
use crate::wallet::Wallet;

/// Result of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub reason: EndReason,
    pub score: u64,
    pub distance: f32,
    /// High score after this run was recorded
    pub high_score: u64,
    pub new_high_score: bool,
    /// Coins awarded for the run
    pub coins_earned: u64,
    /// Wallet balance after the award
    pub coins: u64,
}

pub struct Session {
    engine: Engine,
    /// Host display size, captured into the engine on `start`
    viewport: Viewport,
    high_score: Persisted<HighScore>,
    wallet: Persisted<Wallet>,
    store: Box<dyn KeyValueStore>,
    last_summary: Option<RunSummary>,
}

impl Session {
    pub fn new(
        config: GameConfig,
        viewport: Viewport,
        seed: u64,
        clock: Box<dyn Clock>,
        store: Box<dyn KeyValueStore>,
    ) -> Self {
        let high_score = Persisted::load(&*store);
        let wallet = Persisted::load(&*store);
        Self {
            engine: Engine::new(config, viewport, seed, clock),
            viewport,
            high_score,
            wallet,
            store,
            last_summary: None,
        }
    }

    /// Update the host display size; takes effect on the next `start`/`reset`
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Begin a fresh run from any phase
    pub fn start(&mut self) {
        self.engine.start(self.viewport);
        self.last_summary = None;
        log::info!(
            "Run started ({}x{})",
            self.viewport.width,
            self.viewport.height
        );
    }

    pub fn pause(&mut self) -> bool {
        if self.engine.phase() != GamePhase::Playing {
            return false;
        }
        self.engine.set_phase(GamePhase::Paused);
        log::info!("Paused");
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.engine.phase() != GamePhase::Paused {
            return false;
        }
        self.engine.set_phase(GamePhase::Playing);
        log::info!("Resumed");
        true
    }

    /// End the current run. Ignored unless playing or paused.
    pub fn end(&mut self) -> Option<RunSummary> {
        match self.engine.phase() {
            GamePhase::Playing | GamePhase::Paused => Some(self.finish_run(EndReason::Manual)),
            GamePhase::Menu | GamePhase::GameOver => None,
        }
    }

    /// Back to the menu; only the high score carries over
    pub fn reset(&mut self) {
        self.engine.reset(self.viewport);
        self.last_summary = None;
    }

    /// Advance one frame; a terminal tick records the run
    pub fn advance(&mut self, dt_ms: f32) -> TickOutcome {
        let outcome = self.engine.advance(dt_ms);
        if let TickOutcome::Ended(reason) = outcome {
            self.finish_run(reason);
        }
        outcome
    }

    pub fn set_movement_intent(&mut self, direction: Vec2) {
        self.engine.set_movement_intent(direction);
    }

    pub fn fire_projectile(&mut self) -> bool {
        self.engine.fire_projectile()
    }

    pub fn state(&self) -> &GameState {
        self.engine.state()
    }

    pub fn phase(&self) -> GamePhase {
        self.engine.phase()
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.get().best
    }

    pub fn coins(&self) -> u64 {
        self.wallet.get().coins
    }

    pub fn last_summary(&self) -> Option<&RunSummary> {
        self.last_summary.as_ref()
    }

    fn finish_run(&mut self, reason: EndReason) -> RunSummary {
        self.engine.set_phase(GamePhase::GameOver);

        let player = self.engine.state().player;
        let new_high_score = self
            .high_score
            .update(&mut *self.store, |high| high.record(player.score));
        let coins_earned = player.score / SCORE_PER_COIN;
        self.wallet
            .update(&mut *self.store, |wallet| wallet.deposit(coins_earned));

        let summary = RunSummary {
            reason,
            score: player.score,
            distance: player.distance,
            high_score: self.high_score(),
            new_high_score,
            coins_earned,
            coins: self.coins(),
        };
        log::info!(
            "Game over ({:?}): score {}, best {}",
            reason,
            summary.score,
            summary.high_score
        );
        self.last_summary = Some(summary);
        summary
    }
}
