//! Owned simulation engine
//!
//! Bundles the authoritative [`GameState`] with the config, RNG and clock the
//! tick functions need, so callers hold one handle instead of four.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::clock::Clock;
use super::state::{GamePhase, GameState, Viewport};
use super::tick::{self, TickOutcome};
use crate::config::GameConfig;

pub struct Engine {
    config: GameConfig,
    state: GameState,
    rng: Pcg32,
    clock: Box<dyn Clock>,
}

impl Engine {
    /// Engine sitting at the menu, spawning from `seed`
    pub fn new(config: GameConfig, viewport: Viewport, seed: u64, clock: Box<dyn Clock>) -> Self {
        let state = GameState::new(viewport, &config);
        Self {
            config,
            state,
            rng: Pcg32::seed_from_u64(seed),
            clock,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Read-only snapshot for rendering
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Fresh run in `viewport`
    pub fn start(&mut self, viewport: Viewport) {
        let now = self.clock.now_ms();
        self.state.begin_run(viewport, &self.config, now);
    }

    /// Back to the menu snapshot
    pub fn reset(&mut self, viewport: Viewport) {
        self.state = GameState::new(viewport, &self.config);
    }

    pub(crate) fn set_phase(&mut self, phase: GamePhase) {
        self.state.phase = phase;
    }

    pub fn advance(&mut self, dt_ms: f32) -> TickOutcome {
        let now = self.clock.now_ms();
        tick::advance(&mut self.state, &self.config, &mut self.rng, now, dt_ms)
    }

    pub fn set_movement_intent(&mut self, direction: Vec2) {
        tick::set_movement_intent(&mut self.state, direction);
    }

    pub fn fire_projectile(&mut self) -> bool {
        tick::fire_projectile(&mut self.state, &self.config)
    }
}
