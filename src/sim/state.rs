//! Game state and core simulation types
//!
//! Everything the presentation layer reads each frame lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Not started (or reset)
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Energy drained to zero
    EnergyDepleted,
    /// Player touched an obstacle
    ObstacleCollision,
    /// Ended by the host (quit button)
    Manual,
}

/// Visible area in screen units, y pointing down
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(390.0, 844.0)
    }
}

/// A collectible particle (beneficial or harmful, tracked in separate lists)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub id: u32,
    /// Center
    pub pos: Vec2,
}

/// Obstacle width classes, as a fraction of the viewport width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleClass {
    Narrow,
    Wide,
    Full,
}

impl ObstacleClass {
    pub const ALL: [ObstacleClass; 3] = [Self::Narrow, Self::Wide, Self::Full];

    pub fn width_fraction(&self) -> f32 {
        match self {
            ObstacleClass::Narrow => 0.33,
            ObstacleClass::Wide => 0.66,
            ObstacleClass::Full => 1.0,
        }
    }
}

/// A horizontal bar of height [`OBSTACLE_HEIGHT`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub health: u8,
    pub class: ObstacleClass,
}

impl Obstacle {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, OBSTACLE_HEIGHT)
    }
}

/// A shot travelling up the screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
}

/// Fading breadcrumb of a past player position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailSegment {
    pub id: u32,
    pub pos: Vec2,
    /// 0-1, from energy at the time the segment was laid
    pub intensity: f32,
    pub timestamp_ms: u64,
}

/// The light entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Center
    pub pos: Vec2,
    pub vel: Vec2,
    pub energy: f32,
    pub game_speed: f32,
    /// Total world scroll this run
    pub distance: f32,
    pub score: u64,
    /// Accumulated collection/destruction bonus (part of `score`)
    pub bonus_score: u64,
    pub last_energy_decay_ms: u64,
}

impl PlayerState {
    /// Resting player shown before a run starts
    pub fn idle(viewport: Viewport, config: &GameConfig) -> Self {
        let y = viewport.height * PLAYER_START_HEIGHT - config.player_size / 2.0;
        Self::at(Vec2::new(viewport.width / 2.0, y), config, 0)
    }

    /// Fresh player at the start of a run
    pub fn spawn(viewport: Viewport, config: &GameConfig, now_ms: u64) -> Self {
        let y = viewport.height * PLAYER_START_HEIGHT - config.player_size;
        Self::at(Vec2::new(viewport.width / 2.0, y), config, now_ms)
    }

    fn at(pos: Vec2, config: &GameConfig, now_ms: u64) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            energy: config.initial_energy,
            game_speed: config.initial_speed,
            distance: 0.0,
            score: 0,
            bonus_score: 0,
            last_energy_decay_ms: now_ms,
        }
    }
}

/// Complete simulation snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    /// Captured when the run starts; not re-queried mid-run
    pub viewport: Viewport,
    pub player: PlayerState,
    pub beneficial: Vec<Particle>,
    pub harmful: Vec<Particle>,
    pub obstacles: Vec<Obstacle>,
    pub projectiles: Vec<Projectile>,
    /// Newest first
    pub trail: Vec<TrailSegment>,
    /// Next entity ID
    pub(crate) next_id: u32,
}

impl GameState {
    /// Menu state for the given viewport
    pub fn new(viewport: Viewport, config: &GameConfig) -> Self {
        Self {
            phase: GamePhase::Menu,
            viewport,
            player: PlayerState::idle(viewport, config),
            beneficial: Vec::new(),
            harmful: Vec::new(),
            obstacles: Vec::new(),
            projectiles: Vec::new(),
            trail: Vec::with_capacity(config.trail_segments),
            next_id: 1,
        }
    }

    /// Reset everything transient and enter `Playing`
    pub fn begin_run(&mut self, viewport: Viewport, config: &GameConfig, now_ms: u64) {
        *self = Self {
            phase: GamePhase::Playing,
            player: PlayerState::spawn(viewport, config, now_ms),
            ..Self::new(viewport, config)
        };
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_menu() {
        let config = GameConfig::default();
        let state = GameState::new(Viewport::new(400.0, 800.0), &config);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.player.pos, Vec2::new(200.0, 600.0 - 12.5));
        assert_eq!(state.player.energy, config.initial_energy);
    }

    #[test]
    fn test_begin_run_resets_entities() {
        let config = GameConfig::default();
        let viewport = Viewport::new(400.0, 800.0);
        let mut state = GameState::new(viewport, &config);
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            pos: Vec2::ZERO,
        });
        state.player.score = 42;

        state.begin_run(viewport, &config, 1_000);

        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.player.score, 0);
        assert_eq!(state.player.last_energy_decay_ms, 1_000);
        // Spawn line sits a full player size above the 75% mark
        assert_eq!(state.player.pos.y, 600.0 - 25.0);
    }

    #[test]
    fn test_obstacle_class_fractions() {
        let fractions: Vec<f32> = ObstacleClass::ALL
            .iter()
            .map(|c| c.width_fraction())
            .collect();
        assert_eq!(fractions, vec![0.33, 0.66, 1.0]);
    }
}
