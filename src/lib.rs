//! Only Sun - a descending-light arcade game core
//!
//! Core modules:
//! - `sim`: Simulation engine (movement, spawning, collisions, scoring)
//! - `session`: Session lifecycle and high score tracking
//! - `config`: Data-driven game balance
//! - `persistence`: Key-value storage for values that outlive a session
//! - `wallet`: Coins earned across runs
//! - `platform`: Host frame timing

pub mod config;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod sim;
pub mod wallet;

pub use config::GameConfig;
pub use highscores::HighScore;
pub use session::{RunSummary, Session};
pub use wallet::Wallet;

/// Fixed engine constants (not tunable through [`GameConfig`])
pub mod consts {
    /// Height of every obstacle bar
    pub const OBSTACLE_HEIGHT: f32 = 50.0;
    /// Upward projectile travel per tick (independent of world speed)
    pub const PROJECTILE_SPEED: f32 = 10.0;
    /// Projectiles are dropped once they pass this far above the top edge
    pub const PROJECTILE_EXIT_MARGIN: f32 = 10.0;
    /// Per-tick velocity multiplier (momentum decay)
    pub const VELOCITY_DAMPING: f32 = 0.9;
    /// Fraction of the viewport height the player may not enter (from the top)
    pub const PLAYER_TOP_LIMIT: f32 = 0.25;
    /// Vertical spawn line of the player, as a fraction of viewport height
    pub const PLAYER_START_HEIGHT: f32 = 0.75;
    /// Energy at which the trail reaches full intensity
    pub const TRAIL_FULL_INTENSITY_ENERGY: f32 = 50.0;
    /// Floor for world speed
    pub const MIN_GAME_SPEED: f32 = 1.0;
    /// Host refresh deltas are divided by this before reaching the simulation
    pub const FRAME_TIME_SCALE: f32 = 1.2;

    /// Score bonus per beneficial particle collected
    pub const BENEFICIAL_BONUS: u64 = 10;
    /// Score bonus per obstacle destroyed by a projectile
    pub const OBSTACLE_BONUS: u64 = 20;
    /// Distance units per point of score
    pub const DISTANCE_PER_POINT: f32 = 10.0;
    /// Score points per coin awarded at game over
    pub const SCORE_PER_COIN: u64 = 10;
}
