//! Simulation module
//!
//! All gameplay logic lives here:
//! - Randomness only through an injected, seedable RNG
//! - Wall-clock time only through an injected [`Clock`]
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod engine;
pub mod state;
pub mod tick;

pub use autopilot::{AutopilotCommand, steer};
pub use clock::{Clock, ManualClock, SystemClock};
pub use collision::{box_overlaps_rect, circles_touch, point_in_rect};
pub use engine::Engine;
pub use state::{
    EndReason, GamePhase, GameState, Obstacle, ObstacleClass, Particle, PlayerState, Projectile,
    TrailSegment, Viewport,
};
pub use tick::{TickEvents, TickOutcome, advance, fire_projectile, set_movement_intent};
