//! Idle/demo mode - picks intents from the current snapshot
//!
//! Dodges the nearest obstacle coming down the player's column (shooting it
//! when affordable), otherwise chases the closest beneficial particle while
//! sidestepping harmful ones.

use glam::Vec2;

use super::state::{GameState, Obstacle};
use crate::config::GameConfig;

/// How far above the player obstacles are considered a threat
const LOOKAHEAD: f32 = 260.0;
/// Extra clearance kept between the player and an obstacle edge
const DODGE_MARGIN: f32 = 8.0;
/// Largest per-axis intent (same as a held arrow key)
const MAX_INTENT: f32 = 5.0;
/// Energy the autopilot keeps in reserve after a shot
const SHOT_RESERVE: f32 = 20.0;
/// Harmful particles closer than this (horizontally) push the player aside
const HARMFUL_AVOID_RADIUS: f32 = 30.0;

/// Intent for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AutopilotCommand {
    pub intent: Vec2,
    pub fire: bool,
}

/// Decide what to do this frame
pub fn steer(state: &GameState, config: &GameConfig) -> AutopilotCommand {
    let player = state.player.pos;
    let half = config.player_size / 2.0;

    if let Some(threat) = nearest_threat(state, half) {
        let affordable = state.player.energy >= config.shoot_energy_cost + SHOT_RESERVE
            && state.player.game_speed >= config.shoot_speed_cost;
        let target_x = dodge_x(threat, player.x, half, state.viewport.width);
        return AutopilotCommand {
            intent: toward(player, Vec2::new(target_x, player.y)),
            fire: affordable,
        };
    }

    let mut target = state
        .beneficial
        .iter()
        .filter(|p| p.pos.y < player.y)
        .min_by(|a, b| {
            a.pos
                .distance_squared(player)
                .partial_cmp(&b.pos.distance_squared(player))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|p| Vec2::new(p.pos.x, player.y))
        .unwrap_or(player);

    // Sidestep harmful particles falling onto the target column
    for harmful in state.harmful.iter().filter(|p| p.pos.y < player.y) {
        let dx = target.x - harmful.pos.x;
        if dx.abs() < HARMFUL_AVOID_RADIUS {
            let side = if dx >= 0.0 { 1.0 } else { -1.0 };
            target.x = harmful.pos.x + side * HARMFUL_AVOID_RADIUS;
        }
    }

    AutopilotCommand {
        intent: toward(player, target),
        fire: false,
    }
}

/// Closest obstacle above the player whose span covers the player's column
fn nearest_threat(state: &GameState, half: f32) -> Option<&Obstacle> {
    let player = state.player.pos;
    state
        .obstacles
        .iter()
        .filter(|o| {
            let bottom = o.pos.y + o.size().y;
            bottom < player.y + half && player.y - bottom < LOOKAHEAD
        })
        .filter(|o| {
            player.x + half + DODGE_MARGIN > o.pos.x
                && player.x - half - DODGE_MARGIN < o.pos.x + o.width
        })
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

/// Closest x that clears `obstacle`, or the current x if the bar spans the
/// whole screen
fn dodge_x(obstacle: &Obstacle, x: f32, half: f32, width: f32) -> f32 {
    let left = obstacle.pos.x - half - DODGE_MARGIN;
    let right = obstacle.pos.x + obstacle.width + half + DODGE_MARGIN;
    let left_ok = left >= half;
    let right_ok = right <= width - half;

    match (left_ok, right_ok) {
        (true, true) => {
            if (x - left).abs() <= (right - x).abs() {
                left
            } else {
                right
            }
        }
        (true, false) => left,
        (false, true) => right,
        (false, false) => x,
    }
}

fn toward(from: Vec2, to: Vec2) -> Vec2 {
    let delta = to - from;
    Vec2::new(
        delta.x.clamp(-MAX_INTENT, MAX_INTENT),
        delta.y.clamp(-MAX_INTENT, MAX_INTENT),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{ObstacleClass, Particle, Viewport};

    fn playing(config: &GameConfig) -> GameState {
        let viewport = Viewport::new(400.0, 800.0);
        let mut state = GameState::new(viewport, config);
        state.begin_run(viewport, config, 0);
        state
    }

    #[test]
    fn test_chases_beneficial_particle() {
        let config = GameConfig::default();
        let mut state = playing(&config);
        let id = state.next_entity_id();
        state.beneficial.push(Particle {
            id,
            pos: Vec2::new(350.0, 100.0),
        });

        let command = steer(&state, &config);
        assert_eq!(command.intent, Vec2::new(MAX_INTENT, 0.0));
        assert!(!command.fire);
    }

    #[test]
    fn test_dodges_obstacle_in_column() {
        let config = GameConfig::default();
        let mut state = playing(&config);
        let id = state.next_entity_id();
        // Covers x 150..282, player sits at x 200
        state.obstacles.push(Obstacle {
            id,
            pos: Vec2::new(150.0, 400.0),
            width: 132.0,
            health: 1,
            class: ObstacleClass::Narrow,
        });

        let command = steer(&state, &config);
        assert!(command.intent.x < 0.0);
        // Speed 3 can't pay for a shot
        assert!(!command.fire);
    }

    #[test]
    fn test_fires_at_full_width_obstacle() {
        let config = GameConfig::default();
        let mut state = playing(&config);
        state.player.game_speed = 20.0;
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            pos: Vec2::new(0.0, 400.0),
            width: 400.0,
            health: 1,
            class: ObstacleClass::Full,
        });

        let command = steer(&state, &config);
        assert_eq!(command.intent, Vec2::ZERO);
        assert!(command.fire);
    }

    #[test]
    fn test_idle_without_targets() {
        let config = GameConfig::default();
        let state = playing(&config);
        assert_eq!(steer(&state, &config), AutopilotCommand::default());
    }
}
