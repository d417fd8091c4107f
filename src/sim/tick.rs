//! Per-frame simulation step
//!
//! One `advance` call moves the player, scrolls the world, spawns new
//! entities, resolves collisions and updates score/energy/speed. Results are
//! built up in locals and committed together at the end, so a run that ends
//! mid-tick leaves the rest of the snapshot untouched.

use glam::Vec2;
use rand::Rng;

use super::collision::{box_overlaps_rect, circles_touch, point_in_rect};
use super::state::{
    EndReason, GamePhase, GameState, Obstacle, ObstacleClass, Particle, PlayerState, Projectile,
    TrailSegment, Viewport,
};
use crate::config::GameConfig;
use crate::consts::*;

/// What happened to this tick's collectibles and targets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEvents {
    pub collected_beneficial: u32,
    pub collected_harmful: u32,
    pub obstacles_destroyed: u32,
}

/// Result of a single `advance`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing changed
    Inactive,
    /// Tick committed
    Running(TickEvents),
    /// Run ended this tick (phase is now `GameOver`)
    Ended(EndReason),
}

/// Advance the simulation by one frame
///
/// `now_ms` is wall-clock time (drives energy decay and trail fading),
/// `dt_ms` is the simulated frame time (drives world acceleration).
pub fn advance<R: Rng + ?Sized>(
    state: &mut GameState,
    config: &GameConfig,
    rng: &mut R,
    now_ms: u64,
    dt_ms: f32,
) -> TickOutcome {
    if !state.is_playing() {
        return TickOutcome::Inactive;
    }

    let viewport = state.viewport;
    let player = state.player;
    let mut next_id = state.next_id;

    // Momentum: integrate, then damp
    let pos = clamp_to_play_area(player.pos + player.vel, viewport, config.player_size);
    let vel = player.vel * VELOCITY_DAMPING;

    // Energy drains on wall-clock intervals, independent of frame rate
    let mut energy = player.energy;
    let mut last_energy_decay_ms = player.last_energy_decay_ms;
    if now_ms.saturating_sub(last_energy_decay_ms) >= config.energy_decay_interval_ms {
        energy = (energy - config.energy_decay_rate).max(0.0);
        last_energy_decay_ms = now_ms;
    }

    if energy <= 0.0 {
        state.player.energy = 0.0;
        state.player.last_energy_decay_ms = last_energy_decay_ms;
        return end_run(state, EndReason::EnergyDepleted);
    }

    let game_speed = player.game_speed + config.world_acceleration * dt_ms.max(0.0);

    // Scroll the world
    let scroll = Vec2::new(0.0, game_speed);
    let particle_exit = viewport.height + config.particle_size;
    let mut beneficial = scroll_particles(&state.beneficial, scroll, particle_exit);
    let mut harmful = scroll_particles(&state.harmful, scroll, particle_exit);
    let mut obstacles: Vec<Obstacle> = state
        .obstacles
        .iter()
        .map(|o| Obstacle {
            pos: o.pos + scroll,
            ..*o
        })
        .filter(|o| o.pos.y < viewport.height + OBSTACLE_HEIGHT)
        .collect();
    let mut projectiles: Vec<Projectile> = state
        .projectiles
        .iter()
        .map(|p| Projectile {
            pos: p.pos - Vec2::new(0.0, PROJECTILE_SPEED),
            ..*p
        })
        .filter(|p| p.pos.y > -PROJECTILE_EXIT_MARGIN)
        .collect();

    // Trail: newest first, bounded by age and count
    let head = TrailSegment {
        id: take_id(&mut next_id),
        pos,
        intensity: (energy / TRAIL_FULL_INTENSITY_ENERGY).min(1.0),
        timestamp_ms: now_ms,
    };
    let trail: Vec<TrailSegment> = std::iter::once(head)
        .chain(state.trail.iter().copied())
        .filter(|s| now_ms.saturating_sub(s.timestamp_ms) < config.trail_fade_duration_ms)
        .take(config.trail_segments)
        .collect();

    // Spawns
    if rng.random::<f64>() < config.beneficial_spawn_rate {
        let id = take_id(&mut next_id);
        beneficial.push(spawn_particle(rng, id, viewport, config.particle_size));
    }
    if rng.random::<f64>() < config.harmful_spawn_rate {
        let id = take_id(&mut next_id);
        harmful.push(spawn_particle(rng, id, viewport, config.particle_size));
    }
    if rng.random::<f64>() < config.obstacle_spawn_rate {
        let id = take_id(&mut next_id);
        obstacles.push(spawn_obstacle(rng, id, viewport));
    }

    // Particles vs. player (effects are additive, so order is irrelevant)
    let reach = (config.player_size + config.particle_size) / 2.0;
    let collected_beneficial = collect(&mut beneficial, pos, reach);
    let collected_harmful = collect(&mut harmful, pos, reach);
    let energy_delta = collected_beneficial as f32 * config.beneficial_energy_value
        - collected_harmful as f32 * config.harmful_energy_penalty;
    let speed_delta = collected_beneficial as f32 * config.beneficial_speed_boost
        - collected_harmful as f32 * config.harmful_speed_penalty;

    // Projectiles vs. obstacles, last to first; one obstacle per projectile
    let mut obstacles_destroyed = 0u32;
    for i in (0..projectiles.len()).rev() {
        let shot = projectiles[i].pos;
        let Some(j) = obstacles
            .iter()
            .rposition(|o| point_in_rect(shot, o.pos, o.size()))
        else {
            continue;
        };

        projectiles.remove(i);
        let obstacle = &mut obstacles[j];
        obstacle.health = obstacle.health.saturating_sub(1);
        if obstacle.health == 0 {
            log::debug!("Obstacle {} destroyed", obstacle.id);
            obstacles.remove(j);
            obstacles_destroyed += 1;
        }
    }

    // Player vs. whatever obstacles survived
    if obstacles
        .iter()
        .any(|o| box_overlaps_rect(pos, config.player_size, o.pos, o.size()))
    {
        return end_run(state, EndReason::ObstacleCollision);
    }

    let distance = player.distance + game_speed;
    let bonus_score = player.bonus_score
        + BENEFICIAL_BONUS * u64::from(collected_beneficial)
        + OBSTACLE_BONUS * u64::from(obstacles_destroyed);
    let score = (distance / DISTANCE_PER_POINT).floor() as u64 + bonus_score;

    // Commit
    state.player = PlayerState {
        pos,
        vel,
        energy: (energy + energy_delta).min(config.max_energy).max(0.0),
        game_speed: (game_speed + speed_delta).max(MIN_GAME_SPEED),
        distance,
        score,
        bonus_score,
        last_energy_decay_ms,
    };
    state.beneficial = beneficial;
    state.harmful = harmful;
    state.obstacles = obstacles;
    state.projectiles = projectiles;
    state.trail = trail;
    state.next_id = next_id;

    TickOutcome::Running(TickEvents {
        collected_beneficial,
        collected_harmful,
        obstacles_destroyed,
    })
}

/// Replace the player's velocity (not additive); damping brings it back to rest
pub fn set_movement_intent(state: &mut GameState, direction: Vec2) {
    if !state.is_playing() {
        return;
    }
    state.player.vel = direction;
}

/// Spend energy and speed on a projectile. Returns false (and charges
/// nothing) when not playing or when either cost can't be paid.
pub fn fire_projectile(state: &mut GameState, config: &GameConfig) -> bool {
    if !state.is_playing() {
        return false;
    }
    let player = state.player;
    if player.energy < config.shoot_energy_cost || player.game_speed < config.shoot_speed_cost {
        return false;
    }

    state.player.energy = player.energy - config.shoot_energy_cost;
    state.player.game_speed = (player.game_speed - config.shoot_speed_cost).max(MIN_GAME_SPEED);

    let id = state.next_entity_id();
    state.projectiles.push(Projectile {
        id,
        pos: player.pos - Vec2::new(0.0, config.player_size),
    });
    true
}

/// Keep the player inside the viewport and out of its top quarter
fn clamp_to_play_area(pos: Vec2, viewport: Viewport, player_size: f32) -> Vec2 {
    let half = player_size / 2.0;
    let min_y = viewport.height * PLAYER_TOP_LIMIT;
    let max_x = viewport.width - half;
    let max_y = viewport.height - half;
    Vec2::new(pos.x.min(max_x).max(half), pos.y.min(max_y).max(min_y))
}

fn end_run(state: &mut GameState, reason: EndReason) -> TickOutcome {
    log::info!(
        "Run ended ({:?}) at score {}, distance {:.0}",
        reason,
        state.player.score,
        state.player.distance
    );
    state.phase = GamePhase::GameOver;
    TickOutcome::Ended(reason)
}

fn take_id(next_id: &mut u32) -> u32 {
    let id = *next_id;
    *next_id = next_id.wrapping_add(1);
    id
}

fn scroll_particles(particles: &[Particle], scroll: Vec2, exit_y: f32) -> Vec<Particle> {
    particles
        .iter()
        .map(|p| Particle {
            pos: p.pos + scroll,
            ..*p
        })
        .filter(|p| p.pos.y < exit_y)
        .collect()
}

/// Remove every particle within `reach` of the player, returning how many
fn collect(particles: &mut Vec<Particle>, player: Vec2, reach: f32) -> u32 {
    let before = particles.len();
    particles.retain(|p| !circles_touch(p.pos, player, reach));
    (before - particles.len()) as u32
}

fn spawn_particle<R: Rng + ?Sized>(
    rng: &mut R,
    id: u32,
    viewport: Viewport,
    size: f32,
) -> Particle {
    let x = size + rng.random::<f32>() * (viewport.width - 2.0 * size);
    Particle {
        id,
        pos: Vec2::new(x, -size),
    }
}

fn spawn_obstacle<R: Rng + ?Sized>(rng: &mut R, id: u32, viewport: Viewport) -> Obstacle {
    let class = ObstacleClass::ALL[rng.random_range(0..ObstacleClass::ALL.len())];
    let width = viewport.width * class.width_fraction();
    let x = rng.random::<f32>() * (viewport.width - width);
    Obstacle {
        id,
        pos: Vec2::new(x, -OBSTACLE_HEIGHT),
        width,
        health: 1,
        class,
    }
}
