//! Game balance configuration
//!
//! Defaults reproduce the shipped tuning. A JSON file may override any subset
//! of fields.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Tunable game constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Energy ===
    pub max_energy: f32,
    pub initial_energy: f32,
    /// Energy removed per decay tick
    pub energy_decay_rate: f32,
    /// Wall-clock time between decay ticks
    pub energy_decay_interval_ms: u64,

    // === World ===
    pub initial_speed: f32,
    /// Speed gained per millisecond of simulated time
    pub world_acceleration: f32,

    // === Beneficial particles ===
    pub beneficial_energy_value: f32,
    pub beneficial_speed_boost: f32,
    /// Per-tick spawn probability
    pub beneficial_spawn_rate: f64,

    // === Harmful particles (magnitudes, applied negatively) ===
    pub harmful_energy_penalty: f32,
    pub harmful_speed_penalty: f32,
    pub harmful_spawn_rate: f64,

    // === Obstacles ===
    pub obstacle_spawn_rate: f64,

    // === Shooting ===
    pub shoot_energy_cost: f32,
    pub shoot_speed_cost: f32,

    // === Trail ===
    pub trail_fade_duration_ms: u64,
    pub trail_segments: usize,

    // === Sizes ===
    pub particle_size: f32,
    pub player_size: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_energy: 100.0,
            initial_energy: 100.0,
            energy_decay_rate: 1.0,
            energy_decay_interval_ms: 500,

            initial_speed: 3.0,
            world_acceleration: 0.0001,

            beneficial_energy_value: 1.0,
            beneficial_speed_boost: 1.0,
            beneficial_spawn_rate: 0.02,

            // 5x rarer than beneficial
            harmful_energy_penalty: 1.0,
            harmful_speed_penalty: 1.0,
            harmful_spawn_rate: 0.004,

            obstacle_spawn_rate: 0.005,

            shoot_energy_cost: 15.0,
            shoot_speed_cost: 15.0,

            trail_fade_duration_ms: 2000,
            trail_segments: 10,

            particle_size: 15.0,
            player_size: 25.0,
        }
    }
}

impl GameConfig {
    /// Configuration with every spawn rate set to zero (scripted scenarios)
    pub fn without_spawns() -> Self {
        Self {
            beneficial_spawn_rate: 0.0,
            harmful_spawn_rate: 0.0,
            obstacle_spawn_rate: 0.0,
            ..Self::default()
        }
    }

    /// Check value ranges: everything non-negative, spawn rates in [0, 1)
    pub fn validate(&self) -> Result<()> {
        let magnitudes = [
            ("max_energy", self.max_energy),
            ("initial_energy", self.initial_energy),
            ("energy_decay_rate", self.energy_decay_rate),
            ("initial_speed", self.initial_speed),
            ("world_acceleration", self.world_acceleration),
            ("beneficial_energy_value", self.beneficial_energy_value),
            ("beneficial_speed_boost", self.beneficial_speed_boost),
            ("harmful_energy_penalty", self.harmful_energy_penalty),
            ("harmful_speed_penalty", self.harmful_speed_penalty),
            ("shoot_energy_cost", self.shoot_energy_cost),
            ("shoot_speed_cost", self.shoot_speed_cost),
            ("particle_size", self.particle_size),
            ("player_size", self.player_size),
        ];
        for (name, value) in magnitudes {
            if !value.is_finite() || value < 0.0 {
                bail!("{name} must be a non-negative number, got {value}");
            }
        }

        let rates = [
            ("beneficial_spawn_rate", self.beneficial_spawn_rate),
            ("harmful_spawn_rate", self.harmful_spawn_rate),
            ("obstacle_spawn_rate", self.obstacle_spawn_rate),
        ];
        for (name, rate) in rates {
            if !(0.0..1.0).contains(&rate) {
                bail!("{name} must be in [0, 1), got {rate}");
            }
        }

        if self.initial_energy > self.max_energy {
            bail!(
                "initial_energy ({}) exceeds max_energy ({})",
                self.initial_energy,
                self.max_energy
            );
        }

        Ok(())
    }

    /// Read and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&json)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Load from `path`, falling back to defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("Using default config: {err:#}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        GameConfig::default().validate().unwrap();
        GameConfig::without_spawns().validate().unwrap();
    }

    #[test]
    fn test_rejects_spawn_rate_of_one() {
        let config = GameConfig {
            obstacle_spawn_rate: 1.0,
            ..GameConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("obstacle_spawn_rate"));
    }

    #[test]
    fn test_rejects_negative_values() {
        let config = GameConfig {
            shoot_energy_cost: -1.0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"initial_speed": 5.0, "trail_segments": 4}}"#).unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.initial_speed, 5.0);
        assert_eq!(config.trail_segments, 4);
        assert_eq!(config.max_energy, GameConfig::default().max_energy);
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = GameConfig::load_or_default(&dir.path().join("nope.json"));
        assert_eq!(config, GameConfig::default());
    }
}
