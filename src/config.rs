//! Game tunables
//!
//! Everything is fixed for the lifetime of a session. `Config::default()` is
//! the shipped tuning; tests build variants (e.g. guaranteed spawns) from it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Category;

/// Session-wide tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Simulation steps per second
    pub fps: u32,
    /// Width of the playfield; entities spawn at this X
    pub world_width: f32,
    pub initial_lives: u32,
    pub initial_game_speed: f32,
    /// Added to game speed (and jump speed) every playing tick
    pub speed_increase: f32,
    /// Seconds on the clock
    pub duration: f32,
    /// Points for one collectable (doubled while double points is active)
    pub collectable_points: u64,
    /// Collectable spin in degrees per tick (visual only)
    pub collectable_spin: f32,
    /// Power-up drift step per tick and its bound
    pub oscillation_step: f32,
    pub oscillation_limit: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fps: FPS,
            world_width: WINDOW_WIDTH,
            initial_lives: INITIAL_LIVES,
            initial_game_speed: INITIAL_GAME_SPEED,
            speed_increase: GAME_SPEED_INCREASE,
            duration: GAME_DURATION,
            collectable_points: COLLECTABLE_POINTS,
            collectable_spin: COLLECTABLE_SPIN,
            oscillation_step: OSCILLATION_STEP,
            oscillation_limit: OSCILLATION_LIMIT,
        }
    }
}

/// Player geometry and jump tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub size: f32,
    pub head_size: f32,
    pub base_x: f32,
    pub base_y: f32,
    pub jump_height: f32,
    pub jump_speed: f32,
    pub duck_height: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            size: PLAYER_SIZE,
            head_size: PLAYER_HEAD_SIZE,
            base_x: PLAYER_BASE_X,
            base_y: PLAYER_BASE_Y,
            jump_height: JUMP_HEIGHT,
            jump_speed: JUMP_SPEED_INIT,
            duck_height: DUCK_HEIGHT,
        }
    }
}

impl PlayerConfig {
    #[inline]
    pub fn half_size(&self) -> f32 {
        self.size / 2.0
    }

    /// Apex of a jump
    #[inline]
    pub fn jump_top(&self) -> f32 {
        self.base_y + self.jump_height
    }

    /// Y while ducking
    #[inline]
    pub fn duck_y(&self) -> f32 {
        self.base_y - self.duck_height
    }
}

/// Tuning for one entity category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Edge length of the entity's collision box
    pub size: f32,
    /// Leftward movement per tick, multiplied by game speed
    pub speed: f32,
    /// Maximum live entities (power-ups: shared by both kinds)
    pub max_count: usize,
    /// Percent chance per eligible tick
    pub spawn_prob: f32,
    /// Seconds between spawns at speed 1.0
    pub spawn_interval: f32,
    /// Seconds the pickup effect lasts (power-ups only)
    #[serde(default)]
    pub effect_duration: f32,
}

impl CategoryConfig {
    #[inline]
    pub fn half_size(&self) -> f32 {
        self.size / 2.0
    }

    fn validate(&self, category: Category) -> Result<(), ConfigError> {
        let name = category.name();
        if self.size <= 0.0 {
            return Err(ConfigError::NonPositiveSize {
                what: name,
                size: self.size,
            });
        }
        if !(0.0..=100.0).contains(&self.spawn_prob) {
            return Err(ConfigError::SpawnProbability {
                category: name,
                prob: self.spawn_prob,
            });
        }
        if self.spawn_interval <= 0.0 {
            return Err(ConfigError::SpawnInterval {
                category: name,
                interval: self.spawn_interval,
            });
        }
        if self.max_count == 0 {
            return Err(ConfigError::ZeroCapacity { category: name });
        }
        if category.is_power_up() && self.effect_duration <= 0.0 {
            return Err(ConfigError::EffectDuration {
                category: name,
                duration: self.effect_duration,
            });
        }
        Ok(())
    }
}

/// Complete game tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub session: SessionConfig,
    pub player: PlayerConfig,
    pub obstacle: CategoryConfig,
    pub collectable: CategoryConfig,
    pub invincibility: CategoryConfig,
    pub double_points: CategoryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            player: PlayerConfig::default(),
            obstacle: CategoryConfig {
                size: OBSTACLE_SIZE,
                speed: OBSTACLE_SPEED,
                max_count: MAX_OBSTACLES,
                spawn_prob: OBSTACLE_SPAWN_PROB,
                spawn_interval: OBSTACLE_SPAWN_INTERVAL,
                effect_duration: 0.0,
            },
            collectable: CategoryConfig {
                size: COLLECTABLE_SIZE,
                speed: COLLECTABLE_SPEED,
                max_count: MAX_COLLECTABLES,
                spawn_prob: COLLECTABLE_SPAWN_PROB,
                spawn_interval: COLLECTABLE_SPAWN_INTERVAL,
                effect_duration: 0.0,
            },
            invincibility: CategoryConfig {
                size: POWERUP_SIZE,
                speed: POWERUP_SPEED,
                max_count: MAX_POWERUPS,
                spawn_prob: POWERUP_SPAWN_PROB,
                spawn_interval: POWERUP_SPAWN_INTERVAL,
                effect_duration: INVINCIBILITY_DURATION,
            },
            double_points: CategoryConfig {
                size: POWERUP_SIZE,
                speed: POWERUP_SPEED,
                max_count: MAX_POWERUPS,
                spawn_prob: POWERUP_SPAWN_PROB,
                spawn_interval: POWERUP_SPAWN_INTERVAL,
                effect_duration: DOUBLE_POINTS_DURATION,
            },
        }
    }
}

impl Config {
    /// Tuning for one category
    pub fn category(&self, category: Category) -> &CategoryConfig {
        match category {
            Category::Obstacle => &self.obstacle,
            Category::Collectable => &self.collectable,
            Category::Invincibility => &self.invincibility,
            Category::DoublePoints => &self.double_points,
        }
    }

    /// Fixed timestep in seconds
    #[inline]
    pub fn dt(&self) -> f32 {
        1.0 / self.session.fps as f32
    }

    /// Vertical range above the base line where pickups may spawn
    pub fn pickup_spawn_span(&self) -> u32 {
        (self.player.jump_height - self.player.head_size / 2.0) as u32
    }

    /// Reject tunings the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        if self.session.initial_game_speed <= 0.0 {
            return Err(ConfigError::NonPositiveSpeed(self.session.initial_game_speed));
        }
        if self.session.speed_increase < 0.0 {
            return Err(ConfigError::NegativeSpeedIncrease(self.session.speed_increase));
        }
        if self.player.size <= 0.0 {
            return Err(ConfigError::NonPositiveSize {
                what: "player",
                size: self.player.size,
            });
        }
        if self.pickup_spawn_span() == 0 {
            return Err(ConfigError::JumpEnvelope);
        }
        for category in Category::ALL {
            self.category(category).validate(category)?;
        }
        Ok(())
    }
}

/// Rejected tuning
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("fps must be at least 1")]
    ZeroFps,
    #[error("initial game speed must be positive, got {0}")]
    NonPositiveSpeed(f32),
    #[error("game speed increase must not be negative, got {0}")]
    NegativeSpeedIncrease(f32),
    #[error("{what} size must be positive, got {size}")]
    NonPositiveSize { what: &'static str, size: f32 },
    #[error("{category} spawn probability {prob} is outside 0..=100")]
    SpawnProbability { category: &'static str, prob: f32 },
    #[error("{category} spawn interval must be positive, got {interval}")]
    SpawnInterval {
        category: &'static str,
        interval: f32,
    },
    #[error("{category} needs room for at least one entity")]
    ZeroCapacity { category: &'static str },
    #[error("{category} effect duration must be positive, got {duration}")]
    EffectDuration {
        category: &'static str,
        duration: f32,
    },
    #[error("jump height leaves no room to place pickups")]
    JumpEnvelope,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(Config::default().validate(), Ok(()));
    }

    #[test]
    fn test_default_matches_constants() {
        let config = Config::default();
        assert_eq!(config.session.initial_lives, INITIAL_LIVES);
        assert_eq!(config.obstacle.max_count, MAX_OBSTACLES);
        assert_eq!(config.category(Category::DoublePoints).effect_duration, DOUBLE_POINTS_DURATION);
        assert!((config.dt() - SIM_DT).abs() < f32::EPSILON);
        assert_eq!(config.pickup_spawn_span(), 110);
    }

    #[test]
    fn test_validate_rejects_bad_probability() {
        let mut config = Config::default();
        config.collectable.spawn_prob = 150.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::SpawnProbability {
                category: "collectable",
                prob: 150.0
            })
        );
    }

    #[test]
    fn test_validate_rejects_zero_speed_and_fps() {
        let mut config = Config::default();
        config.session.initial_game_speed = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::NonPositiveSpeed(_))));

        let mut config = Config::default();
        config.session.fps = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroFps));
    }

    #[test]
    fn test_validate_rejects_power_up_without_duration() {
        let mut config = Config::default();
        config.invincibility.effect_duration = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EffectDuration { category: "invincibility", .. })
        ));
    }

    #[test]
    fn test_config_json_roundtrip_keeps_tuning() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
