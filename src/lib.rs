//! Just Run - A single-lane side-scrolling reflex game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, entities, spawning, collisions, session)
//! - `config`: Immutable game tunables built from [`consts`]
//!
//! Drawing, text overlays and window/input plumbing live outside this crate.
//! A frontend feeds [`sim::InputEvent`]s, calls [`sim::tick`] once per fixed
//! step and reads a [`sim::FrameSnapshot`] back.

pub mod config;
pub mod sim;

pub use config::{CategoryConfig, Config, ConfigError, PlayerConfig, SessionConfig};

/// Game configuration constants
pub mod consts {
    /// Window dimensions (world units map 1:1 to pixels, origin bottom-left)
    pub const WINDOW_WIDTH: f32 = 800.0;
    pub const WINDOW_HEIGHT: f32 = 600.0;

    /// Fixed simulation rate
    pub const FPS: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / FPS as f32;

    /// Session defaults
    pub const INITIAL_LIVES: u32 = 5;
    /// Tuned as 2.1 but truncated to an integer, so sessions have always run at 2
    pub const INITIAL_GAME_SPEED: f32 = 2.0;
    /// Added to game speed (and jump speed) every playing tick
    pub const GAME_SPEED_INCREASE: f32 = 0.003;
    /// Seconds on the clock at the start of a session
    pub const GAME_DURATION: f32 = 50.0;

    /// Player geometry
    pub const PLAYER_SIZE: f32 = 40.0;
    pub const PLAYER_HEAD_SIZE: f32 = 20.0;
    pub const PLAYER_BASE_X: f32 = 50.0;
    pub const PLAYER_BASE_Y: f32 = 100.0;
    pub const JUMP_HEIGHT: f32 = 120.0;
    pub const JUMP_SPEED_INIT: f32 = 10.0;
    pub const DUCK_HEIGHT: f32 = 25.0;

    /// Obstacles
    pub const OBSTACLE_SIZE: f32 = 40.0;
    pub const OBSTACLE_SPEED: f32 = 2.7;
    pub const MAX_OBSTACLES: usize = 10;
    pub const OBSTACLE_SPAWN_PROB: f32 = 5.0;
    pub const OBSTACLE_SPAWN_INTERVAL: f32 = 2.3;

    /// Collectables
    pub const COLLECTABLE_SIZE: f32 = 30.0;
    pub const COLLECTABLE_SPEED: f32 = 4.0;
    pub const MAX_COLLECTABLES: usize = 5;
    pub const COLLECTABLE_SPAWN_PROB: f32 = 3.0;
    pub const COLLECTABLE_SPAWN_INTERVAL: f32 = 0.6;
    pub const COLLECTABLE_POINTS: u64 = 10;
    /// Degrees per tick
    pub const COLLECTABLE_SPIN: f32 = 5.0;

    /// Power-ups (both kinds share one spawn slot and one cap)
    pub const POWERUP_SIZE: f32 = 30.0;
    pub const POWERUP_SPEED: f32 = 3.5;
    pub const MAX_POWERUPS: usize = 2;
    pub const POWERUP_SPAWN_PROB: f32 = 5.0;
    pub const POWERUP_SPAWN_INTERVAL: f32 = 20.0;
    pub const INVINCIBILITY_DURATION: f32 = 5.0;
    pub const DOUBLE_POINTS_DURATION: f32 = 10.0;

    /// Power-up vertical drift
    pub const OSCILLATION_STEP: f32 = 0.5;
    pub const OSCILLATION_LIMIT: f32 = 2.0;

    /// Background scroll per tick (cosmetic, never paused)
    pub const SCROLL_STEP: f32 = 1.0;
}
