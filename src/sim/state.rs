//! Game state and core simulation types
//!
//! Everything a session needs lives in one owned [`GameState`]; there is no
//! global state. Inputs and ticks take it by exclusive reference.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::category::{Category, PowerUp};
use super::entity::EntityStore;
use super::player::Player;
use super::spawner::Spawner;
use crate::config::Config;
use crate::consts::SCROLL_STEP;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for Begin
    Start,
    /// Active gameplay (pausing is a separate flag)
    Playing,
    /// Run ended; only a full reset leaves this phase
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    TimeUp,
    OutOfLives,
}

/// Something that happened during the last tick (for sound, flashes, HUD pops)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned(Category),
    LifeLost { lives_left: u32 },
    Collected { points: u64 },
    PowerUpActivated(PowerUp),
    PowerUpExpired(PowerUp),
    /// Hit with lives to spare: the lane was cleared and speed reset
    RolledBack,
    GameOver(GameOverReason),
}

/// Countdown for one power-up
///
/// While active, `remaining` is the time left. While inactive it holds the
/// full duration, ready for the next pickup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUpTimer {
    pub active: bool,
    pub remaining: f32,
    duration: f32,
}

impl PowerUpTimer {
    pub fn new(duration: f32) -> Self {
        Self {
            active: false,
            remaining: duration,
            duration,
        }
    }

    /// Start or restart the effect
    pub fn activate(&mut self) {
        self.active = true;
        self.remaining = self.duration;
    }

    /// Returns true when the effect ran out this call
    pub fn count_down(&mut self, dt: f32) -> bool {
        if self.active {
            self.remaining -= dt;
        }
        if self.remaining <= 0.0 {
            let expired = self.active;
            self.active = false;
            self.remaining = self.duration;
            return expired;
        }
        false
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUps {
    pub invincibility: PowerUpTimer,
    pub double_points: PowerUpTimer,
}

impl PowerUps {
    pub fn new(config: &Config) -> Self {
        Self {
            invincibility: PowerUpTimer::new(config.invincibility.effect_duration),
            double_points: PowerUpTimer::new(config.double_points.effect_duration),
        }
    }

    pub fn get(&self, kind: PowerUp) -> &PowerUpTimer {
        match kind {
            PowerUp::Invincibility => &self.invincibility,
            PowerUp::DoublePoints => &self.double_points,
        }
    }

    pub fn get_mut(&mut self, kind: PowerUp) -> &mut PowerUpTimer {
        match kind {
            PowerUp::Invincibility => &mut self.invincibility,
            PowerUp::DoublePoints => &mut self.double_points,
        }
    }

    #[inline]
    pub fn is_active(&self, kind: PowerUp) -> bool {
        self.get(kind).active
    }

    /// Count both timers down; returns the kinds that expired
    pub fn count_down(&mut self, dt: f32) -> Vec<PowerUp> {
        PowerUp::ALL
            .into_iter()
            .filter(|&kind| self.get_mut(kind).count_down(dt))
            .collect()
    }
}

/// Shared vertical drift applied to power-up pickups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Oscillator {
    pub offset: f32,
    pub direction: f32,
}

impl Default for Oscillator {
    fn default() -> Self {
        Self {
            offset: 0.0,
            direction: 1.0,
        }
    }
}

impl Oscillator {
    /// Move one step; bounces at ±`limit`
    pub fn step(&mut self, step: f32, limit: f32) {
        self.offset += self.direction * step;
        if self.offset > limit || self.offset < -limit {
            self.offset = self.offset.clamp(-limit, limit);
            self.direction = -self.direction;
        }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Drives spawn gates and placement; never reseeded by resets
    pub(crate) rng: Pcg32,
    pub(crate) config: Config,
    pub phase: GamePhase,
    pub paused: bool,
    pub lives: u32,
    pub score: u64,
    /// Seconds left on the clock
    pub game_time: f32,
    /// Multiplier on entity movement; only grows while playing
    pub game_speed: f32,
    /// Playing ticks simulated since the last full reset
    pub time_ticks: u64,
    pub player: Player,
    pub entities: EntityStore,
    pub spawner: Spawner,
    pub power_ups: PowerUps,
    pub oscillator: Oscillator,
    /// Collectable spin in degrees (visual)
    pub collectable_angle: f32,
    /// Background scroll (visual, keeps running while paused)
    pub scroll_offset: f32,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session on the start screen with the default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_config(Config::default(), seed)
    }

    /// Create a new session with custom tuning (expected to be validated)
    pub fn with_config(config: Config, seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Start,
            paused: false,
            lives: config.session.initial_lives,
            score: 0,
            game_time: config.session.duration,
            game_speed: config.session.initial_game_speed,
            time_ticks: 0,
            player: Player::new(&config.player),
            entities: EntityStore::new(),
            spawner: Spawner::new(&config),
            power_ups: PowerUps::new(&config),
            oscillator: Oscillator::default(),
            collectable_angle: 0.0,
            scroll_offset: -config.session.world_width,
            events: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Playing && !self.paused
    }

    /// Points a collectable is worth right now
    pub fn collectable_value(&self) -> u64 {
        let points = self.config.session.collectable_points;
        if self.power_ups.is_active(PowerUp::DoublePoints) {
            points * 2
        } else {
            points
        }
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        if self.phase != GamePhase::GameOver {
            return None;
        }
        Some(if self.game_time <= 0.0 {
            GameOverReason::TimeUp
        } else {
            GameOverReason::OutOfLives
        })
    }

    /// Shared reset logic. With `preserve_progress` (rollback after a hit)
    /// lives, score, clock and phase survive; without it the session goes
    /// back to the start screen.
    pub fn reset_core(&mut self, preserve_progress: bool) {
        let config = &self.config;
        self.game_speed = config.session.initial_game_speed;
        self.paused = false;
        self.player = Player::new(&config.player);
        self.power_ups = PowerUps::new(config);
        self.spawner = Spawner::new(config);
        self.oscillator = Oscillator::default();
        self.collectable_angle = 0.0;
        self.entities.clear();

        if !preserve_progress {
            self.lives = config.session.initial_lives;
            self.score = 0;
            self.game_time = config.session.duration;
            self.time_ticks = 0;
            self.phase = GamePhase::Start;
        }
    }

    /// Lose-a-life reset: clear the lane, keep progress
    pub fn rollback(&mut self) {
        log::info!(
            "Rollback: {} lives left, score {}, {:.1}s remaining",
            self.lives,
            self.score,
            self.game_time
        );
        self.reset_core(true);
        self.events.push(GameEvent::RolledBack);
    }

    /// Full reset, straight into play
    pub fn restart(&mut self) {
        self.reset_core(false);
        self.phase = GamePhase::Playing;
        log::info!("Session reset");
    }

    pub(crate) fn end_game(&mut self) {
        self.phase = GamePhase::GameOver;
        let reason = self
            .game_over_reason()
            .unwrap_or(GameOverReason::OutOfLives);
        log::info!(
            "Game over ({:?}): score {}, lives {}, {:.1}s left",
            reason,
            self.score,
            self.lives,
            self.game_time.max(0.0)
        );
        self.events.push(GameEvent::GameOver(reason));
    }

    /// Cosmetic scroll, wraps across twice the window width
    pub(crate) fn advance_scroll(&mut self) {
        let width = self.config.session.world_width;
        self.scroll_offset += SCROLL_STEP;
        if self.scroll_offset >= width {
            self.scroll_offset = -width;
        }
    }
}
