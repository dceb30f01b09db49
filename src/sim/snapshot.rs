//! Read-only frame data for the rendering collaborator
//!
//! Built once after each tick. Holds only what a frontend needs to draw the
//! frame and the HUD; inactive entities are left out.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::category::{Category, PowerUp};
use super::state::{GameOverReason, GamePhase, GameState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
    pub jumping: bool,
    pub ducking: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerUpView {
    pub active: bool,
    /// Seconds left while active
    pub remaining: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub phase: GamePhase,
    pub paused: bool,
    pub game_over_reason: Option<GameOverReason>,
    pub score: u64,
    pub lives: u32,
    pub game_time: f32,
    pub player: PlayerView,
    pub obstacles: Vec<Vec2>,
    pub collectables: Vec<Vec2>,
    pub invincibility_pickups: Vec<Vec2>,
    pub double_points_pickups: Vec<Vec2>,
    pub invincibility: PowerUpView,
    pub double_points: PowerUpView,
    pub collectable_angle: f32,
    pub scroll_offset: f32,
}

impl FrameSnapshot {
    /// Positions for one category
    pub fn positions(&self, category: Category) -> &[Vec2] {
        match category {
            Category::Obstacle => &self.obstacles,
            Category::Collectable => &self.collectables,
            Category::Invincibility => &self.invincibility_pickups,
            Category::DoublePoints => &self.double_points_pickups,
        }
    }

    /// One-line HUD summary, as shown along the top of the screen
    pub fn status_line(&self) -> String {
        let power_up = |view: &PowerUpView| {
            if view.active {
                format!("{}", view.remaining as u32)
            } else {
                "NONE".to_string()
            }
        };
        let mut line = format!(
            "Lives: {}  Time: {}  Score: {}  Invincibility: {}  Double Points: {}",
            self.lives,
            self.game_time.max(0.0) as u32,
            self.score,
            power_up(&self.invincibility),
            power_up(&self.double_points),
        );
        if self.paused {
            line.push_str("  [paused]");
        }
        match self.game_over_reason {
            Some(GameOverReason::TimeUp) => line.push_str("  Time's Up!"),
            Some(GameOverReason::OutOfLives) => line.push_str("  Game Over!"),
            None => {}
        }
        line
    }
}

impl GameState {
    /// Everything the renderer reads for this frame
    pub fn snapshot(&self) -> FrameSnapshot {
        let power_up = |kind: PowerUp| {
            let timer = self.power_ups.get(kind);
            PowerUpView {
                active: timer.active,
                remaining: timer.remaining,
            }
        };
        let player_config = &self.config().player;
        FrameSnapshot {
            phase: self.phase,
            paused: self.paused,
            game_over_reason: self.game_over_reason(),
            score: self.score,
            lives: self.lives,
            game_time: self.game_time,
            player: PlayerView {
                x: player_config.base_x,
                y: self.player.y,
                jumping: self.player.is_jumping(),
                ducking: self.player.is_ducking(),
            },
            obstacles: self.entities.active_positions(Category::Obstacle),
            collectables: self.entities.active_positions(Category::Collectable),
            invincibility_pickups: self.entities.active_positions(Category::Invincibility),
            double_points_pickups: self.entities.active_positions(Category::DoublePoints),
            invincibility: power_up(PowerUp::Invincibility),
            double_points: power_up(PowerUp::DoublePoints),
            collectable_angle: self.collectable_angle,
            scroll_offset: self.scroll_offset,
        }
    }
}
