//! Player controller
//!
//! The player never moves horizontally. Vertically it rises at `jump_speed`
//! per tick until the jump apex, then falls at the same rate and snaps back
//! onto the base line. Ducking drops it to a fixed height instantly.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::PlayerConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Vertical center of the player's body
    pub y: f32,
    /// Vertical step per tick, grows with game speed
    pub jump_speed: f32,
    jumping: bool,
    ducking: bool,
}

impl Player {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            y: config.base_y,
            jump_speed: config.jump_speed,
            jumping: false,
            ducking: false,
        }
    }

    #[inline]
    pub fn is_jumping(&self) -> bool {
        self.jumping
    }

    #[inline]
    pub fn is_ducking(&self) -> bool {
        self.ducking
    }

    /// Center of the collision box
    pub fn position(&self, config: &PlayerConfig) -> Vec2 {
        Vec2::new(config.base_x, self.y)
    }

    /// Jump and duck can only start from the ground with neither in progress
    fn can_act(&self, config: &PlayerConfig) -> bool {
        !self.jumping && !self.ducking && self.y <= config.base_y
    }

    /// Returns false when the jump was refused
    pub fn start_jump(&mut self, config: &PlayerConfig) -> bool {
        if !self.can_act(config) {
            return false;
        }
        self.jumping = true;
        true
    }

    /// Returns false when the duck was refused
    pub fn start_duck(&mut self, config: &PlayerConfig) -> bool {
        if !self.can_act(config) {
            return false;
        }
        self.ducking = true;
        true
    }

    /// Releasing duck never resumes a jump; the player stands up next tick
    pub fn end_duck(&mut self) -> bool {
        std::mem::replace(&mut self.ducking, false)
    }

    /// Advance one tick. `speed_increment` is the game speed increase for this
    /// tick; the jump speeds up by the same amount.
    pub fn advance(&mut self, config: &PlayerConfig, speed_increment: f32) {
        self.jump_speed += speed_increment;

        if self.jumping {
            self.y += self.jump_speed;
            if self.y >= config.jump_top() {
                self.jumping = false;
            }
        } else if self.y > config.base_y && !self.ducking {
            self.y -= self.jump_speed;
        }

        if self.ducking {
            self.y = config.duck_y();
        } else if !self.jumping && self.y < config.base_y {
            self.y = config.base_y;
        }
    }
}
