//! Entity categories
//!
//! Obstacles, collectables and the two power-up kinds share one update,
//! collision and spawn path. What differs between them is tuning (see
//! [`crate::CategoryConfig`]) and the [`HitEffect`] applied when the player
//! touches one.

use serde::{Deserialize, Serialize};

/// Kind of game object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Obstacle,
    Collectable,
    /// Power-up granting invincibility
    Invincibility,
    /// Power-up granting double points
    DoublePoints,
}

impl Category {
    /// Every category, in per-tick processing order
    pub const ALL: [Category; 4] = [
        Category::Obstacle,
        Category::Collectable,
        Category::Invincibility,
        Category::DoublePoints,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Obstacle => "obstacle",
            Category::Collectable => "collectable",
            Category::Invincibility => "invincibility",
            Category::DoublePoints => "double_points",
        }
    }

    /// Effect of the player touching an entity of this category
    pub fn effect(self) -> HitEffect {
        match self {
            Category::Obstacle => HitEffect::Damage,
            Category::Collectable => HitEffect::Score,
            Category::Invincibility => HitEffect::Grant(PowerUp::Invincibility),
            Category::DoublePoints => HitEffect::Grant(PowerUp::DoublePoints),
        }
    }

    pub fn is_power_up(self) -> bool {
        matches!(self.effect(), HitEffect::Grant(_))
    }

    /// Power-ups drift up and down with the shared oscillation
    pub fn drifts(self) -> bool {
        self.is_power_up()
    }
}

/// What happens when the player touches an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitEffect {
    /// Costs a life unless invincible; an invincible hit leaves the entity in play
    Damage,
    /// Adds collectable points
    Score,
    /// Starts (or restarts) a power-up
    Grant(PowerUp),
}

/// Timed player buffs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUp {
    Invincibility,
    DoublePoints,
}

impl PowerUp {
    pub const ALL: [PowerUp; 2] = [PowerUp::Invincibility, PowerUp::DoublePoints];

    /// Pickup category that grants this power-up
    pub fn category(self) -> Category {
        match self {
            PowerUp::Invincibility => Category::Invincibility,
            PowerUp::DoublePoints => Category::DoublePoints,
        }
    }
}
