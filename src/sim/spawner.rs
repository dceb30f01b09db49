//! Timer-gated probabilistic spawning
//!
//! Three spawn slots: obstacles, collectables, and one slot shared by both
//! power-up kinds. A slot fires when its timer has run out, its category is
//! below capacity and a d100 roll lands under the spawn probability. The
//! power-up slot first flips a coin to pick which kind is eligible this tick.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::category::Category;
use super::entity::{EntityStore, GameObject};
use crate::config::{CategoryConfig, Config};

/// Independent spawn timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpawnSlot {
    Obstacle,
    Collectable,
    PowerUp,
}

/// Countdown and current interval for one slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotTimer {
    /// Seconds until the slot may fire; may go negative while the gate stays shut
    pub timer: f32,
    /// Seconds between spawns at the current game speed
    pub interval: f32,
}

impl SlotTimer {
    fn new(base_interval: f32) -> Self {
        Self {
            timer: 0.0,
            interval: base_interval,
        }
    }

    #[inline]
    fn ready(&self) -> bool {
        self.timer <= 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    pub obstacle: SlotTimer,
    pub collectable: SlotTimer,
    pub power_up: SlotTimer,
}

impl Spawner {
    /// All slots ready to fire, intervals at base speed
    pub fn new(config: &Config) -> Self {
        Self {
            obstacle: SlotTimer::new(config.obstacle.spawn_interval),
            collectable: SlotTimer::new(config.collectable.spawn_interval),
            power_up: SlotTimer::new(config.invincibility.spawn_interval),
        }
    }

    pub fn slot(&self, slot: SpawnSlot) -> &SlotTimer {
        match slot {
            SpawnSlot::Obstacle => &self.obstacle,
            SpawnSlot::Collectable => &self.collectable,
            SpawnSlot::PowerUp => &self.power_up,
        }
    }

    pub fn count_down(&mut self, dt: f32) {
        self.obstacle.timer -= dt;
        self.collectable.timer -= dt;
        self.power_up.timer -= dt;
    }

    /// Shrink intervals as the game speeds up
    pub fn rescale(&mut self, config: &Config, game_speed: f32) {
        self.obstacle.interval = config.obstacle.spawn_interval / game_speed;
        self.collectable.interval = config.collectable.spawn_interval / game_speed;
        self.power_up.interval = config.invincibility.spawn_interval / game_speed;
    }

    /// Run every slot's gate once, pushing new entities into `store`.
    /// Returns the categories spawned this tick, in slot order.
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        config: &Config,
        store: &mut EntityStore,
        rng: &mut R,
    ) -> Vec<Category> {
        let mut spawned = Vec::new();

        let obstacles = store.active_count(Category::Obstacle);
        if gate(&self.obstacle, obstacles, &config.obstacle, rng) {
            spawn_one(Category::Obstacle, config, store, rng);
            self.obstacle.timer = self.obstacle.interval;
            spawned.push(Category::Obstacle);
        }

        let collectables = store.active_count(Category::Collectable);
        if gate(&self.collectable, collectables, &config.collectable, rng) {
            spawn_one(Category::Collectable, config, store, rng);
            self.collectable.timer = self.collectable.interval;
            spawned.push(Category::Collectable);
        }

        // Single slot arbitration: only the kind picked here may spawn this tick
        let kind = if rng.random_bool(0.5) {
            Category::Invincibility
        } else {
            Category::DoublePoints
        };
        if gate(&self.power_up, store.power_up_count(), config.category(kind), rng) {
            spawn_one(kind, config, store, rng);
            self.power_up.timer = self.power_up.interval;
            spawned.push(kind);
        }

        spawned
    }
}

/// Timer, capacity, then probability. The roll is only drawn when the first
/// two pass, so RNG consumption depends on the gate state.
fn gate<R: Rng + ?Sized>(slot: &SlotTimer, live: usize, config: &CategoryConfig, rng: &mut R) -> bool {
    slot.ready() && live < config.max_count && (rng.random_range(0..100u32) as f32) < config.spawn_prob
}

fn spawn_one<R: Rng + ?Sized>(category: Category, config: &Config, store: &mut EntityStore, rng: &mut R) {
    let pos = Vec2::new(config.session.world_width, spawn_height(category, config, rng));
    log::debug!("spawn {} at ({:.1}, {:.1})", category.name(), pos.x, pos.y);
    store.push(category, GameObject::new(pos));
}

/// Obstacles sit at head height, or one duck-height lower on a coin flip
/// (duck under the high one, jump over the low one). Pickups spread over the
/// jump envelope.
fn spawn_height<R: Rng + ?Sized>(category: Category, config: &Config, rng: &mut R) -> f32 {
    let player = &config.player;
    match category {
        Category::Obstacle => {
            let high = player.base_y + player.half_size() + player.head_size / 2.0;
            if rng.random_bool(0.5) {
                high - player.duck_height
            } else {
                high
            }
        }
        _ => player.base_y + rng.random_range(0..config.pickup_spawn_span()) as f32,
    }
}
