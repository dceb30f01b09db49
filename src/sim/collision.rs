//! Movement, collision and scoring for entity categories
//!
//! Collision is a discrete box overlap test at the post-move position. There
//! is no swept test: at very high speed an entity can step clean over the
//! player between ticks, and that is accepted.

use glam::Vec2;

use super::category::{Category, HitEffect, PowerUp};
use super::state::{GameEvent, GameState};

/// Axis-aligned overlap of two square boxes given their centers and half sizes
#[inline]
pub fn overlaps(a: Vec2, a_half: f32, b: Vec2, b_half: f32) -> bool {
    let reach = a_half + b_half;
    (a.x - b.x).abs() < reach && (a.y - b.y).abs() < reach
}

/// Outcome of sweeping one category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sweep {
    /// Nothing session-ending happened
    Clear,
    /// An obstacle cost a life; the caller decides between rollback and game over
    LifeLost,
}

/// Move every active entity of `category`, resolve player contact, and cull
/// anything that has left the screen. Inactive entities stay in the store
/// until the next compaction.
pub fn sweep(state: &mut GameState, category: Category) -> Sweep {
    let config = state.config();
    let cat = config.category(category);
    let size = cat.size;
    let entity_half = cat.half_size();
    let step = cat.speed * state.game_speed;
    let player_half = config.player.half_size();
    let player_pos = state.player.position(&config.player);
    let drift = if category.drifts() {
        state.oscillator.offset
    } else {
        0.0
    };

    let effect = category.effect();
    // Invincible players pass through obstacles without touching them
    let shielded =
        effect == HitEffect::Damage && state.power_ups.is_active(PowerUp::Invincibility);

    let mut hits = 0u32;
    for object in state.entities.get_mut(category).iter_mut() {
        if !object.active {
            continue;
        }
        object.pos.x -= step;
        object.pos.y += drift;

        if !shielded && overlaps(object.pos, entity_half, player_pos, player_half) {
            object.deactivate();
            hits += 1;
            if effect == HitEffect::Damage {
                // One life per tick at most; the lane is about to be reset
                break;
            }
        }

        if object.pos.x < -size {
            object.deactivate();
        }
    }

    if hits == 0 {
        return Sweep::Clear;
    }

    match effect {
        HitEffect::Damage => {
            state.lives = state.lives.saturating_sub(1);
            log::debug!("Hit obstacle, {} lives left", state.lives);
            state.events.push(GameEvent::LifeLost {
                lives_left: state.lives,
            });
            Sweep::LifeLost
        }
        HitEffect::Score => {
            for _ in 0..hits {
                let points = state.collectable_value();
                state.score += points;
                state.events.push(GameEvent::Collected { points });
            }
            log::debug!("Collected {} (score {})", hits, state.score);
            Sweep::Clear
        }
        HitEffect::Grant(kind) => {
            state.power_ups.get_mut(kind).activate();
            log::debug!("Power-up {:?} active", kind);
            state.events.push(GameEvent::PowerUpActivated(kind));
            Sweep::Clear
        }
    }
}
