//! Idle/demo mode - a simple bot that plays the game
//!
//! Reads the state and returns the input events a player would send this
//! tick. It never touches the state itself, so replays stay deterministic.

use super::category::{Category, PowerUp};
use super::entity::GameObject;
use super::state::{GamePhase, GameState};
use super::tick::InputEvent;

/// Ticks of warning the bot wants before an obstacle reaches the player
const REACTION_TICKS: f32 = 5.0;

/// Inputs for the coming tick
pub fn autopilot(state: &GameState) -> Vec<InputEvent> {
    match state.phase {
        GamePhase::Start => return vec![InputEvent::Begin],
        GamePhase::GameOver => return Vec::new(),
        GamePhase::Playing if state.paused => return Vec::new(),
        GamePhase::Playing => {}
    }

    // Walk straight through everything while invincible
    if state.power_ups.is_active(PowerUp::Invincibility) {
        return release_duck(state);
    }

    let Some(threat) = nearest_threat(state) else {
        return release_duck(state);
    };

    let config = state.config();
    let player = &state.player;
    let reach = config.player.half_size() + config.obstacle.half_size();
    // Ducking clears obstacles that sit at least one reach above the duck line
    let duck_clears = threat.pos.y - config.player.duck_y() >= reach;

    if duck_clears {
        if player.is_ducking() || player.is_jumping() {
            Vec::new()
        } else {
            vec![InputEvent::DuckStart]
        }
    } else if player.is_ducking() {
        vec![InputEvent::DuckEnd, InputEvent::Jump]
    } else if !player.is_jumping() && player.y <= config.player.base_y {
        vec![InputEvent::Jump]
    } else {
        Vec::new()
    }
}

fn release_duck(state: &GameState) -> Vec<InputEvent> {
    if state.player.is_ducking() {
        vec![InputEvent::DuckEnd]
    } else {
        Vec::new()
    }
}

/// Closest obstacle that has not yet passed the player and will reach it
/// within the reaction window
fn nearest_threat(state: &GameState) -> Option<&GameObject> {
    let config = state.config();
    let player_x = config.player.base_x;
    let reach = config.player.half_size() + config.obstacle.half_size();
    let step = config.obstacle.speed * state.game_speed;
    let horizon = reach + step * REACTION_TICKS;

    state
        .entities
        .iter_active(Category::Obstacle)
        .filter(|o| {
            let dx = o.pos.x - player_x;
            dx > -reach && dx < horizon
        })
        .min_by(|a, b| {
            a.pos
                .x
                .partial_cmp(&b.pos.x)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}
