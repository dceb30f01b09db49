//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (category order, then insertion order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod category;
pub mod collision;
pub mod entity;
pub mod player;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::autopilot;
pub use category::{Category, HitEffect, PowerUp};
pub use collision::{Sweep, overlaps};
pub use entity::{EntityStore, GameObject};
pub use player::Player;
pub use snapshot::{FrameSnapshot, PlayerView, PowerUpView};
pub use spawner::{SpawnSlot, Spawner};
pub use state::{
    GameEvent, GameOverReason, GamePhase, GameState, Oscillator, PowerUpTimer, PowerUps,
};
pub use tick::{InputEvent, InputOutcome, handle_input, tick};
