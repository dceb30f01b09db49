//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Inputs are
//! applied between ticks through [`handle_input`]; [`tick`] never reads input.

use serde::{Deserialize, Serialize};

use super::category::Category;
use super::collision::{Sweep, sweep};
use super::state::{GameEvent, GamePhase, GameState};

/// Discrete input events, independent of any key binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Leave the start screen
    Begin,
    Jump,
    DuckStart,
    DuckEnd,
    TogglePause,
    /// Reinitialize everything and start playing immediately
    FullReset,
    Quit,
}

/// What the driver should do after an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Continue,
    /// Stop driving ticks; no teardown is needed
    Quit,
}

/// Apply one input event. Requests that are not legal right now are ignored.
pub fn handle_input(state: &mut GameState, event: InputEvent) -> InputOutcome {
    match event {
        InputEvent::Begin => {
            if state.phase == GamePhase::Start {
                state.phase = GamePhase::Playing;
                log::info!("Session started (seed {})", state.seed);
            }
        }
        InputEvent::Jump => {
            if state.is_running() {
                let config = state.config().player.clone();
                state.player.start_jump(&config);
            }
        }
        InputEvent::DuckStart => {
            if state.is_running() {
                let config = state.config().player.clone();
                state.player.start_duck(&config);
            }
        }
        // A release must always land, even if it arrives while paused
        InputEvent::DuckEnd => {
            state.player.end_duck();
        }
        InputEvent::TogglePause => {
            if state.phase == GamePhase::Playing {
                state.paused = !state.paused;
                log::info!("{}", if state.paused { "Paused" } else { "Resumed" });
            }
        }
        InputEvent::FullReset => state.restart(),
        InputEvent::Quit => {
            log::info!("Quit requested");
            return InputOutcome::Quit;
        }
    }
    InputOutcome::Continue
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, dt: f32) {
    state.events.clear();

    // Background keeps scrolling on every screen, paused or not
    state.advance_scroll();

    if !state.is_running() {
        return;
    }

    state.time_ticks += 1;

    // Clocks
    state.game_time -= dt;
    state.spawner.count_down(dt);
    let session = &state.config().session;
    let (spin, osc_step, osc_limit, speed_increase) = (
        session.collectable_spin,
        session.oscillation_step,
        session.oscillation_limit,
        session.speed_increase,
    );
    state.collectable_angle = (state.collectable_angle + spin) % 360.0;
    state.oscillator.step(osc_step, osc_limit);
    for kind in state.power_ups.count_down(dt) {
        log::debug!("Power-up {:?} expired", kind);
        state.events.push(GameEvent::PowerUpExpired(kind));
    }

    if state.game_time <= 0.0 {
        state.end_game();
        return;
    }

    // Difficulty ramps every tick; the jump speeds up with it
    state.game_speed += speed_increase;
    let game_speed = state.game_speed;
    let GameState {
        config,
        spawner,
        player,
        ..
    } = state;
    spawner.rescale(config, game_speed);
    player.advance(&config.player, speed_increase);

    for category in Category::ALL {
        if sweep(state, category) == Sweep::LifeLost {
            if state.lives == 0 {
                state.entities.compact();
                state.end_game();
            } else {
                state.rollback();
            }
            return;
        }
    }

    let GameState {
        config,
        spawner,
        entities,
        rng,
        events,
        ..
    } = state;
    for category in spawner.spawn(config, entities, rng) {
        events.push(GameEvent::Spawned(category));
    }

    state.entities.compact();

    log::trace!(
        "tick {}: t={:.2} speed={:.3} y={:.1} entities={}",
        state.time_ticks,
        state.game_time,
        state.game_speed,
        state.player.y,
        state.entities.total_len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::consts::SIM_DT;
    use crate::sim::category::PowerUp;
    use crate::sim::entity::GameObject;
    use crate::sim::state::GameOverReason;
    use glam::Vec2;
    use proptest::prelude::*;

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        handle_input(&mut state, InputEvent::Begin);
        assert_eq!(state.phase, GamePhase::Playing);
        state
    }

    /// No random spawns, so tests control every entity
    fn quiet(seed: u64) -> GameState {
        let mut config = Config::default();
        config.obstacle.spawn_prob = 0.0;
        config.collectable.spawn_prob = 0.0;
        config.invincibility.spawn_prob = 0.0;
        config.double_points.spawn_prob = 0.0;
        let mut state = GameState::with_config(config, seed);
        handle_input(&mut state, InputEvent::Begin);
        state
    }

    /// Where an entity must start to sit on the player after next tick's move
    fn on_player(state: &GameState, category: Category) -> Vec2 {
        let config = state.config();
        let next_speed = state.game_speed + config.session.speed_increase;
        let step = config.category(category).speed * next_speed;
        Vec2::new(config.player.base_x + step, config.player.base_y)
    }

    #[test]
    fn test_tick_start_to_playing() {
        let mut state = GameState::new(12345);
        assert_eq!(state.phase, GamePhase::Start);

        // Ticking on the start screen changes nothing but the scroll
        tick(&mut state, SIM_DT);
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.game_time, state.config().session.duration);

        handle_input(&mut state, InputEvent::Begin);
        tick(&mut state, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 1);
        assert!(state.game_time < state.config().session.duration);
    }

    #[test]
    fn test_hit_with_lives_left_rolls_back() {
        let mut state = quiet(1);
        for _ in 0..30 {
            tick(&mut state, SIM_DT);
        }
        state.score = 40;
        let time_before = state.game_time;
        let pos = on_player(&state, Category::Obstacle);
        state.entities.push(Category::Obstacle, GameObject::new(pos));
        state.entities.push(Category::Collectable, GameObject::new(Vec2::new(700.0, 150.0)));

        tick(&mut state, SIM_DT);

        assert_eq!(state.lives, 4);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.entities.is_empty());
        assert_eq!(state.game_speed, state.config().session.initial_game_speed);
        assert_eq!(state.score, 40);
        assert!((state.game_time - (time_before - SIM_DT)).abs() < 1e-4);
        assert!(state.events.contains(&GameEvent::RolledBack));
    }

    #[test]
    fn test_last_life_ends_game() {
        let mut state = quiet(1);
        state.lives = 1;
        let pos = on_player(&state, Category::Obstacle);
        state.entities.push(Category::Obstacle, GameObject::new(pos));

        tick(&mut state, SIM_DT);

        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.game_over_reason(), Some(GameOverReason::OutOfLives));
        assert!(state.events.contains(&GameEvent::GameOver(GameOverReason::OutOfLives)));
    }

    #[test]
    fn test_collectable_scores_ten() {
        let mut state = quiet(1);
        let pos = on_player(&state, Category::Collectable);
        state.entities.push(Category::Collectable, GameObject::new(pos));

        tick(&mut state, SIM_DT);

        assert_eq!(state.score, 10);
        assert!(state.entities.get(Category::Collectable).is_empty());
        assert_eq!(state.events, vec![GameEvent::Collected { points: 10 }]);
    }

    #[test]
    fn test_clock_running_out_ends_game() {
        let mut state = quiet(1);
        state.game_time = 0.0;
        tick(&mut state, SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.game_over_reason(), Some(GameOverReason::TimeUp));

        // Terminal: ticks and gameplay input do nothing
        let frozen = serde_json::to_value(&state.player).unwrap();
        handle_input(&mut state, InputEvent::Begin);
        handle_input(&mut state, InputEvent::Jump);
        handle_input(&mut state, InputEvent::TogglePause);
        tick(&mut state, SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(!state.paused);
        assert_eq!(serde_json::to_value(&state.player).unwrap(), frozen);
    }

    #[test]
    fn test_session_times_out_after_duration() {
        let mut state = quiet(3);
        let ticks = (state.config().session.duration * state.config().session.fps as f32) as u64;
        for _ in 0..ticks + 2 {
            tick(&mut state, SIM_DT);
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.game_over_reason(), Some(GameOverReason::TimeUp));
        assert!(state.time_ticks <= ticks + 1);
    }

    #[test]
    fn test_power_up_expires() {
        let mut state = quiet(1);
        state.power_ups.invincibility.activate();
        let ticks = (state.config().invincibility.effect_duration / SIM_DT) as usize + 2;
        let mut expired = false;
        for _ in 0..ticks {
            tick(&mut state, SIM_DT);
            expired |= state.events.contains(&GameEvent::PowerUpExpired(PowerUp::Invincibility));
        }
        assert!(expired);
        assert!(!state.power_ups.is_active(PowerUp::Invincibility));
        assert_eq!(
            state.power_ups.invincibility.remaining,
            state.config().invincibility.effect_duration
        );
    }

    #[test]
    fn test_tick_pause() {
        let mut state = playing(12345);
        for _ in 0..120 {
            tick(&mut state, SIM_DT);
        }

        handle_input(&mut state, InputEvent::TogglePause);
        assert!(state.paused);

        let before = serde_json::to_value(&state).unwrap();
        let scroll = state.scroll_offset;
        for _ in 0..60 {
            tick(&mut state, SIM_DT);
        }
        assert_ne!(state.scroll_offset, scroll);
        state.scroll_offset = scroll;
        assert_eq!(serde_json::to_value(&state).unwrap(), before);

        handle_input(&mut state, InputEvent::TogglePause);
        assert!(!state.paused);
    }

    #[test]
    fn test_pause_ignored_off_playing() {
        let mut state = GameState::new(1);
        handle_input(&mut state, InputEvent::TogglePause);
        assert!(!state.paused);
    }

    #[test]
    fn test_player_input_needs_running_game() {
        let mut state = GameState::new(1);
        handle_input(&mut state, InputEvent::Jump);
        assert!(!state.player.is_jumping());

        handle_input(&mut state, InputEvent::Begin);
        handle_input(&mut state, InputEvent::DuckStart);
        assert!(state.player.is_ducking());
        handle_input(&mut state, InputEvent::TogglePause);
        handle_input(&mut state, InputEvent::DuckEnd);
        assert!(!state.player.is_ducking());
    }

    #[test]
    fn test_full_reset_restores_initial_session() {
        let fresh = GameState::new(8);
        let mut state = playing(8);
        for _ in 0..600 {
            tick(&mut state, SIM_DT);
        }
        state.score = 250;
        state.lives = 2;

        assert_eq!(handle_input(&mut state, InputEvent::FullReset), InputOutcome::Continue);
        assert_eq!(state.phase, GamePhase::Playing);
        handle_input(&mut state, InputEvent::Begin);
        assert_eq!(state.phase, GamePhase::Playing);

        assert_eq!(state.lives, fresh.lives);
        assert_eq!(state.score, fresh.score);
        assert_eq!(state.game_time, fresh.game_time);
        assert_eq!(state.game_speed, fresh.game_speed);
        assert_eq!(state.player, fresh.player);
        assert_eq!(state.power_ups, fresh.power_ups);
        assert_eq!(state.spawner, fresh.spawner);
        assert_eq!(state.oscillator, fresh.oscillator);
        assert_eq!(state.collectable_angle, fresh.collectable_angle);
        assert!(!state.paused);
        assert!(state.entities.is_empty());
    }

    #[test]
    fn test_quit_reports_quit() {
        let mut state = playing(1);
        assert_eq!(handle_input(&mut state, InputEvent::Quit), InputOutcome::Quit);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_spawns_arrive_at_right_edge() {
        let mut state = playing(77);
        let mut spawned = 0;
        for _ in 0..600 {
            tick(&mut state, SIM_DT);
            if state.phase != GamePhase::Playing {
                break;
            }
            for event in &state.events {
                if let GameEvent::Spawned(category) = event {
                    spawned += 1;
                    let newest = state.entities.get(*category).last().unwrap();
                    assert_eq!(newest.pos.x, state.config().session.world_width);
                }
            }
        }
        assert!(spawned > 0);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = playing(99999);
        let mut state2 = playing(99999);

        for i in 0..900 {
            let event = match i % 90 {
                10 => Some(InputEvent::Jump),
                50 => Some(InputEvent::DuckStart),
                60 => Some(InputEvent::DuckEnd),
                _ => None,
            };
            if let Some(event) = event {
                handle_input(&mut state1, event);
                handle_input(&mut state2, event);
            }
            tick(&mut state1, SIM_DT);
            tick(&mut state2, SIM_DT);
        }

        assert_eq!(
            serde_json::to_string(&state1).unwrap(),
            serde_json::to_string(&state2).unwrap()
        );
    }

    #[derive(Debug, Clone, Copy)]
    enum Step {
        Input(InputEvent),
        Tick,
    }

    fn step() -> impl Strategy<Value = Step> {
        prop_oneof![
            4 => Just(Step::Tick),
            1 => Just(Step::Input(InputEvent::Jump)),
            1 => Just(Step::Input(InputEvent::DuckStart)),
            1 => Just(Step::Input(InputEvent::DuckEnd)),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_jump_and_duck_exclusive(seed in any::<u64>(), steps in prop::collection::vec(step(), 0..400)) {
            let mut state = playing(seed);
            for step in steps {
                match step {
                    Step::Input(event) => { handle_input(&mut state, event); }
                    Step::Tick => tick(&mut state, SIM_DT),
                }
                prop_assert!(!(state.player.is_jumping() && state.player.is_ducking()));
            }
        }

        #[test]
        fn prop_paused_ticks_freeze_simulation(seed in any::<u64>(), warmup in 0usize..300, paused_ticks in 1usize..120) {
            let mut state = playing(seed);
            for _ in 0..warmup {
                tick(&mut state, SIM_DT);
            }
            prop_assume!(state.phase == GamePhase::Playing);
            handle_input(&mut state, InputEvent::TogglePause);

            let lives = state.lives;
            let score = state.score;
            let game_time = state.game_time;
            let entities = state.entities.clone();
            let spawner = state.spawner.clone();
            let power_ups = state.power_ups.clone();
            for _ in 0..paused_ticks {
                tick(&mut state, SIM_DT);
            }
            prop_assert_eq!(state.lives, lives);
            prop_assert_eq!(state.score, score);
            prop_assert_eq!(state.game_time, game_time);
            prop_assert_eq!(&state.entities, &entities);
            prop_assert_eq!(&state.spawner, &spawner);
            prop_assert_eq!(&state.power_ups, &power_ups);
        }
    }
}
