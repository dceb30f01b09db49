//! Just Run entry point
//!
//! Headless tick driver: runs one simulation step per fixed interval, feeds
//! the idle-mode bot's inputs, and reports the HUD line as it goes. Drawing
//! and keyboard capture belong to a frontend and are not part of this binary.

use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, bail};
use clap::Parser;

use just_run::Config;
use just_run::sim::{GamePhase, GameState, InputEvent, InputOutcome, autopilot, handle_input, tick};

#[derive(Parser, Debug)]
#[command(about = "Run the Just Run simulation headless", version)]
struct Args {
    /// RNG seed (defaults to the wall clock)
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many ticks even if the run is still going
    #[arg(long, default_value_t = 4000)]
    ticks: u64,
    /// Pace ticks at the configured FPS instead of running flat out
    #[arg(long)]
    realtime: bool,
    /// Do not let the bot play; the runner just stands in the lane
    #[arg(long)]
    no_autopilot: bool,
    /// Log the HUD line every N ticks (0 = never)
    #[arg(long, default_value_t = 60)]
    report_every: u64,
    /// Print the final frame snapshot as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    if args.ticks == 0 {
        bail!("--ticks must be at least 1");
    }

    let config = Config::default();
    config.validate().context("invalid built-in tuning")?;
    let dt = config.dt();
    let interval = Duration::from_millis(1000 / u64::from(config.session.fps));

    let seed = args.seed.unwrap_or_else(clock_seed);
    log::info!("Just Run (headless) starting, seed {}", seed);
    let mut state = GameState::with_config(config, seed);
    if args.no_autopilot {
        handle_input(&mut state, InputEvent::Begin);
    }

    let mut next_deadline = Instant::now();
    let mut ticks = 0;
    loop {
        if !args.no_autopilot {
            for event in autopilot(&state) {
                handle_input(&mut state, event);
            }
        }

        tick(&mut state, dt);
        ticks += 1;

        if args.report_every > 0 && ticks % args.report_every == 0 {
            log::info!("[{:>5}] {}", ticks, state.snapshot().status_line());
        }
        if state.phase == GamePhase::GameOver {
            break;
        }
        if ticks >= args.ticks {
            log::warn!("Tick budget of {} reached before the run ended", args.ticks);
            if handle_input(&mut state, InputEvent::Quit) == InputOutcome::Quit {
                break;
            }
        }

        if args.realtime {
            next_deadline += interval;
            let now = Instant::now();
            if next_deadline > now {
                thread::sleep(next_deadline - now);
            } else {
                // Fell behind; restart the cadence instead of bursting
                next_deadline = now;
            }
        }
    }

    let snapshot = state.snapshot();
    if args.json {
        let json = serde_json::to_string_pretty(&snapshot).context("encode snapshot")?;
        println!("{json}");
    } else {
        println!("{}", snapshot.status_line());
        println!("ticks: {ticks}, seed: {seed}");
    }
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
