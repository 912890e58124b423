//! Flappy Drift headless entry point
//!
//! Runs the autopilot against a session at a fixed timestep and logs what
//! happens. Usage: `flappy-drift [seed] [easy|hard]`.
//! Set `FLAPPY_CONFIG` to a JSON file to override field tuning and
//! `FLAPPY_REPLAY` (`reselect` or `keep`) to override the replay policy.

use std::process::ExitCode;

use flappy_drift::{FieldConfig, ReplayPolicy};
use flappy_drift::consts::SIM_DT;
use flappy_drift::platform::FixedStep;
use flappy_drift::sim::{Difficulty, GameEvent, GamePhase, GameState, TickInput, tick};

/// Simulated display refresh rate
const DISPLAY_HZ: f32 = 144.0;
/// Give up after this many simulation steps (five minutes of play)
const MAX_STEPS: u64 = 5 * 60 * 60;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Flappy Drift (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0xF1A9);
    let difficulty = args
        .next()
        .and_then(|s| Difficulty::from_str(&s))
        .unwrap_or_default();

    let mut config = match std::env::var("FLAPPY_CONFIG") {
        Ok(path) => match FieldConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Bad config {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        Err(_) => FieldConfig::default(),
    };
    if let Ok(policy) = std::env::var("FLAPPY_REPLAY") {
        match ReplayPolicy::from_str(&policy) {
            Some(policy) => config.replay_policy = policy,
            None => {
                log::error!("Unknown replay policy {:?}", policy);
                return ExitCode::FAILURE;
            }
        }
    }

    let mut state = match GameState::new(config, seed) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Cannot start session: {}", e);
            return ExitCode::FAILURE;
        }
    };
    // The autopilot picks whatever difficulty the session last used
    state.difficulty = Some(difficulty);
    log::info!(
        "Seed {}, difficulty {}, replay {}",
        seed,
        difficulty.as_str(),
        state.config().replay_policy.as_str()
    );

    let mut clock = FixedStep::new();
    let mut steps: u64 = 0;
    let idle = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let quit = TickInput {
        quit: true,
        ..Default::default()
    };

    while !state.is_exited() && steps < MAX_STEPS {
        for _ in 0..clock.advance(1.0 / DISPLAY_HZ) {
            let input = if state.phase == GamePhase::GameOver {
                &quit
            } else {
                &idle
            };
            tick(&mut state, input, SIM_DT);
            steps += 1;

            for event in state.drain_events() {
                match event {
                    GameEvent::Scored { total } => log::info!("Score: {}", total),
                    GameEvent::Collided { pipe_id } => log::info!("Hit pipe {}", pipe_id),
                    GameEvent::FellOut => log::info!("Fell out of the field"),
                    GameEvent::PhaseChanged {
                        to: GamePhase::GameOver,
                        ..
                    } => {
                        let options: Vec<_> = state
                            .layout()
                            .buttons(GamePhase::GameOver)
                            .iter()
                            .map(|b| b.kind.label())
                            .collect();
                        log::info!("Game over ({})", options.join(" / "));
                    }
                    _ => log::trace!("{:?}", event),
                }
            }
        }
    }

    let snapshot = state.snapshot();
    log::info!(
        "Finished after {} steps: score {} ({:?})",
        steps,
        snapshot.score,
        snapshot.phase
    );
    println!("score={} frames={}", snapshot.score, snapshot.frame);
    ExitCode::SUCCESS
}
