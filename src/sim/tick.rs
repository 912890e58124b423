//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically, one frame per
//! call.

use glam::Vec2;

use super::menu::ButtonKind;
use super::state::{Difficulty, GameEvent, GamePhase, GameState};

/// Input signals for a single tick, already debounced by the host
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flap (space/tap)
    pub flap: bool,
    /// Pointer click position in field coordinates
    pub pointer_click: Option<Vec2>,
    /// Continue (enter/any key on the intro and game over screens)
    pub continue_requested: bool,
    /// Direct difficulty choice on the mode select screen
    pub select_mode: Option<Difficulty>,
    /// Replay from the game over screen
    pub replay: bool,
    /// Quit from the game over screen
    pub quit: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the session by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.is_exited() {
        return;
    }

    let input = if input.idle_mode {
        autopilot(state, input)
    } else {
        input.clone()
    };
    let input = &input;

    let clicked = input
        .pointer_click
        .and_then(|p| state.layout.hit(state.phase, p));

    match state.phase {
        GamePhase::Intro => {
            if input.continue_requested || input.pointer_click.is_some() {
                state.advance_intro();
            }
        }

        GamePhase::ModeSelect => {
            let choice = input.select_mode.or(match clicked {
                Some(ButtonKind::Easy) => Some(Difficulty::Easy),
                Some(ButtonKind::Hard) => Some(Difficulty::Hard),
                _ => None,
            });
            if let Some(difficulty) = choice {
                state.select_mode(difficulty);
            }
        }

        GamePhase::AwaitingFirstFlap => {
            // The starting flap doubles as the first impulse of the run
            if input.flap {
                play_step(state, input, dt);
            }
        }

        GamePhase::Playing => play_step(state, input, dt),

        GamePhase::GameOver => {
            if input.quit || clicked == Some(ButtonKind::Quit) {
                state.quit();
            } else if input.replay
                || input.continue_requested
                || clicked == Some(ButtonKind::Replay)
            {
                state.replay();
            }
        }

        GamePhase::Exited => {}
    }
}

/// One frame of gameplay
fn play_step(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.flap {
        state.flap();
    }

    state.bird.update(dt);

    let mut over = false;
    if state.bird.bottom() > state.config.height {
        state.events.push(GameEvent::FellOut);
        over = true;
    }

    state.frame += 1;
    let difficulty = state.difficulty.unwrap_or_default();
    match state
        .stream
        .tick(state.frame, difficulty, &state.config, &mut state.rng)
    {
        Ok(Some(id)) => state.events.push(GameEvent::PipeSpawned { id }),
        Ok(None) => {}
        // Unreachable with a validated config
        Err(e) => log::error!("Pipe spawn failed at frame {}: {}", state.frame, e),
    }
    state.stream.advance(dt);

    let passed = state.stream.score_events(state.bird.x());
    if passed > 0 {
        state.score += passed;
        log::debug!("Passed {} pipe(s), score {}", passed, state.score);
        state.events.push(GameEvent::Scored { total: state.score });
    }

    let hit = state
        .stream
        .pipes()
        .iter()
        .find(|p| state.bird.is_colliding_with(p))
        .map(|p| p.id);
    if let Some(pipe_id) = hit {
        state.events.push(GameEvent::Collided { pipe_id });
        over = true;
    }

    if over {
        state.end_run();
    }
}

/// Synthesize input for demo mode
fn autopilot(state: &GameState, input: &TickInput) -> TickInput {
    let mut input = input.clone();
    match state.phase {
        GamePhase::Intro => input.continue_requested = true,
        GamePhase::ModeSelect => {
            input.select_mode = Some(state.difficulty.unwrap_or_default());
        }
        GamePhase::AwaitingFirstFlap => input.flap = true,
        GamePhase::Playing => {
            let bird = &state.bird;
            // Nearest pipe the bird has not fully cleared
            let target_y = state
                .stream
                .pipes()
                .iter()
                .find(|p| p.x + p.width >= bird.x() - bird.radius)
                .map(|p| p.gap_center() + p.gap * 0.15)
                .unwrap_or(state.config.height / 2.0);
            input.flap = bird.y > target_y && bird.vel >= 0.0;
        }
        GamePhase::GameOver | GamePhase::Exited => {}
    }
    input
}
