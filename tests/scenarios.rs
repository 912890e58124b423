//! End-to-end session scenarios driven through the public tick API

use flappy_drift::consts::SIM_DT;
use flappy_drift::sim::{Difficulty, GameEvent, GamePhase, GameState, PipeStream, TickInput, tick};
use flappy_drift::{FieldConfig, ReplayPolicy};
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn press(continue_requested: bool, flap: bool) -> TickInput {
    TickInput {
        continue_requested,
        flap,
        ..Default::default()
    }
}

/// Drive a fresh session through intro and mode select
fn ready(config: FieldConfig, difficulty: Difficulty, seed: u64) -> GameState {
    let mut state = GameState::new(config, seed).expect("valid config");
    tick(&mut state, &press(true, false), SIM_DT);
    let choose = TickInput {
        select_mode: Some(difficulty),
        ..Default::default()
    };
    tick(&mut state, &choose, SIM_DT);
    assert_eq!(state.phase, GamePhase::AwaitingFirstFlap);
    state
}

#[test]
fn test_easy_mode_free_fall_ends_run() {
    let config = FieldConfig {
        gravity: 0.2,
        damping: 0.99,
        ..Default::default()
    };
    let mut state = ready(config, Difficulty::Easy, 1);
    // Start the clock without an impulse
    state.phase = GamePhase::Playing;
    assert_eq!(state.bird.y, 300.0);

    let mut events = Vec::new();
    while state.phase == GamePhase::Playing && state.frame < 1000 {
        tick(&mut state, &TickInput::default(), SIM_DT);
        events.extend(state.drain_events());
    }

    assert_eq!(state.phase, GamePhase::GameOver);
    assert!(state.bird.bottom() > 600.0);
    // Falls before the first spawn at frame 100
    assert!(state.frame < 100, "fell after {} frames", state.frame);
    assert!(state.stream.is_empty());
    assert!(events.contains(&GameEvent::FellOut));
    assert!(!events.iter().any(|e| matches!(e, GameEvent::Collided { .. })));
    assert_eq!(state.score, 0);
}

#[test]
fn test_single_pipe_scores_exactly_once() {
    // Hovering bird, one pipe with its gap pinned around the bird
    let config = FieldConfig {
        gravity: 0.0,
        gap_margin: 200.0,
        ..Default::default()
    };
    let mut state = ready(config, Difficulty::Easy, 2);
    state.phase = GamePhase::Playing;

    // The second pipe (spawned at frame 200) would not cross until frame 344
    let mut scored_at = Vec::new();
    for _ in 0..300 {
        tick(&mut state, &TickInput::default(), SIM_DT);
        for event in state.drain_events() {
            if let GameEvent::Scored { total } = event {
                scored_at.push((state.frame, total));
            }
        }
    }

    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.score, 1);
    // Spawned at frame 100 with center 825, crosses x=100 after 145 moves
    assert_eq!(scored_at, vec![(244, 1)]);
}

#[test]
fn test_score_survives_speed_that_skips_exact_match() {
    let config = FieldConfig {
        gravity: 0.0,
        gap_margin: 200.0,
        pipe_speed: 7.0,
        ..Default::default()
    };
    let mut state = ready(config, Difficulty::Easy, 3);
    state.phase = GamePhase::Playing;
    // First pipe center goes 825 -> 818 at frame 100 and passes 100 at frame 203
    for _ in 0..300 {
        tick(&mut state, &TickInput::default(), SIM_DT);
    }
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.score, 1);
}

#[test]
fn test_hard_mode_gap_validity() {
    let config = FieldConfig::default();
    let diameter = config.bird_size;
    for seed in 0..1000 {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut stream = PipeStream::new();
        stream
            .spawn(Difficulty::Hard, &config, &mut rng)
            .expect("valid config");
        let pipe = &stream.pipes()[0];
        assert!(pipe.gap >= 3.0 * diameter);
        assert!(pipe.gap <= config.height - 3.0 * diameter);
    }
}

#[test]
fn test_hard_mode_gaps_stay_in_field() {
    // No gravity and no collisions possible above the field: just watch pipes
    let config = FieldConfig {
        gravity: 0.0,
        spawn_cadence: 20,
        ..Default::default()
    };
    let mut state = ready(config, Difficulty::Hard, 4);
    state.phase = GamePhase::Playing;
    // Park the bird high above the field so pipes never touch it
    state.bird.y = -10_000.0;

    for _ in 0..2000 {
        tick(&mut state, &TickInput::default(), SIM_DT);
        for (top, bottom) in state.snapshot().pipes {
            assert!(top.h >= 0.0);
            assert!(bottom.h >= -1e-3);
            assert!(bottom.bottom() <= 600.0 + 1e-3);
        }
    }
    assert!(state.stream.pipes().iter().all(|p| p.is_oscillating()));
    assert!(state.stream.pipes().iter().all(|p| p.x + p.width > 0.0));
}

#[test]
fn test_replay_discards_run_and_reselects() {
    let mut state = ready(FieldConfig::default(), Difficulty::Hard, 5);
    tick(&mut state, &press(false, true), SIM_DT);
    while state.phase == GamePhase::Playing {
        tick(&mut state, &TickInput::default(), SIM_DT);
    }
    assert_eq!(state.phase, GamePhase::GameOver);

    let replay = state.layout().buttons(GamePhase::GameOver)[0].rect.center();
    let click = TickInput {
        pointer_click: Some(replay),
        ..Default::default()
    };
    tick(&mut state, &click, SIM_DT);

    assert_eq!(state.phase, GamePhase::ModeSelect);
    assert_eq!(state.frame, 0);
    assert_eq!(state.score, 0);
    assert!(state.stream.is_empty());
    assert_eq!(state.bird.vel, 0.0);

    // Flapping here does nothing until a mode is picked
    tick(&mut state, &press(false, true), SIM_DT);
    assert_eq!(state.phase, GamePhase::ModeSelect);
}

#[test]
fn test_keep_difficulty_policy_skips_mode_select() {
    let config = FieldConfig {
        replay_policy: ReplayPolicy::KeepDifficulty,
        ..Default::default()
    };
    let mut state = ready(config, Difficulty::Hard, 6);
    tick(&mut state, &press(false, true), SIM_DT);
    while state.phase == GamePhase::Playing {
        tick(&mut state, &TickInput::default(), SIM_DT);
    }

    tick(&mut state, &press(true, false), SIM_DT);
    assert_eq!(state.phase, GamePhase::AwaitingFirstFlap);
    assert_eq!(state.difficulty, Some(Difficulty::Hard));
}

#[test]
fn test_autopilot_runs_are_reproducible() {
    let run = |seed: u64| {
        let mut state = GameState::new(FieldConfig::default(), seed).expect("valid config");
        let idle = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..3000 {
            if state.phase == GamePhase::GameOver {
                break;
            }
            tick(&mut state, &idle, SIM_DT);
        }
        state.snapshot()
    };
    assert_eq!(run(2024), run(2024));
}

#[test]
fn test_config_file_roundtrip() {
    let path = std::env::temp_dir().join(format!("flappy_drift_{}.json", std::process::id()));
    let config = FieldConfig {
        gravity: 0.3,
        ..Default::default()
    };
    std::fs::write(&path, serde_json::to_string(&config).expect("serializable")).expect("writable");

    let loaded = FieldConfig::load(&path).expect("valid file");
    assert_eq!(loaded, config);

    std::fs::remove_file(&path).ok();
    assert!(FieldConfig::load(&path).is_err());
}
