//! Session state and core simulation types
//!
//! One `GameState` lives for the whole program. Each play attempt (a run)
//! gets a fresh bird, pipe stream, score, and frame counter.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bird::Bird;
use super::collision::Rect;
use super::menu::{Button, MenuLayout};
use super::stream::PipeStream;
use crate::config::{ConfigError, FieldConfig, ReplayPolicy};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for any continue signal
    Intro,
    /// Waiting for Easy or Hard to be picked
    ModeSelect,
    /// Bird and pipes frozen until the first flap
    AwaitingFirstFlap,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for replay or quit
    GameOver,
    /// Player quit; ticking does nothing
    Exited,
}

/// Difficulty variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    /// Stationary gaps at random heights
    #[default]
    Easy,
    /// Gaps start centered and oscillate vertically
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Things that happened during a tick, for audio and visual cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    Flapped,
    PipeSpawned { id: u32 },
    /// `total` is the score after crediting
    Scored { total: u32 },
    Collided { pipe_id: u32 },
    FellOut,
}

/// Immutable per-frame copy of everything the presentation layer draws
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub difficulty: Option<Difficulty>,
    pub score: u32,
    pub frame: u64,
    pub bird_center: Vec2,
    pub bird_radius: f32,
    /// (top, bottom) barrier pairs, oldest pipe first
    pub pipes: Vec<(Rect, Rect)>,
    /// Buttons visible in this phase
    pub buttons: Vec<Button>,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Field geometry, fixed for the session
    pub(crate) config: FieldConfig,
    /// Button placement derived from the field
    pub(crate) layout: MenuLayout,
    /// Seed the generator was built from (0 when injected)
    pub seed: u64,
    /// Pipe placement randomness
    pub(crate) rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Last chosen difficulty (None until the first choice)
    pub difficulty: Option<Difficulty>,
    /// Frames simulated in the current run
    pub frame: u64,
    /// Pipes passed in the current run
    pub score: u32,
    /// Number of runs started
    pub runs: u32,
    pub bird: Bird,
    pub stream: PipeStream,
    /// Events since the last drain. Hosts drain every frame; anything left
    /// over is dropped when a new run starts.
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session with a generator seeded from `seed`
    pub fn new(config: FieldConfig, seed: u64) -> Result<Self, ConfigError> {
        let mut state = Self::with_rng(config, Pcg32::seed_from_u64(seed))?;
        state.seed = seed;
        Ok(state)
    }

    /// Create a session around an existing generator
    pub fn with_rng(config: FieldConfig, rng: Pcg32) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            layout: MenuLayout::for_field(&config),
            bird: Bird::new(&config),
            config,
            seed: 0,
            rng,
            phase: GamePhase::Intro,
            difficulty: None,
            frame: 0,
            score: 0,
            runs: 0,
            stream: PipeStream::new(),
            events: Vec::new(),
        })
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn layout(&self) -> &MenuLayout {
        &self.layout
    }

    /// Move to `to`, recording the transition
    pub(crate) fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        log::info!("Phase {:?} -> {:?}", from, to);
        self.phase = to;
        self.events.push(GameEvent::PhaseChanged { from, to });
    }

    /// Discard the bird, pipes, score, frame counter, and undrained events
    fn reset_run(&mut self) {
        self.bird = Bird::new(&self.config);
        self.stream = PipeStream::new();
        self.score = 0;
        self.frame = 0;
        self.events.clear();
    }

    /// Intro -> ModeSelect
    pub fn advance_intro(&mut self) -> bool {
        if self.phase != GamePhase::Intro {
            log::warn!("Ignoring continue in {:?}", self.phase);
            return false;
        }
        self.set_phase(GamePhase::ModeSelect);
        true
    }

    /// Pick a difficulty and start a fresh run waiting for the first flap
    pub fn select_mode(&mut self, difficulty: Difficulty) -> bool {
        if self.phase != GamePhase::ModeSelect {
            log::warn!("Ignoring mode selection in {:?}", self.phase);
            return false;
        }
        self.difficulty = Some(difficulty);
        self.start_run();
        true
    }

    fn start_run(&mut self) {
        self.reset_run();
        self.runs += 1;
        log::info!(
            "Run {} starting ({})",
            self.runs,
            self.difficulty.unwrap_or_default().as_str()
        );
        self.set_phase(GamePhase::AwaitingFirstFlap);
    }

    /// Apply a flap impulse
    ///
    /// The first flap of a run also starts the simulation. Outside
    /// `AwaitingFirstFlap` and `Playing` this is a no-op.
    pub fn flap(&mut self) -> bool {
        match self.phase {
            GamePhase::AwaitingFirstFlap => self.set_phase(GamePhase::Playing),
            GamePhase::Playing => {}
            _ => {
                log::warn!("Ignoring flap in {:?}", self.phase);
                return false;
            }
        }
        self.bird.flap();
        self.events.push(GameEvent::Flapped);
        true
    }

    /// End the current run
    pub(crate) fn end_run(&mut self) {
        log::info!(
            "Run {} over: score {} after {} frames",
            self.runs,
            self.score,
            self.frame
        );
        self.set_phase(GamePhase::GameOver);
    }

    /// Start over from the game over screen
    ///
    /// With `ReplayPolicy::Reselect` the player picks a difficulty again;
    /// with `KeepDifficulty` the last one is reused.
    pub fn replay(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            log::warn!("Ignoring replay in {:?}", self.phase);
            return false;
        }
        match (self.config.replay_policy, self.difficulty) {
            (ReplayPolicy::KeepDifficulty, Some(_)) => self.start_run(),
            _ => {
                self.reset_run();
                self.set_phase(GamePhase::ModeSelect);
            }
        }
        true
    }

    /// Leave from the game over screen
    pub fn quit(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            log::warn!("Ignoring quit in {:?}", self.phase);
            return false;
        }
        self.set_phase(GamePhase::Exited);
        true
    }

    #[inline]
    pub fn is_exited(&self) -> bool {
        self.phase == GamePhase::Exited
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Copy out what the presentation layer needs for this frame
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            difficulty: self.difficulty,
            score: self.score,
            frame: self.frame,
            bird_center: self.bird.center(),
            bird_radius: self.bird.radius,
            pipes: self.stream.pipes().iter().map(|p| p.rects()).collect(),
            buttons: self.layout.buttons(self.phase).to_vec(),
        }
    }
}
