//! Flappy Drift - a side-scrolling pipe dodger
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, pipes, collisions, session phases)
//! - `config`: Field geometry and tuning, validated once per session
//! - `platform`: Host-side fixed timestep clock

pub mod config;
pub mod platform;
pub mod sim;

pub use config::{ConfigError, FieldConfig, ReplayPolicy};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one frame per tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Bird defaults
    pub const BIRD_SIZE: f32 = 40.0;
    pub const BIRD_X: f32 = 100.0;
    /// Downward acceleration per frame
    pub const GRAVITY: f32 = 0.5;
    /// Velocity multiplier applied every frame after gravity
    pub const DAMPING: f32 = 0.99;
    pub const FLAP_STRENGTH: f32 = 10.0;

    /// Pipe defaults
    pub const PIPE_WIDTH: f32 = 50.0;
    pub const PIPE_GAP: f32 = 200.0;
    /// Horizontal pixels per frame
    pub const PIPE_SPEED: f32 = 5.0;
    /// Frames between spawns
    pub const SPAWN_CADENCE: u64 = 100;
    /// Keep-out band above and below an easy-mode gap
    pub const GAP_MARGIN: f32 = 100.0;
    /// Vertical pixels per frame for oscillating gaps
    pub const OSCILLATION_STEP: f32 = 2.0;
    /// Oscillating gaps are at least this many bird diameters tall
    pub const MIN_GAP_DIAMETERS: f32 = 3.0;
}
