//! Field geometry and tuning
//!
//! Supplied once when a session is built. Changing any value means starting
//! a new session.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// What happens to the chosen difficulty when the player replays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ReplayPolicy {
    /// Return to mode select every replay
    #[default]
    Reselect,
    /// Skip mode select and reuse the last difficulty
    KeepDifficulty,
}

impl ReplayPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplayPolicy::Reselect => "Reselect",
            ReplayPolicy::KeepDifficulty => "KeepDifficulty",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "reselect" => Some(ReplayPolicy::Reselect),
            "keep" | "keepdifficulty" | "keep_difficulty" => Some(ReplayPolicy::KeepDifficulty),
            _ => None,
        }
    }
}

/// Immutable field geometry and physics tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    // === Field ===
    pub width: f32,
    pub height: f32,

    // === Bird ===
    /// Bird diameter (radius is half of this)
    pub bird_size: f32,
    /// Fixed horizontal position of the bird center
    pub bird_x: f32,
    /// Velocity added per frame (positive is down)
    pub gravity: f32,
    /// Velocity multiplier per frame, in (0, 1]
    pub damping: f32,
    /// Upward speed set by a flap
    pub flap_impulse: f32,

    // === Pipes ===
    pub pipe_width: f32,
    /// Gap height in easy mode
    pub pipe_gap: f32,
    pub pipe_speed: f32,
    /// Frames between pipe spawns
    pub spawn_cadence: u64,
    /// Minimum distance between an easy gap and the field top/bottom
    pub gap_margin: f32,
    /// Oscillation speed for hard mode gaps
    pub oscillation_step: f32,

    // === Session ===
    pub replay_policy: ReplayPolicy,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,

            bird_size: BIRD_SIZE,
            bird_x: BIRD_X,
            gravity: GRAVITY,
            damping: DAMPING,
            flap_impulse: FLAP_STRENGTH,

            pipe_width: PIPE_WIDTH,
            pipe_gap: PIPE_GAP,
            pipe_speed: PIPE_SPEED,
            spawn_cadence: SPAWN_CADENCE,
            gap_margin: GAP_MARGIN,
            oscillation_step: OSCILLATION_STEP,

            replay_policy: ReplayPolicy::Reselect,
        }
    }
}

impl FieldConfig {
    /// Bird radius derived from the size constant
    #[inline]
    pub fn bird_radius(&self) -> f32 {
        self.bird_size / 2.0
    }

    /// Bird spawn height (vertical middle of the field)
    #[inline]
    pub fn bird_start_y(&self) -> f32 {
        self.height / 2.0
    }

    /// Smallest gap an oscillating pipe may draw
    #[inline]
    pub fn min_oscillating_gap(&self) -> f32 {
        MIN_GAP_DIAMETERS * self.bird_size
    }

    /// Largest gap an oscillating pipe may draw
    #[inline]
    pub fn max_oscillating_gap(&self) -> f32 {
        self.height - MIN_GAP_DIAMETERS * self.bird_size
    }

    /// Reject self-contradictory geometry
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positives = [
            ("width", self.width),
            ("height", self.height),
            ("bird_size", self.bird_size),
            ("pipe_width", self.pipe_width),
            ("pipe_gap", self.pipe_gap),
            ("pipe_speed", self.pipe_speed),
            ("flap_impulse", self.flap_impulse),
        ];
        for (field, value) in positives {
            // Written as a negated comparison so NaN is rejected too
            if !(value > 0.0) || value.is_infinite() {
                return Err(ConfigError::NonPositive { field });
            }
        }
        if self.spawn_cadence == 0 {
            return Err(ConfigError::NonPositive {
                field: "spawn_cadence",
            });
        }
        if !(self.gap_margin >= 0.0) {
            return Err(ConfigError::NonPositive { field: "gap_margin" });
        }
        if !(self.oscillation_step >= 0.0) {
            return Err(ConfigError::NonPositive {
                field: "oscillation_step",
            });
        }
        if !(self.gravity.is_finite() && self.gravity >= 0.0) {
            return Err(ConfigError::InvalidGravity(self.gravity));
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(ConfigError::DampingOutOfRange(self.damping));
        }

        let available = self.height - 2.0 * self.gap_margin;
        if self.pipe_gap > available {
            return Err(ConfigError::GapTooLarge {
                gap: self.pipe_gap,
                available,
            });
        }

        let (min, max) = (self.min_oscillating_gap(), self.max_oscillating_gap());
        if min > max {
            return Err(ConfigError::OscillatingGapRange { min, max });
        }

        let r = self.bird_radius();
        let start_y = self.bird_start_y();
        if self.bird_x - r < 0.0 || self.bird_x + r > self.width || start_y + r > self.height {
            return Err(ConfigError::BirdOutOfField);
        }

        Ok(())
    }

    /// Parse and validate a JSON config. Missing keys fall back to defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: FieldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded field config from {}", path.as_ref().display());
        Ok(config)
    }
}

/// Errors raised when a field configuration cannot produce a playable session
#[derive(Debug)]
pub enum ConfigError {
    /// A size, speed, or cadence is zero, negative, or not finite
    NonPositive { field: &'static str },
    /// Gravity must be finite and not pull upward
    InvalidGravity(f32),
    /// Damping must lie in (0, 1]
    DampingOutOfRange(f32),
    /// Easy-mode gap plus its margins does not fit the field
    GapTooLarge { gap: f32, available: f32 },
    /// Minimum oscillating gap exceeds the maximum
    OscillatingGapRange { min: f32, max: f32 },
    /// Oscillating gap height lies outside `[min, max]`
    OscillatingGapOutOfRange { gap: f32, min: f32, max: f32 },
    /// Starting gap top lies outside its oscillation bounds
    GapOutsideOscillation { gap_top: f32, min: f32, max: f32 },
    /// Bird would start partly outside the field
    BirdOutOfField,
    /// Standard I/O error
    Io(std::io::Error),
    /// JSON deserialization error
    Json(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NonPositive { field } => write!(f, "{field} must be positive and finite"),
            ConfigError::InvalidGravity(g) => {
                write!(f, "gravity {g} must be finite and non-negative")
            }
            ConfigError::DampingOutOfRange(d) => write!(f, "damping {d} is outside (0, 1]"),
            ConfigError::GapTooLarge { gap, available } => {
                write!(f, "pipe gap {gap} exceeds available height {available}")
            }
            ConfigError::OscillatingGapRange { min, max } => {
                write!(f, "oscillating gap range is empty: min {min} > max {max}")
            }
            ConfigError::OscillatingGapOutOfRange { gap, min, max } => {
                write!(f, "oscillating gap {gap} is outside [{min}, {max}]")
            }
            ConfigError::GapOutsideOscillation { gap_top, min, max } => {
                write!(f, "gap top {gap_top} is outside oscillation bounds [{min}, {max}]")
            }
            ConfigError::BirdOutOfField => write!(f, "bird start position is outside the field"),
            ConfigError::Io(e) => write!(f, "IO error: {e}"),
            ConfigError::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}
