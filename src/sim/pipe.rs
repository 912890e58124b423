//! Pipe obstacles
//!
//! A pipe is a vertical pair of barriers with a gap between them. Easy mode
//! pipes keep their gap still; hard mode pipes carry `Oscillation` and bounce
//! the gap between two bounds while scrolling.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::config::{ConfigError, FieldConfig};
use crate::consts::SIM_DT;

/// Slack for gap-fits-field checks on fractional geometry
const FIT_EPSILON: f32 = 1e-3;

/// Vertical gap motion for hard mode pipes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oscillation {
    /// Signed gap movement per frame
    pub step: f32,
    /// Lowest allowed gap top
    pub min: f32,
    /// Highest allowed gap top
    pub max: f32,
}

/// A pipe pair scrolling right to left
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipe {
    pub id: u32,
    /// Left edge
    pub x: f32,
    /// Left edge before the most recent move (for pass detection)
    pub prev_x: f32,
    /// Top of the gap
    pub gap_top: f32,
    /// Gap height
    pub gap: f32,
    pub width: f32,
    field_height: f32,
    speed: f32,
    pub oscillation: Option<Oscillation>,
}

impl Pipe {
    /// Build a pipe, rejecting a gap that does not fit inside the field
    ///
    /// Oscillating pipes also need a gap of at least three bird diameters and
    /// a starting `gap_top` inside their bounds.
    pub fn new(
        id: u32,
        x: f32,
        gap_top: f32,
        gap: f32,
        oscillation: Option<Oscillation>,
        config: &FieldConfig,
    ) -> Result<Self, ConfigError> {
        if !(gap > 0.0) {
            return Err(ConfigError::NonPositive { field: "pipe_gap" });
        }
        if gap_top < 0.0 || gap_top + gap > config.height + FIT_EPSILON {
            return Err(ConfigError::GapTooLarge {
                gap,
                available: config.height - gap_top.max(0.0),
            });
        }
        if let Some(osc) = &oscillation {
            if osc.min < 0.0 || osc.max + gap > config.height + FIT_EPSILON || osc.min > osc.max {
                return Err(ConfigError::OscillatingGapRange {
                    min: osc.min,
                    max: osc.max,
                });
            }
            let (min_gap, max_gap) = (config.min_oscillating_gap(), config.max_oscillating_gap());
            if gap < min_gap - FIT_EPSILON || gap > max_gap + FIT_EPSILON {
                return Err(ConfigError::OscillatingGapOutOfRange {
                    gap,
                    min: min_gap,
                    max: max_gap,
                });
            }
            if gap_top < osc.min || gap_top > osc.max {
                return Err(ConfigError::GapOutsideOscillation {
                    gap_top,
                    min: osc.min,
                    max: osc.max,
                });
            }
        }

        Ok(Self {
            id,
            x,
            prev_x: x,
            gap_top,
            gap,
            width: config.pipe_width,
            field_height: config.height,
            speed: config.pipe_speed,
            oscillation,
        })
    }

    /// Stationary gap of the configured easy-mode height
    pub fn fixed(id: u32, x: f32, gap_top: f32, config: &FieldConfig) -> Result<Self, ConfigError> {
        Self::new(id, x, gap_top, config.pipe_gap, None, config)
    }

    /// Oscillating gap centered on the field midpoint
    ///
    /// Gap height is a whole number of pixels drawn from
    /// `[3 * bird_size, height - 3 * bird_size]` and the initial direction is a
    /// coin flip.
    pub fn oscillating<R: Rng>(
        id: u32,
        x: f32,
        config: &FieldConfig,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        // Whole pixels keep every bound exact in f32
        let (min_gap, max_gap) = (
            config.min_oscillating_gap().ceil(),
            config.max_oscillating_gap().floor(),
        );
        if min_gap > max_gap || min_gap < 1.0 {
            return Err(ConfigError::OscillatingGapRange {
                min: min_gap,
                max: max_gap,
            });
        }

        let gap = rng.random_range(min_gap as u32..=max_gap as u32) as f32;
        let gap_top = (config.height - gap) / 2.0;
        let step = if rng.random_bool(0.5) {
            config.oscillation_step
        } else {
            -config.oscillation_step
        };
        let oscillation = Oscillation {
            step,
            min: 0.0,
            max: config.height - gap,
        };

        Self::new(id, x, gap_top, gap, Some(oscillation), config)
    }

    /// Horizontal center
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Vertical center of the gap
    #[inline]
    pub fn gap_center(&self) -> f32 {
        self.gap_top + self.gap / 2.0
    }

    #[inline]
    pub fn is_oscillating(&self) -> bool {
        self.oscillation.is_some()
    }

    /// Scroll left and, if oscillating, slide the gap
    pub fn advance(&mut self, dt: f32) {
        let frames = dt / SIM_DT;
        self.prev_x = self.x;
        self.x -= self.speed * frames;

        if let Some(osc) = &mut self.oscillation {
            let next = self.gap_top + osc.step * frames;
            if next < osc.min {
                self.gap_top = osc.min;
                osc.step = -osc.step;
            } else if next > osc.max {
                self.gap_top = osc.max;
                osc.step = -osc.step;
            } else {
                self.gap_top = next;
            }
        }
    }

    /// Upper and lower barriers
    pub fn rects(&self) -> (Rect, Rect) {
        let gap_bottom = self.gap_top + self.gap;
        (
            Rect::new(self.x, 0.0, self.width, self.gap_top),
            Rect::new(self.x, gap_bottom, self.width, self.field_height - gap_bottom),
        )
    }

    /// Trailing edge has left the field
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.x + self.width <= 0.0
    }

    /// The pipe center crossed `bird_x` during the most recent move
    pub fn crossed(&self, bird_x: f32) -> bool {
        let prev_center = self.prev_x + self.width / 2.0;
        prev_center > bird_x && self.center_x() <= bird_x
    }
}
