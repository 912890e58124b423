//! Pipe stream: spawning, scrolling, pruning, and pass counting
//!
//! Pipes are kept in spawn order, which is also descending `x` order while
//! they are live.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::pipe::Pipe;
use super::state::Difficulty;
use crate::config::{ConfigError, FieldConfig};

/// Ordered collection of live pipes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipeStream {
    pub(crate) pipes: Vec<Pipe>,
    /// Next pipe ID
    next_id: u32,
}

impl Default for PipeStream {
    fn default() -> Self {
        Self::new()
    }
}

impl PipeStream {
    pub fn new() -> Self {
        Self {
            pipes: Vec::new(),
            next_id: 1,
        }
    }

    /// Live pipes, oldest first
    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    pub fn len(&self) -> usize {
        self.pipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipes.is_empty()
    }

    /// Spawn a pipe at the right edge if `frame` lands on the cadence
    ///
    /// Returns the new pipe's ID when one was spawned.
    pub fn tick<R: Rng>(
        &mut self,
        frame: u64,
        difficulty: Difficulty,
        config: &FieldConfig,
        rng: &mut R,
    ) -> Result<Option<u32>, ConfigError> {
        if frame == 0 || !frame.is_multiple_of(config.spawn_cadence) {
            return Ok(None);
        }
        self.spawn(difficulty, config, rng).map(Some)
    }

    /// Spawn one pipe at the right edge of the field
    pub fn spawn<R: Rng>(
        &mut self,
        difficulty: Difficulty,
        config: &FieldConfig,
        rng: &mut R,
    ) -> Result<u32, ConfigError> {
        let id = self.next_id;
        let x = config.width;

        let pipe = match difficulty {
            Difficulty::Easy => {
                let lo = config.gap_margin.ceil();
                let hi = (config.height - config.pipe_gap - config.gap_margin).floor();
                if lo > hi {
                    return Err(ConfigError::GapTooLarge {
                        gap: config.pipe_gap,
                        available: config.height - 2.0 * config.gap_margin,
                    });
                }
                let gap_top = rng.random_range(lo as u32..=hi as u32) as f32;
                Pipe::fixed(id, x, gap_top, config)?
            }
            Difficulty::Hard => Pipe::oscillating(id, x, config, rng)?,
        };

        log::debug!(
            "Spawned pipe {} ({:?}): gap {}..{}",
            id,
            difficulty,
            pipe.gap_top,
            pipe.gap_top + pipe.gap
        );
        self.pipes.push(pipe);
        self.next_id += 1;
        Ok(id)
    }

    /// Move every pipe, then drop the ones that left the field
    pub fn advance(&mut self, dt: f32) {
        for pipe in &mut self.pipes {
            pipe.advance(dt);
        }
        // retain keeps relative order
        self.pipes.retain(|p| !p.is_offscreen());
    }

    /// Number of pipes whose center crossed `bird_x` during the last advance
    pub fn score_events(&self, bird_x: f32) -> u32 {
        self.pipes.iter().filter(|p| p.crossed(bird_x)).count() as u32
    }
}
