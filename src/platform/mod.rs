//! Platform abstraction layer
//!
//! Host-side timing. The simulation only ever sees whole `SIM_DT` steps.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Fixed timestep accumulator
///
/// Feed it real frame time, get back how many simulation steps to run.
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    pub fn new() -> Self {
        Self { accumulator: 0.0 }
    }

    /// Add `frame_dt` seconds and return the number of steps due
    ///
    /// At most `MAX_SUBSTEPS` are returned per call to prevent a spiral of
    /// death; time beyond that is dropped.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::debug!("Dropping {:.3}s of simulation time", self.accumulator);
            self.accumulator = 0.0;
        }
        steps
    }

    /// Fraction of a step left over, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / SIM_DT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_frame_runs_one_step() {
        let mut clock = FixedStep::new();
        assert_eq!(clock.advance(SIM_DT), 1);
    }

    #[test]
    fn test_accumulates_short_frames() {
        let mut clock = FixedStep::new();
        let half = SIM_DT * 0.5;
        assert_eq!(clock.advance(half * 0.99), 0);
        assert_eq!(clock.advance(half * 1.02), 1);
    }

    #[test]
    fn test_spiral_of_death_cap() {
        let mut clock = FixedStep::new();
        assert_eq!(clock.advance(1.0), MAX_SUBSTEPS);
        // Excess was dropped
        assert!(clock.alpha() < 1.0);
    }

    #[test]
    fn test_negative_time_ignored() {
        let mut clock = FixedStep::new();
        assert_eq!(clock.advance(-5.0), 0);
        assert_eq!(clock.alpha(), 0.0);
    }
}
