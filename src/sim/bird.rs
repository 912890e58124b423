//! The player's bird
//!
//! Vertical-only kinematics. Integration order per frame is fixed:
//! add gravity, apply damping, then move.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::circle_intersects_rect;
use super::pipe::Pipe;
use crate::config::FieldConfig;
use crate::consts::SIM_DT;

/// The bird entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    /// Horizontal center, fixed for the whole run
    x: f32,
    /// Vertical center (y grows downward)
    pub y: f32,
    /// Vertical velocity in pixels per frame (positive = falling)
    pub vel: f32,
    pub radius: f32,
    gravity: f32,
    damping: f32,
    flap_impulse: f32,
}

impl Bird {
    /// Spawn at the configured start point with zero velocity
    pub fn new(config: &FieldConfig) -> Self {
        Self {
            x: config.bird_x,
            y: config.bird_start_y(),
            vel: 0.0,
            radius: config.bird_radius(),
            gravity: config.gravity,
            damping: config.damping,
            flap_impulse: config.flap_impulse,
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Lowest point of the bird
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.radius
    }

    /// Override velocity with an upward impulse
    pub fn flap(&mut self) {
        self.vel = -self.flap_impulse;
    }

    /// Integrate one step of `dt` seconds
    pub fn update(&mut self, dt: f32) {
        let frames = dt / SIM_DT;
        self.vel += self.gravity * frames;
        self.vel *= self.damping.powf(frames);
        self.y += self.vel * frames;
    }

    /// True if the bird overlaps either half of the pipe
    pub fn is_colliding_with(&self, pipe: &Pipe) -> bool {
        let (top, bottom) = pipe.rects();
        let center = self.center();
        circle_intersects_rect(center, self.radius, &top)
            || circle_intersects_rect(center, self.radius, &bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuned(gravity: f32, damping: f32, flap_impulse: f32) -> FieldConfig {
        FieldConfig {
            gravity,
            damping,
            flap_impulse,
            ..Default::default()
        }
    }

    #[test]
    fn test_spawn_state() {
        let config = FieldConfig::default();
        let bird = Bird::new(&config);
        assert_eq!(bird.x(), config.bird_x);
        assert_eq!(bird.y, config.height / 2.0);
        assert_eq!(bird.vel, 0.0);
        assert_eq!(bird.radius, config.bird_size / 2.0);
    }

    #[test]
    fn test_update_matches_reference_trace() {
        let (a, d) = (0.2_f32, 0.99_f32);
        let mut bird = Bird::new(&tuned(a, d, 10.0));
        let (mut y, mut v) = (bird.y, 0.0_f32);

        for _ in 0..5 {
            v = (v + a) * d;
            y += v;
            bird.update(SIM_DT);
            assert!((bird.vel - v).abs() < 1e-5);
            assert!((bird.y - y).abs() < 1e-4);
        }

        // Hand-computed: v1 = 0.198, v2 = 0.39402, v3 = 0.5880798
        let start = 300.0;
        let expected = start + 0.198 + 0.39402 + 0.5880798 + 0.78019900 + 0.97039701;
        assert!((bird.y - expected).abs() < 1e-3);
    }

    #[test]
    fn test_update_is_deterministic() {
        let config = tuned(0.5, 0.99, 10.0);
        let mut a = Bird::new(&config);
        let mut b = Bird::new(&config);
        for i in 0..200 {
            if i % 17 == 0 {
                a.flap();
                b.flap();
            }
            a.update(SIM_DT);
            b.update(SIM_DT);
        }
        assert_eq!(a.y.to_bits(), b.y.to_bits());
        assert_eq!(a.vel.to_bits(), b.vel.to_bits());
    }

    #[test]
    fn test_flap_overrides_velocity() {
        let mut bird = Bird::new(&tuned(0.5, 0.99, 7.5));
        bird.vel = 42.0;
        bird.flap();
        assert_eq!(bird.vel, -7.5);

        bird.vel = -3.0;
        bird.flap();
        assert_eq!(bird.vel, -7.5);
    }

    #[test]
    fn test_damping_caps_fall_speed() {
        let mut bird = Bird::new(&tuned(0.2, 0.99, 10.0));
        for _ in 0..5000 {
            bird.update(SIM_DT);
        }
        // Terminal velocity is a * d / (1 - d) = 19.8
        assert!((bird.vel - 19.8).abs() < 0.01);
    }

    #[test]
    fn test_x_never_changes() {
        let config = FieldConfig::default();
        let mut bird = Bird::new(&config);
        for _ in 0..100 {
            bird.flap();
            bird.update(SIM_DT);
        }
        assert_eq!(bird.x(), config.bird_x);
    }

    #[test]
    fn test_collides_with_pipe_halves() {
        let config = FieldConfig::default();
        let mut bird = Bird::new(&config);
        // Gap from 250 to 450, pipe spans x 80..130
        let pipe = Pipe::fixed(1, 80.0, 250.0, &config).expect("valid pipe");

        bird.y = 350.0;
        assert!(!bird.is_colliding_with(&pipe));

        bird.y = 260.0;
        assert!(bird.is_colliding_with(&pipe));

        bird.y = 440.0;
        assert!(bird.is_colliding_with(&pipe));
    }
}
