//! Game state and core simulation types
//!
//! Everything the per-tick logic mutates lives here, owned by the session.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::camera::CameraRig;
use super::trail::TrailPainter;
use crate::consts::BALL_BASE_RADIUS;
use crate::tuning::Tuning;

/// Size bookkeeping for the snowball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallState {
    /// Continuous visual size (mesh scale), grows while rolling
    pub size: f32,
    /// Collider scale, only ever catches up with `size` in coarse steps
    pub physics_scale: f32,
    /// Body position read this tick
    pub position: Vec3,
    /// Body position read on the previous tick
    pub last_position: Vec3,
}

impl BallState {
    pub fn new(spawn: Vec3) -> Self {
        Self {
            size: 1.0,
            physics_scale: 1.0,
            position: spawn,
            last_position: spawn,
        }
    }

    /// Radius of the visible mesh
    pub fn visual_radius(&self) -> f32 {
        BALL_BASE_RADIUS * self.size
    }

    /// Radius of the physics collider
    pub fn collider_radius(&self) -> f32 {
        BALL_BASE_RADIUS * self.physics_scale
    }

    /// Back to spawn size and position
    pub fn reset(&mut self, spawn: Vec3) {
        *self = Self::new(spawn);
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub ball: BallState,
    pub camera: CameraRig,
    pub trail: TrailPainter,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Number of times the ball fell off the world
    pub resets: u32,
}

impl GameState {
    /// Create a new session with the given tuning, seeding the trail brush
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self::with_trail(tuning, TrailPainter::new(seed))
    }

    /// Create a new session around an existing trail painter
    pub fn with_trail(tuning: Tuning, trail: TrailPainter) -> Self {
        Self {
            ball: BallState::new(tuning.spawn),
            camera: CameraRig::default(),
            trail,
            time_ticks: 0,
            resets: 0,
            tuning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ball_starts_at_spawn_size() {
        let ball = BallState::new(Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(ball.size, 1.0);
        assert_eq!(ball.physics_scale, 1.0);
        assert_eq!(ball.visual_radius(), 0.5);
        assert_eq!(ball.collider_radius(), 0.5);
        assert_eq!(ball.last_position, Vec3::new(0.0, 5.0, 0.0));
    }

    #[test]
    fn test_reset_restores_spawn() {
        let spawn = Vec3::new(0.0, 5.0, 0.0);
        let mut ball = BallState::new(spawn);
        ball.size = 2.7;
        ball.physics_scale = 2.5;
        ball.position = Vec3::new(3.0, -25.0, 1.0);
        ball.reset(spawn);
        assert_eq!(ball, BallState::new(spawn));
    }
}
