//! Ball body seam between gameplay and the physics engine
//!
//! Every operation is a no-op while the ball body does not exist yet, so the
//! tick can run before the physics world has been populated.

use glam::{Quat, Vec3};

pub trait BallPhysics {
    /// World position of the ball body, `None` if it has not been created
    fn ball_translation(&self) -> Option<Vec3>;

    /// Orientation of the ball body, `None` if it has not been created
    fn ball_rotation(&self) -> Option<Quat>;

    /// Apply an instantaneous impulse to the ball, waking it up
    fn apply_ball_impulse(&mut self, impulse: Vec3);

    /// Move the ball straight up without touching its velocity
    fn lift_ball(&mut self, height: f32);

    /// Replace the ball collider with a sphere of the given radius
    fn set_ball_radius(&mut self, radius: f32);

    /// Teleport to `spawn`, clear rotation and velocities, restore `radius`
    fn respawn_ball(&mut self, spawn: Vec3, radius: f32);

    /// Advance the world by `dt` seconds
    fn step(&mut self, dt: f32);
}
