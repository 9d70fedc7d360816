//! Coarse collider growth
//!
//! Rebuilding the collider every tick is expensive, so the collider scale
//! trails the visual size and only jumps once the gap exceeds a threshold.
//! A larger sphere would start inside the ground, so each jump also lifts the
//! body by the radius gained.

use crate::consts::{BALL_BASE_RADIUS, COLLIDER_LIFT_PER_SCALE};

/// One collider rebuild
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleStep {
    /// Collider scale after the step (equal to the visual size)
    pub new_scale: f32,
    /// Upward translation applied to the body
    pub lift: f32,
}

impl ScaleStep {
    /// Collider radius after the step
    pub fn radius(&self) -> f32 {
        BALL_BASE_RADIUS * self.new_scale
    }
}

/// Decide whether the collider should catch up with `size`
pub fn step(size: f32, physics_scale: f32, threshold: f32) -> Option<ScaleStep> {
    let delta = size - physics_scale;
    if delta > threshold {
        Some(ScaleStep {
            new_scale: size,
            lift: delta * COLLIDER_LIFT_PER_SCALE,
        })
    } else {
        None
    }
}
