//! Roll impulse and snow pickup
//!
//! The push scales with the ball size so a bigger, heavier ball still rolls.
//! Directions add per axis and are not normalized, so holding two keys pushes
//! harder along the diagonal.

use glam::Vec3;

use crate::platform::InputState;
use crate::tuning::Tuning;

/// Impulse for one tick from the held directions
pub fn impulse(input: &InputState, size: f32, run_speed: f32, dt: f32, time_scaled: bool) -> Vec3 {
    let mut strength = run_speed * size;
    if time_scaled {
        strength *= dt;
    }

    let mut impulse = Vec3::ZERO;
    if input.forward {
        impulse.z -= strength;
    }
    if input.backward {
        impulse.z += strength;
    }
    if input.left {
        impulse.x -= strength;
    }
    if input.right {
        impulse.x += strength;
    }
    impulse
}

/// New size after rolling `displacement` world units at body `height`.
///
/// Snow is only picked up while touching the ground and actually moving.
pub fn grow(size: f32, displacement: f32, height: f32, tuning: &Tuning) -> f32 {
    if displacement > tuning.min_displacement && tuning.is_grounded(height) {
        (size + displacement * tuning.growth_rate).min(tuning.max_size)
    } else {
        size
    }
}
