//! Respawn after falling off the snowfield

use glam::Vec3;

use super::body::BallPhysics;
use super::state::BallState;
use crate::consts::BALL_BASE_RADIUS;
use crate::tuning::Tuning;

/// Teleport the ball back to spawn if `position` is below the world floor.
/// Returns true if a reset happened.
pub fn guard<P: BallPhysics + ?Sized>(
    position: Vec3,
    ball: &mut BallState,
    physics: &mut P,
    tuning: &Tuning,
) -> bool {
    if !tuning.is_out_of_world(position.y) {
        return false;
    }
    physics.respawn_ball(tuning.spawn, BALL_BASE_RADIUS);
    ball.reset(tuning.spawn);
    log::debug!("Ball fell to y={:.1}, respawned", position.y);
    true
}
