//! Overhead / follow camera
//!
//! The camera either looks down on the whole snowfield from a fixed pose or
//! chases the ball. Chasing eases the eye toward a goal behind and above the
//! ball, pulling further back as the ball grows.

use glam::{Mat4, Vec3};

use crate::consts::*;
use crate::lerp_clamped;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    /// Static overhead pose looking at the origin
    Fixed,
    /// Eased toward a goal offset from the ball
    Following,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    pub mode: CameraMode,
    pub eye: Vec3,
    pub target: Vec3,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            mode: CameraMode::Fixed,
            eye: Vec3::from(OVERHEAD_EYE),
            target: Vec3::ZERO,
        }
    }
}

impl CameraRig {
    /// Switch modes. Entering `Fixed` snaps straight to the overhead pose.
    /// Returns true if the mode changed.
    pub fn set_follow(&mut self, follow: bool) -> bool {
        let mode = if follow {
            CameraMode::Following
        } else {
            CameraMode::Fixed
        };
        if mode == self.mode {
            return false;
        }
        self.mode = mode;
        if mode == CameraMode::Fixed {
            self.eye = Vec3::from(OVERHEAD_EYE);
            self.target = Vec3::ZERO;
        }
        log::info!("Camera mode: {:?}", mode);
        true
    }

    pub fn is_following(&self) -> bool {
        self.mode == CameraMode::Following
    }

    /// Where the follow camera wants to be for a ball at `ball` of `size`
    pub fn follow_goal(ball: Vec3, size: f32) -> Vec3 {
        let offset = FOLLOW_OFFSET_BASE + size * FOLLOW_OFFSET_PER_SIZE;
        ball + Vec3::new(0.0, offset, offset)
    }

    /// Ease toward the follow goal and aim at the ball. No-op when fixed.
    pub fn follow(&mut self, ball: Vec3, size: f32, follow_speed: f32, dt: f32) {
        if !self.is_following() {
            return;
        }
        let goal = Self::follow_goal(ball, size);
        self.eye = lerp_clamped(self.eye, goal, follow_speed * dt);
        self.target = ball;
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(CAMERA_FOV_DEG.to_radians(), aspect, CAMERA_NEAR, CAMERA_FAR)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_starts_overhead() {
        let rig = CameraRig::default();
        assert_eq!(rig.mode, CameraMode::Fixed);
        assert_eq!(rig.eye, Vec3::new(0.0, 50.0, 50.0));
        assert_eq!(rig.target, Vec3::ZERO);
    }

    #[test]
    fn test_fixed_ignores_follow() {
        let mut rig = CameraRig::default();
        rig.follow(Vec3::new(4.0, 0.5, 4.0), 1.0, 1.0, 0.1);
        assert_eq!(rig, CameraRig::default());
    }

    #[test]
    fn test_goal_offset_grows_with_size() {
        let goal = CameraRig::follow_goal(Vec3::new(1.0, 0.5, -2.0), 2.0);
        assert_eq!(goal, Vec3::new(1.0, 8.5, 6.0));
    }

    #[test]
    fn test_follow_lerps_and_aims() {
        let mut rig = CameraRig::default();
        assert!(!rig.is_following());
        assert!(rig.set_follow(true));
        assert!(!rig.set_follow(true));
        assert!(rig.is_following());

        let ball = Vec3::new(0.0, 0.5, 0.0);
        rig.follow(ball, 1.0, 1.0, 0.5);
        // goal (0, 7, 6.5), halfway from (0, 50, 50)
        assert!((rig.eye - Vec3::new(0.0, 28.5, 28.25)).length() < 1e-4);
        assert_eq!(rig.target, ball);
    }

    #[test]
    fn test_leaving_follow_snaps_overhead() {
        let mut rig = CameraRig::default();
        rig.set_follow(true);
        rig.follow(Vec3::new(10.0, 0.5, 10.0), 3.0, 5.0, 0.1);
        assert_ne!(rig.eye, Vec3::from(OVERHEAD_EYE));

        assert!(rig.set_follow(false));
        assert_eq!(rig, CameraRig::default());
    }

    #[test]
    fn test_oversized_factor_is_clamped() {
        let mut rig = CameraRig::default();
        rig.set_follow(true);
        let ball = Vec3::new(2.0, 0.5, 2.0);
        rig.follow(ball, 1.0, 10.0, 0.5);
        assert!(rig.eye.distance(CameraRig::follow_goal(ball, 1.0)) < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_follow_never_overshoots(
            ex in -50.0f32..50.0, ey in 0.0f32..60.0, ez in -50.0f32..60.0,
            bx in -25.0f32..25.0, bz in -25.0f32..25.0,
            size in 1.0f32..4.0,
            speed in 0.1f32..10.0,
            dt in 0.0f32..0.1,
        ) {
            let mut rig = CameraRig {
                mode: CameraMode::Following,
                eye: Vec3::new(ex, ey, ez),
                target: Vec3::ZERO,
            };
            let ball = Vec3::new(bx, 0.5, bz);
            let goal = CameraRig::follow_goal(ball, size);
            let before = rig.eye.distance(goal);
            rig.follow(ball, size, speed, dt);

            let t = speed * dt;
            let expected = Vec3::new(ex, ey, ez).lerp(goal, t);
            prop_assert!((rig.eye - expected).length() < 1e-3);
            prop_assert!(rig.eye.distance(goal) <= before + 1e-3);
        }
    }
}
