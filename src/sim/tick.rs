//! Fixed timestep simulation tick
//!
//! Advances gameplay and the physics world by one step in a fixed order:
//! reset guard, growth, collider stepping, camera, impulse, physics, trail.

use super::body::BallPhysics;
use super::growth;
use super::reset;
use super::state::GameState;
use super::stepper::{self, ScaleStep};
use super::trail::Stamp;
use crate::platform::InputState;
use crate::settings::Settings;

/// What happened during a tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// The ball fell off the world and was respawned
    pub reset: bool,
    /// The collider was rebuilt at a larger radius
    pub scale_step: Option<ScaleStep>,
    /// A trail stamp was painted
    pub stamp: Option<Stamp>,
}

/// Advance the session by one fixed timestep
pub fn tick<P: BallPhysics + ?Sized>(
    state: &mut GameState,
    physics: &mut P,
    input: &InputState,
    settings: &Settings,
    dt: f32,
) -> TickReport {
    let mut report = TickReport::default();
    state.camera.set_follow(settings.follow_camera);

    // Body not created yet: leave the ball alone, keep the world running
    let Some(position) = physics.ball_translation() else {
        physics.step(dt);
        return report;
    };

    state.time_ticks += 1;

    if reset::guard(position, &mut state.ball, physics, &state.tuning) {
        state.resets += 1;
        report.reset = true;
        return report;
    }

    let tuning = &state.tuning;
    let ball = &mut state.ball;
    ball.position = position;

    let displacement = position.distance(ball.last_position);
    ball.size = growth::grow(ball.size, displacement, position.y, tuning);

    if tuning.scale_collider {
        if let Some(step) = stepper::step(ball.size, ball.physics_scale, tuning.step_threshold) {
            physics.set_ball_radius(step.radius());
            physics.lift_ball(step.lift);
            ball.physics_scale = step.new_scale;
            log::debug!(
                "Collider scale -> {:.2} (lift {:.3})",
                step.new_scale,
                step.lift
            );
            report.scale_step = Some(step);
        }
    }

    state
        .camera
        .follow(position, ball.size, settings.follow_speed, dt);

    ball.last_position = position;

    let impulse = growth::impulse(
        input,
        ball.size,
        settings.run_speed,
        dt,
        tuning.time_scaled_impulse,
    );
    physics.apply_ball_impulse(impulse);

    physics.step(dt);

    if let Some(painted) = physics.ball_translation() {
        report.stamp = state
            .trail
            .paint(painted, state.ball.size, state.tuning.min_displacement);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::body::fake::FakeBall;
    use crate::sim::camera::CameraMode;
    use crate::sim::physics::PhysicsWorld;
    use crate::sim::trail::TrailPainter;
    use crate::tuning::Tuning;
    use glam::Vec3;

    fn session(tuning: Tuning) -> GameState {
        GameState::with_trail(tuning, TrailPainter::with_resolution(1, 100))
    }

    fn forward() -> InputState {
        InputState {
            forward: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_body_is_noop() {
        let mut state = session(Tuning::classic());
        let mut physics = FakeBall::default();
        let report = tick(&mut state, &mut physics, &forward(), &Settings::default(), SIM_DT);

        assert_eq!(report, TickReport::default());
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.ball.size, 1.0);
        assert_eq!(physics.steps, 1);
    }

    #[test]
    fn test_grounded_roll_grows_and_pushes() {
        let tuning = Tuning::classic();
        let mut state = session(tuning);
        state.ball.last_position = Vec3::new(0.0, 0.5, 0.0);
        let mut physics = FakeBall::at(Vec3::new(0.0, 0.5, -0.4));
        let settings = Settings::default();

        tick(&mut state, &mut physics, &forward(), &settings, SIM_DT);

        assert!((state.ball.size - 1.02).abs() < 1e-5);
        assert_eq!(state.ball.last_position, Vec3::new(0.0, 0.5, -0.4));
        // Impulse is computed from the size after growth
        let pushed = physics.body().impulses[0];
        assert!((pushed.z + settings.run_speed * state.ball.size).abs() < 1e-6);
        assert_eq!(pushed.x, 0.0);
    }

    #[test]
    fn test_growth_fixture_near_cap() {
        let mut state = session(Tuning::classic());
        state.ball.size = 2.95;
        state.ball.last_position = Vec3::new(0.0, 0.5, 0.0);
        let mut physics = FakeBall::at(Vec3::new(0.4, 0.5, 0.0));

        let report = tick(
            &mut state,
            &mut physics,
            &InputState::default(),
            &Settings::default(),
            SIM_DT,
        );

        assert!((state.ball.size - 2.97).abs() < 1e-5);
        // Classic preset never touches the collider
        assert_eq!(report.scale_step, None);
        assert_eq!(state.ball.physics_scale, 1.0);
    }

    #[test]
    fn test_stepped_collider_and_lift() {
        let mut state = session(Tuning::stepped());
        state.ball.size = 1.09;
        state.ball.last_position = Vec3::new(0.0, 0.5, 0.0);
        let mut physics = FakeBall::at(Vec3::new(1.0, 0.5, 0.0));

        let report = tick(
            &mut state,
            &mut physics,
            &InputState::default(),
            &Settings::default(),
            SIM_DT,
        );

        // 1.09 + 1.0 * 0.05 = 1.14, lead 0.14 over the collider
        let step = report.scale_step.expect("collider should step");
        assert!((step.new_scale - 1.14).abs() < 1e-5);
        assert!((step.lift - 0.07).abs() < 1e-5);
        assert_eq!(state.ball.physics_scale, state.ball.size);
        assert!((physics.body().radius - 0.57).abs() < 1e-5);
        assert!((physics.body().position.y - 0.57).abs() < 1e-5);
    }

    #[test]
    fn test_collider_never_leads_mesh() {
        let mut state = session(Tuning::stepped());
        let mut physics = FakeBall::at(Vec3::new(0.0, 0.5, 0.0));
        let settings = Settings {
            run_speed: 2.0,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut state, &mut physics, &forward(), &settings, SIM_DT);
            // Keep the kinematic stand-in on the ground
            physics.body_mut().position.y = state.ball.collider_radius();
            assert!(state.ball.physics_scale <= state.ball.size);
        }
        assert!(state.ball.size > 1.0);
        assert!(state.ball.size <= 4.0);
    }

    #[test]
    fn test_fall_resets_next_tick() {
        let tuning = Tuning::stepped();
        let mut state = session(tuning.clone());
        state.ball.size = 3.5;
        state.ball.physics_scale = 3.4;
        let mut physics = FakeBall::at(Vec3::new(30.0, -20.5, 0.0));
        physics.body_mut().velocity = Vec3::new(0.0, -12.0, 0.0);

        let report = tick(&mut state, &mut physics, &forward(), &Settings::default(), SIM_DT);

        assert!(report.reset);
        assert_eq!(state.resets, 1);
        assert_eq!(state.ball.size, 1.0);
        assert_eq!(state.ball.physics_scale, 1.0);
        assert_eq!(physics.body().position, tuning.spawn);
        assert_eq!(physics.body().velocity, Vec3::ZERO);
        assert_eq!(physics.body().angular_velocity, Vec3::ZERO);
        // Rest of the tick is skipped
        assert!(physics.body().impulses.is_empty());
        assert_eq!(physics.steps, 0);
    }

    #[test]
    fn test_camera_follows_setting() {
        let mut state = session(Tuning::classic());
        let mut physics = FakeBall::at(Vec3::new(2.0, 0.5, 2.0));
        let mut settings = Settings {
            follow_camera: true,
            follow_speed: 1.0,
            ..Default::default()
        };

        tick(&mut state, &mut physics, &InputState::default(), &settings, SIM_DT);
        assert_eq!(state.camera.mode, CameraMode::Following);
        assert_eq!(state.camera.target, Vec3::new(2.0, 0.5, 2.0));
        assert!(state.camera.eye.y < OVERHEAD_EYE[1]);

        settings.follow_camera = false;
        tick(&mut state, &mut physics, &InputState::default(), &settings, SIM_DT);
        assert_eq!(state.camera.mode, CameraMode::Fixed);
        assert_eq!(state.camera.eye, Vec3::from(OVERHEAD_EYE));
    }

    #[test]
    fn test_trail_painted_after_step() {
        let mut state = session(Tuning::classic());
        state.trail.mask.take_dirty();
        state.ball.last_position = Vec3::new(0.0, 0.5, 0.0);
        let mut physics = FakeBall::at(Vec3::new(0.0, 0.5, 0.0));
        physics.body_mut().velocity = Vec3::new(0.0, 0.0, -3.0);

        let report = tick(
            &mut state,
            &mut physics,
            &InputState::default(),
            &Settings::default(),
            SIM_DT,
        );

        let stamp = report.stamp.expect("moving ball paints");
        assert!((stamp.z + 3.0 * SIM_DT).abs() < 1e-6);
        assert!(state.trail.mask.take_dirty().is_some());
        assert_eq!(state.trail.stamp_count(), 1);
    }

    #[test]
    fn test_rapier_session_rolls_and_grows() {
        let tuning = Tuning::classic();
        let mut state = session(tuning.clone());
        let mut physics = PhysicsWorld::with_scene(&tuning);
        let settings = Settings::default();

        // Let the ball land first
        for _ in 0..120 {
            tick(&mut state, &mut physics, &InputState::default(), &settings, SIM_DT);
        }
        let landed = physics.ball_translation().unwrap();
        assert!(landed.y < 1.0);

        for _ in 0..90 {
            tick(&mut state, &mut physics, &forward(), &settings, SIM_DT);
        }
        let rolled = physics.ball_translation().unwrap();
        assert!(rolled.z < landed.z - 1.0, "ball rolled forward to z={}", rolled.z);
        assert!(state.ball.size > 1.0);
        assert!(state.ball.size <= tuning.max_size);
        assert!(state.trail.stamp_count() > 0);
    }

    #[test]
    fn test_rapier_session_respawns_after_falling() {
        let tuning = Tuning::stepped();
        let mut state = session(tuning.clone());
        let mut physics = PhysicsWorld::with_scene(&tuning);
        state.ball.size = 2.0;
        physics.respawn_ball(glam::Vec3::new(40.0, 0.0, 0.0), 0.5);

        let mut reset_seen = false;
        for _ in 0..600 {
            let report = tick(
                &mut state,
                &mut physics,
                &InputState::default(),
                &Settings::default(),
                SIM_DT,
            );
            if report.reset {
                reset_seen = true;
                break;
            }
        }

        assert!(reset_seen);
        assert_eq!(physics.ball_translation(), Some(tuning.spawn));
        assert_eq!(physics.ball_linvel(), Some(Vec3::ZERO));
        assert_eq!(physics.ball_angvel(), Some(Vec3::ZERO));
        assert_eq!(state.ball.size, 1.0);
        assert_eq!(state.ball.physics_scale, 1.0);
    }
}
