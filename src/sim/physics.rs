//! Rapier-backed physics world: a fixed snowfield slab and the dynamic ball
//!
//! Vectors cross the boundary component-wise so the gameplay code stays on
//! the crate's own `glam` types.

use glam::{Quat, Vec3};
use rapier3d::prelude::*;

use super::body::BallPhysics;
use crate::consts::{BALL_BASE_RADIUS, GRAVITY, SIM_DT, WORLD_HALF_EXTENT};
use crate::tuning::Tuning;

/// Half thickness of the ground slab; its top face sits at y = 0
const GROUND_HALF_THICKNESS: f32 = 0.1;

#[inline]
fn to_vector(v: Vec3) -> Vector {
    Vector::new(v.x, v.y, v.z)
}

#[derive(Debug, Clone, Copy)]
struct BallHandles {
    body: RigidBodyHandle,
    collider: ColliderHandle,
}

pub struct PhysicsWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
    gravity: Vector,
    ball: Option<BallHandles>,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    /// Empty world with gravity and no bodies
    pub fn new() -> Self {
        let integration_parameters = IntegrationParameters {
            dt: SIM_DT,
            ..Default::default()
        };

        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            gravity: Vector::new(0.0, GRAVITY, 0.0),
            ball: None,
        }
    }

    /// World with the snowfield and the ball at its spawn point
    pub fn with_scene(tuning: &Tuning) -> Self {
        let mut world = Self::new();
        world.add_ground(tuning);
        world.spawn_ball(tuning);
        world
    }

    /// Fixed slab covering the snowfield
    pub fn add_ground(&mut self, tuning: &Tuning) -> RigidBodyHandle {
        let body = RigidBodyBuilder::fixed()
            .translation(Vector::new(0.0, -GROUND_HALF_THICKNESS, 0.0))
            .build();
        let handle = self.rigid_body_set.insert(body);

        let collider =
            ColliderBuilder::cuboid(WORLD_HALF_EXTENT, GROUND_HALF_THICKNESS, WORLD_HALF_EXTENT)
                .friction(tuning.ground_friction)
                .build();
        self.collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set);
        handle
    }

    /// Dynamic ball at the spawn point. Replaces any previous ball.
    pub fn spawn_ball(&mut self, tuning: &Tuning) -> RigidBodyHandle {
        if let Some(old) = self.ball.take() {
            self.rigid_body_set.remove(
                old.body,
                &mut self.island_manager,
                &mut self.collider_set,
                &mut self.impulse_joint_set,
                &mut self.multibody_joint_set,
                true,
            );
        }

        let body = RigidBodyBuilder::dynamic()
            .translation(to_vector(tuning.spawn))
            .linear_damping(tuning.damping)
            .angular_damping(tuning.damping)
            .build();
        let body_handle = self.rigid_body_set.insert(body);

        let collider = ColliderBuilder::ball(BALL_BASE_RADIUS).build();
        let collider_handle =
            self.collider_set
                .insert_with_parent(collider, body_handle, &mut self.rigid_body_set);

        self.ball = Some(BallHandles {
            body: body_handle,
            collider: collider_handle,
        });
        log::debug!("Ball spawned at {:?}", tuning.spawn);
        body_handle
    }

    fn ball_body(&self) -> Option<&RigidBody> {
        self.ball.and_then(|h| self.rigid_body_set.get(h.body))
    }

    fn ball_body_mut(&mut self) -> Option<&mut RigidBody> {
        let handles = self.ball?;
        self.rigid_body_set.get_mut(handles.body)
    }

    /// Linear velocity of the ball
    pub fn ball_linvel(&self) -> Option<Vec3> {
        self.ball_body().map(|body| {
            let v = body.linvel();
            Vec3::new(v.x, v.y, v.z)
        })
    }

    /// Angular velocity of the ball
    pub fn ball_angvel(&self) -> Option<Vec3> {
        self.ball_body().map(|body| {
            let w = body.angvel();
            Vec3::new(w.x, w.y, w.z)
        })
    }

    /// Current radius of the ball collider
    pub fn ball_radius(&self) -> Option<f32> {
        let handles = self.ball?;
        let collider = self.collider_set.get(handles.collider)?;
        collider.shape().as_ball().map(|ball| ball.radius)
    }
}

impl BallPhysics for PhysicsWorld {
    fn ball_translation(&self) -> Option<Vec3> {
        self.ball_body().map(|body| {
            let t = body.translation();
            Vec3::new(t.x, t.y, t.z)
        })
    }

    fn ball_rotation(&self) -> Option<Quat> {
        self.ball_body().map(|body| {
            let r = body.rotation();
            Quat::from_xyzw(r.x, r.y, r.z, r.w)
        })
    }

    fn apply_ball_impulse(&mut self, impulse: Vec3) {
        if let Some(body) = self.ball_body_mut() {
            body.apply_impulse(to_vector(impulse), true);
        }
    }

    fn lift_ball(&mut self, height: f32) {
        if let Some(body) = self.ball_body_mut() {
            let t = body.translation();
            let lifted = Vector::new(t.x, t.y + height, t.z);
            body.set_translation(lifted, true);
        }
    }

    fn set_ball_radius(&mut self, radius: f32) {
        let Some(handles) = self.ball else {
            return;
        };
        if let Some(collider) = self.collider_set.get_mut(handles.collider) {
            collider.set_shape(SharedShape::ball(radius));
        }
    }

    fn respawn_ball(&mut self, spawn: Vec3, radius: f32) {
        if let Some(body) = self.ball_body_mut() {
            body.set_translation(to_vector(spawn), true);
            body.set_rotation(Default::default(), true);
            body.set_linvel(Vector::new(0.0, 0.0, 0.0), true);
            body.set_angvel(Vector::new(0.0, 0.0, 0.0), true);
        }
        self.set_ball_radius(radius);
    }

    fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        self.physics_pipeline.step(
            self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            &(),
            &(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_world_has_no_ball() {
        let mut world = PhysicsWorld::new();
        assert_eq!(world.ball_translation(), None);
        // Guards are silent no-ops
        world.apply_ball_impulse(Vec3::X);
        world.lift_ball(1.0);
        world.set_ball_radius(2.0);
        world.step(SIM_DT);
        assert_eq!(world.ball_radius(), None);
    }

    #[test]
    fn test_ball_settles_on_ground() {
        let tuning = Tuning::classic();
        let mut world = PhysicsWorld::with_scene(&tuning);
        for _ in 0..300 {
            world.step(SIM_DT);
        }
        let pos = world.ball_translation().unwrap();
        assert!((pos.y - BALL_BASE_RADIUS).abs() < 0.05, "ball rests at y={}", pos.y);
    }

    #[test]
    fn test_impulse_moves_ball() {
        let tuning = Tuning::classic();
        let mut world = PhysicsWorld::with_scene(&tuning);
        for _ in 0..120 {
            world.step(SIM_DT);
        }
        let before = world.ball_translation().unwrap();
        world.apply_ball_impulse(Vec3::new(0.0, 0.0, -1.0));
        for _ in 0..30 {
            world.step(SIM_DT);
        }
        let after = world.ball_translation().unwrap();
        assert!(after.z < before.z - 0.1);
    }

    #[test]
    fn test_set_radius_and_respawn() {
        let tuning = Tuning::stepped();
        let mut world = PhysicsWorld::with_scene(&tuning);
        world.set_ball_radius(1.2);
        assert_eq!(world.ball_radius(), Some(1.2));

        world.apply_ball_impulse(Vec3::new(3.0, 0.0, 0.0));
        world.step(SIM_DT);
        world.respawn_ball(tuning.spawn, BALL_BASE_RADIUS);

        assert_eq!(world.ball_translation(), Some(tuning.spawn));
        assert_eq!(world.ball_linvel(), Some(Vec3::ZERO));
        assert_eq!(world.ball_angvel(), Some(Vec3::ZERO));
        assert_eq!(world.ball_radius(), Some(BALL_BASE_RADIUS));
    }

    #[test]
    fn test_lift_keeps_horizontal_position() {
        let tuning = Tuning::classic();
        let mut world = PhysicsWorld::with_scene(&tuning);
        let before = world.ball_translation().unwrap();
        world.lift_ball(0.25);
        let after = world.ball_translation().unwrap();
        assert_eq!(after, before + Vec3::new(0.0, 0.25, 0.0));
    }
}
