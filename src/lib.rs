//! Snowball Roll - a snowball that grows as it rolls across a snowfield
//!
//! Core modules:
//! - `sim`: Per-tick gameplay (growth, collider stepping, camera, trail, reset)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser input bridge
//! - `settings`: Operator panel values
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (matches the physics world's 60 Hz step)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Gravity along Y (m/s²)
    pub const GRAVITY: f32 = -9.81;

    /// Snowfield is a square of this half extent centered on the origin
    pub const WORLD_HALF_EXTENT: f32 = 25.0;

    /// Ball mesh radius at size 1
    pub const BALL_BASE_RADIUS: f32 = 0.5;
    /// Upward body offset per unit of collider scale gained. Equal to the
    /// collider radius per unit scale, so a lifted ball keeps touching the
    /// ground instead of starting inside it.
    pub const COLLIDER_LIFT_PER_SCALE: f32 = 0.5;

    /// Trail mask resolution (texels per side)
    pub const MASK_RESOLUTION: u32 = 2048;

    /// Overhead camera pose used when not following
    pub const OVERHEAD_EYE: [f32; 3] = [0.0, 50.0, 50.0];
    /// Vertical field of view (degrees)
    pub const CAMERA_FOV_DEG: f32 = 50.0;
    pub const CAMERA_NEAR: f32 = 0.1;
    pub const CAMERA_FAR: f32 = 1000.0;

    /// Follow camera offset: base + size * per_size, applied on Y and Z
    pub const FOLLOW_OFFSET_BASE: f32 = 5.0;
    pub const FOLLOW_OFFSET_PER_SIZE: f32 = 1.5;

    /// Stamp diameter relative to the ball diameter
    pub const BRUSH_SCALE: f32 = 1.05;
    /// Fraction of the brush radius painted at full strength
    pub const BRUSH_SOLID_FRACTION: f32 = 0.9;

    /// Directional light position, shining toward the origin
    pub const LIGHT_POSITION: [f32; 3] = [30.0, 50.0, 30.0];
    /// Ambient light share of the final color
    pub const AMBIENT_LIGHT: f32 = 0.5;
    /// Linear fog start and end distance from the eye
    pub const FOG_NEAR: f32 = 15.0;
    pub const FOG_FAR: f32 = 60.0;
    /// Self-illumination of the ball material
    pub const BALL_EMISSIVE: f32 = 0.2;
}

/// Linear interpolation with the factor clamped to [0, 1]
#[inline]
pub fn lerp_clamped(from: Vec3, to: Vec3, t: f32) -> Vec3 {
    from.lerp(to, t.clamp(0.0, 1.0))
}
