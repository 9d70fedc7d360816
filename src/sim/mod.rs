//! Simulation module
//!
//! All gameplay logic lives here, independent of rendering and the browser:
//! - Fixed timestep only
//! - Seeded RNG only (trail brush rotation)
//! - Physics reached through the `BallPhysics` seam so the tick can be
//!   driven by rapier or by a test double

pub mod body;
pub mod camera;
pub mod growth;
pub mod physics;
pub mod reset;
pub mod state;
pub mod stepper;
pub mod tick;
pub mod trail;

pub use body::BallPhysics;
pub use camera::{CameraMode, CameraRig};
pub use physics::PhysicsWorld;
pub use state::{BallState, GameState};
pub use stepper::ScaleStep;
pub use tick::{TickReport, tick};
pub use trail::{DirtyRect, Stamp, TrailMask, TrailPainter};
