//! WebGPU rendering module
//!
//! A single forward pass draws the snowfield and the snowball.

pub mod mesh;
pub mod scene_pipeline;
pub mod vertex;

pub use scene_pipeline::SceneRenderState;
