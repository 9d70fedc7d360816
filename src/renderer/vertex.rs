//! Vertex types for 3D rendering

use bytemuck::{Pod, Zeroable};

/// Lit vertex with position and normal
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub const fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// Scene colors (sRGB, converted to linear before upload)
pub mod colors {
    /// Untouched snow, #ffffff
    pub const SNOW: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    /// Bare ground under the trail, #b0a090
    pub const DIRT: [f32; 4] = [176.0 / 255.0, 160.0 / 255.0, 144.0 / 255.0, 1.0];
    pub const BALL: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const FOG: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    /// Clear color, sky blue #87ceeb
    pub const SKY: [f32; 4] = [135.0 / 255.0, 206.0 / 255.0, 235.0 / 255.0, 1.0];

    /// sRGB to linear for one channel
    pub fn srgb_to_linear(c: f32) -> f32 {
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    /// sRGB color to linear, alpha untouched
    pub fn linear(color: [f32; 4]) -> [f32; 4] {
        [
            srgb_to_linear(color[0]),
            srgb_to_linear(color[1]),
            srgb_to_linear(color[2]),
            color[3],
        ]
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_linear_endpoints() {
            assert_eq!(linear(SNOW), [1.0, 1.0, 1.0, 1.0]);
            assert_eq!(srgb_to_linear(0.0), 0.0);
            let dirt = linear(DIRT);
            assert!((dirt[0] - 0.434).abs() < 0.01);
            assert!(dirt[0] > dirt[1] && dirt[1] > dirt[2]);
        }
    }
}
