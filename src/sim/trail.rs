//! Trail mask and brush stamping
//!
//! The mask is a square grid of intensities laid over the snowfield
//! (0 = untouched snow, 255 = bare ground). Each stamp composites a soft
//! round brush "over" what is already there, so a fresh stamp fully covers
//! older paint inside its solid core. The mask is never faded or cleared
//! during a session.
//!
//! The painter writes, the renderer uploads the dirty rows before drawing.

use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;

/// Axis-aligned texel region, `x1`/`y1` exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyRect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl DirtyRect {
    fn union(self, other: DirtyRect) -> DirtyRect {
        DirtyRect {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }
}

/// Paint coverage over the snowfield
#[derive(Debug, Clone)]
pub struct TrailMask {
    resolution: u32,
    texels: Vec<u8>,
    dirty: Option<DirtyRect>,
}

impl TrailMask {
    pub fn new(resolution: u32) -> Self {
        let resolution = resolution.max(1);
        Self {
            resolution,
            texels: vec![0; (resolution * resolution) as usize],
            // The GPU copy starts uninitialized, so the first upload is everything
            dirty: Some(DirtyRect {
                x0: 0,
                y0: 0,
                x1: resolution,
                y1: resolution,
            }),
        }
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Row-major intensities, row 0 at world z = -WORLD_HALF_EXTENT
    pub fn texels(&self) -> &[u8] {
        &self.texels
    }

    /// Continuous texel coordinates of a world XZ point
    fn world_to_texel(&self, x: f32, z: f32) -> Vec2 {
        let scale = self.resolution as f32 / (2.0 * WORLD_HALF_EXTENT);
        Vec2::new((x + WORLD_HALF_EXTENT) * scale, (z + WORLD_HALF_EXTENT) * scale)
    }

    /// World XZ of a texel center
    fn texel_center(&self, col: u32, row: u32) -> Vec2 {
        let size = 2.0 * WORLD_HALF_EXTENT / self.resolution as f32;
        Vec2::new(
            -WORLD_HALF_EXTENT + (col as f32 + 0.5) * size,
            -WORLD_HALF_EXTENT + (row as f32 + 0.5) * size,
        )
    }

    /// Intensity (0..=1) at a world XZ point, 0 off the field
    pub fn sample(&self, x: f32, z: f32) -> f32 {
        let t = self.world_to_texel(x, z);
        if t.x < 0.0 || t.y < 0.0 {
            return 0.0;
        }
        let (col, row) = (t.x as u32, t.y as u32);
        if col >= self.resolution || row >= self.resolution {
            return 0.0;
        }
        self.texels[(row * self.resolution + col) as usize] as f32 / 255.0
    }

    /// Composite one brush stamp. Returns the touched region, if any.
    pub fn stamp(&mut self, stamp: &Stamp) -> Option<DirtyRect> {
        let radius = stamp.diameter * 0.5;
        if radius <= 0.0 {
            return None;
        }

        let lo = self.world_to_texel(stamp.x - radius, stamp.z - radius);
        let hi = self.world_to_texel(stamp.x + radius, stamp.z + radius);
        let max = self.resolution as f32;
        let x0 = lo.x.floor().clamp(0.0, max) as u32;
        let y0 = lo.y.floor().clamp(0.0, max) as u32;
        let x1 = hi.x.ceil().clamp(0.0, max) as u32;
        let y1 = hi.y.ceil().clamp(0.0, max) as u32;
        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        let (sin, cos) = stamp.rotation.sin_cos();
        let center = Vec2::new(stamp.x, stamp.z);
        for row in y0..y1 {
            for col in x0..x1 {
                let d = self.texel_center(col, row) - center;
                // Brush-local coordinates; the profile is radial so rotation
                // only turns the brush, never reshapes it
                let local = Vec2::new(d.x * cos + d.y * sin, -d.x * sin + d.y * cos);
                let alpha = brush_alpha(local.length() / radius);
                if alpha <= 0.0 {
                    continue;
                }
                let idx = (row * self.resolution + col) as usize;
                let dst = self.texels[idx] as f32;
                self.texels[idx] = (alpha * 255.0 + (1.0 - alpha) * dst).round() as u8;
            }
        }

        let rect = DirtyRect { x0, y0, x1, y1 };
        self.dirty = Some(match self.dirty {
            Some(existing) => existing.union(rect),
            None => rect,
        });
        Some(rect)
    }

    /// Region changed since the last call, cleared on read
    pub fn take_dirty(&mut self) -> Option<DirtyRect> {
        self.dirty.take()
    }

    /// Fraction of texels with any paint
    pub fn coverage(&self) -> f32 {
        let painted = self.texels.iter().filter(|&&t| t > 0).count();
        painted as f32 / self.texels.len() as f32
    }
}

/// Brush opacity at a normalized distance from its center: solid core,
/// linear falloff over the outer rim
pub fn brush_alpha(normalized_distance: f32) -> f32 {
    if normalized_distance <= BRUSH_SOLID_FRACTION {
        1.0
    } else if normalized_distance < 1.0 {
        (1.0 - normalized_distance) / (1.0 - BRUSH_SOLID_FRACTION)
    } else {
        0.0
    }
}

/// A single brush placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stamp {
    pub x: f32,
    pub z: f32,
    /// World-space brush diameter
    pub diameter: f32,
    /// Brush rotation around the vertical axis (radians)
    pub rotation: f32,
}

/// Decides when and where to stamp
#[derive(Debug, Clone)]
pub struct TrailPainter {
    pub mask: TrailMask,
    /// Position at the last stamp, only advanced when stamping
    pub last_position: Vec3,
    rng: Pcg32,
    stamps: u64,
}

impl TrailPainter {
    pub fn new(seed: u64) -> Self {
        Self::with_resolution(seed, MASK_RESOLUTION)
    }

    pub fn with_resolution(seed: u64, resolution: u32) -> Self {
        Self {
            mask: TrailMask::new(resolution),
            last_position: Vec3::ZERO,
            rng: Pcg32::seed_from_u64(seed),
            stamps: 0,
        }
    }

    /// Number of stamps painted this session
    pub fn stamp_count(&self) -> u64 {
        self.stamps
    }

    /// Stamp under the ball if it has moved far enough since the last stamp
    pub fn paint(&mut self, ball: Vec3, size: f32, min_displacement: f32) -> Option<Stamp> {
        if ball.distance(self.last_position) <= min_displacement {
            return None;
        }

        let ball_diameter = 2.0 * BALL_BASE_RADIUS * size;
        let stamp = Stamp {
            x: ball.x,
            z: ball.z,
            diameter: ball_diameter * BRUSH_SCALE,
            rotation: self.rng.random::<f32>(),
        };
        self.mask.stamp(&stamp);
        self.last_position = ball;
        self.stamps += 1;
        Some(stamp)
    }
}
