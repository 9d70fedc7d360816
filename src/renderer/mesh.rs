//! Mesh generation for the scene primitives

use std::f32::consts::PI;

use super::vertex::Vertex;

/// Indexed triangle list
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl Mesh {
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// Unit-radius UV sphere centered on the origin
pub fn uv_sphere(segments: u16, rings: u16) -> Mesh {
    let segments = segments.max(3);
    let rings = rings.max(2);
    let mut mesh = Mesh::default();

    for ring in 0..=rings {
        let phi = PI * ring as f32 / rings as f32;
        let (sin_phi, cos_phi) = phi.sin_cos();
        for seg in 0..=segments {
            let theta = 2.0 * PI * seg as f32 / segments as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();
            let n = [sin_phi * cos_theta, cos_phi, sin_phi * sin_theta];
            mesh.vertices.push(Vertex::new(n, n));
        }
    }

    let stride = segments + 1;
    for ring in 0..rings {
        for seg in 0..segments {
            let a = ring * stride + seg;
            let b = a + stride;
            // Counter-clockwise seen from outside
            mesh.indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
        }
    }
    mesh
}

/// Flat square in the XZ plane at y = 0, facing up
pub fn ground_plane(half_extent: f32) -> Mesh {
    let h = half_extent;
    let up = [0.0, 1.0, 0.0];
    Mesh {
        vertices: vec![
            Vertex::new([-h, 0.0, -h], up),
            Vertex::new([h, 0.0, -h], up),
            Vertex::new([h, 0.0, h], up),
            Vertex::new([-h, 0.0, h], up),
        ],
        indices: vec![0, 2, 1, 0, 3, 2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn triangle_normal(mesh: &Mesh, tri: &[u16]) -> Vec3 {
        let p = |i: u16| Vec3::from(mesh.vertices[i as usize].position);
        let (a, b, c) = (p(tri[0]), p(tri[1]), p(tri[2]));
        (b - a).cross(c - a)
    }

    #[test]
    fn test_sphere_vertices_on_unit_sphere() {
        let mesh = uv_sphere(32, 16);
        assert_eq!(mesh.vertices.len(), 33 * 17);
        assert_eq!(mesh.index_count(), 32 * 16 * 6);
        for v in &mesh.vertices {
            assert!((Vec3::from(v.position).length() - 1.0).abs() < 1e-5);
            assert_eq!(v.position, v.normal);
        }
    }

    #[test]
    fn test_sphere_faces_outward() {
        let mesh = uv_sphere(16, 8);
        for tri in mesh.indices.chunks(3) {
            let n = triangle_normal(&mesh, tri);
            if n.length() < 1e-6 {
                // Degenerate at the poles
                continue;
            }
            let centroid = tri
                .iter()
                .map(|&i| Vec3::from(mesh.vertices[i as usize].position))
                .sum::<Vec3>();
            assert!(n.dot(centroid) > 0.0);
        }
    }

    #[test]
    fn test_ground_faces_up() {
        let mesh = ground_plane(25.0);
        assert_eq!(mesh.index_count(), 6);
        for tri in mesh.indices.chunks(3) {
            assert!(triangle_normal(&mesh, tri).y > 0.0);
        }
        assert!(mesh.vertices.iter().all(|v| v.position[1] == 0.0));
    }
}
