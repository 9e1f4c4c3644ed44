//! CPU meshes and their GPU buffers.

use wgpu::util::DeviceExt;

use crate::vertex::{PI, VertexFormat};

/// Indexed triangle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<VertexFormat>,
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Generates a UV sphere centered at the origin.
    ///
    /// `segments` divides longitude, `rings` divides latitude. The grid has one
    /// extra column and row so the seam and poles get their own vertices:
    /// `(rings + 1) * (segments + 1)` vertices, `rings * segments * 6` indices.
    ///
    /// Triangles wind counter-clockwise seen from outside; the ones touching a
    /// pole have one collapsed edge. Normals point outward and are unit length.
    /// Every vertex gets `color`.
    pub fn sphere(radius: f32, segments: u32, rings: u32, color: [f32; 4]) -> Self {
        let segments = segments.max(3);
        let rings = rings.max(2);

        let mut vertices = Vec::with_capacity(((rings + 1) * (segments + 1)) as usize);
        let mut indices = Vec::with_capacity((rings * segments * 6) as usize);

        for ring in 0..=rings {
            let v = ring as f32 / rings as f32;
            let phi = v * PI; // 0 at +Y

            for seg in 0..=segments {
                let u = seg as f32 / segments as f32;
                let theta = u * 2.0 * PI;

                // Pole rows are exact: `PI` > π puts the last ring past the south pole.
                let normal = if ring == 0 {
                    glam::Vec3::Y
                } else if ring == rings {
                    glam::Vec3::NEG_Y
                } else {
                    glam::vec3(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin())
                        .normalize_or(glam::Vec3::Y)
                };

                vertices.push(VertexFormat::new(normal * radius, color, normal));
            }
        }

        for ring in 0..rings {
            for seg in 0..segments {
                let current = ring * (segments + 1) + seg;
                let next = current + segments + 1;

                indices.extend_from_slice(&[current, current + 1, next]);
                indices.extend_from_slice(&[current + 1, next + 1, next]);
            }
        }

        log::trace!(
            "generated sphere: radius={radius}, segments={segments}, rings={rings}, vertices={}",
            vertices.len()
        );

        Self { vertices, indices }
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Vertex + index buffers for one [`Mesh`].
pub struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    /// Uploads `mesh` verbatim into new vertex and index buffers.
    pub fn upload(device: &wgpu::Device, mesh: &Mesh, label: &str) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} vbo")),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} ibo")),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        log::debug!(
            "uploaded mesh '{label}': {} vertices, {} indices",
            mesh.vertices.len(),
            mesh.indices.len()
        );

        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }

    pub fn vertex_buffer(&self) -> &wgpu::Buffer {
        &self.vertex_buffer
    }

    pub fn index_buffer(&self) -> &wgpu::Buffer {
        &self.index_buffer
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    #[test]
    fn sphere_has_correct_counts() {
        let mesh = Mesh::sphere(1.0, 32, 16, WHITE);
        assert_eq!(mesh.vertices.len(), 17 * 33);
        assert_eq!(mesh.indices.len(), 16 * 32 * 6);
        assert_eq!(mesh.triangle_count(), 16 * 32 * 2);
    }

    #[test]
    fn sphere_clamps_degenerate_tessellation() {
        let mesh = Mesh::sphere(1.0, 0, 0, WHITE);
        assert_eq!(mesh.vertices.len(), 3 * 4);
        assert_eq!(mesh.indices.len(), 2 * 3 * 6);
    }

    #[test]
    fn sphere_normals_are_unit_length() {
        let mesh = Mesh::sphere(2.5, 8, 4, WHITE);
        for v in &mesh.vertices {
            let len = v.normal_vec().length();
            assert!((len - 1.0).abs() < 1e-5, "normal should be unit length, got {len}");
        }
    }

    #[test]
    fn sphere_positions_lie_on_radius() {
        let radius = 2.5;
        let mesh = Mesh::sphere(radius, 12, 6, WHITE);
        for v in &mesh.vertices {
            let len = v.position_vec().length();
            assert!((len - radius).abs() < 1e-4, "vertex off the sphere: {len}");
        }
    }

    #[test]
    fn sphere_normals_point_outward() {
        let mesh = Mesh::sphere(1.5, 12, 6, WHITE);
        for v in &mesh.vertices {
            assert!(v.position_vec().dot(v.normal_vec()) > 0.0);
        }
    }

    #[test]
    fn sphere_indices_in_range() {
        let mesh = Mesh::sphere(1.0, 8, 4, WHITE);
        for &idx in &mesh.indices {
            assert!((idx as usize) < mesh.vertices.len(), "index {idx} out of range");
        }
    }

    #[test]
    fn sphere_vertices_carry_color() {
        let color = [0.2, 0.4, 0.6, 1.0];
        let mesh = Mesh::sphere(1.0, 6, 3, color);
        assert!(mesh.vertices.iter().all(|v| v.color == color));
    }

    #[test]
    fn sphere_first_vertex_is_north_pole() {
        let mesh = Mesh::sphere(3.0, 6, 3, WHITE);
        assert_eq!(mesh.vertices[0].position, [0.0, 3.0, 0.0]);
        assert_eq!(mesh.vertices[0].normal, [0.0, 1.0, 0.0]);
    }

    fn inward_faces(mesh: &Mesh) -> usize {
        mesh.indices
            .chunks(3)
            .filter(|tri| {
                let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| mesh.vertices[i as usize]);
                let face = (b.position_vec() - a.position_vec())
                    .cross(c.position_vec() - a.position_vec());
                // Pole triangles with a collapsed edge have no facing.
                if face.length() < 1e-7 {
                    return false;
                }
                let center = (a.position_vec() + b.position_vec() + c.position_vec()) / 3.0;
                face.dot(center) <= 0.0
            })
            .count()
    }

    #[test]
    fn sphere_faces_wind_counter_clockwise_from_outside() {
        let mesh = Mesh::sphere(1.0, 16, 8, WHITE);
        assert_eq!(inward_faces(&mesh), 0);
    }

    #[test]
    fn sphere_south_cap_faces_outward_at_demo_tessellation() {
        let mesh = Mesh::sphere(1.0, 48, 24, WHITE);
        assert_eq!(inward_faces(&mesh), 0);
    }

    #[test]
    fn sphere_last_row_is_south_pole() {
        let mesh = Mesh::sphere(2.0, 6, 3, WHITE);
        let last_row = &mesh.vertices[mesh.vertices.len() - 7..];
        for v in last_row {
            assert_eq!(v.position, [0.0, -2.0, 0.0]);
            assert_eq!(v.normal, [0.0, -1.0, 0.0]);
        }
    }
}
