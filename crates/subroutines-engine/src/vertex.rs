//! Per-vertex data exchanged with the vertex stage.

use bytemuck::{Pod, Zeroable};

/// Approximation of π used by the mesh generators.
///
/// Kept at `3.147` (not `std::f32::consts::PI`) so generated geometry matches
/// the reference sphere tessellation vertex for vertex.
pub const PI: f32 = 3.147;

/// One mesh vertex as laid out in the vertex buffer.
///
/// Layout (40 bytes, no padding):
///
///  offset  0  color     [f32; 4]   loc 0
///  offset 16  position  [f32; 3]   loc 1
///  offset 28  normal    [f32; 3]   loc 2
///
/// The field order is part of the GPU contract: [`VertexFormat::layout`] and
/// the shader's `VertexIn` must be updated together with it.
///
/// Values are stored exactly as given. `normal` is not normalized and `color`
/// is not clamped; a zero normal (the default) must not be lit as-is.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct VertexFormat {
    /// Linear RGBA.
    pub color: [f32; 4],
    /// Model-space position.
    pub position: [f32; 3],
    /// Surface normal, expected to be unit length.
    pub normal: [f32; 3],
}

impl VertexFormat {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x4, // color
        1 => Float32x3, // position
        2 => Float32x3  // normal
    ];

    /// Creates a vertex from its three attributes.
    ///
    /// Accepts arrays or `glam` vectors.
    #[inline]
    pub fn new(
        position: impl Into<[f32; 3]>,
        color: impl Into<[f32; 4]>,
        normal: impl Into<[f32; 3]>,
    ) -> Self {
        Self {
            color: color.into(),
            position: position.into(),
            normal: normal.into(),
        }
    }

    /// Attribute-binding description matching the struct layout.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<VertexFormat>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }

    #[inline]
    pub fn position_vec(&self) -> glam::Vec3 {
        glam::Vec3::from_array(self.position)
    }

    #[inline]
    pub fn color_vec(&self) -> glam::Vec4 {
        glam::Vec4::from_array(self.color)
    }

    #[inline]
    pub fn normal_vec(&self) -> glam::Vec3 {
        glam::Vec3::from_array(self.normal)
    }
}

#[cfg(test)]
mod tests {
    use std::mem::{offset_of, size_of};

    use super::*;

    fn sample() -> VertexFormat {
        VertexFormat::new([1.0, 2.0, 3.0], [0.5, 0.5, 0.5, 1.0], [0.0, 1.0, 0.0])
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn default_is_all_zero() {
        let v = VertexFormat::default();
        assert_eq!(v.color, [0.0; 4]);
        assert_eq!(v.position, [0.0; 3]);
        assert_eq!(v.normal, [0.0; 3]);
        assert_eq!(v, VertexFormat::zeroed());
    }

    #[test]
    fn new_reads_back_exact_values() {
        let v = sample();
        assert_eq!(v.position, [1.0, 2.0, 3.0]);
        assert_eq!(v.color, [0.5, 0.5, 0.5, 1.0]);
        assert_eq!(v.normal, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn new_does_not_normalize_or_clamp() {
        let v = VertexFormat::new([0.0; 3], [2.0, -1.0, 0.25, 7.5], [3.0, 4.0, 0.0]);
        assert_eq!(v.color, [2.0, -1.0, 0.25, 7.5]);
        assert_eq!(v.normal, [3.0, 4.0, 0.0]);
    }

    #[test]
    fn new_accepts_glam_vectors() {
        let v = VertexFormat::new(
            glam::vec3(1.0, 2.0, 3.0),
            glam::vec4(0.5, 0.5, 0.5, 1.0),
            glam::Vec3::Y,
        );
        assert_eq!(v, sample());
        assert_eq!(v.position_vec(), glam::vec3(1.0, 2.0, 3.0));
        assert_eq!(v.color_vec(), glam::vec4(0.5, 0.5, 0.5, 1.0));
        assert_eq!(v.normal_vec(), glam::Vec3::Y);
    }

    // ── field independence ────────────────────────────────────────────────

    #[test]
    fn field_writes_are_independent_in_any_order() {
        let p = [9.0, 8.0, 7.0];
        let c = [0.1, 0.2, 0.3, 0.4];
        let n = [0.0, 0.0, -1.0];

        type Write = fn(&mut VertexFormat, [f32; 3], [f32; 4], [f32; 3]);
        let writes: [Write; 3] = [
            |v, p, _, _| v.position = p,
            |v, _, c, _| v.color = c,
            |v, _, _, n| v.normal = n,
        ];
        let orders = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];

        for order in orders {
            let mut v = sample();
            let mut expected = sample();
            for step in order {
                writes[step](&mut v, p, c, n);
                writes[step](&mut expected, p, c, n);
                // Untouched fields keep whatever `expected` says they hold.
                assert_eq!(v, expected);
            }
            assert_eq!(v, VertexFormat::new(p, c, n));
        }
    }

    #[test]
    fn position_write_keeps_color_and_normal() {
        let mut v = sample();
        v.position = [-1.0, -2.0, -3.0];
        assert_eq!(v.color, [0.5, 0.5, 0.5, 1.0]);
        assert_eq!(v.normal, [0.0, 1.0, 0.0]);
    }

    // ── memory layout ─────────────────────────────────────────────────────

    #[test]
    fn field_order_is_color_position_normal() {
        assert_eq!(offset_of!(VertexFormat, color), 0);
        assert_eq!(offset_of!(VertexFormat, position), 16);
        assert_eq!(offset_of!(VertexFormat, normal), 28);
        assert_eq!(size_of::<VertexFormat>(), 40);
    }

    #[test]
    fn layout_matches_struct_offsets() {
        let layout = VertexFormat::layout();
        assert_eq!(layout.array_stride, size_of::<VertexFormat>() as u64);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Vertex);

        let attrs = layout.attributes;
        assert_eq!(attrs.len(), 3);
        assert_eq!(attrs[0].offset, offset_of!(VertexFormat, color) as u64);
        assert_eq!(attrs[0].format, wgpu::VertexFormat::Float32x4);
        assert_eq!(attrs[1].offset, offset_of!(VertexFormat, position) as u64);
        assert_eq!(attrs[1].format, wgpu::VertexFormat::Float32x3);
        assert_eq!(attrs[2].offset, offset_of!(VertexFormat, normal) as u64);
        assert_eq!(attrs[2].format, wgpu::VertexFormat::Float32x3);

        let locations: Vec<u32> = attrs.iter().map(|a| a.shader_location).collect();
        assert_eq!(locations, [0, 1, 2]);
    }

    #[test]
    fn bytes_follow_field_order() {
        let v = sample();
        let bytes = bytemuck::bytes_of(&v);
        let floats: &[f32] = bytemuck::cast_slice(bytes);
        assert_eq!(floats, &[0.5, 0.5, 0.5, 1.0, 1.0, 2.0, 3.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn slices_are_contiguous() {
        let verts = [sample(), VertexFormat::default(), sample()];
        let bytes: &[u8] = bytemuck::cast_slice(&verts);
        assert_eq!(bytes.len(), 3 * size_of::<VertexFormat>());
        assert_eq!(&bytes[80..120], bytemuck::bytes_of(&verts[2]));
    }

    #[test]
    fn pi_is_preserved() {
        assert_eq!(PI, 3.147_f32);
    }
}
