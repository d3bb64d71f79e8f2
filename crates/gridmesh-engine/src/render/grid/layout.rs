//! GPU-side descriptions of the grid vertex formats and uniform block.

use bytemuck::{Pod, Zeroable};
use gridmesh_mesh::{LineVertex, QuadVertex};

const QUAD_ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
    0 => Float32x3, // position
    1 => Float32x3, // color
    2 => Float32x2  // uv
];

const LINE_ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
    0 => Float32x3, // position
    1 => Float32x3  // color
];

pub(super) fn quad_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<QuadVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &QUAD_ATTRS,
    }
}

pub(super) fn line_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<LineVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &LINE_ATTRS,
    }
}

/// Uniform block shared by both grid shaders.
///
/// Matches `Uniforms` in `grid.wgsl` / `line.wgsl`, padded to 16 bytes.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct GridUniform {
    pub transform: [[f32; 4]; 4],
    pub texture_mix: f32,
    pub _pad: [f32; 3],
}

impl GridUniform {
    pub(super) fn new(transform: glam::Mat4, textured: bool) -> Self {
        Self {
            transform: transform.to_cols_array_2d(),
            texture_mix: if textured { 1.0 } else { 0.0 },
            _pad: [0.0; 3],
        }
    }

    pub(super) fn min_binding_size() -> std::num::NonZeroU64 {
        std::num::NonZeroU64::new(std::mem::size_of::<Self>() as u64)
            .unwrap_or(std::num::NonZeroU64::MIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_offsets_follow_float_layout() {
        let quad = quad_vertex_layout();
        assert_eq!(quad.array_stride, 32);
        let offsets: Vec<u64> = quad.attributes.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 24]);

        let line = line_vertex_layout();
        assert_eq!(line.array_stride, 24);
        let offsets: Vec<u64> = line.attributes.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12]);
    }

    #[test]
    fn uniform_matches_wgsl_size() {
        // mat4x4<f32> (64) + f32, rounded up to the struct alignment of 16.
        assert_eq!(std::mem::size_of::<GridUniform>(), 80);
        assert_eq!(GridUniform::min_binding_size().get(), 80);
    }

    #[test]
    fn texture_mix_tracks_texture_presence() {
        assert_eq!(GridUniform::new(glam::Mat4::IDENTITY, true).texture_mix, 1.0);
        assert_eq!(GridUniform::new(glam::Mat4::IDENTITY, false).texture_mix, 0.0);
    }
}
