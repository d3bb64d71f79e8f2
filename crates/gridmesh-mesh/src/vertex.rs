use bytemuck::{Pod, Zeroable};

/// Vertex of a filled grid quad.
///
/// Layout is fixed at eight `f32`s (32 bytes):
/// position `xyz`, color `rgb`, texture coordinate `uv`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub pos: [f32; 3],
    pub color: [f32; 3],
    pub uv: [f32; 2],
}

impl QuadVertex {
    /// Number of `f32` components per vertex.
    pub const FLOATS: usize = 8;

    #[inline]
    pub const fn new(pos: [f32; 3], color: [f32; 3], uv: [f32; 2]) -> Self {
        Self { pos, color, uv }
    }
}

/// Vertex of a grid line segment.
///
/// Layout is fixed at six `f32`s (24 bytes): position `xyz`, color `rgb`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub pos: [f32; 3],
    pub color: [f32; 3],
}

impl LineVertex {
    /// Number of `f32` components per vertex.
    pub const FLOATS: usize = 6;

    /// Grid lines are always drawn black.
    pub const COLOR: [f32; 3] = [0.0, 0.0, 0.0];

    #[inline]
    pub const fn new(pos: [f32; 3]) -> Self {
        Self { pos, color: Self::COLOR }
    }
}
