//! Procedural grid mesh builder.
//!
//! Produces an `N × N` grid of unit quads (four vertices, six indices each)
//! centered on integer cell anchors, plus a black line overlay made of one
//! right-edge and one top-edge segment per cell.
//!
//! The builder writes into caller-provided slices and never retains them, so
//! the same routine fills CPU vectors in tests and GPU upload buffers in the
//! renderer.

mod builder;
mod color;
mod error;
mod layout;
mod vertex;

pub use builder::{MAX_GRID_SIZE, MeshSlice, build_grid, build_lines, build_quads};
pub use color::{ColorSource, default_source};
pub use error::{MeshError, Region};
pub use layout::GridLayout;
pub use vertex::{LineVertex, QuadVertex};

/// Owned grid geometry sized exactly for its layout.
#[derive(Debug, Clone, PartialEq)]
pub struct GridMesh {
    pub layout: GridLayout,
    pub quad_vertices: Vec<QuadVertex>,
    pub quad_indices: Vec<u32>,
    pub line_vertices: Vec<LineVertex>,
    pub line_indices: Vec<u32>,
}

impl GridMesh {
    /// Allocates and fills a fresh grid, drawing quad colors from `colors`.
    pub fn generate<C>(size: u32, colors: &mut C) -> Result<Self, MeshError>
    where
        C: ColorSource + ?Sized,
    {
        if size > MAX_GRID_SIZE {
            return Err(MeshError::SizeTooLarge { size });
        }

        let layout = GridLayout::new(size);
        let mut mesh = Self {
            layout,
            quad_vertices: vec![QuadVertex::default(); layout.quad_vertex_count()],
            quad_indices: vec![0; layout.quad_index_count()],
            line_vertices: vec![LineVertex::default(); layout.line_vertex_count()],
            line_indices: vec![0; layout.line_index_count()],
        };

        build_grid(
            size,
            MeshSlice::new(&mut mesh.quad_vertices, &mut mesh.quad_indices),
            MeshSlice::new(&mut mesh.line_vertices, &mut mesh.line_indices),
            colors,
        )?;

        log::debug!(
            "generated {size}x{size} grid: {} quad vertices, {} line vertices",
            mesh.quad_vertices.len(),
            mesh.line_vertices.len()
        );

        Ok(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn generate_sizes_every_buffer_from_layout() {
        let mut rng = StdRng::seed_from_u64(3);
        let mesh = GridMesh::generate(10, &mut rng).unwrap();
        assert_eq!(mesh.quad_vertices.len(), 400);
        assert_eq!(mesh.quad_indices.len(), 600);
        assert_eq!(mesh.line_vertices.len(), 400);
        assert_eq!(mesh.line_indices.len(), 400);
    }

    #[test]
    fn generate_twice_keeps_shape() {
        let mut rng = StdRng::seed_from_u64(5);
        let a = GridMesh::generate(4, &mut rng).unwrap();
        let b = GridMesh::generate(4, &mut rng).unwrap();
        assert_eq!(a.layout, b.layout);
        assert_eq!(a.quad_indices, b.quad_indices);
        assert_eq!(a.line_vertices, b.line_vertices);
        assert_eq!(a.quad_vertices.len(), b.quad_vertices.len());
    }

    #[test]
    fn generate_empty_grid() {
        let mesh = GridMesh::generate(0, &mut default_source()).unwrap();
        assert!(mesh.quad_vertices.is_empty());
        assert!(mesh.quad_indices.is_empty());
        assert!(mesh.line_vertices.is_empty());
        assert!(mesh.line_indices.is_empty());
    }

    #[test]
    fn generate_rejects_oversized_grid_before_allocating() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = GridMesh::generate(MAX_GRID_SIZE + 1, &mut rng).unwrap_err();
        assert_eq!(err, MeshError::SizeTooLarge { size: MAX_GRID_SIZE + 1 });
    }
}
