use crate::vertex::{LineVertex, QuadVertex};

/// Element counts for an `N × N` grid.
///
/// Every count is a function of `N²` only, so two builds with the same size
/// always produce buffers of identical length.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct GridLayout {
    size: u32,
}

impl GridLayout {
    pub const QUAD_VERTICES_PER_CELL: usize = 4;
    pub const QUAD_INDICES_PER_CELL: usize = 6;
    /// Two segments per cell (one per pass), two vertices each.
    pub const LINE_VERTICES_PER_CELL: usize = 4;
    pub const LINE_INDICES_PER_CELL: usize = 4;

    #[inline]
    pub const fn new(size: u32) -> Self {
        Self { size }
    }

    /// Cells along one side of the grid.
    #[inline]
    pub const fn size(self) -> u32 {
        self.size
    }

    /// Total number of cells (`N²`).
    #[inline]
    pub const fn cells(self) -> usize {
        self.size as usize * self.size as usize
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.size == 0
    }

    #[inline]
    pub const fn quad_vertex_count(self) -> usize {
        self.cells() * Self::QUAD_VERTICES_PER_CELL
    }

    #[inline]
    pub const fn quad_index_count(self) -> usize {
        self.cells() * Self::QUAD_INDICES_PER_CELL
    }

    #[inline]
    pub const fn line_vertex_count(self) -> usize {
        self.cells() * Self::LINE_VERTICES_PER_CELL
    }

    #[inline]
    pub const fn line_index_count(self) -> usize {
        self.cells() * Self::LINE_INDICES_PER_CELL
    }

    /// Vertex and index offset of the second line pass (`2·N²`).
    #[inline]
    pub const fn line_pass_offset(self) -> usize {
        self.cells() * 2
    }

    pub const fn quad_vertex_bytes(self) -> u64 {
        (self.quad_vertex_count() * std::mem::size_of::<QuadVertex>()) as u64
    }

    pub const fn quad_index_bytes(self) -> u64 {
        (self.quad_index_count() * std::mem::size_of::<u32>()) as u64
    }

    pub const fn line_vertex_bytes(self) -> u64 {
        (self.line_vertex_count() * std::mem::size_of::<LineVertex>()) as u64
    }

    pub const fn line_index_bytes(self) -> u64 {
        (self.line_index_count() * std::mem::size_of::<u32>()) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_scale_with_cells() {
        let l = GridLayout::new(10);
        assert_eq!(l.cells(), 100);
        assert_eq!(l.quad_vertex_count(), 400);
        assert_eq!(l.quad_index_count(), 600);
        assert_eq!(l.line_vertex_count(), 400);
        assert_eq!(l.line_index_count(), 400);
        assert_eq!(l.line_pass_offset(), 200);
    }

    #[test]
    fn byte_sizes_match_float_layout() {
        let l = GridLayout::new(3);
        assert_eq!(l.quad_vertex_bytes(), 9 * 4 * 8 * 4);
        assert_eq!(l.quad_index_bytes(), 9 * 6 * 4);
        assert_eq!(l.line_vertex_bytes(), 9 * 4 * 6 * 4);
        assert_eq!(l.line_index_bytes(), 9 * 4 * 4);
    }

    #[test]
    fn zero_size_is_empty() {
        let l = GridLayout::new(0);
        assert!(l.is_empty());
        assert_eq!(l.quad_vertex_count(), 0);
        assert_eq!(l.line_index_bytes(), 0);
    }
}
