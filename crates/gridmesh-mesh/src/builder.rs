//! Grid geometry generation.
//!
//! Cells are visited row by row (`y` outer, `x` inner), so cell `(x, y)` has the
//! linear index `square = N·y + x`. All vertex and index ordering follows from
//! that numbering.

use crate::color::ColorSource;
use crate::error::{MeshError, Region};
use crate::layout::GridLayout;
use crate::vertex::{LineVertex, QuadVertex};

/// Largest grid whose vertex indices fit in `u32`.
pub const MAX_GRID_SIZE: u32 = 32_767;

/// Two triangles per quad over the corner order TR, BR, BL, TL.
const QUAD_TRIANGLES: [u32; 6] = [0, 1, 3, 1, 2, 3];

/// Mutable vertex/index destination for one mesh.
pub struct MeshSlice<'a, V> {
    pub vertices: &'a mut [V],
    pub indices: &'a mut [u32],
}

impl<'a, V> MeshSlice<'a, V> {
    pub fn new(vertices: &'a mut [V], indices: &'a mut [u32]) -> Self {
        Self { vertices, indices }
    }
}

/// Writes `N²` colored quads.
///
/// Each cell draws one RGB triple from `colors` before its vertices are
/// written. Slices may be longer than required; only the leading part is
/// touched. On error nothing is written.
pub fn build_quads<C>(
    size: u32,
    out: MeshSlice<'_, QuadVertex>,
    colors: &mut C,
) -> Result<(), MeshError>
where
    C: ColorSource + ?Sized,
{
    let layout = checked_layout(size)?;
    ensure_len(Region::QuadVertices, layout.quad_vertex_count(), out.vertices.len())?;
    ensure_len(Region::QuadIndices, layout.quad_index_count(), out.indices.len())?;

    let vertex_chunks = out.vertices.chunks_exact_mut(GridLayout::QUAD_VERTICES_PER_CELL);
    let index_chunks = out.indices.chunks_exact_mut(GridLayout::QUAD_INDICES_PER_CELL);

    for ((square, (x, y)), (verts, idx)) in cells(size)
        .enumerate()
        .zip(vertex_chunks.zip(index_chunks))
    {
        let color = colors.next_rgb();
        let (x, y) = (x as f32, y as f32);

        verts[0] = QuadVertex::new([x + 0.5, y + 0.5, 0.0], color, [1.0, 1.0]);
        verts[1] = QuadVertex::new([x + 0.5, y - 0.5, 0.0], color, [1.0, 0.0]);
        verts[2] = QuadVertex::new([x - 0.5, y - 0.5, 0.0], color, [0.0, 0.0]);
        verts[3] = QuadVertex::new([x - 0.5, y + 0.5, 0.0], color, [0.0, 1.0]);

        let base = (square * GridLayout::QUAD_VERTICES_PER_CELL) as u32;
        for (dst, corner) in idx.iter_mut().zip(QUAD_TRIANGLES) {
            *dst = base + corner;
        }
    }

    Ok(())
}

/// Writes the line overlay: every cell's right edge, then every cell's top edge.
///
/// The second pass starts at vertex and index `2·N²`. On error nothing is
/// written.
pub fn build_lines(size: u32, out: MeshSlice<'_, LineVertex>) -> Result<(), MeshError> {
    let layout = checked_layout(size)?;
    ensure_len(Region::LineVertices, layout.line_vertex_count(), out.vertices.len())?;
    ensure_len(Region::LineIndices, layout.line_index_count(), out.indices.len())?;

    let half = layout.line_pass_offset();
    let (right_verts, top_verts) = out.vertices[..half * 2].split_at_mut(half);
    let (right_idx, top_idx) = out.indices[..half * 2].split_at_mut(half);

    write_segments(size, 0, right_verts, right_idx, |x, y| {
        ([x + 0.5, y + 0.5, 0.0], [x + 0.5, y - 0.5, 0.0])
    });
    write_segments(size, half as u32, top_verts, top_idx, |x, y| {
        ([x + 0.5, y + 0.5, 0.0], [x - 0.5, y + 0.5, 0.0])
    });

    Ok(())
}

/// Writes both the quads and the line overlay.
pub fn build_grid<C>(
    size: u32,
    quads: MeshSlice<'_, QuadVertex>,
    lines: MeshSlice<'_, LineVertex>,
    colors: &mut C,
) -> Result<(), MeshError>
where
    C: ColorSource + ?Sized,
{
    // Validate the line region up front so a failure leaves both untouched.
    let layout = checked_layout(size)?;
    ensure_len(Region::LineVertices, layout.line_vertex_count(), lines.vertices.len())?;
    ensure_len(Region::LineIndices, layout.line_index_count(), lines.indices.len())?;

    build_quads(size, quads, colors)?;
    build_lines(size, lines)
}

fn write_segments<F>(size: u32, base: u32, verts: &mut [LineVertex], idx: &mut [u32], ends: F)
where
    F: Fn(f32, f32) -> ([f32; 3], [f32; 3]),
{
    for ((square, (x, y)), (pair, ids)) in cells(size)
        .enumerate()
        .zip(verts.chunks_exact_mut(2).zip(idx.chunks_exact_mut(2)))
    {
        let (a, b) = ends(x as f32, y as f32);
        pair[0] = LineVertex::new(a);
        pair[1] = LineVertex::new(b);

        let first = base + (square * 2) as u32;
        ids[0] = first;
        ids[1] = first + 1;
    }
}

/// Cell coordinates in build order.
fn cells(size: u32) -> impl Iterator<Item = (u32, u32)> {
    (0..size).flat_map(move |y| (0..size).map(move |x| (x, y)))
}

fn checked_layout(size: u32) -> Result<GridLayout, MeshError> {
    if size > MAX_GRID_SIZE {
        return Err(MeshError::SizeTooLarge { size });
    }
    Ok(GridLayout::new(size))
}

fn ensure_len(region: Region, required: usize, actual: usize) -> Result<(), MeshError> {
    if actual < required {
        return Err(MeshError::OutputTooSmall { region, required, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    struct Fixed(f32);

    impl ColorSource for Fixed {
        fn next_unit(&mut self) -> f32 {
            self.0
        }
    }

    fn quads(size: u32) -> (Vec<QuadVertex>, Vec<u32>) {
        let l = GridLayout::new(size);
        let mut v = vec![QuadVertex::default(); l.quad_vertex_count()];
        let mut i = vec![0u32; l.quad_index_count()];
        let mut rng = StdRng::seed_from_u64(1);
        build_quads(size, MeshSlice::new(&mut v, &mut i), &mut rng).unwrap();
        (v, i)
    }

    fn lines(size: u32) -> (Vec<LineVertex>, Vec<u32>) {
        let l = GridLayout::new(size);
        let mut v = vec![LineVertex::default(); l.line_vertex_count()];
        let mut i = vec![0u32; l.line_index_count()];
        build_lines(size, MeshSlice::new(&mut v, &mut i)).unwrap();
        (v, i)
    }

    // ── quads ─────────────────────────────────────────────────────────────

    #[test]
    fn quad_corners_surround_cell_anchor() {
        for size in [1, 2, 5] {
            let (v, _) = quads(size);
            for (square, (x, y)) in cells(size).enumerate() {
                let (x, y) = (x as f32, y as f32);
                let c = &v[square * 4..square * 4 + 4];
                assert_eq!(c[0].pos, [x + 0.5, y + 0.5, 0.0]);
                assert_eq!(c[1].pos, [x + 0.5, y - 0.5, 0.0]);
                assert_eq!(c[2].pos, [x - 0.5, y - 0.5, 0.0]);
                assert_eq!(c[3].pos, [x - 0.5, y + 0.5, 0.0]);
            }
        }
    }

    #[test]
    fn quad_uvs_follow_corner_order() {
        let (v, _) = quads(2);
        for c in v.chunks_exact(4) {
            assert_eq!(c[0].uv, [1.0, 1.0]);
            assert_eq!(c[1].uv, [1.0, 0.0]);
            assert_eq!(c[2].uv, [0.0, 0.0]);
            assert_eq!(c[3].uv, [0.0, 1.0]);
        }
    }

    #[test]
    fn quad_indices_offset_by_square() {
        for size in [1, 3, 4] {
            let (_, i) = quads(size);
            assert_eq!(i.len(), (size * size * 6) as usize);
            for (square, tri) in i.chunks_exact(6).enumerate() {
                let b = square as u32 * 4;
                assert_eq!(tri, &[b, b + 1, b + 3, b + 1, b + 2, b + 3]);
            }
        }
    }

    #[test]
    fn one_color_per_quad_in_unit_range() {
        let (v, _) = quads(6);
        for c in v.chunks_exact(4) {
            assert!(c.iter().all(|vx| vx.color == c[0].color));
            assert!(c[0].color.iter().all(|ch| (0.0..=1.0).contains(ch)));
        }
    }

    #[test]
    fn colors_come_from_injected_source() {
        let mut v = vec![QuadVertex::default(); 4];
        let mut i = vec![0u32; 6];
        build_quads(1, MeshSlice::new(&mut v, &mut i), &mut Fixed(0.5)).unwrap();
        assert!(v.iter().all(|vx| vx.color == [0.5, 0.5, 0.5]));
    }

    #[test]
    fn rebuild_draws_fresh_colors_with_same_shape() {
        let l = GridLayout::new(4);
        let mut rng = StdRng::seed_from_u64(9);
        let mut a = vec![QuadVertex::default(); l.quad_vertex_count()];
        let mut b = a.clone();
        let mut ia = vec![0u32; l.quad_index_count()];
        let mut ib = ia.clone();

        build_quads(4, MeshSlice::new(&mut a, &mut ia), &mut rng).unwrap();
        build_quads(4, MeshSlice::new(&mut b, &mut ib), &mut rng).unwrap();

        assert_eq!(ia, ib);
        assert!(a.iter().zip(&b).all(|(p, q)| p.pos == q.pos));
        assert!(a.iter().zip(&b).any(|(p, q)| p.color != q.color));
    }

    // ── lines ─────────────────────────────────────────────────────────────

    #[test]
    fn line_counts_cover_both_passes() {
        for size in [1, 2, 7] {
            let (v, i) = lines(size);
            let cells = (size * size) as usize;
            assert_eq!(v.len(), cells * 4);
            assert_eq!(i.len(), cells * 4);
        }
    }

    #[test]
    fn second_pass_is_offset_by_two_n_squared() {
        let size = 4;
        let (v, i) = lines(size);
        let half = (size * size * 2) as usize;
        for (square, (x, y)) in cells(size).enumerate() {
            let (x, y) = (x as f32, y as f32);

            assert_eq!(i[square * 2], (square * 2) as u32);
            assert_eq!(i[square * 2 + 1], (square * 2 + 1) as u32);
            assert_eq!(v[square * 2].pos, [x + 0.5, y + 0.5, 0.0]);
            assert_eq!(v[square * 2 + 1].pos, [x + 0.5, y - 0.5, 0.0]);

            assert_eq!(i[half + square * 2], (half + square * 2) as u32);
            assert_eq!(i[half + square * 2 + 1], (half + square * 2 + 1) as u32);
            assert_eq!(v[half + square * 2].pos, [x + 0.5, y + 0.5, 0.0]);
            assert_eq!(v[half + square * 2 + 1].pos, [x - 0.5, y + 0.5, 0.0]);
        }
    }

    #[test]
    fn line_indices_address_their_own_vertices() {
        let (v, i) = lines(5);
        assert!(i.iter().enumerate().all(|(n, &idx)| idx as usize == n));
        assert!(i.iter().all(|&idx| (idx as usize) < v.len()));
    }

    #[test]
    fn lines_are_black() {
        let (v, _) = lines(3);
        assert!(v.iter().all(|vx| vx.color == LineVertex::COLOR));
    }

    // ── concrete case ─────────────────────────────────────────────────────

    #[test]
    fn three_by_three_cell_one_two() {
        let size = 3;
        let square = (size * 2 + 1) as usize;
        assert_eq!(square, 7);

        let (_, qi) = quads(size);
        assert_eq!(&qi[square * 6..square * 6 + 6], &[28, 29, 31, 29, 30, 31]);

        let (_, li) = lines(size);
        assert_eq!(&li[square * 2..square * 2 + 2], &[14, 15]);
        assert_eq!(&li[18 + square * 2..18 + square * 2 + 2], &[32, 33]);
    }

    // ── edge cases ────────────────────────────────────────────────────────

    #[test]
    fn zero_size_writes_nothing() {
        let mut qv: Vec<QuadVertex> = Vec::new();
        let mut qi: Vec<u32> = Vec::new();
        let mut lv: Vec<LineVertex> = Vec::new();
        let mut li: Vec<u32> = Vec::new();
        let mut rng = StdRng::seed_from_u64(0);

        build_grid(
            0,
            MeshSlice::new(&mut qv, &mut qi),
            MeshSlice::new(&mut lv, &mut li),
            &mut rng,
        )
        .unwrap();
    }

    #[test]
    fn undersized_quad_output_is_rejected_untouched() {
        let mut v = vec![QuadVertex::default(); 3];
        let mut i = vec![7u32; 6];
        let err = build_quads(1, MeshSlice::new(&mut v, &mut i), &mut Fixed(1.0)).unwrap_err();

        assert_eq!(
            err,
            MeshError::OutputTooSmall { region: Region::QuadVertices, required: 4, actual: 3 }
        );
        assert!(v.iter().all(|vx| *vx == QuadVertex::default()));
        assert!(i.iter().all(|&x| x == 7));
    }

    #[test]
    fn undersized_line_output_leaves_quads_untouched() {
        let mut qv = vec![QuadVertex::default(); 4];
        let mut qi = vec![0u32; 6];
        let mut lv = vec![LineVertex::default(); 4];
        let mut li = vec![0u32; 3];

        let err = build_grid(
            1,
            MeshSlice::new(&mut qv, &mut qi),
            MeshSlice::new(&mut lv, &mut li),
            &mut Fixed(1.0),
        )
        .unwrap_err();

        assert_eq!(
            err,
            MeshError::OutputTooSmall { region: Region::LineIndices, required: 4, actual: 3 }
        );
        assert!(qv.iter().all(|vx| *vx == QuadVertex::default()));
    }

    #[test]
    fn oversized_output_only_writes_prefix() {
        let mut v = vec![LineVertex::default(); 10];
        let mut i = vec![99u32; 10];
        build_lines(1, MeshSlice::new(&mut v, &mut i)).unwrap();
        assert_eq!(&i[..4], &[0, 1, 2, 3]);
        assert!(i[4..].iter().all(|&x| x == 99));
    }

    #[test]
    fn oversized_grid_is_rejected() {
        let err = build_lines(MAX_GRID_SIZE + 1, MeshSlice::new(&mut [], &mut [])).unwrap_err();
        assert_eq!(err, MeshError::SizeTooLarge { size: MAX_GRID_SIZE + 1 });
    }

    #[test]
    fn max_grid_indices_fit_u32() {
        let l = GridLayout::new(MAX_GRID_SIZE);
        assert!(l.quad_vertex_count() - 1 <= u32::MAX as usize);
        assert!(l.line_vertex_count() - 1 <= u32::MAX as usize);
    }
}
