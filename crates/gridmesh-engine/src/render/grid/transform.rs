use glam::{Mat4, Vec3};

/// Maps OpenGL-style clip depth (`-w..w`) onto wgpu's `0..w`.
#[rustfmt::skip]
pub(crate) const OPENGL_TO_WGPU: Mat4 = Mat4::from_cols_array(&[
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
]);

const GRID_OFFSET: Vec3 = Vec3::new(-0.6, -0.55, 0.0);
const GRID_SCALE: Vec3 = Vec3::new(0.15, 0.15, 0.0);

/// Per-frame placement of the grid in clip space.
///
/// The grid is scaled to 0.15 units per cell and shifted so a 10×10 grid
/// roughly fills the window. With `rotate`, it is tipped -60° about the
/// (1,1,0) diagonal and turned -45° about Z.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct GridTransform {
    pub rotate: bool,
}

impl GridTransform {
    pub fn new(rotate: bool) -> Self {
        Self { rotate }
    }

    /// Model matrix in OpenGL clip conventions.
    pub fn matrix(&self) -> Mat4 {
        let mut m = Mat4::IDENTITY;
        if self.rotate {
            m *= Mat4::from_rotation_z((-45.0f32).to_radians());
            m *= Mat4::from_axis_angle(Vec3::new(1.0, 1.0, 0.0).normalize(), (-60.0f32).to_radians());
        }
        m * Mat4::from_translation(GRID_OFFSET) * Mat4::from_scale(GRID_SCALE)
    }

    /// Matrix as uploaded to the shaders.
    pub fn clip_matrix(&self) -> Mat4 {
        OPENGL_TO_WGPU * self.matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn approx(a: Vec4, b: Vec4) -> bool {
        (a - b).abs().max_element() < 1e-5
    }

    #[test]
    fn flat_transform_offsets_and_scales() {
        let m = GridTransform::new(false).matrix();
        assert!(approx(m * Vec4::new(0.0, 0.0, 0.0, 1.0), Vec4::new(-0.6, -0.55, 0.0, 1.0)));
        assert!(approx(m * Vec4::new(1.0, 2.0, 0.0, 1.0), Vec4::new(-0.45, -0.25, 0.0, 1.0)));
    }

    #[test]
    fn rotation_changes_placement() {
        let p = Vec4::new(3.0, 1.0, 0.0, 1.0);
        let flat = GridTransform::new(false).matrix() * p;
        let rotated = GridTransform::new(true).matrix() * p;
        assert!(!approx(flat, rotated));
        assert!((rotated.w - 1.0).abs() < 1e-6);
    }

    #[test]
    fn rotated_default_grid_stays_inside_depth_range() {
        let m = GridTransform::new(true).clip_matrix();
        for y in 0..10 {
            for x in 0..10 {
                for (dx, dy) in [(0.5, 0.5), (0.5, -0.5), (-0.5, -0.5), (-0.5, 0.5)] {
                    let clip = m * Vec4::new(x as f32 + dx, y as f32 + dy, 0.0, 1.0);
                    assert!(clip.z >= 0.0 && clip.z <= clip.w, "z {} outside 0..{}", clip.z, clip.w);
                }
            }
        }
    }

    #[test]
    fn depth_correction_leaves_xy_alone() {
        let t = GridTransform::new(false);
        let p = Vec4::new(4.0, 5.0, 0.0, 1.0);
        let gl = t.matrix() * p;
        let wg = t.clip_matrix() * p;
        assert!((gl.x - wg.x).abs() < 1e-6 && (gl.y - wg.y).abs() < 1e-6);
        assert!((wg.z - (0.5 * gl.z + 0.5 * gl.w)).abs() < 1e-6);
    }
}
