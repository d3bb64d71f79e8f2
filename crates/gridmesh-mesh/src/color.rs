use rand::{Rng, RngCore};

/// Source of per-quad color channels.
///
/// Implementations must yield values in `[0, 1]`.
pub trait ColorSource {
    fn next_unit(&mut self) -> f32;

    /// Draws one RGB triple, red first.
    fn next_rgb(&mut self) -> [f32; 3] {
        let r = self.next_unit();
        let g = self.next_unit();
        let b = self.next_unit();
        [r, g, b]
    }
}

/// Any `rand` generator is a color source, sampling uniformly from `[0, 1)`.
impl<R: RngCore> ColorSource for R {
    #[inline]
    fn next_unit(&mut self) -> f32 {
        self.r#gen::<f32>()
    }
}

/// Process-wide generator, seeded once per thread from the OS.
///
/// Colors are not reproducible across runs.
pub fn default_source() -> rand::rngs::ThreadRng {
    rand::thread_rng()
}
