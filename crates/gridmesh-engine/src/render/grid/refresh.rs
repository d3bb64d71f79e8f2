/// Dirty flag gating grid remaps.
///
/// Starts dirty so the first frame always draws freshly written buffers.
/// `request` re-arms it; `take` consumes it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RefreshFlag {
    dirty: bool,
}

impl RefreshFlag {
    pub const fn new() -> Self {
        Self { dirty: true }
    }

    #[inline]
    pub fn request(&mut self) {
        self.dirty = true;
    }

    /// Returns whether a remap is due and clears the flag.
    #[inline]
    pub fn take(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl Default for RefreshFlag {
    fn default() -> Self {
        Self::new()
    }
}
