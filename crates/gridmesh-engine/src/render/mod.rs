//! GPU rendering subsystem.
//!
//! Renderers own their GPU resources (pipelines, buffers, bind groups) and
//! record passes into the frame's encoder through a `RenderTarget`.

mod ctx;
pub mod grid;

pub use ctx::{RenderCtx, RenderTarget};
