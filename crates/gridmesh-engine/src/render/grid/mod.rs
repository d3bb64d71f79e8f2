//! Grid render driver.
//!
//! Owns the GPU side of the grid: two pipelines (filled quads, line
//! overlay), a uniform carrying the transform, an optional texture and the
//! immutable vertex/index buffers rebuilt on every remap.

mod layout;
mod refresh;
mod renderer;
mod shader;
mod texture;
mod transform;

pub use refresh::RefreshFlag;
pub use renderer::{GridConfig, GridRenderer};
pub use texture::{GridTexture, TexturePixels};
pub use transform::GridTransform;
