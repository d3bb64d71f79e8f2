//! Contract between the runtime (platform loop) and the application.
//!
//! The application sees a per-frame context and never touches winit's event
//! loop or the swapchain directly.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
