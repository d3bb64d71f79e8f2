//! gridmesh engine crate.
//!
//! Platform and GPU runtime for the grid demo: the winit loop, the wgpu
//! device and surface, keyboard input, frame timing, logging, and the grid
//! render driver that turns `gridmesh_mesh` output into draw calls.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod render;

pub use gridmesh_mesh as mesh;
pub use wgpu;
