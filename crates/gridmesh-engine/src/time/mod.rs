//! Frame timing.
//!
//! One `FrameClock` per render loop; call `tick()` once per presented frame.
//! `FrameRate` aggregates ticks into a once-per-window frames-per-second figure.

mod frame_clock;
mod frame_rate;

pub use frame_clock::{FrameClock, FrameTime};
pub use frame_rate::FrameRate;
