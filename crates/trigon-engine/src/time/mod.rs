//! Frame accounting for the render loop.
//!
//! The loop has no delta-time or frame cap; the clock only counts presented
//! frames so shutdown can report a summary.

mod frame_clock;

pub use frame_clock::{FrameClock, LoopStats};
