//! Render loop.
//!
//! Runs on the thread that owns the GL context until the surface reports a
//! close request. Each iteration clears, optionally draws the triangle,
//! presents and pumps window events, in that order.

mod frame_loop;

#[cfg(test)]
pub(crate) mod fake;

pub use frame_loop::{FrameSurface, LoopState, draw_frame, run};
