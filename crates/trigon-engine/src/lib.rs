//! Trigon engine crate.
//!
//! Opens one window with an OpenGL 3.3 core context, optionally builds a
//! single shader program with a static triangle, and drives a
//! clear/draw/swap/poll loop until the window is closed.

pub mod config;
pub mod core;
pub mod device;
pub mod error;
pub mod gl;
pub mod logging;
pub mod pipeline;
pub mod render;
pub mod time;
