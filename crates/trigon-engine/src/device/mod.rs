//! Window + GL context management.
//!
//! This module is responsible for:
//! - initializing the windowing subsystem (`winit` event loop)
//! - creating the window with an OpenGL context of the requested version/profile
//! - making the context current and resolving the GL function table
//! - presenting frames and pumping window events for the render loop

mod host;
mod window;

pub use host::Host;
