//! GL call surface.
//!
//! The shader pipeline and the render loop issue every GL call through
//! [`GlApi`]. At runtime the implementation is `glow::Context`; tests drive the
//! same code with a recording fake, so no driver or display is required.
//!
//! Enum arguments (`glow::VERTEX_SHADER`, `glow::COLOR_BUFFER_BIT`, ...) are the
//! raw GL constants re-exported by `glow`.

mod api;

#[cfg(test)]
pub(crate) mod fake;

pub use api::GlApi;
