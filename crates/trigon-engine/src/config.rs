//! Fixed configuration.
//!
//! Every value has a compile-time default; the studio binary may override a
//! few of them from the command line.

use std::fmt;

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;
pub const DEFAULT_TITLE: &str = "LearnOpenGL";

/// Requested OpenGL context version.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GlVersion {
    pub major: u8,
    pub minor: u8,
}

impl GlVersion {
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }
}

impl Default for GlVersion {
    fn default() -> Self {
        Self::new(3, 3)
    }
}

impl fmt::Display for GlVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum GlProfile {
    #[default]
    Core,
    Compatibility,
}

impl fmt::Display for GlProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GlProfile::Core => "core",
            GlProfile::Compatibility => "compatibility",
        })
    }
}

/// Window and context request.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    /// Inner size in physical pixels.
    pub width: u32,
    pub height: u32,
    pub gl_version: GlVersion,
    pub profile: GlProfile,
    /// Wait for vertical sync on swap. Unsupported drivers fall back silently.
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            gl_version: GlVersion::default(),
            profile: GlProfile::default(),
            vsync: true,
        }
    }
}

/// Straight-alpha RGBA used for the per-frame clear.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClearColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for ClearColor {
    fn default() -> Self {
        Self {
            r: 0.5,
            g: 0.5,
            b: 0.5,
            a: 0.0,
        }
    }
}

/// What to do when the shader pipeline reports compile or link errors.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum ShaderFailurePolicy {
    /// Log the diagnostics and render with whatever program was produced.
    #[default]
    Continue,
    /// Treat the diagnostics as an initialization failure.
    Halt,
}
