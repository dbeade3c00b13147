use std::fmt;

use crate::gl::GlApi;

/// Longest diagnostic text kept from the driver, in characters.
///
/// Matches a 512-byte info-log buffer with room for the terminating NUL.
pub const INFO_LOG_MAX_CHARS: usize = 511;

/// Which object a diagnostic belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    /// The linked program rather than a single stage.
    Program,
}

impl ShaderStage {
    fn gl_kind(self) -> Option<u32> {
        match self {
            ShaderStage::Vertex => Some(glow::VERTEX_SHADER),
            ShaderStage::Fragment => Some(glow::FRAGMENT_SHADER),
            ShaderStage::Program => None,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
            ShaderStage::Program => "program",
        })
    }
}

/// Driver-provided failure text for one stage or for the link step.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ShaderDiagnostic {
    pub stage: ShaderStage,
    /// Info log, truncated to [`INFO_LOG_MAX_CHARS`].
    pub log: String,
}

impl ShaderDiagnostic {
    pub fn new(stage: ShaderStage, log: impl Into<String>) -> Self {
        let mut log = log.into();
        if let Some((cut, _)) = log.char_indices().nth(INFO_LOG_MAX_CHARS) {
            log.truncate(cut);
        }
        Self { stage, log }
    }
}

impl fmt::Display for ShaderDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.stage, self.log.trim_end())
    }
}

/// Compiles one stage from `source`.
///
/// On failure the stage object is deleted and the info log is returned (and
/// logged at error level, tagged with the stage).
pub fn compile_stage<G: GlApi>(
    gl: &G,
    stage: ShaderStage,
    source: &str,
) -> Result<G::Shader, ShaderDiagnostic> {
    let kind = stage
        .gl_kind()
        .ok_or_else(|| report(ShaderDiagnostic::new(stage, "not a compilable stage")))?;
    let shader = gl
        .create_shader(kind)
        .map_err(|e| report(ShaderDiagnostic::new(stage, e)))?;

    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    if gl.shader_compile_status(shader) {
        log::debug!("{stage} shader compiled");
        return Ok(shader);
    }

    let diagnostic = ShaderDiagnostic::new(stage, gl.shader_info_log(shader));
    gl.delete_shader(shader);
    Err(report(diagnostic))
}

/// Attaches `stages` to `program`, links it and checks the link status.
///
/// Stages are detached again whatever the outcome; the caller still owns them
/// and `program`.
pub fn link_program<G: GlApi>(
    gl: &G,
    program: G::Program,
    stages: &[G::Shader],
) -> Result<(), ShaderDiagnostic> {
    for &shader in stages {
        gl.attach_shader(program, shader);
    }
    gl.link_program(program);

    let linked = gl.program_link_status(program);
    let result = if linked {
        log::debug!("shader program linked");
        Ok(())
    } else {
        Err(report(ShaderDiagnostic::new(
            ShaderStage::Program,
            gl.program_info_log(program),
        )))
    };

    for &shader in stages {
        gl.detach_shader(program, shader);
    }
    result
}

fn report(diagnostic: ShaderDiagnostic) -> ShaderDiagnostic {
    match diagnostic.stage {
        ShaderStage::Program => {
            log::error!("shader program linking failed: {}", diagnostic.log.trim_end())
        }
        stage => log::error!("{stage} shader compilation failed: {}", diagnostic.log.trim_end()),
    }
    diagnostic
}
