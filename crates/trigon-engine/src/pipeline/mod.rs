//! Shader pipeline.
//!
//! Compiles the embedded vertex/fragment pair, links it into one program and
//! uploads the static triangle. The pipeline is optional: the clear-only
//! variant never builds one.
//!
//! Shader failures are recoverable. [`TrianglePipeline::build`] returns a
//! [`PipelineError`] that still owns the pipeline, and the caller picks a
//! [`ShaderFailurePolicy`](crate::config::ShaderFailurePolicy).

mod shader;
mod triangle;

pub use shader::{INFO_LOG_MAX_CHARS, ShaderDiagnostic, ShaderStage, compile_stage, link_program};
pub use triangle::{
    FRAGMENT_SHADER_SRC, PipelineError, TRIANGLE, TrianglePipeline, VERTEX_SHADER_SRC, Vertex,
    VertexLayout,
};
