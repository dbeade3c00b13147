//! Error types.
//!
//! Initialization and presentation failures are fatal. Shader failures are
//! recoverable at build time (`pipeline::PipelineError`) and only become a
//! [`PipelineFailure`] when the caller decides to halt.

use thiserror::Error;

use crate::pipeline::ShaderDiagnostic;

/// Fatal failure while bringing up the window and GL context.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("failed to initialize windowing subsystem: {0}")]
    Subsystem(String),

    #[error("failed to create window: {0}")]
    WindowCreation(String),

    #[error("failed to resolve OpenGL function pointers: {0}")]
    FunctionTable(String),
}

/// Shader pipeline failure the caller chose not to recover from.
#[derive(Debug, Error)]
pub enum PipelineFailure {
    #[error("shader pipeline rejected by the driver ({} diagnostic(s))", .0.len())]
    Rejected(Vec<ShaderDiagnostic>),

    #[error("failed to allocate GL object: {0}")]
    Allocation(String),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to present frame: {0}")]
    Present(String),
}
