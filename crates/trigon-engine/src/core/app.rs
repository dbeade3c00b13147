use std::rc::Rc;

use anyhow::{Context, Result};

use crate::config::{ClearColor, ShaderFailurePolicy, WindowConfig};
use crate::device::Host;
use crate::error::{InitError, PipelineFailure, RenderError};
use crate::gl::GlApi;
use crate::pipeline::TrianglePipeline;
use crate::render::{self, FrameSurface};
use crate::time::LoopStats;

pub const EXIT_SUCCESS: i32 = 0;
/// Any initialization failure. Reported as 255 on Unix.
pub const EXIT_FAILURE: i32 = -1;

/// Everything needed for one run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub clear: ClearColor,
    /// Build the shader pipeline and draw the triangle every frame.
    pub triangle: bool,
    pub shader_policy: ShaderFailurePolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            clear: ClearColor::default(),
            triangle: true,
            shader_policy: ShaderFailurePolicy::default(),
        }
    }
}

/// Opens the window, optionally builds the pipeline and renders until the
/// window is closed.
///
/// The host outlives `run_with`, so the pipeline and the function table are
/// released while the context is still current and the windowing subsystem
/// goes last.
pub fn run(config: &AppConfig) -> Result<LoopStats> {
    let (mut host, gl) = Host::create(&config.window).context("initialization failed")?;
    run_with(&mut host, Rc::new(gl), config)
}

/// Everything after initialization: pipeline, policy and render loop, on an
/// already created surface and function table.
pub fn run_with<S, G>(surface: &mut S, gl: Rc<G>, config: &AppConfig) -> Result<LoopStats>
where
    S: FrameSurface,
    G: GlApi,
{
    let pipeline = if config.triangle {
        let pipeline = match TrianglePipeline::build(Rc::clone(&gl)) {
            Ok(pipeline) => pipeline,
            Err(err) => err
                .resolve(config.shader_policy)
                .context("shader pipeline failed")?,
        };
        Some(pipeline)
    } else {
        None
    };

    let stats =
        render::run(surface, &*gl, pipeline.as_ref(), config.clear).context("render loop failed")?;

    drop(pipeline);
    drop(gl);

    Ok(stats)
}

pub fn exit_code<T>(result: &Result<T>) -> i32 {
    match result {
        Ok(_) => EXIT_SUCCESS,
        Err(_) => EXIT_FAILURE,
    }
}

/// Short label for the failing component, used in the final error line.
pub fn failure_kind(err: &anyhow::Error) -> &'static str {
    if let Some(e) = err.downcast_ref::<InitError>() {
        return match e {
            InitError::Subsystem(_) => "windowing subsystem",
            InitError::WindowCreation(_) => "window creation",
            InitError::FunctionTable(_) => "function table",
        };
    }
    if err.downcast_ref::<PipelineFailure>().is_some() {
        return "shader pipeline";
    }
    if err.downcast_ref::<RenderError>().is_some() {
        return "render loop";
    }
    "unexpected"
}
