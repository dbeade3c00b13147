use crate::config::ClearColor;
use crate::error::RenderError;
use crate::gl::GlApi;
use crate::pipeline::TrianglePipeline;
use crate::time::{FrameClock, LoopStats};

/// Presentation side of the loop: the window surface and its event queue.
pub trait FrameSurface {
    /// Whether the window has been asked to close. Latched by `poll_events`.
    fn close_requested(&self) -> bool;

    /// Presents the back buffer. May block on vertical sync.
    fn swap_buffers(&mut self) -> Result<(), RenderError>;

    /// Processes pending window events without blocking.
    fn poll_events(&mut self);
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    Running,
    /// Terminal.
    Closed,
}

impl LoopState {
    fn next(self, close_requested: bool) -> Self {
        match self {
            LoopState::Running if close_requested => LoopState::Closed,
            state => state,
        }
    }
}

/// Issues the GL work for one frame: clear, then the triangle if present.
pub fn draw_frame<G: GlApi>(gl: &G, pipeline: Option<&TrianglePipeline<G>>, clear: ClearColor) {
    gl.clear_color(clear.r, clear.g, clear.b, clear.a);
    gl.clear(glow::COLOR_BUFFER_BIT);

    if let Some(pipeline) = pipeline {
        pipeline.draw();
    }
}

/// Runs frames until `surface` reports a close request.
///
/// The close flag is checked once at the top of every iteration, so at most
/// the in-flight frame is finished after a request arrives. A failed swap ends
/// the loop with an error.
pub fn run<S, G>(
    surface: &mut S,
    gl: &G,
    pipeline: Option<&TrianglePipeline<G>>,
    clear: ClearColor,
) -> Result<LoopStats, RenderError>
where
    S: FrameSurface,
    G: GlApi,
{
    let mut clock = FrameClock::new();
    let mut state = LoopState::Running;

    log::debug!(
        "entering render loop ({})",
        if pipeline.is_some() { "triangle" } else { "clear only" }
    );

    loop {
        state = state.next(surface.close_requested());
        if state == LoopState::Closed {
            break;
        }

        draw_frame(gl, pipeline, clear);

        if let Err(e) = surface.swap_buffers() {
            log::error!("{e}");
            return Err(e);
        }
        let index = clock.tick();
        log::trace!("presented frame {index}");

        surface.poll_events();
    }

    let stats = clock.stats();
    log::debug!("render loop closed after {} frame(s)", stats.frames);
    Ok(stats)
}
