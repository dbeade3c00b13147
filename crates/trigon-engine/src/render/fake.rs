use std::rc::Rc;

use crate::error::RenderError;
use crate::gl::fake::{Call, FakeGl};

use super::FrameSurface;

/// Surface that requests close once `close_after` frames were presented.
///
/// Swaps and polls are recorded into the shared `FakeGl` log so tests can
/// check their position relative to GL calls.
pub(crate) struct FakeSurface {
    gl: Rc<FakeGl>,
    close_after: Option<u64>,
    presented: u64,
    closed: bool,
    pub(crate) fail_swap_at: Option<u64>,
}

impl FakeSurface {
    pub(crate) fn new(gl: Rc<FakeGl>, close_after: Option<u64>) -> Self {
        Self {
            gl,
            close_after,
            presented: 0,
            closed: close_after == Some(0),
            fail_swap_at: None,
        }
    }
}

impl FrameSurface for FakeSurface {
    fn close_requested(&self) -> bool {
        self.closed
    }

    fn swap_buffers(&mut self) -> Result<(), RenderError> {
        if self.fail_swap_at == Some(self.presented) {
            return Err(RenderError::Present("surface lost".into()));
        }
        self.gl.record(Call::Swap);
        self.presented += 1;
        Ok(())
    }

    fn poll_events(&mut self) {
        self.gl.record(Call::Poll);
        if self.close_after == Some(self.presented) {
            self.closed = true;
        }
    }
}
