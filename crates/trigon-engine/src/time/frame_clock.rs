use std::time::{Duration, Instant};

/// Summary of one render loop run.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LoopStats {
    /// Frames presented (swapped) before the loop closed.
    pub frames: u64,

    /// Wall time from loop start to the last presented frame.
    pub elapsed: Duration,
}

impl LoopStats {
    /// Average presented frames per second; zero when nothing was timed.
    pub fn fps(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.frames as f64 / secs
        } else {
            0.0
        }
    }
}

/// Counts presented frames for one loop.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            frames: 0,
        }
    }

    /// Records one presented frame and returns its zero-based index.
    pub fn tick(&mut self) -> u64 {
        let index = self.frames;
        self.last = Instant::now();
        self.frames = self.frames.wrapping_add(1);
        index
    }

    pub fn stats(&self) -> LoopStats {
        LoopStats {
            frames: self.frames,
            elapsed: self.last.saturating_duration_since(self.start),
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
