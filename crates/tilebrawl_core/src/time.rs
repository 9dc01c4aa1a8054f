//! Frame time
//!
//! The host supplies a millisecond clock; the scene turns consecutive clock
//! readings into per-frame delta times.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Default target frame rate of the simulation.
pub const TARGET_FPS: u32 = 60;

/// Monotonic millisecond clock.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall clock measured from construction.
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Deterministic clock for headless runs and tests.
///
/// Every reading returns the current time and then advances it by `step_ms`,
/// so a scene that reads the clock once per frame sees a fixed frame step.
pub struct FixedStepClock {
    now_ms: Cell<u64>,
    step_ms: u64,
}

impl FixedStepClock {
    pub fn new(start_ms: u64, step_ms: u64) -> Self {
        Self {
            now_ms: Cell::new(start_ms),
            step_ms,
        }
    }

    /// Clock stepping one frame at the given rate (rounded down to whole ms).
    pub fn at_fps(fps: u32) -> Self {
        Self::new(0, 1000 / u64::from(fps.max(1)))
    }

    pub fn step_ms(&self) -> u64 {
        self.step_ms
    }
}

impl Clock for FixedStepClock {
    fn now_ms(&self) -> u64 {
        let now = self.now_ms.get();
        self.now_ms.set(now + self.step_ms);
        now
    }
}

/// Timing handed to update systems for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous frame. Zero on the first frame.
    pub delta_seconds: f64,
    /// Clock reading taken at the start of this frame.
    pub now_ms: u64,
    /// Zero-based frame counter.
    pub frame: u64,
}

impl FrameTime {
    pub fn new(delta_seconds: f64, now_ms: u64) -> Self {
        Self {
            delta_seconds,
            now_ms,
            frame: 0,
        }
    }
}

/// Frame time tracker
pub struct FrameClock {
    frame_count: u64,
    last_ms: Option<u64>,
    total: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            frame_count: 0,
            last_ms: None,
            total: Duration::ZERO,
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Record a new frame starting at `now_ms`.
    ///
    /// A clock that runs backwards yields a zero delta rather than a negative one.
    pub fn advance(&mut self, now_ms: u64) -> FrameTime {
        let delta_ms = self
            .last_ms
            .map_or(0, |last| now_ms.saturating_sub(last));
        self.last_ms = Some(now_ms);
        self.total += Duration::from_millis(delta_ms);

        let time = FrameTime {
            delta_seconds: delta_ms as f64 / 1000.0,
            now_ms,
            frame: self.frame_count,
        };
        self.frame_count += 1;
        time
    }

    pub fn total_time(&self) -> Duration {
        self.total
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
