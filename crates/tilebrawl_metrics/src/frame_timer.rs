//! Frame timing utilities

use super::ring_buffer::RingBuffer;
use std::time::{Duration, Instant};

pub struct FrameTimer {
    frame_start: Instant,
    frame_times: RingBuffer<Duration>,
    frames: u64,
}

impl FrameTimer {
    /// Keep a rolling window of the last `capacity` frames.
    pub fn new(capacity: usize) -> Self {
        Self {
            frame_start: Instant::now(),
            frame_times: RingBuffer::new(capacity),
            frames: 0,
        }
    }

    pub fn begin(&mut self) {
        self.frame_start = Instant::now();
    }

    pub fn end(&mut self) {
        self.record(self.frame_start.elapsed());
    }

    /// Record a frame duration measured elsewhere.
    pub fn record(&mut self, elapsed: Duration) {
        self.frame_times.push(elapsed);
        self.frames += 1;
    }

    /// Total frames recorded, not limited to the window.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn fps(&self) -> f64 {
        let avg = self.frame_times.average();
        if avg.as_secs_f64() > 0.0 {
            1.0 / avg.as_secs_f64()
        } else {
            0.0
        }
    }

    pub fn frame_time_ms(&self) -> f64 {
        self.frame_times.average().as_secs_f64() * 1000.0
    }

    pub fn frame_time_range_ms(&self) -> (f64, f64) {
        let (min, max) = self.frame_times.min_max();
        (min.as_secs_f64() * 1000.0, max.as_secs_f64() * 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_from_recorded_frames() {
        let mut timer = FrameTimer::new(4);
        for _ in 0..8 {
            timer.record(Duration::from_millis(20));
        }
        assert_eq!(timer.frames(), 8);
        assert!((timer.fps() - 50.0).abs() < 1e-9);
        assert!((timer.frame_time_ms() - 20.0).abs() < 1e-9);
        assert_eq!(timer.frame_time_range_ms(), (20.0, 20.0));
    }

    #[test]
    fn empty_timer_reports_zero() {
        let timer = FrameTimer::new(60);
        assert_eq!(timer.fps(), 0.0);
        assert_eq!(timer.frames(), 0);
    }
}
