//! System profiler for timing named systems

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Accumulated timing of one system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemTiming {
    pub total: Duration,
    pub calls: u64,
    pub max: Duration,
}

impl SystemTiming {
    pub fn average(&self) -> Duration {
        if self.calls == 0 {
            Duration::ZERO
        } else {
            self.total / self.calls as u32
        }
    }
}

pub struct SystemProfiler {
    timings: HashMap<String, SystemTiming>,
}

impl SystemProfiler {
    pub fn new() -> Self {
        Self {
            timings: HashMap::new(),
        }
    }

    pub fn time_system<F, R>(&mut self, name: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();

        let timing = self.timings.entry(name.to_string()).or_default();
        timing.total += elapsed;
        timing.calls += 1;
        timing.max = timing.max.max(elapsed);
        result
    }

    pub fn get_timing(&self, name: &str) -> Duration {
        self.timings.get(name).map_or(Duration::ZERO, |t| t.total)
    }

    pub fn calls(&self, name: &str) -> u64 {
        self.timings.get(name).map_or(0, |t| t.calls)
    }

    pub fn reset(&mut self) {
        self.timings.clear();
    }

    /// Timings sorted by total time, slowest first.
    pub fn report(&self) -> Vec<(String, SystemTiming)> {
        let mut report: Vec<(String, SystemTiming)> = self
            .timings
            .iter()
            .map(|(name, timing)| (name.clone(), *timing))
            .collect();
        report.sort_by(|a, b| b.1.total.cmp(&a.1.total).then_with(|| a.0.cmp(&b.0)));
        report
    }
}

impl Default for SystemProfiler {
    fn default() -> Self {
        Self::new()
    }
}
