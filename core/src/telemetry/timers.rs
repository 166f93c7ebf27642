// ## src/telemetry/timers.rs

//! telemetry/timers.rs
//! Stage timers for the whole-stream helpers.
//!
//! Summary: records durations for read, seal/open and write stages.

use std::collections::{hash_map, HashMap};
use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Read,
    Write,
    Seal,
    Open,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Read  => "read",
            Stage::Write => "write",
            Stage::Seal  => "seal",
            Stage::Open  => "open",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageTimes {
    pub times: HashMap<Stage, Duration>,
}

impl StageTimes {
    pub fn add(&mut self, stage: Stage, dur: Duration) {
        *self.times.entry(stage).or_insert(Duration::ZERO) += dur;
    }

    pub fn get(&self, stage: Stage) -> Duration {
        self.times.get(&stage).copied().unwrap_or(Duration::ZERO)
    }

    pub fn total(&self) -> Duration {
        self.times.values().sum()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, Stage, Duration> {
        self.times.iter()
    }
}

/// Wall-clock timer plus per-stage accumulation.
#[derive(Debug, Clone)]
pub struct TelemetryTimer {
    start: Instant,
    elapsed: Option<Duration>,
    pub stage_times: StageTimes,
}

impl Default for TelemetryTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetryTimer {
    pub fn new() -> Self {
        Self { start: Instant::now(), elapsed: None, stage_times: StageTimes::default() }
    }

    /// Time `f` and charge it to `stage`.
    pub fn time<T>(&mut self, stage: Stage, f: impl FnOnce() -> T) -> T {
        let t0 = Instant::now();
        let out = f();
        self.stage_times.add(stage, t0.elapsed());
        out
    }

    pub fn finish(&mut self) {
        self.elapsed = Some(self.start.elapsed());
    }

    /// Frozen value after `finish`, running value before.
    pub fn elapsed(&self) -> Duration {
        self.elapsed.unwrap_or_else(|| self.start.elapsed())
    }
}
