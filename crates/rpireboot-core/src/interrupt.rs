//! Edge event records passed from the watcher to the filter.

use std::fmt;
use std::time::{Duration, Instant};

/// Logical level of a digital input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Low,
    High,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Low => write!(f, "Low"),
            Level::High => write!(f, "High"),
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// One observed edge: the level read right after it fired and when.
///
/// Created once per edge by the watcher, moved through the hand-off channel
/// and consumed by the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interrupt {
    level: Level,
    when: Instant,
}

impl Interrupt {
    pub fn new(level: Level, when: Instant) -> Self {
        Self { level, when }
    }

    /// Capture an interrupt stamped with the current monotonic time.
    pub fn now(level: Level) -> Self {
        Self::new(level, Instant::now())
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn when(&self) -> Instant {
        self.when
    }

    /// Time elapsed from `earlier` to this interrupt, zero if `earlier` is later.
    pub fn since(&self, earlier: &Interrupt) -> Duration {
        self.when.saturating_duration_since(earlier.when)
    }
}
