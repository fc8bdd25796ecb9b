//! Simulated time model.
//!
//! # Design
//!
//! Time is a monotonically increasing millisecond counter, `SimTime`.  The
//! step driver advances `SimClock` by the caller-supplied delta every step;
//! hold and dwell timers are stored as absolute `SimTime` deadlines and
//! compared against `SimClock::now`, so no real-time waiting ever happens.
//!
//! The clock advances by the *unscaled* delta.  The global speed multiplier
//! scales train movement and delay, and shortens hold deadlines when they are
//! set, but never the clock itself.

use std::fmt;

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute simulated instant, in milliseconds since simulation start.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    /// Return the instant `ms` milliseconds after `self`.
    #[inline]
    pub fn after_ms(self, ms: u64) -> SimTime {
        SimTime(self.0.saturating_add(ms))
    }

    /// Milliseconds elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: SimTime) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_secs = self.0 / 1000;
        let (h, m, s) = (total_secs / 3600, (total_secs % 3600) / 60, total_secs % 60);
        write!(f, "{h:02}:{m:02}:{s:02}.{:03}", self.0 % 1000)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The simulation clock: current instant plus the number of steps taken.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// The current simulated instant.
    pub now: SimTime,
    /// Number of `advance` calls so far.
    pub steps: u64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by `delta_ms` and count one step.
    #[inline]
    pub fn advance(&mut self, delta_ms: u64) {
        self.now = self.now.after_ms(delta_ms);
        self.steps += 1;
    }

    /// Deadline `duration_ms / speed` milliseconds from now.
    ///
    /// Used for hold timers, which shrink as the simulation is sped up.  A
    /// non-positive speed is treated as `1.0`.
    pub fn deadline_scaled(&self, duration_ms: u64, speed: f64) -> SimTime {
        let speed = if speed > 0.0 && speed.is_finite() { speed } else { 1.0 };
        self.now.after_ms((duration_ms as f64 / speed).round() as u64)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (step {})", self.now, self.steps)
    }
}
