//! Top-level simulation configuration.

use crate::{RailError, RailResult};

/// Tunable constants of the movement model and the dispatcher.
///
/// Typically built with `SimConfig::default()` and adjusted field by field,
/// or loaded from a JSON file by the application crate (feature `serde`).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Global time scale applied to movement, delay and hold durations.
    pub speed_multiplier: f64,

    /// Position units per kilometre.  Converts train speeds in km/h to
    /// position units per second.  Default: 10 (800 units span 80 km).
    pub px_per_km: f64,

    /// Default step length used by drivers that do not pick their own.
    pub step_ms: u64,

    /// Duration of a manual hold and of a crossover-conflict hold.
    pub manual_hold_ms: u64,

    /// Duration of holds issued by a failure-driven dispatch plan.
    pub dispatch_hold_ms: u64,

    /// A train closer than this to a failed block (and moving towards it) is
    /// "approaching" the failure.
    pub approach_threshold: f64,

    /// Speed floor (position units per second) for ETA estimates.
    pub min_eta_speed: f64,

    /// How far inside the boundary a train restarts after dwelling.
    pub terminus_inset: f64,

    /// Capacity of the alert ring buffer.
    pub alert_capacity: usize,

    /// Observer snapshot cadence in steps.  0 disables snapshots.
    pub snapshot_interval_steps: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            speed_multiplier:        1.0,
            px_per_km:               10.0,
            step_ms:                 200,
            manual_hold_ms:          90_000,
            dispatch_hold_ms:        120_000,
            approach_threshold:      220.0,
            min_eta_speed:           5.0,
            terminus_inset:          2.0,
            alert_capacity:          12,
            snapshot_interval_steps: 1,
        }
    }
}

impl SimConfig {
    /// Convert a speed in km/h to position units per second.
    #[inline]
    pub fn kmh_to_units_per_sec(&self, kmh: f64) -> f64 {
        kmh * self.px_per_km / 3600.0
    }

    /// Reject values that would stall or break the movement model.
    pub fn validate(&self) -> RailResult<()> {
        if !(self.speed_multiplier.is_finite() && self.speed_multiplier > 0.0) {
            return Err(RailError::Config(format!(
                "speed_multiplier must be positive, got {}",
                self.speed_multiplier
            )));
        }
        if !(self.px_per_km.is_finite() && self.px_per_km > 0.0) {
            return Err(RailError::Config(format!(
                "px_per_km must be positive, got {}",
                self.px_per_km
            )));
        }
        if !(self.min_eta_speed > 0.0) {
            return Err(RailError::Config("min_eta_speed must be positive".into()));
        }
        if self.approach_threshold < 0.0 || self.terminus_inset < 0.0 {
            return Err(RailError::Config(
                "approach_threshold and terminus_inset must not be negative".into(),
            ));
        }
        if self.alert_capacity == 0 {
            return Err(RailError::Config("alert_capacity must be at least 1".into()));
        }
        Ok(())
    }
}
