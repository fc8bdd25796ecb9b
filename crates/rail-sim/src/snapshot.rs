//! Read-only per-train and per-step views for callers and observers.

use std::fmt;

use rail_core::{Direction, Priority, SimConfig, SimTime, TrackId, TrainId};
use rail_track::TrackLayout;
use rail_train::{RoutePhase, Train, TrainState};

/// What a train table shows in its status column.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrainStatus {
    Running,
    /// Held by a command, a dispatcher plan, or a terminus dwell.
    Held,
    /// Running on a detour route.
    WrongLine,
}

impl fmt::Display for TrainStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainStatus::Running   => f.write_str("Running"),
            TrainStatus::Held      => f.write_str("Held"),
            TrainStatus::WrongLine => f.write_str("Wrong-line"),
        }
    }
}

/// One row of the train table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrainSnapshot {
    pub id:          TrainId,
    pub number:      String,
    pub name:        String,
    pub direction:   Direction,
    pub track:       TrackId,
    pub position:    f64,
    pub state:       TrainState,
    pub status:      TrainStatus,
    pub priority:    Priority,
    pub delay_min:   f64,
    /// Estimated seconds to the far terminus, dwell included.
    pub eta_secs:    f64,
    pub route_phase: Option<RoutePhase>,
}

impl TrainSnapshot {
    pub fn of(id: TrainId, train: &Train, layout: &TrackLayout, config: &SimConfig) -> Self {
        let status = if train.is_held() {
            TrainStatus::Held
        } else if train.on_detour() {
            TrainStatus::WrongLine
        } else {
            TrainStatus::Running
        };
        Self {
            id,
            number: train.number.clone(),
            name: train.name.clone(),
            direction: train.direction,
            track: train.track,
            position: train.position,
            state: train.state,
            status,
            priority: train.priority,
            delay_min: train.delay_min,
            eta_secs: eta_secs(train, layout, config),
            route_phase: train.route.as_ref().filter(|r| r.active).map(|r| r.phase),
        }
    }

    /// ETA in minutes with one decimal, e.g. `"38.8m"`.
    pub fn eta_label(&self) -> String {
        format!("{:.1}m", self.eta_secs / 60.0)
    }

    /// `"On Time"` or `"+3m"`.
    pub fn delay_label(&self) -> String {
        if self.delay_min <= 0.0 {
            "On Time".to_owned()
        } else {
            format!("+{:.0}m", self.delay_min)
        }
    }
}

/// Remaining distance over line speed, floored at `min_eta_speed`, plus the
/// terminus dwell.
///
/// The ETA reads the dwell figure as minutes of timetable allowance, so it
/// adds `dwell_secs * 60` even though the terminus itself waits
/// `dwell_secs` seconds.
pub fn eta_secs(train: &Train, layout: &TrackLayout, config: &SimConfig) -> f64 {
    let remaining = train.remaining_distance(layout.x0, layout.x1);
    let speed = config.kmh_to_units_per_sec(train.speed_kmh).max(config.min_eta_speed);
    remaining / speed + f64::from(train.dwell_secs) * 60.0
}

/// Aggregate state after one step, handed to observers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepSummary {
    pub step:            u64,
    pub at:              SimTime,
    pub running:         usize,
    pub held:            usize,
    pub wrong_line:      usize,
    pub total_delay_min: f64,
    pub failed_blocks:   usize,
    /// Recommendation text, or the all-clear message.
    pub recommendation:  String,
}
