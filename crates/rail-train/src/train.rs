//! Per-train state.

use rail_core::{Direction, Priority, SimTime, TrackId};

/// Operational state of a train.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrainState {
    /// Free to advance.
    #[default]
    Running,
    /// Fixed in place.  Released when `hold_until` (or, at a terminus,
    /// `dwell_until`) elapses.
    Held,
}

/// Phase of a wrong-line detour.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoutePhase {
    /// Running on the home track towards the corridor entry.
    Pre,
    /// Running on the via track towards the corridor exit.
    Corridor,
    /// Back on the home track; the route is dropped on the next step.
    Post,
}

/// An in-progress detour through a bypass corridor.
///
/// Entry and exit are already resolved for the train's direction of travel.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub via:      TrackId,
    pub corridor: String,
    pub entry:    f64,
    pub exit:     f64,
    pub active:   bool,
    pub phase:    RoutePhase,
}

impl Route {
    /// A fresh route in phase `Pre`.
    pub fn new(via: TrackId, corridor: impl Into<String>, entry: f64, exit: f64) -> Self {
        Self {
            via,
            corridor: corridor.into(),
            entry,
            exit,
            active: true,
            phase: RoutePhase::Pre,
        }
    }
}

/// One train of the roster.
///
/// Trains are created once at simulation start and never removed; only
/// their position, track, direction and timers change.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Train {
    /// Public train number, e.g. `"12001"`.  Unique within a roster.
    pub number: String,
    /// Display name, e.g. `"12001 Shatabdi"`.
    pub name: String,
    pub direction: Direction,
    /// Track the train currently occupies.
    pub track: TrackId,
    pub priority: Priority,
    /// Line speed in km/h.
    pub speed_kmh: f64,
    /// Dwell time at a terminus, in seconds.
    pub dwell_secs: u32,
    /// Position along the corridor.
    pub position: f64,
    /// Accumulated delay in minutes.
    pub delay_min: f64,
    pub state: TrainState,
    /// Expiry of a dispatcher or manual hold.
    pub hold_until: Option<SimTime>,
    /// End of the current terminus dwell.
    pub dwell_until: Option<SimTime>,
    pub route: Option<Route>,
}

impl Train {
    /// A running train on its direction's home track.
    pub fn new(
        number:    impl Into<String>,
        name:      impl Into<String>,
        direction: Direction,
        priority:  Priority,
        speed_kmh: f64,
        position:  f64,
    ) -> Self {
        Self {
            number: number.into(),
            name: name.into(),
            direction,
            track: direction.home_track(),
            priority,
            speed_kmh,
            dwell_secs: 5,
            position,
            delay_min: 0.0,
            state: TrainState::Running,
            hold_until: None,
            dwell_until: None,
            route: None,
        }
    }

    /// Place the train on a track other than its home track.
    pub fn on_track(mut self, track: TrackId) -> Self {
        self.track = track;
        self
    }

    pub fn with_dwell_secs(mut self, secs: u32) -> Self {
        self.dwell_secs = secs;
        self
    }

    #[inline]
    pub fn is_held(&self) -> bool {
        self.state == TrainState::Held
    }

    #[inline]
    pub fn is_dwelling(&self) -> bool {
        self.dwell_until.is_some()
    }

    /// `true` while a detour route is active (the "wrong-line" status).
    #[inline]
    pub fn on_detour(&self) -> bool {
        self.route.as_ref().is_some_and(|r| r.active)
    }

    /// Hold in place until `until`.
    pub fn hold(&mut self, until: SimTime) {
        self.state = TrainState::Held;
        self.hold_until = Some(until);
    }

    /// Clear a hold.  A dwelling train stays at the terminus until its dwell
    /// elapses.
    pub fn release(&mut self) {
        self.state = TrainState::Running;
        self.hold_until = None;
    }

    /// Distance to the end of the corridor in the direction of travel.
    pub fn remaining_distance(&self, x0: f64, x1: f64) -> f64 {
        match self.direction {
            Direction::Up   => (x1 - self.position).max(0.0),
            Direction::Down => (self.position - x0).max(0.0),
        }
    }
}
