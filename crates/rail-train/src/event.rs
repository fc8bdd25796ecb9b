//! Movement events: state transitions reported by one step.

use rail_core::{TrackId, TrainId};

/// A notable transition made by the movement engine.
///
/// The engine never writes alerts itself; the simulation turns these into
/// its alert feed.  Refused moves are not events, they only show up as
/// delay.
#[derive(Clone, Debug, PartialEq)]
pub enum MovementEvent {
    /// A hold deadline elapsed and the train is running again.
    HoldExpired(TrainId),

    /// The train switched onto the via track at the corridor entry.
    EnteredCorridor { train: TrainId, via: TrackId, at: f64 },

    /// The train returned to its home track at the corridor exit.
    ExitedCorridor { train: TrainId, at: f64 },

    /// The detour route was dropped after the `Post` phase.
    DetourComplete(TrainId),

    /// The train reached the end of the corridor and started dwelling.
    ArrivedTerminus { train: TrainId, dwell_secs: u32 },

    /// The dwell elapsed; the train reversed and left the terminus.
    Departed { train: TrainId, track: TrackId },
}

impl MovementEvent {
    pub fn train(&self) -> TrainId {
        match self {
            MovementEvent::HoldExpired(t)
            | MovementEvent::DetourComplete(t)
            | MovementEvent::EnteredCorridor { train: t, .. }
            | MovementEvent::ExitedCorridor { train: t, .. }
            | MovementEvent::ArrivedTerminus { train: t, .. }
            | MovementEvent::Departed { train: t, .. } => *t,
        }
    }
}
