//! Read-only state passed to the planner and the detector.

use rail_core::SimConfig;
use rail_track::TrackLayout;
use rail_train::{Occupancy, TrainStore};

use crate::Policy;

/// A read-only view of everything dispatch decisions depend on.
///
/// Built by rail-sim for each evaluation; no mutable access to the layout
/// or the roster exists while it is alive.
#[derive(Clone, Copy)]
pub struct DispatchContext<'a> {
    pub layout: &'a TrackLayout,
    pub trains: &'a TrainStore,
    pub policy: Policy,
    pub config: &'a SimConfig,
}

impl<'a> DispatchContext<'a> {
    #[inline]
    pub fn new(
        layout: &'a TrackLayout,
        trains: &'a TrainStore,
        policy: Policy,
        config: &'a SimConfig,
    ) -> Self {
        Self { layout, trains, policy, config }
    }

    #[inline]
    pub fn occupancy(&self) -> Occupancy<'a> {
        Occupancy::new(self.layout, self.trains)
    }
}
