//! Executing a recommendation.

use log::{debug, info};

use rail_core::{SimClock, SimConfig, SimTime, TrainId};
use rail_track::TrackLayout;
use rail_train::{Route, TrainStore};

use crate::{HoldReason, Plan, Recommendation};

/// What applying one plan actually did.  rail-sim turns these into alerts.
#[derive(Clone, Debug, PartialEq)]
pub enum DispatchAction {
    /// `trains` were put on hold.
    Held {
        trains: Vec<TrainId>,
        reason: HoldReason,
    },
    /// `lead` was given a `Pre` route through `corridor`; `holds` were held.
    Rerouted {
        lead:     TrainId,
        corridor: String,
        holds:    Vec<TrainId>,
    },
}

/// Apply every plan of `rec` in order.
///
/// Crossover holds last `manual_hold_ms`, every other hold
/// `dispatch_hold_ms`; both shrink with the speed multiplier.  Plans naming
/// an unknown train or corridor are skipped.
pub fn apply(
    rec:    &Recommendation,
    layout: &TrackLayout,
    trains: &mut TrainStore,
    clock:  &SimClock,
    config: &SimConfig,
) -> Vec<DispatchAction> {
    let speed = config.speed_multiplier;
    let mut actions = Vec::with_capacity(rec.plans.len());

    for plan in &rec.plans {
        match plan {
            Plan::Hold { trains: ids, reason } => {
                let duration = match reason {
                    HoldReason::Crossover => config.manual_hold_ms,
                    HoldReason::BeforeFailure { .. } => config.dispatch_hold_ms,
                };
                let until = clock.deadline_scaled(duration, speed);
                let held = hold_all(trains, ids, until);
                info!("holding {} train(s) {reason}", held.len());
                actions.push(DispatchAction::Held { trains: held, reason: *reason });
            }

            Plan::Reroute { lead, via, corridor, holds } => {
                let Some(c) = layout.corridor(corridor) else {
                    debug!("reroute skipped: unknown corridor {corridor:?}");
                    continue;
                };
                let Some(train) = trains.get_mut(*lead) else {
                    debug!("reroute skipped: {lead} not in roster");
                    continue;
                };
                train.route = Some(Route::new(*via, c.name.clone(), c.entry(train.direction), c.exit(train.direction)));
                info!("rerouting {} via {via} through {corridor}", train.number);

                let until = clock.deadline_scaled(config.dispatch_hold_ms, speed);
                let held = hold_all(trains, holds, until);
                actions.push(DispatchAction::Rerouted { lead: *lead, corridor: corridor.clone(), holds: held });
            }
        }
    }
    actions
}

/// Hold every known train of `ids`; returns the ones actually held.
fn hold_all(trains: &mut TrainStore, ids: &[TrainId], until: SimTime) -> Vec<TrainId> {
    let mut held = Vec::with_capacity(ids.len());
    for &id in ids {
        if let Some(t) = trains.get_mut(id) {
            t.hold(until);
            held.push(id);
        }
    }
    held
}
