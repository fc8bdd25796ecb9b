//! Corridor planner: find a safe wrong-line bypass around a failed block.
//!
//! Used directly for manual reroutes and re-plans, and by the detector when
//! it composes reroute plans.

use log::debug;

use rail_core::{Direction, TrackId, TrainId};
use rail_track::{Corridor, TrackLayout};
use rail_train::{Route, Train, TrainStore};

use crate::{DispatchContext, PlanRefusal};

/// A bypass picked for one train, with entry and exit already resolved for
/// its direction of travel.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CorridorChoice {
    pub via:          TrackId,
    pub corridor:     String,
    pub entry:        f64,
    pub exit:         f64,
    /// Index of the failed block being bypassed, on the train's own track.
    pub failed_block: usize,
}

impl CorridorChoice {
    fn new(corridor: &Corridor, via: TrackId, direction: Direction, failed_block: usize) -> Self {
        Self {
            via,
            corridor: corridor.name.clone(),
            entry: corridor.entry(direction),
            exit: corridor.exit(direction),
            failed_block,
        }
    }

    pub fn route(&self) -> Route {
        Route::new(self.via, self.corridor.clone(), self.entry, self.exit)
    }
}

/// Index of the nearest failed block ahead of `train` on its current track,
/// scanning in the direction of travel.
///
/// A failed block the train is already inside counts as ahead.
pub fn nearest_failure_ahead(layout: &TrackLayout, train: &Train) -> Option<usize> {
    let track = layout.track(train.track);
    let x = train.position;
    let failed = |i: &usize| track.block(*i).is_some_and(|b| !b.intact);
    match train.direction {
        Direction::Up => (0..track.block_count())
            .filter(|&i| track.block(i).is_some_and(|b| b.x1 > x))
            .find(failed),
        Direction::Down => (0..track.block_count())
            .rev()
            .filter(|&i| track.block(i).is_some_and(|b| b.x0 < x))
            .find(failed),
    }
}

/// The first candidate corridor for `failed_block` that `train` can safely
/// take on `via`.
///
/// A candidate qualifies when the via-track blocks at both of its ends are
/// intact, no train on `via` is positioned within its range, and the train
/// has not already run past its entry.
pub fn select_corridor<'a>(
    ctx:          &DispatchContext<'a>,
    train:        &Train,
    via:          TrackId,
    failed_block: usize,
) -> Option<&'a Corridor> {
    let occupancy = ctx.occupancy();
    ctx.layout.corridor_candidates(failed_block).find(|c| {
        ctx.layout.corridor_blocks_intact(c, via)
            && !occupancy.corridor_occupied(via, c)
            && !train.direction.is_ahead(train.position, c.entry(train.direction))
    })
}

/// Run the planner for one train without changing anything.
///
/// Refusals are checked in order: unknown train, train already on a
/// detour, no failure ahead, no opposite line, no safe corridor, policy.
pub fn plan_corridor(ctx: &DispatchContext<'_>, id: TrainId) -> Result<CorridorChoice, PlanRefusal> {
    let train = ctx
        .trains
        .get(id)
        .ok_or_else(|| PlanRefusal::UnknownTrain(id.to_string()))?;
    if train.on_detour() {
        return Err(PlanRefusal::AlreadyOnDetour(train.number.clone()));
    }

    let failed_block = nearest_failure_ahead(ctx.layout, train).ok_or(PlanRefusal::NoFailureAhead)?;
    let via = train.track.opposite().ok_or(PlanRefusal::NoOppositeTrack(train.track))?;
    let corridor = select_corridor(ctx, train, via, failed_block).ok_or(PlanRefusal::NoSafeCorridor)?;

    if !ctx.policy.allows_wrong_line() {
        debug!("{}: corridor {} found but {} forbids it", train.number, corridor.name, ctx.policy);
        return Err(PlanRefusal::PolicyForbids);
    }

    debug!(
        "{}: bypass block {failed_block} via {via} through {}",
        train.number, corridor.name
    );
    Ok(CorridorChoice::new(corridor, via, train.direction, failed_block))
}

/// Install `choice` on train `id` as a fresh `Pre` route.
///
/// Returns `false` if `id` is not in the roster.
pub fn install_route(trains: &mut TrainStore, id: TrainId, choice: &CorridorChoice) -> bool {
    match trains.get_mut(id) {
        Some(train) => {
            train.route = Some(choice.route());
            true
        }
        None => false,
    }
}
