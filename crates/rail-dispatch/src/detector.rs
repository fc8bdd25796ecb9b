//! Conflict detector: turns the current state into a recommendation.

use log::debug;

use rail_core::{Direction, TrackId, TrainId};
use rail_track::Block;

use crate::planner::select_corridor;
use crate::{DispatchContext, HoldReason, Plan, Recommendation};

/// Evaluate the current state.  `None` means all clear.
///
/// A crossover conflict short-circuits everything else.  Otherwise every
/// failed block on the main lines is planned independently and the plans
/// are concatenated in failure order.
pub fn evaluate(ctx: &DispatchContext<'_>) -> Option<Recommendation> {
    if let Some((first, second)) = crossover_conflict(ctx) {
        debug!(
            "crossover conflict between {} and {}",
            ctx.trains.number(first),
            ctx.trains.number(second)
        );
        return Some(Recommendation::crossover(first, second, ctx.trains, ctx.policy));
    }

    let plans: Vec<Plan> = ctx
        .layout
        .failed_blocks(&TrackId::MAIN_LINES)
        .into_iter()
        .filter_map(|(track, block)| plan_failure(ctx, track, block))
        .collect();

    if plans.is_empty() {
        None
    } else {
        Some(Recommendation::for_failures(plans, ctx.trains, ctx.policy))
    }
}

/// The first train found inside the crossover on each of its two tracks.
pub fn crossover_conflict(ctx: &DispatchContext<'_>) -> Option<(TrainId, TrainId)> {
    let crossover = ctx.layout.crossover.as_ref()?;
    let inside = |track: TrackId| {
        ctx.trains
            .iter()
            .find(|(_, t)| t.track == track && crossover.contains(t.position))
            .map(|(id, _)| id)
    };
    Some((inside(crossover.first)?, inside(crossover.second)?))
}

/// Trains approaching failed `block` on `track`, best first.
///
/// A train approaches when it runs on `track` towards the block, has not
/// reached it, is closer than the approach threshold, and is not already on
/// a detour.  Ranked by priority descending, then distance ascending; ties
/// keep roster order.
pub fn approaching(ctx: &DispatchContext<'_>, track: TrackId, block: &Block) -> Vec<(TrainId, f64)> {
    let mut found: Vec<_> = ctx
        .trains
        .iter()
        .filter(|(_, t)| t.track == track && !t.on_detour())
        .filter_map(|(id, t)| {
            let distance = match t.direction {
                Direction::Up   => block.x0 - t.position,
                Direction::Down => t.position - block.x1,
            };
            (distance > 0.0 && distance < ctx.config.approach_threshold).then_some((id, t.priority, distance))
        })
        .collect();

    found.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.total_cmp(&b.2)));
    found.into_iter().map(|(id, _, d)| (id, d)).collect()
}

fn plan_failure(ctx: &DispatchContext<'_>, track: TrackId, index: usize) -> Option<Plan> {
    let block = ctx.layout.block(track, index)?;
    let ranked = approaching(ctx, track, block);
    let &(lead_id, _) = ranked.first()?;
    let lead = ctx.trains.get(lead_id)?;

    let corridor = match track.opposite() {
        Some(via) if ctx.policy.allows_wrong_line() => {
            select_corridor(ctx, lead, via, index).map(|c| (via, c))
        }
        _ => None,
    };

    let Some((via, corridor)) = corridor else {
        return Some(Plan::Hold {
            trains: ranked.iter().map(|&(id, _)| id).collect(),
            reason: HoldReason::BeforeFailure { track, block: index },
        });
    };

    let holds = ctx
        .trains
        .iter()
        .filter(|&(id, t)| {
            if id == lead_id {
                return false;
            }
            let follower = t.track == lead.track
                && t.direction == lead.direction
                && lead.direction.is_ahead(lead.position, t.position)
                && t.priority <= lead.priority;
            let in_corridor = t.track == via && corridor.covers(t.position);
            follower || in_corridor
        })
        .map(|(id, _)| id)
        .collect();

    Some(Plan::Reroute { lead: lead_id, via, corridor: corridor.name.clone(), holds })
}
