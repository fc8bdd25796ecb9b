//! The movement state machine.

use log::{debug, trace};

use rail_core::{Direction, SimConfig, SimTime, TrackId, TrainId};
use rail_track::TrackLayout;

use crate::{MovementEvent, Occupancy, RoutePhase, TrainState, TrainStore};

/// Outcome of the per-train decision, computed against a read-only view and
/// then written back.
enum Step {
    /// Move to the position (same track).
    Advance(f64),
    /// Refused; accrue delay.
    Blocked,
}

/// Advances every train by one simulation step.
///
/// Borrows the layout and configuration; the roster is passed to
/// [`step`][Self::step] mutably so the simulation keeps ownership of it.
pub struct MovementEngine<'a> {
    pub layout: &'a TrackLayout,
    pub config: &'a SimConfig,
}

impl<'a> MovementEngine<'a> {
    pub fn new(layout: &'a TrackLayout, config: &'a SimConfig) -> Self {
        Self { layout, config }
    }

    /// Run one step of `delta_ms` for all trains in roster order.
    ///
    /// `now` is the simulated instant *after* the clock has advanced; hold
    /// and dwell deadlines at or before `now` have elapsed.
    pub fn step(&self, trains: &mut TrainStore, now: SimTime, delta_ms: u64) -> Vec<MovementEvent> {
        let dt_ms = delta_ms as f64 * self.config.speed_multiplier;
        let mut events = Vec::new();
        for id in trains.ids() {
            self.step_train(trains, id, now, dt_ms, &mut events);
        }
        events
    }

    fn step_train(
        &self,
        trains: &mut TrainStore,
        id:     TrainId,
        now:    SimTime,
        dt_ms:  f64,
        events: &mut Vec<MovementEvent>,
    ) {
        let delay = dt_ms / 60_000.0;
        let Some(train) = trains.get(id) else { return };

        // ── Terminus dwell ────────────────────────────────────────────────
        // A dwelling train is held, so it accrues delay until it departs.
        if let Some(until) = train.dwell_until {
            if now < until || !self.depart(trains, id, events) {
                accrue(trains, id, delay);
            }
            return;
        }

        // ── Holds ─────────────────────────────────────────────────────────
        if train.state == TrainState::Held {
            let expired = train.hold_until.is_some_and(|until| now >= until);
            if !expired {
                accrue(trains, id, delay);
                return;
            }
            if let Some(t) = trains.get_mut(id) {
                t.release();
            }
            debug!("{}: hold expired", trains.number(id));
            events.push(MovementEvent::HoldExpired(id));
        }

        let Some(train) = trains.get(id) else { return };
        let dx = self.config.kmh_to_units_per_sec(train.speed_kmh) * (dt_ms / 1000.0)
            * train.direction.sign();

        // ── Detour phases ─────────────────────────────────────────────────
        if let Some(phase) = train.route.as_ref().filter(|r| r.active).map(|r| r.phase) {
            match phase {
                RoutePhase::Pre => {
                    self.step_pre(trains, id, dx, delay, events);
                    return;
                }
                RoutePhase::Corridor => {
                    self.step_corridor(trains, id, dx, delay, events);
                    return;
                }
                RoutePhase::Post => {
                    if let Some(t) = trains.get_mut(id) {
                        t.route = None;
                    }
                    debug!("{}: detour complete", trains.number(id));
                    events.push(MovementEvent::DetourComplete(id));
                }
            }
        }

        // ── Ordinary running ──────────────────────────────────────────────
        match self.advance_within_blocks(trains, id, dx) {
            Step::Advance(x) => {
                if let Some(t) = trains.get_mut(id) {
                    t.position = x;
                }
                self.handle_terminus(trains, id, now, events);
            }
            Step::Blocked => accrue(trains, id, delay),
        }
    }

    /// `Pre`: run on the home track until the corridor entry, then switch.
    fn step_pre(
        &self,
        trains: &mut TrainStore,
        id:     TrainId,
        dx:     f64,
        delay:  f64,
        events: &mut Vec<MovementEvent>,
    ) {
        let Some(train) = trains.get(id) else { return };
        let Some(route) = train.route.as_ref() else { return };
        let next = train.position + dx;

        if train.direction.reaches(next, route.entry) {
            let (via, entry) = (route.via, route.entry);
            let block = self.layout.block_index(via, entry);
            if Occupancy::new(self.layout, trains).occupant(via, block, Some(id)).is_some() {
                trace!("{}: corridor entry on {via} occupied", train.number);
                accrue(trains, id, delay);
                return;
            }
            if let Some(t) = trains.get_mut(id) {
                t.position = entry;
                t.track = via;
                if let Some(r) = t.route.as_mut() {
                    r.phase = RoutePhase::Corridor;
                }
            }
            debug!("{}: entered wrong line ({via}) at {entry}", trains.number(id));
            events.push(MovementEvent::EnteredCorridor { train: id, via, at: entry });
            return;
        }

        // A train on its way to the entry is mid-detour: failed blocks do not
        // stop it, other trains do.
        let occupancy = Occupancy::new(self.layout, trains);
        let clear = self.path_clear(train.position, next, train.track, |block| {
            occupancy.occupant(train.track, block, Some(id)).is_none()
        });
        if clear {
            if let Some(t) = trains.get_mut(id) {
                t.position = next;
            }
        } else {
            trace!("{}: approach to corridor entry blocked on {}", train.number, train.track);
            accrue(trains, id, delay);
        }
    }

    /// `Corridor`: run on the via track until the exit, then return home.
    fn step_corridor(
        &self,
        trains: &mut TrainStore,
        id:     TrainId,
        dx:     f64,
        delay:  f64,
        events: &mut Vec<MovementEvent>,
    ) {
        let Some(train) = trains.get(id) else { return };
        let Some(route) = train.route.as_ref() else { return };
        let occupancy = Occupancy::new(self.layout, trains);
        let next = train.position + dx;
        let next_block = self.layout.block_index(train.track, next);

        let free = |block| occupancy.is_free(train.track, block, Some(id));
        if !free(next_block) || !self.path_clear(train.position, next, train.track, free) {
            trace!("{}: via block {next_block} on {} not free", train.number, train.track);
            accrue(trains, id, delay);
            return;
        }

        if !train.direction.reaches(next, route.exit) {
            if let Some(t) = trains.get_mut(id) {
                t.position = next;
            }
            return;
        }

        let home = train.direction.home_track();
        let exit = route.exit;
        let home_block = self.layout.block_index(home, exit);
        if occupancy.occupant(home, home_block, Some(id)).is_some() {
            trace!("{}: corridor exit on {home} occupied", train.number);
            accrue(trains, id, delay);
            return;
        }
        if let Some(t) = trains.get_mut(id) {
            t.position = exit;
            t.track = home;
            if let Some(r) = t.route.as_mut() {
                r.phase = RoutePhase::Post;
            }
        }
        debug!("{}: exited corridor at {exit}", trains.number(id));
        events.push(MovementEvent::ExitedCorridor { train: id, at: exit });
    }

    /// Ordinary advance on the current track.
    ///
    /// Refused if the move would enter a block that is failed or held by
    /// another train.  A train already inside a failed block may keep
    /// moving within it.
    fn advance_within_blocks(&self, trains: &TrainStore, id: TrainId, dx: f64) -> Step {
        let Some(train) = trains.get(id) else { return Step::Blocked };
        let occupancy = Occupancy::new(self.layout, trains);
        let next = train.position + dx;
        if self.path_clear(train.position, next, train.track, |block| occupancy.is_free(train.track, block, Some(id))) {
            Step::Advance(next)
        } else {
            trace!("{}: blocked on {} at {:.1}", train.number, train.track, train.position);
            Step::Blocked
        }
    }

    /// Every block entered when moving from `from` to `to` must pass
    /// `enterable`.  The block the train starts in is exempt.
    fn path_clear(&self, from: f64, to: f64, track: TrackId, enterable: impl Fn(usize) -> bool) -> bool {
        let current = self.layout.block_index(track, from);
        let target  = self.layout.block_index(track, to);
        let (lo, hi) = if target >= current { (current, target) } else { (target, current) };
        (lo..=hi).filter(|&block| block != current).all(enterable)
    }

    /// Clamp at the far end and start the dwell.  Like holds, the dwell
    /// shortens as the speed multiplier grows.
    fn handle_terminus(&self, trains: &mut TrainStore, id: TrainId, now: SimTime, events: &mut Vec<MovementEvent>) {
        let (x0, x1) = (self.layout.x0, self.layout.x1);
        let Some(t) = trains.get_mut(id) else { return };
        let reached = match t.direction {
            Direction::Up   => t.position >= x1,
            Direction::Down => t.position <= x0,
        };
        if !reached {
            return;
        }
        t.position = match t.direction {
            Direction::Up   => x1,
            Direction::Down => x0,
        };
        let speed = self.config.speed_multiplier.max(f64::MIN_POSITIVE);
        let dwell_ms = (f64::from(t.dwell_secs) * 1000.0 / speed).round() as u64;
        t.dwell_until = Some(now.after_ms(dwell_ms));
        t.state = TrainState::Held;
        debug!("{}: arrived at terminus, dwell {}s", t.number, t.dwell_secs);
        events.push(MovementEvent::ArrivedTerminus { train: id, dwell_secs: t.dwell_secs });
    }

    /// Reverse at the terminus and restart just inside the opposite
    /// boundary on the new direction's home track.
    ///
    /// Waits (stays dwelling) while another train holds the restart block;
    /// returns whether the train left.
    fn depart(&self, trains: &mut TrainStore, id: TrainId, events: &mut Vec<MovementEvent>) -> bool {
        let Some(train) = trains.get(id) else { return false };
        let direction = train.direction.reversed();
        let track = direction.home_track();
        let position = match direction {
            Direction::Up   => self.layout.x0 + self.config.terminus_inset,
            Direction::Down => self.layout.x1 - self.config.terminus_inset,
        };
        let block = self.layout.block_index(track, position);
        if Occupancy::new(self.layout, trains).occupant(track, block, Some(id)).is_some() {
            trace!("{}: departure block on {track} occupied", train.number);
            return false;
        }

        let Some(t) = trains.get_mut(id) else { return false };
        t.direction = direction;
        t.track = track;
        t.position = position;
        t.dwell_until = None;
        t.route = None;
        if t.hold_until.is_none() {
            t.state = TrainState::Running;
        }
        debug!("{}: departed after dwell on {track}", t.number);
        events.push(MovementEvent::Departed { train: id, track });
        true
    }
}

fn accrue(trains: &mut TrainStore, id: TrainId, delay_min: f64) {
    if let Some(t) = trains.get_mut(id) {
        t.delay_min += delay_min;
    }
}
