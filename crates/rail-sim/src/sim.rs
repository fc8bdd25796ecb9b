//! The `Sim` struct, its step loop, and the caller commands.

use log::{debug, info};

use rail_core::{SimClock, SimConfig, TrackId, TrainId};
use rail_dispatch::{
    self as dispatch, CorridorChoice, DispatchAction, DispatchContext, HoldReason, PlanRefusal, Policy,
    Recommendation, ALL_CLEAR,
};
use rail_track::TrackLayout;
use rail_train::{MovementEngine, MovementEvent, Train, TrainState, TrainStore};

use crate::{AlertLog, Command, CommandOutcome, Severity, SimObserver, StepSummary, TrainSnapshot, TrainStatus};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The simulation context: every piece of mutable state in one owned value.
///
/// A cycle is [`advance`][Self::advance] (move every train in roster order,
/// then refresh the recommendation).  Commands run synchronously between
/// cycles; every command except dismissal also refreshes the
/// recommendation.
///
/// Create via [`SimBuilder`][crate::SimBuilder].  State is read through the
/// accessors below and changed only by commands and cycles.
pub struct Sim {
    pub(crate) config: SimConfig,

    /// Simulated clock.  Hold and dwell deadlines are compared against it.
    pub(crate) clock: SimClock,

    /// Track geometry; block `intact` flags change with failures.
    pub(crate) layout: TrackLayout,

    /// The roster, in fixed iteration order.
    pub(crate) trains: TrainStore,

    /// Current dispatch policy.
    pub(crate) policy: Policy,

    /// Newest-first alert ring buffer.
    pub(crate) alerts: AlertLog,

    /// Result of the last evaluation; `None` is all clear.
    pub(crate) recommendation: Option<Recommendation>,
}

impl Sim {
    // ── Stepping ──────────────────────────────────────────────────────────

    /// One cycle: advance the clock by `delta_ms`, move all trains, then
    /// refresh the recommendation.
    pub fn advance(&mut self, delta_ms: u64) -> Vec<MovementEvent> {
        self.clock.advance(delta_ms);
        let engine = MovementEngine::new(&self.layout, &self.config);
        let events = engine.step(&mut self.trains, self.clock.now, delta_ms);
        for event in &events {
            self.alert_movement(event);
        }
        self.recompute_recommendation();
        events
    }

    /// Run exactly `n` cycles of `delta_ms`, calling observer hooks.
    pub fn run_steps<O: SimObserver>(&mut self, n: u64, delta_ms: u64, observer: &mut O) {
        let interval = self.config.snapshot_interval_steps;
        for _ in 0..n {
            observer.on_step_start(self.clock.steps, self.clock.now);
            let alerts_before = self.alerts.total();

            let events = self.advance(delta_ms);

            let fresh = self.alerts.since(alerts_before);
            if !fresh.is_empty() {
                observer.on_alerts(&fresh);
            }
            observer.on_step_end(&self.summary(), &events);
            if interval > 0 && self.clock.steps.is_multiple_of(interval) {
                observer.on_snapshot(self.clock.steps, self.clock.now, &self.snapshot());
            }
        }
        observer.on_sim_end(self.clock.steps, self.clock.now);
    }

    // ── Train commands ────────────────────────────────────────────────────

    /// Flip a train between held and running.  A new hold lasts
    /// `manual_hold_ms`, scaled by the speed multiplier.
    ///
    /// Returns the new state, or `None` if `number` is unknown.
    pub fn hold_toggle(&mut self, number: &str) -> Option<TrainState> {
        let id = self.trains.find(number)?;
        let until = self.clock.deadline_scaled(self.config.manual_hold_ms, self.config.speed_multiplier);
        let train = self.trains.get_mut(id)?;
        let state = if train.is_held() {
            train.release();
            self.alerts.push(self.clock.now, Severity::Clear, format!("Released {number}"));
            TrainState::Running
        } else {
            train.hold(until);
            let minutes = self.config.manual_hold_ms as f64 / 60_000.0;
            self.alerts.push(
                self.clock.now,
                Severity::Warning,
                format!("Holding {number} for ~{minutes:.1} min"),
            );
            TrainState::Held
        };
        info!("hold toggle {number}: now {state:?}");
        self.recompute_recommendation();
        Some(state)
    }

    /// Ask the corridor planner for a bypass for one train and install it.
    pub fn manual_reroute(&mut self, number: &str) -> Result<CorridorChoice, PlanRefusal> {
        let Some(id) = self.trains.find(number) else {
            return Err(PlanRefusal::UnknownTrain(number.to_owned()));
        };
        let result = dispatch::plan_corridor(&self.dispatch_context(), id);
        match &result {
            Ok(choice) => {
                dispatch::install_route(&mut self.trains, id, choice);
                self.alerts.push(
                    self.clock.now,
                    Severity::Warning,
                    format!(
                        "Manual reroute: {number} via {} {} ({}-{})",
                        choice.via, choice.corridor, choice.entry, choice.exit
                    ),
                );
            }
            Err(refusal) => {
                self.alerts.push(
                    self.clock.now,
                    Severity::Advisory,
                    format!("Cannot reroute {number}: {refusal}"),
                );
            }
        }
        info!("manual reroute {number}: {result:?}");
        self.recompute_recommendation();
        result
    }

    /// Run the planner for every train, installing routes where possible.
    /// Returns how many trains were rerouted.
    pub fn replan_all(&mut self) -> usize {
        let mut rerouted = 0;
        for id in self.trains.ids() {
            let planned = dispatch::plan_corridor(&self.dispatch_context(), id);
            if let Ok(choice) = planned {
                dispatch::install_route(&mut self.trains, id, &choice);
                rerouted += 1;
            }
        }
        if rerouted > 0 {
            self.alerts.push(self.clock.now, Severity::Warning, "Re-plan: Applied corridor routes where available.");
        } else {
            self.alerts.push(self.clock.now, Severity::Advisory, "Re-plan: No corridor available at the moment.");
        }
        info!("re-plan: {rerouted} train(s) rerouted");
        self.recompute_recommendation();
        rerouted
    }

    // ── Failures ──────────────────────────────────────────────────────────

    /// Mark one block failed.  Returns `false` for an unknown block.
    pub fn inject_failure(&mut self, track: TrackId, block: usize) -> bool {
        if let Err(e) = self.layout.fail_block(track, block) {
            debug!("inject failure ignored: {e}");
            return false;
        }
        self.alerts.push(
            self.clock.now,
            Severity::Critical,
            format!(
                "Failure: {} Block {} failed. Consider corridor bypass.",
                track.as_str().to_ascii_uppercase(),
                block + 1
            ),
        );
        info!("block {block} of {track} failed");
        self.recompute_recommendation();
        true
    }

    pub fn clear_all_failures(&mut self) {
        self.layout.clear_failures();
        self.alerts.push(self.clock.now, Severity::Clear, "All failures cleared.");
        info!("all failures cleared");
        self.recompute_recommendation();
    }

    // ── Settings ──────────────────────────────────────────────────────────

    pub fn set_policy(&mut self, policy: Policy) {
        self.policy = policy;
        self.alerts.push(
            self.clock.now,
            Severity::Advisory,
            format!("Policy set: {policy} ({}).", policy.summary()),
        );
        info!("policy set to {policy}");
        self.recompute_recommendation();
    }

    /// Replace the speed multiplier.  Ignored unless finite and positive.
    pub fn set_speed(&mut self, multiplier: f64) -> bool {
        if !(multiplier.is_finite() && multiplier > 0.0) {
            debug!("speed multiplier {multiplier} ignored");
            return false;
        }
        self.config.speed_multiplier = multiplier;
        info!("speed multiplier set to {multiplier}");
        self.recompute_recommendation();
        true
    }

    // ── Recommendation ────────────────────────────────────────────────────

    /// Re-run the detector against the current state.
    pub fn recompute_recommendation(&mut self) -> Option<&Recommendation> {
        let rec = dispatch::evaluate(&self.dispatch_context());
        self.recommendation = rec;
        self.recommendation.as_ref()
    }

    /// Execute the current recommendation.  Returns `false` if there is none.
    pub fn apply_recommendation(&mut self) -> bool {
        let Some(rec) = self.recommendation.take() else {
            return false;
        };
        let actions = dispatch::apply(&rec, &self.layout, &mut self.trains, &self.clock, &self.config);
        for action in &actions {
            self.alert_dispatch(action);
        }
        info!("applied recommendation: {}", rec.text);
        self.recompute_recommendation();
        true
    }

    /// Discard the current recommendation without touching any train.
    /// It is recomputed, and may recur, on the next cycle.
    pub fn dismiss_recommendation(&mut self) -> bool {
        let dismissed = self.recommendation.take().is_some();
        if dismissed {
            info!("recommendation dismissed");
        }
        dismissed
    }

    /// Recommendation text, or [`ALL_CLEAR`].
    pub fn recommendation_text(&self) -> &str {
        self.recommendation.as_ref().map_or(ALL_CLEAR, |r| r.text.as_str())
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Single entry point for scripted or UI callers.
    pub fn execute(&mut self, command: Command) -> CommandOutcome {
        match command {
            Command::Advance(delta_ms) => {
                self.advance(delta_ms);
                CommandOutcome::Done
            }
            Command::HoldToggle(number) => CommandOutcome::Toggled(self.hold_toggle(&number)),
            Command::ManualReroute(number) => CommandOutcome::Rerouted(self.manual_reroute(&number)),
            Command::InjectFailure { track, block } => CommandOutcome::Changed(self.inject_failure(track, block)),
            Command::ClearFailures => {
                self.clear_all_failures();
                CommandOutcome::Done
            }
            Command::SetPolicy(policy) => {
                self.set_policy(policy);
                CommandOutcome::Done
            }
            Command::SetSpeed(multiplier) => CommandOutcome::Changed(self.set_speed(multiplier)),
            Command::ReplanAll => CommandOutcome::Replanned(self.replan_all()),
            Command::Recompute => CommandOutcome::Recommendation(self.recompute_recommendation().cloned()),
            Command::ApplyRecommendation => CommandOutcome::Changed(self.apply_recommendation()),
            Command::DismissRecommendation => CommandOutcome::Changed(self.dismiss_recommendation()),
        }
    }

    // ── Read-only views ───────────────────────────────────────────────────

    /// The train table, in roster order.
    pub fn snapshot(&self) -> Vec<TrainSnapshot> {
        self.trains
            .iter()
            .map(|(id, t)| TrainSnapshot::of(id, t, &self.layout, &self.config))
            .collect()
    }

    pub fn alerts(&self) -> &AlertLog {
        &self.alerts
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn layout(&self) -> &TrackLayout {
        &self.layout
    }

    pub fn trains(&self) -> &TrainStore {
        &self.trains
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// The standing recommendation; `None` is all clear.
    pub fn recommendation(&self) -> Option<&Recommendation> {
        self.recommendation.as_ref()
    }

    /// Look up a train by number.
    pub fn train(&self, number: &str) -> Option<&Train> {
        self.trains.find(number).and_then(|id| self.trains.get(id))
    }

    pub fn summary(&self) -> StepSummary {
        let snapshot = self.snapshot();
        let count = |status| snapshot.iter().filter(|s| s.status == status).count();
        StepSummary {
            step:            self.clock.steps,
            at:              self.clock.now,
            running:         count(TrainStatus::Running),
            held:            count(TrainStatus::Held),
            wrong_line:      count(TrainStatus::WrongLine),
            total_delay_min: snapshot.iter().map(|s| s.delay_min).sum(),
            failed_blocks:   self.layout.failed_blocks(&TrackId::ALL).len(),
            recommendation:  self.recommendation_text().to_owned(),
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn dispatch_context(&self) -> DispatchContext<'_> {
        DispatchContext::new(&self.layout, &self.trains, self.policy, &self.config)
    }

    fn number(&self, id: TrainId) -> String {
        self.trains.number(id).to_owned()
    }

    fn numbers(&self, ids: &[TrainId]) -> String {
        ids.iter().map(|&id| self.trains.number(id)).collect::<Vec<_>>().join(", ")
    }

    fn alert_movement(&mut self, event: &MovementEvent) {
        let number = self.number(event.train());
        let (severity, message) = match event {
            MovementEvent::EnteredCorridor { via, at, .. } => {
                (Severity::Advisory, format!("{number} entered wrong-line ({via}) at {at}."))
            }
            MovementEvent::ExitedCorridor { at, .. } => {
                (Severity::Clear, format!("{number} exited corridor at {at}."))
            }
            MovementEvent::ArrivedTerminus { dwell_secs, .. } => {
                (Severity::Clear, format!("{number} arrived terminal. Dwell {dwell_secs}s"))
            }
            MovementEvent::Departed { .. } => (Severity::Clear, format!("{number} departed after dwell")),
            MovementEvent::HoldExpired(_) | MovementEvent::DetourComplete(_) => return,
        };
        self.alerts.push(self.clock.now, severity, message);
    }

    fn alert_dispatch(&mut self, action: &DispatchAction) {
        let (severity, message) = match action {
            DispatchAction::Held { trains, reason: HoldReason::Crossover } => (
                Severity::Advisory,
                format!("AI: Holding {} to avoid conflict at crossover.", self.numbers(trains)),
            ),
            DispatchAction::Held { trains, reason } => {
                (Severity::Advisory, format!("AI: Holding {} {reason}.", self.numbers(trains)))
            }
            DispatchAction::Rerouted { lead, corridor, .. } => (
                Severity::Warning,
                format!("AI: Rerouting {} through {corridor} corridor.", self.number(*lead)),
            ),
        };
        self.alerts.push(self.clock.now, severity, message);
    }
}
