//! Simulation observer trait for progress reporting and data collection.

use rail_core::SimTime;
use rail_train::MovementEvent;

use crate::{Alert, StepSummary, TrainSnapshot};

/// Callbacks invoked by [`Sim::run_steps`][crate::Sim::run_steps].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_step_end(&mut self, summary: &StepSummary, _events: &[MovementEvent]) {
///         if summary.step % self.interval == 0 {
///             println!("{}: {} held", summary.at, summary.held);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before each step, with the clock not yet advanced.
    fn on_step_start(&mut self, _step: u64, _now: SimTime) {}

    /// Called after each step and the recommendation refresh.
    fn on_step_end(&mut self, _summary: &StepSummary, _events: &[MovementEvent]) {}

    /// Called every `config.snapshot_interval_steps` steps with the train table.
    fn on_snapshot(&mut self, _step: u64, _now: SimTime, _trains: &[TrainSnapshot]) {}

    /// Alerts raised during the step, oldest first.  Not called when empty.
    fn on_alerts(&mut self, _alerts: &[Alert]) {}

    /// Called once after the last step of a `run_steps` call.
    fn on_sim_end(&mut self, _final_step: u64, _now: SimTime) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
