//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use rail_core::SimTime;
use rail_sim::{Alert, SimObserver, StepSummary, TrainSnapshot};
use rail_train::MovementEvent;

use crate::row::{AlertRow, StepSummaryRow, TrainSnapshotRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes train snapshots, step summaries and alerts
/// to any [`OutputWriter`] backend.
///
/// `SimObserver` methods return nothing, so writer errors are stored.  After
/// `sim.run_steps()` returns, check with [`take_error`][Self::take_error].
/// Every run ends with [`OutputWriter::finish`], so rows from all runs so
/// far are on disk between runs.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    rows:       u64,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, rows: 0, last_error: None }
    }

    /// Take the first stored write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Snapshot rows handed to the writer so far.
    pub fn snapshot_rows(&self) -> u64 {
        self.rows
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_step_end(&mut self, summary: &StepSummary, _events: &[MovementEvent]) {
        let result = self.writer.write_step_summary(&StepSummaryRow::from(summary));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, step: u64, now: SimTime, trains: &[TrainSnapshot]) {
        let rows: Vec<TrainSnapshotRow> =
            trains.iter().map(|t| TrainSnapshotRow::from_snapshot(step, now.0, t)).collect();
        if !rows.is_empty() {
            self.rows += rows.len() as u64;
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_alerts(&mut self, alerts: &[Alert]) {
        let rows: Vec<AlertRow> = alerts.iter().map(AlertRow::from).collect();
        let result = self.writer.write_alerts(&rows);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_step: u64, _now: SimTime) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
