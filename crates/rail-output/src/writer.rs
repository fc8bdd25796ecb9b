//! The `OutputWriter` trait.

use crate::{AlertRow, OutputResult, StepSummaryRow, TrainSnapshotRow};

/// A sink for simulation output rows.
///
/// Errors surface through [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error]
/// when driven by the observer.
pub trait OutputWriter {
    /// Write the train table for one step.
    fn write_snapshots(&mut self, rows: &[TrainSnapshotRow]) -> OutputResult<()>;

    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()>;

    /// Write alerts raised during one step, oldest first.
    fn write_alerts(&mut self, rows: &[AlertRow]) -> OutputResult<()>;

    /// Push every buffered row to disk.
    ///
    /// Called at the end of each run, so a writer may see it many times and
    /// must keep accepting rows afterwards.
    fn finish(&mut self) -> OutputResult<()>;
}
