//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `train_snapshots.csv`
//! - `step_summaries.csv`
//! - `alerts.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AlertRow, OutputResult, StepSummaryRow, TrainSnapshotRow};

pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    alerts:    Writer<File>,
}

impl CsvWriter {
    /// Create the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("train_snapshots.csv"))?;
        snapshots.write_record([
            "step", "at_ms", "train_id", "number", "track", "position", "status", "delay_min", "eta_secs",
            "route_phase",
        ])?;

        let mut summaries = Writer::from_path(dir.join("step_summaries.csv"))?;
        summaries.write_record([
            "step", "at_ms", "running", "held", "wrong_line", "total_delay_min", "failed_blocks", "recommendation",
        ])?;

        let mut alerts = Writer::from_path(dir.join("alerts.csv"))?;
        alerts.write_record(["at_ms", "severity", "message"])?;

        Ok(Self { snapshots, summaries, alerts })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[TrainSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.step.to_string(),
                row.at_ms.to_string(),
                row.train_id.to_string(),
                row.number.clone(),
                row.track.to_owned(),
                format!("{:.3}", row.position),
                row.status.clone(),
                format!("{:.3}", row.delay_min),
                format!("{:.1}", row.eta_secs),
                row.route_phase.to_owned(),
            ])?;
        }
        Ok(())
    }

    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.step.to_string(),
            row.at_ms.to_string(),
            row.running.to_string(),
            row.held.to_string(),
            row.wrong_line.to_string(),
            format!("{:.3}", row.total_delay_min),
            row.failed_blocks.to_string(),
            row.recommendation.clone(),
        ])?;
        Ok(())
    }

    fn write_alerts(&mut self, rows: &[AlertRow]) -> OutputResult<()> {
        for row in rows {
            self.alerts.write_record(&[row.at_ms.to_string(), row.severity.clone(), row.message.clone()])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.snapshots.flush()?;
        self.summaries.flush()?;
        self.alerts.flush()?;
        Ok(())
    }
}
