//! Integration tests for rail-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use rail_core::{Direction, Priority, SimConfig};
    use rail_sim::SimBuilder;
    use rail_train::Train;

    use crate::csv::CsvWriter;
    use crate::observer::SimOutputObserver;
    use crate::row::{AlertRow, StepSummaryRow, TrainSnapshotRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn records(dir: &TempDir, file: &str) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    fn snap_row(train_id: u32, step: u64) -> TrainSnapshotRow {
        TrainSnapshotRow {
            step,
            at_ms:       step * 200,
            train_id,
            number:      format!("T{train_id}"),
            track:       "up",
            position:    180.0 + f64::from(train_id),
            status:      "Running".into(),
            delay_min:   0.0,
            eta_secs:    532.0,
            route_phase: "",
        }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("train_snapshots.csv").exists());
        assert!(dir.path().join("step_summaries.csv").exists());
        assert!(dir.path().join("alerts.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("alerts.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["at_ms", "severity", "message"]);

        let mut rdr = csv::Reader::from_path(dir.path().join("train_snapshots.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers[3], "number");
        assert_eq!(headers.len(), 10);
    }

    #[test]
    fn csv_rows_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 5), snap_row(1, 5)]).unwrap();
        w.write_step_summary(&StepSummaryRow {
            step:            5,
            at_ms:           1000,
            running:         3,
            held:            1,
            wrong_line:      0,
            total_delay_min: 0.25,
            failed_blocks:   1,
            recommendation:  "Hold 12001 before UP Blk2, then proceed.".into(),
        })
        .unwrap();
        w.write_alerts(&[AlertRow { at_ms: 1000, severity: "warning".into(), message: "Holding 12001".into() }])
            .unwrap();
        w.finish().unwrap();

        let snaps = records(&dir, "train_snapshots.csv");
        assert_eq!(snaps.len(), 2);
        assert_eq!(&snaps[1][3], "T1");
        assert_eq!(&snaps[1][5], "181.000");

        let summaries = records(&dir, "step_summaries.csv");
        assert_eq!(&summaries[0][3], "1");
        // Commas in free text are quoted, not split.
        assert_eq!(&summaries[0][7], "Hold 12001 before UP Blk2, then proceed.");

        let alerts = records(&dir, "alerts.csv");
        assert_eq!(&alerts[0][1], "warning");
    }

    #[test]
    fn csv_finish_can_repeat() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 1)]).unwrap();
        w.finish().unwrap();
        assert_eq!(records(&dir, "train_snapshots.csv").len(), 1);

        w.write_snapshots(&[snap_row(0, 2), snap_row(1, 2)]).unwrap();
        w.finish().unwrap();
        assert_eq!(records(&dir, "train_snapshots.csv").len(), 3);
    }

    #[test]
    fn every_run_reaches_disk_before_drop() {
        let config = SimConfig { snapshot_interval_steps: 1, ..SimConfig::default() };
        let mut sim = SimBuilder::new().config(config).standard_roster().build().unwrap();

        let dir = tmp();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        sim.run_steps(3, 200, &mut obs);
        assert_eq!(records(&dir, "train_snapshots.csv").len(), 12);

        sim.run_steps(2, 200, &mut obs);
        assert!(obs.take_error().is_none());
        // The observer and its writer are still alive here.
        let rows = records(&dir, "train_snapshots.csv");
        assert_eq!(rows.len(), 20);
        assert_eq!(&rows[19][0], "5");
        assert_eq!(records(&dir, "step_summaries.csv").len(), 5);
        drop(obs);
    }

    #[test]
    fn integration_csv() {
        let config = SimConfig { snapshot_interval_steps: 2, ..SimConfig::default() };
        let mut sim = SimBuilder::new().config(config).standard_roster().build().unwrap();

        let dir = tmp();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        sim.run_steps(10, 200, &mut obs);
        assert!(obs.take_error().is_none(), "no write errors expected");
        assert_eq!(obs.snapshot_rows(), 20);

        // Snapshots at steps 2, 4, 6, 8, 10 for four trains.
        let rows = records(&dir, "train_snapshots.csv");
        assert_eq!(rows.len(), 20);
        assert_eq!(&rows[0][0], "2");
        assert_eq!(&rows[0][3], "12001");
        assert_eq!(records(&dir, "step_summaries.csv").len(), 10);
    }

    #[test]
    fn integration_alerts() {
        let config = SimConfig { speed_multiplier: 20.0, ..SimConfig::default() };
        let mut sim = SimBuilder::new()
            .config(config)
            .train(Train::new("1", "1", Direction::Up, Priority::Low, 130.0, 1030.0).with_dwell_secs(1))
            .build()
            .unwrap();

        let dir = tmp();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        sim.run_steps(5, 1000, &mut obs);
        assert!(obs.take_error().is_none());

        let alerts = records(&dir, "alerts.csv");
        let messages: Vec<_> = alerts.iter().map(|r| r[2].to_owned()).collect();
        assert_eq!(messages, ["1 arrived terminal. Dwell 1s", "1 departed after dwell"]);
    }
}

// ── Error capture ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod error_tests {
    use rail_sim::{SimBuilder, SimObserver};

    use crate::row::{AlertRow, StepSummaryRow, TrainSnapshotRow};
    use crate::writer::OutputWriter;
    use crate::{OutputError, OutputResult, SimOutputObserver};

    /// Fails every summary write with a numbered error.
    #[derive(Default)]
    struct Failing {
        calls: u32,
    }

    impl OutputWriter for Failing {
        fn write_snapshots(&mut self, _rows: &[TrainSnapshotRow]) -> OutputResult<()> {
            Ok(())
        }
        fn write_step_summary(&mut self, _row: &StepSummaryRow) -> OutputResult<()> {
            self.calls += 1;
            Err(OutputError::Io(std::io::Error::other(format!("write {}", self.calls))))
        }
        fn write_alerts(&mut self, _rows: &[AlertRow]) -> OutputResult<()> {
            Ok(())
        }
        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn first_error_is_kept() {
        let mut sim = SimBuilder::new().standard_roster().build().unwrap();
        let mut obs = SimOutputObserver::new(Failing::default());
        sim.run_steps(3, 200, &mut obs);

        let err = obs.take_error().unwrap();
        assert!(err.to_string().contains("write 1"), "got {err}");
        assert!(obs.take_error().is_none());
        assert_eq!(obs.into_writer().calls, 3);
    }

    #[test]
    fn observer_methods_are_infallible() {
        let mut obs = SimOutputObserver::new(Failing::default());
        obs.on_sim_end(0, rail_core::SimTime(0));
        assert!(obs.take_error().is_none());
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use rail_sim::SimBuilder;

    use crate::row::AlertRow;
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;
    use crate::SimOutputObserver;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn sqlite_alerts_stored() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_alerts(&[
            AlertRow { at_ms: 200, severity: "critical".into(), message: "Failure: UP Block 2 failed.".into() },
            AlertRow { at_ms: 400, severity: "clear".into(), message: "All failures cleared.".into() },
        ])
        .unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let severity: String = conn
            .query_row("SELECT severity FROM alerts WHERE at_ms = 200", [], |r| r.get(0))
            .unwrap();
        assert_eq!(severity, "critical");
    }

    #[test]
    fn sqlite_integration_counts() {
        let mut sim = SimBuilder::new().standard_roster().build().unwrap();
        let dir = tmp();
        let mut obs = SimOutputObserver::new(SqliteWriter::new(dir.path()).unwrap());
        sim.run_steps(4, 200, &mut obs);
        sim.run_steps(2, 200, &mut obs);
        assert!(obs.take_error().is_none());

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let snaps: i64 = conn.query_row("SELECT COUNT(*) FROM train_snapshots", [], |r| r.get(0)).unwrap();
        let steps: i64 = conn.query_row("SELECT COUNT(*) FROM step_summaries", [], |r| r.get(0)).unwrap();
        assert_eq!(snaps, 24);
        assert_eq!(steps, 6);
        drop(obs);
    }
}
