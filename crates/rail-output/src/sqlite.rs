//! SQLite output backend (feature `sqlite`).
//!
//! Creates `output.db` in the configured output directory with three tables:
//! `train_snapshots`, `step_summaries` and `alerts`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{AlertRow, OutputResult, StepSummaryRow, TrainSnapshotRow};

pub struct SqliteWriter {
    conn: Connection,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS train_snapshots (
                 step        INTEGER NOT NULL,
                 at_ms       INTEGER NOT NULL,
                 train_id    INTEGER NOT NULL,
                 number      TEXT    NOT NULL,
                 track       TEXT    NOT NULL,
                 position    REAL    NOT NULL,
                 status      TEXT    NOT NULL,
                 delay_min   REAL    NOT NULL,
                 eta_secs    REAL    NOT NULL,
                 route_phase TEXT    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS step_summaries (
                 step            INTEGER PRIMARY KEY,
                 at_ms           INTEGER NOT NULL,
                 running         INTEGER NOT NULL,
                 held            INTEGER NOT NULL,
                 wrong_line      INTEGER NOT NULL,
                 total_delay_min REAL    NOT NULL,
                 failed_blocks   INTEGER NOT NULL,
                 recommendation  TEXT    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS alerts (
                 at_ms    INTEGER NOT NULL,
                 severity TEXT    NOT NULL,
                 message  TEXT    NOT NULL
             );",
        )?;

        Ok(Self { conn })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_snapshots(&mut self, rows: &[TrainSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO train_snapshots \
                 (step, at_ms, train_id, number, track, position, status, delay_min, eta_secs, route_phase) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.step,
                    row.at_ms,
                    row.train_id,
                    row.number,
                    row.track,
                    row.position,
                    row.status,
                    row.delay_min,
                    row.eta_secs,
                    row.route_phase,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO step_summaries \
             (step, at_ms, running, held, wrong_line, total_delay_min, failed_blocks, recommendation) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            rusqlite::params![
                row.step,
                row.at_ms,
                row.running,
                row.held,
                row.wrong_line,
                row.total_delay_min,
                row.failed_blocks,
                row.recommendation,
            ],
        )?;
        Ok(())
    }

    fn write_alerts(&mut self, rows: &[AlertRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt =
                tx.prepare_cached("INSERT INTO alerts (at_ms, severity, message) VALUES (?1, ?2, ?3)")?;
            for row in rows {
                stmt.execute(rusqlite::params![row.at_ms, row.severity, row.message])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
