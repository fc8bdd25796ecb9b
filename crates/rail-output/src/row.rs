//! Plain data row types written by output backends.

use rail_sim::{Alert, StepSummary, TrainSnapshot};
use rail_train::RoutePhase;

/// One train's state at a snapshot step.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainSnapshotRow {
    pub step:        u64,
    pub at_ms:       u64,
    pub train_id:    u32,
    pub number:      String,
    /// Lower-case track name, e.g. `"up"` or `"mid1"`.
    pub track:       &'static str,
    pub position:    f64,
    /// `"Running"`, `"Held"` or `"Wrong-line"`.
    pub status:      String,
    pub delay_min:   f64,
    pub eta_secs:    f64,
    /// Detour phase, or empty when the train is on its own line.
    pub route_phase: &'static str,
}

impl TrainSnapshotRow {
    pub fn from_snapshot(step: u64, at_ms: u64, snap: &TrainSnapshot) -> Self {
        Self {
            step,
            at_ms,
            train_id:    snap.id.0,
            number:      snap.number.clone(),
            track:       snap.track.as_str(),
            position:    snap.position,
            status:      snap.status.to_string(),
            delay_min:   snap.delay_min,
            eta_secs:    snap.eta_secs,
            route_phase: snap.route_phase.map_or("", phase_name),
        }
    }
}

fn phase_name(phase: RoutePhase) -> &'static str {
    match phase {
        RoutePhase::Pre      => "pre",
        RoutePhase::Corridor => "corridor",
        RoutePhase::Post     => "post",
    }
}

/// Aggregate counts after one step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepSummaryRow {
    pub step:            u64,
    pub at_ms:           u64,
    pub running:         u32,
    pub held:            u32,
    pub wrong_line:      u32,
    pub total_delay_min: f64,
    pub failed_blocks:   u32,
    pub recommendation:  String,
}

impl From<&StepSummary> for StepSummaryRow {
    fn from(s: &StepSummary) -> Self {
        Self {
            step:            s.step,
            at_ms:           s.at.0,
            running:         s.running as u32,
            held:            s.held as u32,
            wrong_line:      s.wrong_line as u32,
            total_delay_min: s.total_delay_min,
            failed_blocks:   s.failed_blocks as u32,
            recommendation:  s.recommendation.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertRow {
    pub at_ms:    u64,
    pub severity: String,
    pub message:  String,
}

impl From<&Alert> for AlertRow {
    fn from(a: &Alert) -> Self {
        Self { at_ms: a.at.0, severity: a.severity.to_string(), message: a.message.clone() }
    }
}
