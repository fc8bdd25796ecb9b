//! corridor: drives the reference corridor through a failure and a bypass.
//!
//! ```text
//! corridor [CONFIG.json] [SCRIPT]
//! ```
//!
//! `CONFIG.json` overrides any `SimConfig` field; missing fields keep their
//! defaults.  `SCRIPT` holds one command per line (`run 150`, `fail up 1`,
//! `apply`, `hold 12001`, ...); `#` starts a comment.  Without a script the
//! built-in scenario below runs.  Set `RUST_LOG=debug` to see movement and
//! planner decisions.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;

use rail_core::SimConfig;
use rail_output::{CsvWriter, OutputWriter, SimOutputObserver};
use rail_sim::{Command, CommandOutcome, Sim, SimBuilder};

// ── Constants ─────────────────────────────────────────────────────────────────

const OUTPUT_DIR: &str = "output/corridor";

// Failure on UP block 2 while the express is approaching, then a reroute
// through the left corridor and a second failure further down.
const SCENARIO: &str = "\
run 100
fail up 1
apply
speed 4
run 150
hold 9F201
run 50
fail down 2
replan
run 150
clear
run 100
";

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => load_config(Path::new(&path))?,
        None => SimConfig::default(),
    };
    let script = match args.next() {
        Some(path) => std::fs::read_to_string(&path).with_context(|| format!("reading script {path}"))?,
        None => SCENARIO.to_owned(),
    };

    println!("=== corridor dispatch ===");
    println!(
        "speed x{}  |  step {} ms  |  hold {} s",
        config.speed_multiplier,
        config.step_ms,
        config.manual_hold_ms / 1000
    );
    println!();

    let step_ms = config.step_ms;
    let mut sim = SimBuilder::new().config(config).standard_roster().build()?;

    std::fs::create_dir_all(OUTPUT_DIR)?;
    let mut obs = SimOutputObserver::new(CsvWriter::new(Path::new(OUTPUT_DIR))?);

    let t0 = Instant::now();
    for (n, line) in script.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        if let Some(steps) = line.strip_prefix("run ") {
            let steps: u64 = steps.trim().parse().with_context(|| format!("line {}: bad step count", n + 1))?;
            sim.run_steps(steps, step_ms, &mut obs);
            continue;
        }
        let command: Command = line.parse().with_context(|| format!("line {}", n + 1))?;
        info!("script: {line}");
        let outcome = sim.execute(command);
        report(&sim, line, outcome);
    }
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }
    obs.into_writer().finish()?;

    println!();
    println!("Simulated {} in {:.3} s ({} steps)", sim.clock().now, elapsed.as_secs_f64(), sim.clock().steps);
    println!("Output written to {OUTPUT_DIR}/");
    println!();
    print_table(&sim);
    println!();
    println!("Recommendation: {}", sim.recommendation_text());
    println!();
    println!("Recent alerts:");
    for alert in sim.alerts().iter() {
        println!("  {alert}");
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<SimConfig> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config: SimConfig = serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

fn report(sim: &Sim, line: &str, outcome: CommandOutcome) {
    let detail = match outcome {
        CommandOutcome::Changed(false) => "ignored".to_owned(),
        CommandOutcome::Toggled(None) => "unknown train".to_owned(),
        CommandOutcome::Rerouted(Err(refusal)) => format!("refused: {refusal}"),
        CommandOutcome::Replanned(n) => format!("{n} rerouted"),
        _ => "ok".to_owned(),
    };
    println!("[{}] {line:<14} {detail}", sim.clock().now);
}

fn print_table(sim: &Sim) {
    println!(
        "{:<8} {:<18} {:<5} {:<5} {:>8} {:<11} {:>7} {:>8}",
        "Train", "Name", "Dir", "Track", "Pos", "Status", "Delay", "ETA"
    );
    println!("{}", "-".repeat(78));
    for row in sim.snapshot() {
        println!(
            "{:<8} {:<18} {:<5} {:<5} {:>8.1} {:<11} {:>7} {:>8}",
            row.number,
            row.name,
            row.direction.to_string(),
            row.track.as_str(),
            row.position,
            row.status.to_string(),
            row.delay_label(),
            row.eta_label(),
        );
    }
}
