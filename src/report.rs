//! Run reporting: consumers of the engine's per-step snapshots.
//!
//! The engine only produces [`Snapshot`] records; everything about how a
//! run is displayed lives here. Verdict computation never depends on a
//! reporter, so the engine can be tested without capturing text output.

use crate::types::{RunRecord, Snapshot, Verdict};

/// Receives the ordered observations of a run.
///
/// All methods default to no-ops so implementations only override what
/// they care about.
pub trait Reporter {
    /// Called once before a run starts.
    fn on_run_start(&mut self, _input: &str) {}

    /// Called for the initial configuration and after every applied step.
    fn on_step(&mut self, _snapshot: &Snapshot) {}

    /// Called once with the run's verdict.
    fn on_verdict(&mut self, _verdict: &Verdict) {}
}

/// Discards every observation.
pub struct NullReporter;

impl Reporter for NullReporter {}

/// Collects snapshots and verdicts in memory. Used by tests and by
/// callers that post-process a trace.
#[derive(Debug, Default)]
pub struct TraceBuffer {
    snapshots: Vec<Snapshot>,
    verdicts: Vec<Verdict>,
}

impl TraceBuffer {
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn verdicts(&self) -> &[Verdict] {
        &self.verdicts
    }
}

impl Reporter for TraceBuffer {
    fn on_step(&mut self, snapshot: &Snapshot) {
        self.snapshots.push(snapshot.clone());
    }

    fn on_verdict(&mut self, verdict: &Verdict) {
        self.verdicts.push(*verdict);
    }
}

/// Prints a step-by-step trace and per-run verdicts to stdout.
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn on_run_start(&mut self, input: &str) {
        println!("{}", "=".repeat(60));
        println!("Running on input: '{}'", input);
        println!("{}", "=".repeat(60));
    }

    fn on_step(&mut self, snapshot: &Snapshot) {
        println!("{}", format_snapshot(snapshot));
    }

    fn on_verdict(&mut self, verdict: &Verdict) {
        match verdict {
            Verdict::Accepted { steps } => println!("\nACCEPTED in {} steps", steps),
            Verdict::Rejected { reason, steps } => {
                println!("\nREJECTED after {} steps: {}", steps, reason)
            }
        }
    }
}

/// Renders one configuration the way the trace prints it: symbols
/// space-separated, with a caret marking the head position.
pub fn format_snapshot(snapshot: &Snapshot) -> String {
    let tape: String = snapshot
        .tape
        .chars()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ");

    // Two columns per cell; a transiently negative head renders at cell 0.
    let indicator_offset = snapshot.head.max(0) as usize * 2;

    let mut out = format!(
        "\nStep {}:\n  State: {}\n  Tape:  {}\n  Head:  {}^",
        snapshot.step,
        snapshot.state,
        tape,
        " ".repeat(indicator_offset),
    );

    if let Some(cache) = snapshot.cache {
        out.push_str(&format!("\n  Cache: {}", cache));
    }

    out
}

/// Renders the batch summary: one ACCEPTED/REJECTED line per input.
pub fn format_summary(records: &[RunRecord]) -> String {
    let mut out = String::from("SUMMARY\n");
    for record in records {
        let status = if record.verdict.is_accepted() {
            "ACCEPTED"
        } else {
            "REJECTED"
        };
        out.push_str(&format!("  '{}': {}\n", record.input, status));
    }
    out
}
