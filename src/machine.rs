//! This module defines the `TuringMachine` struct, the execution engine that
//! drives one input through the transition table to a verdict.
//!
//! Both machine variants share this engine: a cached machine differs only in
//! how its tape is seeded (a `$` sentinel at cell 0, head starting at cell 1)
//! and in carrying the register value through every lookup. Per-run state is
//! created fresh by [`TuringMachine::new`] and discarded after the verdict;
//! nothing persists between runs except the borrowed, read-only program.

use crate::report::{NullReporter, Reporter};
use crate::tape::Tape;
use crate::types::{Program, RejectReason, RunRecord, Snapshot, Verdict, SENTINEL_SYMBOL};

/// The outcome of a single engine step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A transition was applied; the machine keeps running.
    Continue,
    /// The run ended with the given verdict.
    Done(Verdict),
}

/// A single run of a machine on one input.
///
/// Borrows the program read-only, so independent runs can share one
/// program (and could do so concurrently; no run mutates another's state).
pub struct TuringMachine<'a> {
    program: &'a Program,
    state: String,
    tape: Tape,
    head: i64,
    cache: Option<char>,
    steps: usize,
}

impl<'a> TuringMachine<'a> {
    /// Creates a fresh run configuration for `input`.
    ///
    /// Base machines start with the head at cell 0. Cached machines seed
    /// the tape with the sentinel, start the head at cell 1, and load the
    /// register with the description's initial cache symbol.
    pub fn new(program: &'a Program, input: &str) -> Self {
        let (tape, head, cache) = match &program.cache {
            Some(params) => (
                Tape::with_sentinel(input, SENTINEL_SYMBOL),
                1,
                Some(params.initial),
            ),
            None => (Tape::new(input), 0, None),
        };

        Self {
            program,
            state: program.initial_state.clone(),
            tape,
            head,
            cache,
            steps: 0,
        }
    }

    /// Executes a single step.
    ///
    /// The order of checks is load-bearing: acceptance is checked before
    /// the head position, so a machine that is simultaneously in an accept
    /// state and off the left edge accepts.
    pub fn step(&mut self) -> Step {
        if self.program.is_accept_state(&self.state) {
            return Step::Done(Verdict::Accepted { steps: self.steps });
        }

        let symbol = match self.tape.read(self.head) {
            Ok(symbol) => symbol,
            Err(_) => {
                return Step::Done(Verdict::Rejected {
                    reason: RejectReason::LeftEdgeOverrun,
                    steps: self.steps,
                });
            }
        };

        let action = match self.program.table.get(&self.state, self.cache, symbol) {
            Some(action) => action.clone(),
            None => {
                return Step::Done(Verdict::Rejected {
                    reason: RejectReason::NoTransitionDefined,
                    steps: self.steps,
                });
            }
        };

        // The read above materialized the cell, so the head is in bounds.
        self.tape.write(self.head as usize, action.write);
        self.cache = action.cache;
        self.head += action.movement.offset();
        self.state = action.next;
        self.steps += 1;

        Step::Continue
    }

    /// Runs to a verdict without reporting.
    pub fn run(&mut self, max_steps: usize) -> Verdict {
        self.run_with_reporter(max_steps, &mut NullReporter)
    }

    /// Runs to a verdict, emitting one snapshot for the initial
    /// configuration and one after every applied transition.
    ///
    /// Reporting is observation only; it never affects the verdict.
    pub fn run_with_reporter<R: Reporter>(&mut self, max_steps: usize, reporter: &mut R) -> Verdict {
        reporter.on_step(&self.snapshot());

        while self.steps < max_steps {
            match self.step() {
                Step::Continue => reporter.on_step(&self.snapshot()),
                Step::Done(verdict) => {
                    reporter.on_verdict(&verdict);
                    return verdict;
                }
            }
        }

        let verdict = Verdict::Rejected {
            reason: RejectReason::StepLimitExceeded,
            steps: self.steps,
        };
        reporter.on_verdict(&verdict);
        verdict
    }

    /// The current state label.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// The current head position.
    pub fn head(&self) -> i64 {
        self.head
    }

    /// The number of transitions applied so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// The current register value, for cached machines.
    pub fn cache(&self) -> Option<char> {
        self.cache
    }

    /// The run's tape.
    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// The run's output string: for cached machines the tape content with
    /// sentinel and blanks stripped, for base machines the trimmed tape.
    pub fn output(&self) -> String {
        if self.program.is_cached() {
            self.tape.output(SENTINEL_SYMBOL)
        } else {
            self.tape.render()
        }
    }

    /// The current configuration as an observation record.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            step: self.steps,
            state: self.state.clone(),
            tape: self.tape.render(),
            head: self.head,
            cache: self.cache,
        }
    }
}

/// Runs one input to a verdict with the default step ceiling behavior.
pub fn run(program: &Program, input: &str, max_steps: usize) -> RunRecord {
    run_with_reporter(program, input, max_steps, &mut NullReporter)
}

/// Runs one input, forwarding snapshots to `reporter`.
pub fn run_with_reporter<R: Reporter>(
    program: &Program,
    input: &str,
    max_steps: usize,
    reporter: &mut R,
) -> RunRecord {
    reporter.on_run_start(input);

    let mut machine = TuringMachine::new(program, input);
    let verdict = machine.run_with_reporter(max_steps, reporter);

    RunRecord {
        input: input.to_string(),
        verdict,
        output: machine.output(),
    }
}

/// Runs every input in the description's `inputs` list, in order.
pub fn run_all(program: &Program, max_steps: usize) -> Vec<RunRecord> {
    run_all_with_reporter(program, max_steps, &mut NullReporter)
}

/// Batch variant of [`run_with_reporter`].
pub fn run_all_with_reporter<R: Reporter>(
    program: &Program,
    max_steps: usize,
    reporter: &mut R,
) -> Vec<RunRecord> {
    program
        .inputs
        .iter()
        .map(|input| run_with_reporter(program, input, max_steps, reporter))
        .collect()
}
