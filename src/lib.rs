//! This crate implements a configurable Turing machine interpreter.
//! Given a declarative machine description (states, alphabets, transition
//! function, accept states) and one or more input strings, it simulates
//! execution step-by-step and reports acceptance, rejection, or
//! non-termination bounded by a step limit. A second variant augments the
//! machine with a single persistent auxiliary register ("cache") read and
//! written alongside the tape symbol at every transition.

pub mod analyzer;
pub mod loader;
pub mod machine;
pub mod programs;
pub mod report;
pub mod table;
pub mod tape;
pub mod types;

/// Re-exports the `analyze` function and `AnalysisError` enum from the analyzer module.
pub use analyzer::{analyze, AnalysisError};
/// Re-exports the description loader and the machine variant selector.
pub use loader::{parse, ProgramLoader, Variant};
/// Re-exports the execution engine and its run entry points.
pub use machine::{run, run_all, run_all_with_reporter, run_with_reporter, TuringMachine};
/// Re-exports `ProgramInfo`, `ProgramManager`, and `PROGRAMS` from the programs module.
pub use programs::{ProgramInfo, ProgramManager, PROGRAMS};
/// Re-exports the reporter trait and its stock implementations.
pub use report::{ConsoleReporter, NullReporter, Reporter, TraceBuffer};
/// Re-exports the transition table and its row types.
pub use table::{Action, Key, TransitionTable};
/// Re-exports the tape.
pub use tape::Tape;
/// Re-exports the core data types of machine descriptions and run results.
pub use types::{
    MachineError, Move, Program, RejectReason, RunRecord, Snapshot, Verdict, BLANK_SYMBOL,
    DEFAULT_MAX_STEPS, MAX_DESCRIPTION_SIZE, SENTINEL_SYMBOL,
};
