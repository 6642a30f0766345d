//! This module defines the core data structures shared across the interpreter:
//! machine descriptions, head movement, verdicts, rejection reasons, and error types.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

use crate::table::TransitionTable;

/// The blank symbol filling every tape cell that was never explicitly written.
pub const BLANK_SYMBOL: char = 'B';
/// The left-sentinel symbol seeded at cell 0 by the cached variant.
pub const SENTINEL_SYMBOL: char = '$';
/// The default step ceiling applied when the caller does not supply one.
pub const DEFAULT_MAX_STEPS: usize = 10_000;
/// The maximum allowed size for a machine description in bytes.
pub const MAX_DESCRIPTION_SIZE: usize = 65536; // 64KB

/// A parsed machine description, ready for execution.
///
/// Built by the loader from a JSON key/value document. The transition
/// table is immutable after construction; every run borrows it read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Display name of the machine (optional in the description).
    pub name: String,
    /// The declared state labels.
    pub states: Vec<String>,
    /// Symbols an input string may be drawn from.
    pub input_alphabet: Vec<char>,
    /// Symbols a tape cell may hold.
    pub tape_alphabet: Vec<char>,
    /// The state every run starts in.
    pub initial_state: String,
    /// States in which the machine accepts. May be empty, in which case
    /// no input is ever accepted.
    pub accept_states: HashSet<String>,
    /// The transition function.
    pub table: TransitionTable,
    /// Input strings to run in batch mode.
    pub inputs: Vec<String>,
    /// Auxiliary register parameters; `Some` iff this is a cached machine.
    pub cache: Option<CacheParams>,
}

/// Parameters of the auxiliary single-symbol register ("cache").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheParams {
    /// Symbols the register may hold.
    pub alphabet: Vec<char>,
    /// The register's value when a run starts.
    pub initial: char,
}

impl Default for CacheParams {
    fn default() -> Self {
        Self {
            alphabet: vec![BLANK_SYMBOL],
            initial: BLANK_SYMBOL,
        }
    }
}

impl Program {
    /// Whether this machine carries the auxiliary register.
    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    /// Whether `state` is an accept state.
    pub fn is_accept_state(&self, state: &str) -> bool {
        self.accept_states.contains(state)
    }
}

/// A head movement applied after each transition.
///
/// Description files encode `"L"` and `"R"` explicitly; any other value
/// (including a missing field) means Stay. That fallback is deliberate,
/// not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    /// Move the head one cell to the left.
    Left,
    /// Move the head one cell to the right.
    Right,
    /// Keep the head where it is.
    Stay,
}

impl Move {
    /// Decodes a description-level move code. Unrecognized codes are Stay.
    pub fn from_code(code: &str) -> Self {
        match code {
            "L" => Move::Left,
            "R" => Move::Right,
            _ => Move::Stay,
        }
    }

    /// The signed head displacement this move produces.
    pub fn offset(self) -> i64 {
        match self {
            Move::Left => -1,
            Move::Right => 1,
            Move::Stay => 0,
        }
    }
}

/// Why a run was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// The head would have moved left of cell 0.
    LeftEdgeOverrun,
    /// No table row matches the current configuration.
    NoTransitionDefined,
    /// The step ceiling was reached while still running.
    StepLimitExceeded,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            RejectReason::LeftEdgeOverrun => "head moved off the left end of the tape",
            RejectReason::NoTransitionDefined => "no transition defined",
            RejectReason::StepLimitExceeded => "step limit exceeded",
        };
        f.write_str(msg)
    }
}

/// The terminal outcome of a run, paired with the number of applied steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// The machine reached an accept state.
    Accepted { steps: usize },
    /// The machine rejected; `reason` tells why.
    Rejected { reason: RejectReason, steps: usize },
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted { .. })
    }

    /// The number of transitions applied before the run ended.
    pub fn steps(&self) -> usize {
        match self {
            Verdict::Accepted { steps } | Verdict::Rejected { steps, .. } => *steps,
        }
    }
}

/// The result of running one input: verdict plus the rendered tape.
///
/// For cached machines `output` is the transducer output (sentinel and
/// blanks stripped); for base machines it is the trimmed tape content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunRecord {
    pub input: String,
    pub verdict: Verdict,
    pub output: String,
}

/// One per-step observation of the machine's configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Steps applied so far.
    pub step: usize,
    /// Current state label.
    pub state: String,
    /// Rendered tape content (trailing blanks trimmed).
    pub tape: String,
    /// Head position.
    pub head: i64,
    /// Register value, for cached machines.
    pub cache: Option<char>,
}

/// Errors raised while loading a machine description.
///
/// All of these are fatal to construction: the loader refuses to hand
/// out a partially-populated program. Run-time rejections are not
/// errors; they are `Verdict::Rejected` values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MachineError {
    /// The description document is not valid JSON or misses required fields.
    #[error("description parse error: {0}")]
    Parse(String),
    /// The description is well-formed but structurally inconsistent.
    #[error("description validation error: {0}")]
    Validation(String),
    /// The description file could not be read.
    #[error("file error: {0}")]
    File(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_from_code() {
        assert_eq!(Move::from_code("L"), Move::Left);
        assert_eq!(Move::from_code("R"), Move::Right);
        assert_eq!(Move::from_code("S"), Move::Stay);
        // Unrecognized codes fall back to Stay rather than erroring.
        assert_eq!(Move::from_code("X"), Move::Stay);
        assert_eq!(Move::from_code(""), Move::Stay);
    }

    #[test]
    fn test_move_offset() {
        assert_eq!(Move::Left.offset(), -1);
        assert_eq!(Move::Right.offset(), 1);
        assert_eq!(Move::Stay.offset(), 0);
    }

    #[test]
    fn test_verdict_accessors() {
        let accepted = Verdict::Accepted { steps: 7 };
        assert!(accepted.is_accepted());
        assert_eq!(accepted.steps(), 7);

        let rejected = Verdict::Rejected {
            reason: RejectReason::StepLimitExceeded,
            steps: 100,
        };
        assert!(!rejected.is_accepted());
        assert_eq!(rejected.steps(), 100);
    }

    #[test]
    fn test_reject_reason_display() {
        assert_eq!(
            RejectReason::LeftEdgeOverrun.to_string(),
            "head moved off the left end of the tape"
        );
        assert_eq!(
            RejectReason::NoTransitionDefined.to_string(),
            "no transition defined"
        );
        assert_eq!(
            RejectReason::StepLimitExceeded.to_string(),
            "step limit exceeded"
        );
    }

    #[test]
    fn test_error_display() {
        let error = MachineError::Validation("missing 'states' field".to_string());
        let msg = format!("{}", error);
        assert!(msg.contains("validation"));
        assert!(msg.contains("states"));
    }
}
