//! Load-time structural checks on a parsed machine description.
//!
//! These checks only cover state declarations: the initial state, every
//! accept state, and every state a transition names must appear in the
//! description's `states` list. Symbol membership and state reachability
//! are deliberately not checked; descriptions are permissive there and a
//! stray symbol simply leads to an undefined-transition rejection at run
//! time.

use std::collections::HashSet;

use crate::types::{MachineError, Program};

/// Structural problems found in a machine description.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// The initial state is not in the `states` list.
    UnknownInitialState(String),
    /// Accept states that are not in the `states` list.
    UnknownAcceptStates(Vec<String>),
    /// States named by transitions but missing from the `states` list.
    UndeclaredStates(Vec<String>),
}

impl From<AnalysisError> for MachineError {
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::UnknownInitialState(state) => {
                MachineError::Validation(format!("Initial state '{}' is not declared", state))
            }
            AnalysisError::UnknownAcceptStates(states) => MachineError::Validation(format!(
                "Accept states not declared: {:?}",
                states
            )),
            AnalysisError::UndeclaredStates(states) => MachineError::Validation(format!(
                "Transitions reference undeclared states: {:?}",
                states
            )),
        }
    }
}

/// Analyzes a program, returning the first structural error found.
pub fn analyze(program: &Program) -> Result<(), MachineError> {
    let checks = [
        check_initial_state,
        check_accept_states,
        check_transition_states,
    ];

    match checks.iter().find_map(|check| check(program).err()) {
        Some(error) => Err(error.into()),
        None => Ok(()),
    }
}

fn declared_states(program: &Program) -> HashSet<&str> {
    program.states.iter().map(String::as_str).collect()
}

fn check_initial_state(program: &Program) -> Result<(), AnalysisError> {
    if !declared_states(program).contains(program.initial_state.as_str()) {
        return Err(AnalysisError::UnknownInitialState(
            program.initial_state.clone(),
        ));
    }

    Ok(())
}

fn check_accept_states(program: &Program) -> Result<(), AnalysisError> {
    let declared = declared_states(program);
    let mut unknown: Vec<String> = program
        .accept_states
        .iter()
        .filter(|state| !declared.contains(state.as_str()))
        .cloned()
        .collect();

    if !unknown.is_empty() {
        unknown.sort();
        return Err(AnalysisError::UnknownAcceptStates(unknown));
    }

    Ok(())
}

fn check_transition_states(program: &Program) -> Result<(), AnalysisError> {
    let declared = declared_states(program);
    let mut undeclared: Vec<String> = program
        .table
        .iter()
        .flat_map(|(key, action)| [key.state.as_str(), action.next.as_str()])
        .filter(|state| !declared.contains(state))
        .map(str::to_string)
        .collect();

    if !undeclared.is_empty() {
        undeclared.sort();
        undeclared.dedup();
        return Err(AnalysisError::UndeclaredStates(undeclared));
    }

    Ok(())
}
