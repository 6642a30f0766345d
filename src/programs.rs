//! Embedded demo machine descriptions and a registry for looking them up.

use crate::loader::{parse, Variant};
use crate::types::{MachineError, Program};

use std::sync::RwLock;

// Default embedded machines
const MACHINE_TEXTS: [(&str, Variant); 3] = [
    (include_str!("../machines/anbn.json"), Variant::Base),
    (include_str!("../machines/even-zeros.json"), Variant::Base),
    (include_str!("../machines/reverse.json"), Variant::Cached),
];

lazy_static::lazy_static! {
    pub static ref PROGRAMS: RwLock<Vec<Program>> = RwLock::new(Vec::new());
}

pub struct ProgramManager;

impl ProgramManager {
    /// Parses and stores the embedded machine descriptions.
    pub fn load() -> Result<(), MachineError> {
        let mut programs = Vec::new();

        for (text, variant) in MACHINE_TEXTS {
            programs.push(parse(text, variant)?);
        }

        if let Ok(mut write_guard) = PROGRAMS.write() {
            *write_guard = programs;
        } else {
            return Err(MachineError::File(
                "Failed to acquire write lock".to_string(),
            ));
        }

        Ok(())
    }

    /// The number of available machines.
    pub fn get_program_count() -> usize {
        let _ = Self::load();

        PROGRAMS.read().map(|programs| programs.len()).unwrap_or(0)
    }

    /// Fetches a machine by its index.
    pub fn get_program_by_index(index: usize) -> Result<Program, MachineError> {
        let _ = Self::load();

        PROGRAMS
            .read()
            .map_err(|_| MachineError::File("Failed to acquire read lock".to_string()))?
            .get(index)
            .cloned()
            .ok_or_else(|| {
                MachineError::Validation(format!("Program index {} out of range", index))
            })
    }

    /// Fetches a machine by its description name.
    pub fn get_program_by_name(name: &str) -> Result<Program, MachineError> {
        let _ = Self::load();

        PROGRAMS
            .read()
            .map_err(|_| MachineError::File("Failed to acquire read lock".to_string()))?
            .iter()
            .find(|program| program.name == name)
            .cloned()
            .ok_or_else(|| MachineError::Validation(format!("Program '{}' not found", name)))
    }

    /// Lists the names of all embedded machines.
    pub fn list_program_names() -> Vec<String> {
        let _ = Self::load();

        PROGRAMS
            .read()
            .map(|programs| {
                programs
                    .iter()
                    .map(|program| program.name.clone())
                    .collect()
            })
            .unwrap_or_else(|_| Vec::new())
    }

    /// Summarizes a machine by its index.
    pub fn get_program_info(index: usize) -> Result<ProgramInfo, MachineError> {
        let program = Self::get_program_by_index(index)?;

        Ok(ProgramInfo {
            index,
            name: program.name.clone(),
            initial_state: program.initial_state.clone(),
            state_count: program.states.len(),
            transition_count: program.table.len(),
            cached: program.is_cached(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ProgramInfo {
    pub index: usize,
    pub name: String,
    pub initial_state: String,
    pub state_count: usize,
    pub transition_count: usize,
    pub cached: bool,
}
