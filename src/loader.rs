//! Loading machine descriptions from JSON documents.
//!
//! The description is a key/value document with the fields `states`,
//! `input_alphabet`, `tape_alphabet`, `initial_state`, `accept_states`
//! and `transitions`, plus the optional `name`, `inputs`,
//! `cache_alphabet` and `initial_cache`. A transition entry's `read` and
//! `write` accept either a bare symbol or a list; the loader normalizes
//! both shapes into fixed-arity table rows, so the core only ever sees
//! the normalized form.
//!
//! Loading fails fast: any missing field, malformed symbol, or
//! inconsistent entry refuses to construct a program.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::analyzer::analyze;
use crate::table::{Action, Key, TransitionTable};
use crate::types::{CacheParams, MachineError, Move, Program, MAX_DESCRIPTION_SIZE};

/// Which machine shape a description is loaded as.
///
/// The same document shape serves both variants; the caller picks the
/// interpretation, mirroring the two run entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Plain single-tape machine.
    Base,
    /// Machine with the auxiliary register; transition entries carry
    /// `[tape, cache]` pairs.
    Cached,
}

/// A `read`/`write` field: a bare symbol or a list of symbols.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SymbolField {
    One(String),
    Many(Vec<String>),
}

impl SymbolField {
    fn into_vec(self) -> Vec<String> {
        match self {
            SymbolField::One(symbol) => vec![symbol],
            SymbolField::Many(symbols) => symbols,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TransitionEntry {
    state: String,
    read: SymbolField,
    write: SymbolField,
    #[serde(rename = "move", default)]
    movement: Option<String>,
    next: String,
}

#[derive(Debug, Deserialize)]
struct Description {
    #[serde(default)]
    name: Option<String>,
    states: Vec<String>,
    input_alphabet: Vec<String>,
    tape_alphabet: Vec<String>,
    initial_state: String,
    accept_states: Vec<String>,
    transitions: Vec<TransitionEntry>,
    #[serde(default)]
    inputs: Vec<String>,
    #[serde(default)]
    cache_alphabet: Option<Vec<String>>,
    #[serde(default)]
    initial_cache: Option<String>,
}

/// `ProgramLoader` reads machine descriptions from files or strings.
pub struct ProgramLoader;

impl ProgramLoader {
    /// Loads a description from the given file path.
    pub fn load_program(path: &Path, variant: Variant) -> Result<Program, MachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            MachineError::File(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        parse(&content, variant)
    }

    /// Loads a description from string content, e.g. user input.
    pub fn load_program_from_string(
        content: &str,
        variant: Variant,
    ) -> Result<Program, MachineError> {
        parse(content, variant)
    }
}

/// Parses a JSON description into a validated [`Program`].
pub fn parse(content: &str, variant: Variant) -> Result<Program, MachineError> {
    if content.len() > MAX_DESCRIPTION_SIZE {
        return Err(MachineError::Validation(format!(
            "Description exceeds maximum size of {} bytes",
            MAX_DESCRIPTION_SIZE
        )));
    }

    let description: Description =
        serde_json::from_str(content).map_err(|e| MachineError::Parse(e.to_string()))?;

    let cache = match variant {
        Variant::Base => None,
        Variant::Cached => {
            let defaults = CacheParams::default();
            Some(CacheParams {
                alphabet: match description.cache_alphabet {
                    Some(ref symbols) => parse_alphabet(symbols, "cache_alphabet")?,
                    None => defaults.alphabet,
                },
                initial: match description.initial_cache {
                    Some(ref symbol) => parse_symbol(symbol)?,
                    None => defaults.initial,
                },
            })
        }
    };

    let mut table = TransitionTable::new();
    for entry in description.transitions {
        insert_entry(&mut table, entry, variant)?;
    }

    let program = Program {
        name: description.name.unwrap_or_default(),
        states: description.states,
        input_alphabet: parse_alphabet(&description.input_alphabet, "input_alphabet")?,
        tape_alphabet: parse_alphabet(&description.tape_alphabet, "tape_alphabet")?,
        initial_state: description.initial_state,
        accept_states: description.accept_states.into_iter().collect(),
        table,
        inputs: description.inputs,
        cache,
    };

    analyze(&program)?;

    Ok(program)
}

/// Normalizes one description entry into table rows.
///
/// Base entries zip their `read`/`write` lists positionally, one row per
/// pair, sharing the entry's move and next state. Cached entries are a
/// single `[tape, cache]` pair on each side.
fn insert_entry(
    table: &mut TransitionTable,
    entry: TransitionEntry,
    variant: Variant,
) -> Result<(), MachineError> {
    let movement = Move::from_code(entry.movement.as_deref().unwrap_or(""));
    let read = entry.read.into_vec();
    let write = entry.write.into_vec();

    match variant {
        Variant::Base => {
            if read.len() != write.len() {
                return Err(MachineError::Validation(format!(
                    "Transition for state '{}' has {} read symbols but {} write symbols",
                    entry.state,
                    read.len(),
                    write.len()
                )));
            }

            for (read_symbol, write_symbol) in read.iter().zip(write.iter()) {
                table.insert(
                    Key {
                        state: entry.state.clone(),
                        cache: None,
                        read: parse_symbol(read_symbol)?,
                    },
                    Action {
                        next: entry.next.clone(),
                        write: parse_symbol(write_symbol)?,
                        cache: None,
                        movement,
                    },
                );
            }
        }
        Variant::Cached => {
            if read.len() != 2 || write.len() != 2 {
                return Err(MachineError::Validation(format!(
                    "Cache machine transition for state '{}' requires [tape, cache] pairs",
                    entry.state
                )));
            }

            table.insert(
                Key {
                    state: entry.state,
                    cache: Some(parse_symbol(&read[1])?),
                    read: parse_symbol(&read[0])?,
                },
                Action {
                    next: entry.next,
                    write: parse_symbol(&write[0])?,
                    cache: Some(parse_symbol(&write[1])?),
                    movement,
                },
            );
        }
    }

    Ok(())
}

fn parse_alphabet(symbols: &[String], field: &str) -> Result<Vec<char>, MachineError> {
    symbols
        .iter()
        .map(|s| {
            parse_symbol(s).map_err(|_| {
                MachineError::Validation(format!(
                    "Field '{}' contains non-atomic symbol '{}'",
                    field, s
                ))
            })
        })
        .collect()
}

fn parse_symbol(symbol: &str) -> Result<char, MachineError> {
    let mut chars = symbol.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(MachineError::Validation(format!(
            "Symbol '{}' must be a single character",
            symbol
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    const BASE_DESCRIPTION: &str = r#"{
        "name": "flip",
        "states": ["q0", "qa"],
        "input_alphabet": ["0", "1"],
        "tape_alphabet": ["0", "1", "B"],
        "initial_state": "q0",
        "accept_states": ["qa"],
        "transitions": [
            {"state": "q0", "read": ["0", "1"], "write": ["1", "0"], "move": "R", "next": "q0"},
            {"state": "q0", "read": "B", "write": "B", "next": "qa"}
        ],
        "inputs": ["01", "10"]
    }"#;

    #[test]
    fn test_parse_base_description() {
        let program = parse(BASE_DESCRIPTION, Variant::Base).unwrap();

        assert_eq!(program.name, "flip");
        assert_eq!(program.initial_state, "q0");
        assert!(program.is_accept_state("qa"));
        assert!(!program.is_cached());
        assert_eq!(program.inputs, vec!["01", "10"]);
        assert_eq!(program.input_alphabet, vec!['0', '1']);
    }

    #[test]
    fn test_parse_expands_symbol_lists_positionally() {
        let program = parse(BASE_DESCRIPTION, Variant::Base).unwrap();

        // The two-element lists expand to one row per read/write pair.
        assert_eq!(program.table.len(), 3);
        assert_eq!(program.table.get("q0", None, '0').unwrap().write, '1');
        assert_eq!(program.table.get("q0", None, '1').unwrap().write, '0');
        assert_eq!(program.table.get("q0", None, 'B').unwrap().next, "qa");
    }

    #[test]
    fn test_parse_missing_move_means_stay() {
        let program = parse(BASE_DESCRIPTION, Variant::Base).unwrap();
        let action = program.table.get("q0", None, 'B').unwrap();
        assert_eq!(action.movement, Move::Stay);
    }

    #[test]
    fn test_parse_unrecognized_move_means_stay() {
        let content = BASE_DESCRIPTION.replace("\"move\": \"R\"", "\"move\": \"X\"");
        let program = parse(&content, Variant::Base).unwrap();
        assert_eq!(
            program.table.get("q0", None, '0').unwrap().movement,
            Move::Stay
        );
    }

    #[test]
    fn test_parse_mismatched_read_write_lengths() {
        let content = BASE_DESCRIPTION.replace(r#""write": ["1", "0"]"#, r#""write": ["1"]"#);
        let result = parse(&content, Variant::Base);
        let error = result.unwrap_err();
        assert!(matches!(error, MachineError::Validation(_)));
        assert!(error.to_string().contains("read symbols"));
    }

    #[test]
    fn test_parse_duplicate_keys_last_writer_wins() {
        let content = r#"{
            "states": ["q0", "qa"],
            "input_alphabet": ["a"],
            "tape_alphabet": ["a", "B"],
            "initial_state": "q0",
            "accept_states": ["qa"],
            "transitions": [
                {"state": "q0", "read": "a", "write": "a", "move": "R", "next": "q0"},
                {"state": "q0", "read": "a", "write": "B", "move": "L", "next": "qa"}
            ]
        }"#;

        let program = parse(content, Variant::Base).unwrap();
        assert_eq!(program.table.len(), 1);
        let action = program.table.get("q0", None, 'a').unwrap();
        assert_eq!(action.next, "qa");
        assert_eq!(action.write, 'B');
    }

    #[test]
    fn test_parse_missing_required_field() {
        let content = r#"{
            "states": ["q0"],
            "input_alphabet": ["a"],
            "tape_alphabet": ["a", "B"],
            "accept_states": [],
            "transitions": []
        }"#;

        let result = parse(content, Variant::Base);
        let error = result.unwrap_err();
        assert!(matches!(error, MachineError::Parse(_)));
        assert!(error.to_string().contains("initial_state"));
    }

    #[test]
    fn test_parse_multi_character_symbol() {
        let content = BASE_DESCRIPTION.replace(r#""read": "B""#, r#""read": "BB""#);
        let result = parse(&content, Variant::Base);
        assert!(matches!(result, Err(MachineError::Validation(_))));
    }

    const CACHED_DESCRIPTION: &str = r#"{
        "name": "copy-one",
        "states": ["q0", "q1", "qa"],
        "input_alphabet": ["1"],
        "tape_alphabet": ["1", "$", "B"],
        "initial_state": "q0",
        "accept_states": ["qa"],
        "cache_alphabet": ["B", "1"],
        "initial_cache": "B",
        "transitions": [
            {"state": "q0", "read": ["1", "B"], "write": ["1", "1"], "move": "R", "next": "q1"},
            {"state": "q1", "read": ["B", "1"], "write": ["1", "B"], "move": "S", "next": "qa"}
        ]
    }"#;

    #[test]
    fn test_parse_cached_description() {
        let program = parse(CACHED_DESCRIPTION, Variant::Cached).unwrap();

        assert!(program.is_cached());
        let cache = program.cache.as_ref().unwrap();
        assert_eq!(cache.alphabet, vec!['B', '1']);
        assert_eq!(cache.initial, 'B');

        // Rows key on the [tape, cache] pair.
        let action = program.table.get("q0", Some('B'), '1').unwrap();
        assert_eq!(action.next, "q1");
        assert_eq!(action.cache, Some('1'));
        assert!(program.table.get("q0", None, '1').is_none());
    }

    #[test]
    fn test_parse_cached_defaults_to_blank_register() {
        let content = CACHED_DESCRIPTION
            .replace(r#""cache_alphabet": ["B", "1"],"#, "")
            .replace(r#""initial_cache": "B","#, "");

        let program = parse(&content, Variant::Cached).unwrap();
        let cache = program.cache.as_ref().unwrap();
        assert_eq!(cache.alphabet, vec!['B']);
        assert_eq!(cache.initial, 'B');
    }

    #[test]
    fn test_parse_cached_rejects_scalar_fields() {
        let content = CACHED_DESCRIPTION.replace(r#""read": ["1", "B"]"#, r#""read": "1""#);
        let result = parse(&content, Variant::Cached);
        let error = result.unwrap_err();
        assert!(matches!(error, MachineError::Validation(_)));
        assert!(error.to_string().contains("[tape, cache]"));
    }

    #[test]
    fn test_parse_oversized_description() {
        let padding = " ".repeat(MAX_DESCRIPTION_SIZE);
        let content = format!("{}{}", BASE_DESCRIPTION, padding);
        let result = parse(&content, Variant::Base);
        assert!(matches!(result, Err(MachineError::Validation(_))));
    }

    #[test]
    fn test_load_program_from_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("flip.json");

        let mut file = File::create(&file_path).unwrap();
        file.write_all(BASE_DESCRIPTION.as_bytes()).unwrap();

        let program = ProgramLoader::load_program(&file_path, Variant::Base).unwrap();
        assert_eq!(program.name, "flip");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = ProgramLoader::load_program(&dir.path().join("absent.json"), Variant::Base);
        assert!(matches!(result, Err(MachineError::File(_))));
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("broken.json");

        let mut file = File::create(&file_path).unwrap();
        file.write_all(b"this is not a machine description").unwrap();

        let result = ProgramLoader::load_program(&file_path, Variant::Base);
        assert!(matches!(result, Err(MachineError::Parse(_))));
    }
}
