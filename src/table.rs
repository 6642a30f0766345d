//! The transition table: an immutable partial function from a machine
//! configuration key to the action the machine applies.
//!
//! Keys are tagged composite values rather than loose tuples so that a
//! base-machine row and a cached-machine row can never collide by accident.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::Move;

/// The configuration a transition fires on.
///
/// `cache` is `Some` for every row of a cached machine and `None` for
/// every row of a base machine; the loader never mixes the two in one table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key {
    /// Source state.
    pub state: String,
    /// Register value the row fires on (cached machines only).
    pub cache: Option<char>,
    /// Tape symbol under the head.
    pub read: char,
}

/// What the machine does when a row fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// State to enter.
    pub next: String,
    /// Symbol written at the head position.
    pub write: char,
    /// New register value (cached machines only).
    pub cache: Option<char>,
    /// Head movement.
    pub movement: Move,
}

/// The transition function, built once by the loader and read-only afterwards.
///
/// At most one action per key: inserting a duplicate key replaces the
/// earlier row without raising an error. Descriptions that rely on this
/// get last-writer-wins semantics.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransitionTable {
    rows: HashMap<Key, Action>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts one row, silently replacing any earlier row with the same key.
    pub fn insert(&mut self, key: Key, action: Action) {
        self.rows.insert(key, action);
    }

    /// Looks up the action for the given configuration.
    pub fn get(&self, state: &str, cache: Option<char>, read: char) -> Option<&Action> {
        self.rows.get(&Key {
            state: state.to_string(),
            cache,
            read,
        })
    }

    /// Number of rows in the table.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates over all rows, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Action)> {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(next: &str, write: char) -> Action {
        Action {
            next: next.to_string(),
            write,
            cache: None,
            movement: Move::Right,
        }
    }

    #[test]
    fn test_insert_and_get() {
        let mut table = TransitionTable::new();
        table.insert(
            Key {
                state: "q0".to_string(),
                cache: None,
                read: 'a',
            },
            row("q1", 'X'),
        );

        let action = table.get("q0", None, 'a').unwrap();
        assert_eq!(action.next, "q1");
        assert_eq!(action.write, 'X');

        assert!(table.get("q0", None, 'b').is_none());
        assert!(table.get("q1", None, 'a').is_none());
    }

    #[test]
    fn test_duplicate_key_overwrites() {
        let mut table = TransitionTable::new();
        let key = Key {
            state: "q0".to_string(),
            cache: None,
            read: 'a',
        };
        table.insert(key.clone(), row("q1", 'X'));
        table.insert(key, row("q2", 'Y'));

        // Later row wins; no error is raised.
        assert_eq!(table.len(), 1);
        let action = table.get("q0", None, 'a').unwrap();
        assert_eq!(action.next, "q2");
        assert_eq!(action.write, 'Y');
    }

    #[test]
    fn test_cache_dimension_separates_rows() {
        let mut table = TransitionTable::new();
        table.insert(
            Key {
                state: "q0".to_string(),
                cache: Some('0'),
                read: 'a',
            },
            row("q1", 'a'),
        );
        table.insert(
            Key {
                state: "q0".to_string(),
                cache: Some('1'),
                read: 'a',
            },
            row("q2", 'a'),
        );

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("q0", Some('0'), 'a').unwrap().next, "q1");
        assert_eq!(table.get("q0", Some('1'), 'a').unwrap().next, "q2");
        assert!(table.get("q0", None, 'a').is_none());
    }
}
