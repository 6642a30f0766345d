//! The machine tape: a left-bounded, right-unbounded symbol sequence.
//!
//! Cells to the right are materialized lazily with the blank symbol, so
//! the stored length is an implementation artifact rather than machine
//! state. The left bound at cell 0 is a hard invariant; reading a
//! negative position signals [`OutOfBounds`] and the engine maps that to
//! a rejection.

use crate::types::BLANK_SYMBOL;

/// Signalled when a read addresses a position left of cell 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfBounds;

/// A mutable tape with a blank-fill policy on out-of-range reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<char>,
    blank: char,
}

impl Tape {
    /// Creates a tape holding `input` followed by a single blank cell.
    pub fn new(input: &str) -> Self {
        let mut cells: Vec<char> = input.chars().collect();
        cells.push(BLANK_SYMBOL);
        Self {
            cells,
            blank: BLANK_SYMBOL,
        }
    }

    /// Creates a tape holding `sentinel`, then `input`, then a blank cell.
    /// Used by cached machines, which start the head at cell 1.
    pub fn with_sentinel(input: &str, sentinel: char) -> Self {
        let mut cells = vec![sentinel];
        cells.extend(input.chars());
        cells.push(BLANK_SYMBOL);
        Self {
            cells,
            blank: BLANK_SYMBOL,
        }
    }

    /// Reads the symbol at `position`.
    ///
    /// A negative position signals [`OutOfBounds`]. A position at or past
    /// the materialized length extends the tape with blanks to exactly
    /// `position + 1` cells and returns the blank.
    pub fn read(&mut self, position: i64) -> Result<char, OutOfBounds> {
        if position < 0 {
            return Err(OutOfBounds);
        }

        let index = position as usize;
        if index >= self.cells.len() {
            self.cells.resize(index + 1, self.blank);
        }

        Ok(self.cells[index])
    }

    /// Overwrites the symbol at `position`.
    ///
    /// The engine always reads a cell before writing it, so `position`
    /// is in bounds here.
    pub fn write(&mut self, position: usize, symbol: char) {
        self.cells[position] = symbol;
    }

    /// The number of materialized cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The materialized cells, blanks included.
    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    /// Renders the tape content with trailing blanks trimmed.
    /// An all-blank tape renders as a single blank symbol.
    pub fn render(&self) -> String {
        let trimmed = self
            .cells
            .len()
            .saturating_sub(self.cells.iter().rev().take_while(|&&c| c == self.blank).count());

        if trimmed == 0 {
            return self.blank.to_string();
        }

        self.cells[..trimmed].iter().collect()
    }

    /// The transducer output: every cell except blanks and `sentinel`,
    /// in tape order.
    pub fn output(&self, sentinel: char) -> String {
        self.cells
            .iter()
            .filter(|&&c| c != self.blank && c != sentinel)
            .collect()
    }
}
