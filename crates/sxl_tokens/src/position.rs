//! Row/column positions within a source file

use std::fmt::{Display, Formatter};

/// A 1-based row/column position in a source file.
///
/// Positions attached to tokens denote the position of the *end* of the
/// matched image, after its last character has been consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    line: u32,
    col: u32,
}

impl Position {
    /// Creates a new position
    pub fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }

    /// The 1-based line number
    pub fn line(&self) -> u32 {
        self.line
    }

    /// The column, counting tabs as 4 columns
    pub fn col(&self) -> u32 {
        self.col
    }
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, col: 0 }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}
