//! Source position tracking for diagnostics.

use std::fmt;

/// Where the scanner currently is in the source.
///
/// Advanced explicitly by the grammar as it consumes bytes. It never
/// influences parse control flow; it only stamps diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Position {
    /// Raw byte offset from the start of input.
    pub offset: usize,
    /// Zero-based line number.
    pub line: usize,
    /// Zero-based column within the line.
    pub column: usize,
}

impl Position {
    /// Account for one ordinary consumed byte.
    pub fn next_column(&mut self) {
        self.offset += 1;
        self.column += 1;
    }

    /// Account for a consumed newline.
    pub fn next_line(&mut self) {
        self.offset += 1;
        self.line += 1;
        self.column = 0;
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}
