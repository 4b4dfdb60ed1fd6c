//! # Parser - Single-Pass Tree Construction
//!
//! The parser pulls bytes from a [`ByteScanner`] and builds the element tree
//! directly through a cursor ([`TreeBuilder`]). There is no token stream
//! and no backtracking: every routine reads at most one byte ahead and may
//! push that byte back before handing control to another routine.
//!
//! ```text
//! bytes → document → line ─┬─ header → bullet
//!                          │          └ text_line ─ link
//!                          └─ text_line ─ link ─ text_line
//! ```
//!
//! ## Cursor Discipline
//!
//! Every routine that opens an element closes it before returning, even
//! when it bails out on malformed input. Routines that can bail out early
//! are split in two: an outer function that opens and closes, and an inner
//! `*_body` function that is free to `return` at any point.
//!
//! ## Error Recovery
//!
//! Errors are recorded as [`Diagnostic`]s and never propagate. The worst a
//! malformed line can do is truncate its own output; the surrounding
//! well-formed content still ends up in the tree.
//!
//! ## Public API
//!
//! ```
//! use orgwiki_syntax::{parse_str, ElementKind};
//!
//! let output = parse_str("* Hello\n");
//! let tree = output.tree.unwrap();
//! let header = tree.children(tree.root())[0];
//! assert_eq!(tree[header].kind(), ElementKind::Header);
//! assert!(output.diagnostics.is_empty());
//! ```

pub mod builder;
pub mod diagnostics;

mod grammar;

use std::io::Read;

use crate::position::Position;
use crate::scanner::{ByteScanner, ReaderScanner, SliceScanner};
use crate::tree::{ElementKind, ElementTree};
use builder::TreeBuilder;
use diagnostics::{Diagnostic, ParseError, Routine};

/// Result of a parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutput {
    /// `None` when the input was empty.
    pub tree: Option<ElementTree>,
    /// Problems found along the way, in source order.
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutput {
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Parser state for one document.
///
/// A parser is consumed by [`parse`](Parser::parse); concurrent parses need
/// their own instances.
pub struct Parser<S> {
    scanner: S,
    tree: TreeBuilder,
    position: Position,
    diagnostics: Vec<Diagnostic>,
}

impl<S: ByteScanner> Parser<S> {
    pub fn new(scanner: S) -> Self {
        Self {
            scanner,
            tree: TreeBuilder::new(),
            position: Position::default(),
            diagnostics: Vec::new(),
        }
    }

    /// Parse the whole input.
    pub fn parse(mut self) -> ParseOutput {
        if self.at_end() {
            log::debug!("empty input, no document");
            return ParseOutput {
                tree: None,
                diagnostics: self.diagnostics,
            };
        }

        grammar::document(&mut self);

        let tree = self.tree.finish();
        log::debug!(
            "parsed {} bytes into {} elements with {} diagnostics",
            self.position.offset,
            tree.len(),
            self.diagnostics.len()
        );
        ParseOutput {
            tree: Some(tree),
            diagnostics: self.diagnostics,
        }
    }

    // --- input ---

    fn read(&mut self) -> Option<u8> {
        self.scanner.read_byte()
    }

    fn unread(&mut self) {
        self.scanner.unread_byte();
    }

    fn at_end(&mut self) -> bool {
        match self.read() {
            Some(_) => {
                self.unread();
                false
            }
            None => true,
        }
    }

    fn next_column(&mut self) {
        self.position.next_column();
    }

    fn next_line(&mut self) {
        self.position.next_line();
    }

    fn report(&mut self, routine: Routine, error: ParseError) {
        self.diagnostics.push(Diagnostic {
            error,
            routine,
            position: self.position,
        });
    }

    // --- tree ---

    fn open(&mut self, kind: ElementKind) {
        self.tree.open(kind);
    }

    fn close(&mut self) {
        self.tree.close();
    }

    fn open_if_absent(&mut self, kind: ElementKind) {
        self.tree.open_if_absent(kind);
    }

    fn close_if_present(&mut self, kind: ElementKind) {
        self.tree.close_if_present(kind);
    }

    fn current_kind(&self) -> ElementKind {
        self.tree.current_kind()
    }

    fn parent_kind(&self) -> Option<ElementKind> {
        self.tree.parent_kind()
    }
}

/// Parse wiki markup held in memory.
pub fn parse(source: &[u8]) -> ParseOutput {
    Parser::new(SliceScanner::new(source)).parse()
}

/// Parse wiki markup from a string.
pub fn parse_str(source: &str) -> ParseOutput {
    parse(source.as_bytes())
}

/// Parse wiki markup from a reader. Read failures end the input.
pub fn parse_reader<R: Read>(reader: R) -> ParseOutput {
    Parser::new(ReaderScanner::new(reader)).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_empty_input() {
        let output = parse_str("");
        assert_eq!(output.tree, None);
        assert!(!output.has_diagnostics());
    }

    #[test]
    fn parse_blank_line_gives_empty_document() {
        let tree = parse_str("\n").tree.unwrap();
        assert_eq!(tree[tree.root()].kind(), ElementKind::Document);
        assert!(tree.children(tree.root()).is_empty());
    }

    #[test]
    fn reader_and_slice_agree() {
        let input = "* Title\nsome [[page][text]] here\n\nmore\n";
        assert_eq!(parse_reader(input.as_bytes()), parse_str(input));
    }

    #[test]
    fn position_counts_every_byte_of_clean_input() {
        let mut parser = Parser::new(SliceScanner::new(b"* A\nb\n"));
        grammar::document(&mut parser);
        assert_eq!(
            parser.position,
            Position {
                offset: 6,
                line: 2,
                column: 0
            }
        );
    }
}
